//! User-defined variables.

use serde::{Deserialize, Serialize};

/// A named value substituted into `{{key}}` tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
}

impl Variable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Placeholder rows have no value yet and are never persisted.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
