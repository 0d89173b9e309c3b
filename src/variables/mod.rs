//! Variables module
//!
//! This module provides `{{variable}}` substitution for request text and the
//! persistent store holding the user's variables.

pub mod store;
pub mod substitution;

pub use store::VariableStore;
pub use substitution::{
    extract_variable_names, has_variables, substitute_request, substitute_variables,
};
