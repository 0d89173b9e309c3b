//! Data models for requests, responses and variables.
//!
//! This module contains the core data structures shared by the substitution
//! engine, the route codec, the code generator and the stores.

pub mod request;
pub mod response;
pub mod variable;

pub use request::{Header, HttpMethod, RequestState};
pub use response::ResponseState;
pub use variable::Variable;
