//! Movie catalog data model and input validation.
//!
//! This crate defines the records exchanged between the HTTP boundary and the
//! storage layer without any database dependencies. `movie-vault-db` persists
//! these types; `movie-vault-server` decodes and validates them.

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{validate_movie, ValidationError, MAX_DIRECTOR_AGE, MAX_RATING};
