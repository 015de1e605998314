//! HTTP boundary for the movie catalog.
//!
//! Decodes and validates requests, maps store errors to status codes, and
//! hands work to a [`movie_vault_db::MovieRepository`].

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod server;

pub use config::Config;
pub use error::{ApiError, ServerError};
pub use routes::{AppState, router};
