//! Field-level validation for incoming movie payloads.

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::types::NewMovie;

/// Highest accepted movie rating.
pub const MAX_RATING: i64 = 10;

/// Highest accepted director age.
pub const MAX_DIRECTOR_AGE: i64 = 110;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Validation failed: {0}")]
    Invalid(#[from] ValidationErrors),
}

impl ValidationError {
    /// Flattened, sorted list of the messages attached to each failing field.
    pub fn messages(&self) -> Vec<String> {
        let Self::Invalid(errors) = self;
        let mut out = Vec::new();
        collect_messages(errors, "", &mut out);
        out.sort();
        out
    }
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            validator::ValidationErrorsKind::Field(list) => {
                for e in list {
                    match &e.message {
                        Some(msg) => out.push(format!("{path}: {msg}")),
                        None => out.push(format!("{path}: {}", e.code)),
                    }
                }
            }
            validator::ValidationErrorsKind::Struct(inner) => {
                collect_messages(inner, &path, out);
            }
            validator::ValidationErrorsKind::List(items) => {
                for (i, inner) in items {
                    collect_messages(inner, &format!("{path}[{i}]"), out);
                }
            }
        }
    }
}

/// Validate a movie payload before it is handed to the storage layer.
pub fn validate_movie(movie: &NewMovie) -> Result<(), ValidationError> {
    movie.validate()?;
    Ok(())
}
