//! Data model types for the movie catalog.
//!
//! Stored records (`Movie`, `Director`, `Cast`) carry store-assigned ids.
//! Incoming payloads (`NewMovie`, `NewDirector`, `NewCast`) carry none and are
//! validated before they reach the storage layer.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{MAX_DIRECTOR_AGE, MAX_RATING};

// ── Stored records ──────────────────────────────────────────────────────────

/// A director row. Deduplicated by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

/// A cast row. Deduplicated by the `(actor, actress)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cast {
    pub id: i64,
    pub actor: String,
    pub actress: String,
}

/// A movie joined with the director and cast it references.
///
/// `director` and `cast` are `None` only if the referenced row is missing,
/// which the schema's foreign keys prevent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    /// Serialized as `name` to keep the established wire format.
    #[serde(rename = "name", alias = "title")]
    pub title: String,
    pub rating: i64,
    pub director: Option<Director>,
    pub cast: Option<Cast>,
}

// ── Incoming payloads ───────────────────────────────────────────────────────

/// Director fields supplied by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewDirector {
    #[validate(length(min = 1, message = "director name is required"))]
    pub name: String,
    #[validate(range(min = 0, max = MAX_DIRECTOR_AGE, message = "director age must be between 0 and 110"))]
    pub age: i64,
}

/// Cast fields supplied by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewCast {
    #[validate(length(min = 1, message = "actor is required"))]
    pub actor: String,
    #[validate(length(min = 1, message = "actress is required"))]
    pub actress: String,
}

/// A movie as submitted for creation or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewMovie {
    #[serde(rename = "name", alias = "title")]
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(range(min = 0, max = MAX_RATING, message = "rating must be between 0 and 10"))]
    pub rating: i64,
    #[validate(nested)]
    pub director: NewDirector,
    #[validate(nested)]
    pub cast: NewCast,
}

impl NewMovie {
    pub fn new(
        title: impl Into<String>,
        rating: i64,
        director: NewDirector,
        cast: NewCast,
    ) -> Self {
        Self {
            title: title.into(),
            rating,
            director,
            cast,
        }
    }
}

impl NewDirector {
    pub fn new(name: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}

impl NewCast {
    pub fn new(actor: impl Into<String>, actress: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            actress: actress.into(),
        }
    }
}
