//! Error type shared by the create, read, update and delete paths.

use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: &'static str, id: i64 },
    #[error("Integrity error: {0}")]
    Integrity(String),
    #[error("Deadline exceeded before the operation completed")]
    DeadlineExceeded,
}

impl StoreError {
    pub(crate) fn movie_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "movie",
            id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(
                ffi::Error {
                    code: rusqlite::ErrorCode::OperationInterrupted,
                    ..
                },
                _,
            ) => Self::DeadlineExceeded,
            rusqlite::Error::SqliteFailure(
                ffi::Error {
                    extended_code: ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                    ..
                },
                msg,
            ) => Self::Integrity(
                msg.clone()
                    .unwrap_or_else(|| "FOREIGN KEY constraint failed".to_string()),
            ),
            _ => Self::Sqlite(e),
        }
    }
}
