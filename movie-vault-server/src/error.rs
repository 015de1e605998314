use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use movie_vault_core::ValidationError;
use movie_vault_db::{SchemaError, StoreError};
use serde::Serialize;
use thiserror::Error;

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration file missing or invalid
    #[error("Config error: {0}")]
    Config(String),

    /// Database could not be opened or its schema created
    #[error("Database error: {0}")]
    Schema(#[from] SchemaError),

    /// Logger could not be installed
    #[error("Logging error: {0}")]
    Logging(String),

    /// Runtime creation error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl ServerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }

    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}

/// Errors returned by request handlers, rendered as JSON error bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request (bad id, bad query, undecodable body)
    #[error("{0}")]
    BadRequest(String),

    #[error("{}", .0.messages().join(", "))]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Store(#[from] StoreError),

    /// Worker task failed
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::DeadlineExceeded) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::warn!("{self}");
        }
        let body = ErrorBody {
            status: "Error",
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
