//! HTTP routes for `/api/v1/movies`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use movie_vault_core::{Movie, NewMovie, validate_movie};
use movie_vault_db::{Deadline, MovieRepository, StoreError};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PAGE_SIZE, HttpConfig};
use crate::error::ApiError;

/// Shared handler state.
pub struct AppState {
    pub repo: Arc<dyn MovieRepository>,
    pub request_timeout: Duration,
    pub max_page_size: u32,
}

impl AppState {
    pub fn new(repo: Arc<dyn MovieRepository>, http: &HttpConfig) -> Self {
        Self {
            repo,
            request_timeout: http.request_timeout(),
            max_page_size: http.max_page_size,
        }
    }

    fn deadline(&self) -> Deadline {
        Deadline::after(self.request_timeout)
    }
}

/// Create all HTTP routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/movies", get(list_movies).post(create_movie))
        .route(
            "/api/v1/movies/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .with_state(state)
}

/// Body returned by create, update and delete.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: &'static str,
    pub message: String,
    pub id: i64,
}

impl MutationResponse {
    fn ok(message: String, id: i64) -> Json<Self> {
        Json(Self {
            success: "OK",
            message,
            id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

async fn health() -> &'static str {
    "OK"
}

async fn create_movie(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<MutationResponse>), ApiError> {
    log::info!("Create movie handler called");
    let movie = decode_movie(&body)?;

    let deadline = state.deadline();
    let repo = Arc::clone(&state.repo);
    let id = run_blocking(move || repo.create_movie(&movie, deadline)).await?;

    Ok((
        StatusCode::CREATED,
        MutationResponse::ok(format!("Movie created with ID: {id}"), id),
    ))
}

async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    log::info!("Get movie by ID handler called");
    let id = parse_id(&id)?;

    let deadline = state.deadline();
    let repo = Arc::clone(&state.repo);
    let movie = run_blocking(move || repo.get_movie_by_id(id, deadline)).await?;
    Ok(Json(movie))
}

async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    log::info!("Get movie list handler called");
    let (limit, offset) = resolve_page(
        params.limit.as_deref(),
        params.offset.as_deref(),
        state.max_page_size,
    )?;

    let deadline = state.deadline();
    let repo = Arc::clone(&state.repo);
    let movies = run_blocking(move || repo.list_movies(limit, offset, deadline)).await?;
    if movies.is_empty() {
        log::info!("Movie list is empty");
    }
    Ok(Json(movies))
}

async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<MutationResponse>, ApiError> {
    log::info!("Update movie handler called");
    let id = parse_id(&id)?;
    let movie = decode_movie(&body)?;

    let deadline = state.deadline();
    let repo = Arc::clone(&state.repo);
    let id = run_blocking(move || repo.update_movie(id, &movie, deadline)).await?;
    Ok(MutationResponse::ok(
        format!("Movie updated with ID {id}"),
        id,
    ))
}

async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>, ApiError> {
    log::info!("Delete movie by ID handler called");
    let id = parse_id(&id)?;

    let deadline = state.deadline();
    let repo = Arc::clone(&state.repo);
    let id = run_blocking(move || repo.delete_movie_by_id(id, deadline)).await?;
    Ok(MutationResponse::ok(
        format!("Movie deleted with ID {id}"),
        id,
    ))
}

// ── Request decoding ────────────────────────────────────────────────────────

/// Decode and validate a movie body.
fn decode_movie(body: &[u8]) -> Result<NewMovie, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::bad_request("empty body"));
    }
    let movie: NewMovie = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("invalid movie body: {e}")))?;
    validate_movie(&movie)?;
    Ok(movie)
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::bad_request(format!("invalid ID '{raw}'")))
}

/// Resolve `limit`/`offset` query values.
///
/// Missing or empty values fall back to the defaults; `limit` is capped at
/// `max_page_size`.
pub fn resolve_page(
    limit: Option<&str>,
    offset: Option<&str>,
    max_page_size: u32,
) -> Result<(u32, u32), ApiError> {
    let limit = match limit.filter(|s| !s.is_empty()) {
        None => DEFAULT_PAGE_SIZE,
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
            _ => return Err(ApiError::bad_request("invalid limit value")),
        },
    };
    let offset = match offset.filter(|s| !s.is_empty()) {
        None => 0,
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n >= 0 => u32::try_from(n)
                .map_err(|_| ApiError::bad_request("invalid offset value"))?,
            _ => return Err(ApiError::bad_request("invalid offset value")),
        },
    };
    Ok((limit.min(max_page_size), offset))
}

/// Run a blocking repository call off the async executor.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("join error: {e}")))?
        .map_err(ApiError::from)
}
