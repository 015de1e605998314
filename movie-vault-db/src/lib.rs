//! SQLite persistence layer for the movie catalog.
//!
//! Provides schema creation, the deduplicating create path, joined read
//! queries, and the `MovieRepository` facade the HTTP layer depends on.
//! Backed by SQLite (via rusqlite with bundled feature).

pub mod deadline;
pub mod error;
pub mod operations;
pub mod queries;
pub mod repository;
pub mod schema;

pub use deadline::Deadline;
pub use error::StoreError;
pub use operations::{
    create_movie, delete_movie_by_id, find_cast, find_director_by_name, find_movie_by_title,
    resolve_cast, resolve_director, update_movie, MovieUpsert,
};
pub use queries::{get_movie_by_id, list_movies, movie_count};
pub use repository::{MovieRepository, SqliteRepository, StoreOptions};
pub use schema::{ensure_schema, open_database, open_memory, SchemaError};
