//! The repository facade consumed by the HTTP layer.

use std::path::{Path, PathBuf};
use std::time::Duration;

use movie_vault_core::{Movie, NewMovie};
use rusqlite::Connection;

use crate::deadline::Deadline;
use crate::error::StoreError;
use crate::schema::{self, SchemaError};
use crate::{operations, queries};

/// Storage capability the HTTP layer depends on.
///
/// Implementations must be shareable across request workers.
pub trait MovieRepository: Send + Sync {
    /// Create a movie, reusing existing director, cast and movie rows.
    fn create_movie(&self, movie: &NewMovie, deadline: Deadline) -> Result<i64, StoreError>;

    fn get_movie_by_id(&self, id: i64, deadline: Deadline) -> Result<Movie, StoreError>;

    /// A page of movies in ascending id order. Does not clamp `limit`.
    fn list_movies(
        &self,
        limit: u32,
        offset: u32,
        deadline: Deadline,
    ) -> Result<Vec<Movie>, StoreError>;

    fn update_movie(&self, id: i64, movie: &NewMovie, deadline: Deadline)
        -> Result<i64, StoreError>;

    fn delete_movie_by_id(&self, id: i64, deadline: Deadline) -> Result<i64, StoreError>;
}

/// Connection settings for [`SqliteRepository`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// How long to wait on a locked database before failing.
    pub busy_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout: schema::DEFAULT_BUSY_TIMEOUT,
        }
    }
}

/// SQLite-backed repository.
///
/// Holds only the database path; every call opens its own connection, so
/// the connection and its transaction never outlive the call.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    path: PathBuf,
    options: StoreOptions,
}

impl SqliteRepository {
    /// Open the database at `path`, ensuring the schema exists.
    pub fn open(path: impl Into<PathBuf>, options: StoreOptions) -> Result<Self, SchemaError> {
        let path = path.into();
        schema::open_database(&path)?;
        log::info!("Movie database ready at {}", path.display());
        Ok(Self { path, options })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self, deadline: Deadline) -> Result<Connection, StoreError> {
        deadline.check()?;
        let conn = Connection::open(&self.path)?;
        let busy_timeout = deadline.bound_busy_timeout(self.options.busy_timeout);
        schema::configure_connection(&conn, busy_timeout)?;
        deadline.install(&conn);
        Ok(conn)
    }
}

impl MovieRepository for SqliteRepository {
    fn create_movie(&self, movie: &NewMovie, deadline: Deadline) -> Result<i64, StoreError> {
        let conn = self.connect(deadline)?;
        let upsert = operations::create_movie(&conn, movie, deadline)
            .map_err(|e| deadline.classify(e))?;
        if upsert.movie_created {
            log::info!("Movie created with ID: {}", upsert.movie_id);
        }
        Ok(upsert.movie_id)
    }

    fn get_movie_by_id(&self, id: i64, deadline: Deadline) -> Result<Movie, StoreError> {
        let conn = self.connect(deadline)?;
        queries::get_movie_by_id(&conn, id).map_err(|e| deadline.classify(e))
    }

    fn list_movies(
        &self,
        limit: u32,
        offset: u32,
        deadline: Deadline,
    ) -> Result<Vec<Movie>, StoreError> {
        let conn = self.connect(deadline)?;
        queries::list_movies(&conn, limit, offset).map_err(|e| deadline.classify(e))
    }

    fn update_movie(
        &self,
        id: i64,
        movie: &NewMovie,
        deadline: Deadline,
    ) -> Result<i64, StoreError> {
        let conn = self.connect(deadline)?;
        operations::update_movie(&conn, id, movie, deadline).map_err(|e| deadline.classify(e))
    }

    fn delete_movie_by_id(&self, id: i64, deadline: Deadline) -> Result<i64, StoreError> {
        let conn = self.connect(deadline)?;
        operations::delete_movie_by_id(&conn, id, deadline).map_err(|e| deadline.classify(e))
    }
}
