//! SQLite schema creation.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Cannot create database directory {path}: {source}")]
    Directory {
        path: String,
        source: std::io::Error,
    },
}

/// How long a connection waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create all tables and indexes if they don't exist.
///
/// This is idempotent — safe to call on an existing database. It fails if
/// existing rows already violate one of the unique indexes.
pub fn ensure_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Apply the per-connection pragmas every store connection needs.
pub(crate) fn configure_connection(
    conn: &Connection,
    busy_timeout: Duration,
) -> Result<(), rusqlite::Error> {
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    conn.busy_timeout(busy_timeout)?;
    Ok(())
}

/// Open or create a movie database at the given path.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| SchemaError::Directory {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    configure_connection(&conn, DEFAULT_BUSY_TIMEOUT)?;
    ensure_schema(&conn)?;

    log::debug!("Schema ensured at {}", path.display());
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    configure_connection(&conn, DEFAULT_BUSY_TIMEOUT)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS directors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_directors_name ON directors(name);

CREATE TABLE IF NOT EXISTS casts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    actor TEXT NOT NULL,
    actress TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_casts_pair ON casts(actor, actress);

CREATE TABLE IF NOT EXISTS movies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    rating INTEGER NOT NULL,
    director_id INTEGER NOT NULL REFERENCES directors(id),
    cast_id INTEGER NOT NULL REFERENCES casts(id)
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_movies_title ON movies(title);
CREATE INDEX IF NOT EXISTS idx_movies_director ON movies(director_id);
CREATE INDEX IF NOT EXISTS idx_movies_cast ON movies(cast_id);
"#;
