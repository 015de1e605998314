//! Write operations: the deduplicating create path, update and delete.

use movie_vault_core::{NewCast, NewDirector, NewMovie};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

use crate::deadline::Deadline;
use crate::error::StoreError;

/// Ids resolved by a single `create_movie` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieUpsert {
    pub movie_id: i64,
    pub director_id: i64,
    pub cast_id: i64,
    /// `false` when a movie with the same title already existed.
    pub movie_created: bool,
}

// ── Create ──────────────────────────────────────────────────────────────────

/// Insert a movie together with its director and cast.
///
/// Runs as one `BEGIN IMMEDIATE` transaction:
/// 1. resolve the director by name, inserting it if absent
/// 2. resolve the cast by (actor, actress), inserting it if absent
/// 3. resolve the movie by title; an existing title is returned untouched
///
/// Any error rolls back every row written by this call.
pub fn create_movie(
    conn: &Connection,
    movie: &NewMovie,
    deadline: Deadline,
) -> Result<MovieUpsert, StoreError> {
    deadline.check()?;
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    let director_id = resolve_director(&tx, &movie.director)?;
    deadline.check()?;

    let cast_id = resolve_cast(&tx, &movie.cast)?;
    deadline.check()?;

    let (movie_id, movie_created) = match find_movie_by_title(&tx, &movie.title)? {
        Some(id) => (id, false),
        None => (
            insert_movie(&tx, &movie.title, movie.rating, director_id, cast_id)?,
            true,
        ),
    };
    deadline.check()?;

    tx.commit()?;

    if movie_created {
        log::debug!("Created movie {movie_id} '{}'", movie.title);
    } else {
        log::debug!(
            "Movie '{}' already exists as {movie_id}, nothing inserted",
            movie.title
        );
    }

    Ok(MovieUpsert {
        movie_id,
        director_id,
        cast_id,
        movie_created,
    })
}

/// Return the id of the director named `director.name`, inserting it if absent.
///
/// An existing director keeps its stored age.
pub fn resolve_director(conn: &Connection, director: &NewDirector) -> Result<i64, StoreError> {
    if let Some(id) = find_director_by_name(conn, &director.name)? {
        return Ok(id);
    }
    conn.execute(
        "INSERT INTO directors (name, age) VALUES (?1, ?2)
         ON CONFLICT(name) DO NOTHING",
        params![director.name, director.age],
    )?;
    find_director_by_name(conn, &director.name)?.ok_or_else(|| {
        StoreError::Integrity(format!("director '{}' vanished after insert", director.name))
    })
}

/// Return the id of the (actor, actress) cast, inserting it if absent.
pub fn resolve_cast(conn: &Connection, cast: &NewCast) -> Result<i64, StoreError> {
    if let Some(id) = find_cast(conn, &cast.actor, &cast.actress)? {
        return Ok(id);
    }
    conn.execute(
        "INSERT INTO casts (actor, actress) VALUES (?1, ?2)
         ON CONFLICT(actor, actress) DO NOTHING",
        params![cast.actor, cast.actress],
    )?;
    find_cast(conn, &cast.actor, &cast.actress)?.ok_or_else(|| {
        StoreError::Integrity(format!(
            "cast '{}' / '{}' vanished after insert",
            cast.actor, cast.actress
        ))
    })
}

fn insert_movie(
    conn: &Connection,
    title: &str,
    rating: i64,
    director_id: i64,
    cast_id: i64,
) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO movies (title, rating, director_id, cast_id) VALUES (?1, ?2, ?3, ?4)",
        params![title, rating, director_id, cast_id],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Lookups ─────────────────────────────────────────────────────────────────

/// Find a director id by exact name.
pub fn find_director_by_name(conn: &Connection, name: &str) -> Result<Option<i64>, StoreError> {
    conn.query_row(
        "SELECT id FROM directors WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )
    .optional()
    .map_err(Into::into)
}

/// Find a cast id by exact (actor, actress) pair.
pub fn find_cast(
    conn: &Connection,
    actor: &str,
    actress: &str,
) -> Result<Option<i64>, StoreError> {
    conn.query_row(
        "SELECT id FROM casts WHERE actor = ?1 AND actress = ?2",
        params![actor, actress],
        |row| row.get(0),
    )
    .optional()
    .map_err(Into::into)
}

/// Find a movie id by exact title.
pub fn find_movie_by_title(conn: &Connection, title: &str) -> Result<Option<i64>, StoreError> {
    conn.query_row(
        "SELECT id FROM movies WHERE title = ?1",
        params![title],
        |row| row.get(0),
    )
    .optional()
    .map_err(Into::into)
}

// ── Update / Delete ─────────────────────────────────────────────────────────

/// Overwrite a movie's fields and the director and cast rows it references.
///
/// No dedup lookup happens here: the referenced director and cast rows are
/// rewritten in place, so every movie sharing them sees the new values.
pub fn update_movie(
    conn: &Connection,
    id: i64,
    movie: &NewMovie,
    deadline: Deadline,
) -> Result<i64, StoreError> {
    deadline.check()?;
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    let (director_id, cast_id): (i64, i64) = tx
        .query_row(
            "SELECT director_id, cast_id FROM movies WHERE id = ?1",
            params![id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?
        .ok_or_else(|| StoreError::movie_not_found(id))?;

    tx.execute(
        "UPDATE movies SET title = ?2, rating = ?3 WHERE id = ?1",
        params![id, movie.title, movie.rating],
    )?;
    tx.execute(
        "UPDATE directors SET name = ?2, age = ?3 WHERE id = ?1",
        params![director_id, movie.director.name, movie.director.age],
    )?;
    tx.execute(
        "UPDATE casts SET actor = ?2, actress = ?3 WHERE id = ?1",
        params![cast_id, movie.cast.actor, movie.cast.actress],
    )?;
    deadline.check()?;

    tx.commit()?;
    log::debug!("Updated movie {id}");
    Ok(id)
}

/// Delete a movie row. Its director and cast rows are kept.
pub fn delete_movie_by_id(conn: &Connection, id: i64, deadline: Deadline) -> Result<i64, StoreError> {
    deadline.check()?;
    let changed = conn.execute("DELETE FROM movies WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(StoreError::movie_not_found(id));
    }
    log::debug!("Deleted movie {id}");
    Ok(id)
}
