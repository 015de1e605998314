//! Read queries for the movie database.
//!
//! Every query joins `movies` with `directors` and `casts` and rebuilds the
//! nested `Movie { director, cast }` shape from the flat row.

use movie_vault_core::{Cast, Director, Movie};
use rusqlite::{params, Connection, Row};

use crate::error::StoreError;

const MOVIE_SELECT: &str = "SELECT m.id, m.title, m.rating,
        d.id, d.name, d.age,
        c.id, c.actor, c.actress
 FROM movies m
 LEFT JOIN directors d ON d.id = m.director_id
 LEFT JOIN casts c ON c.id = m.cast_id";

/// Fetch one movie with its director and cast.
pub fn get_movie_by_id(conn: &Connection, id: i64) -> Result<Movie, StoreError> {
    let mut stmt = conn.prepare(&format!("{MOVIE_SELECT} WHERE m.id = ?1"))?;
    let result = stmt.query_row(params![id], row_to_movie);
    match result {
        Ok(movie) => Ok(movie),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::movie_not_found(id)),
        Err(e) => Err(e.into()),
    }
}

/// Fetch a page of movies in ascending id order.
///
/// `limit` is used as given; callers are responsible for capping it.
pub fn list_movies(conn: &Connection, limit: u32, offset: u32) -> Result<Vec<Movie>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "{MOVIE_SELECT} ORDER BY m.id ASC LIMIT ?1 OFFSET ?2"
    ))?;
    let rows = stmt.query_map(params![limit, offset], row_to_movie)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Total number of stored movies.
pub fn movie_count(conn: &Connection) -> Result<i64, StoreError> {
    let count = conn.query_row("SELECT COUNT(*) FROM movies", [], |r| r.get(0))?;
    Ok(count)
}

fn row_to_movie(row: &Row<'_>) -> rusqlite::Result<Movie> {
    let director = match row.get::<_, Option<i64>>(3)? {
        Some(id) => Some(Director {
            id,
            name: row.get(4)?,
            age: row.get(5)?,
        }),
        None => None,
    };
    let cast = match row.get::<_, Option<i64>>(6)? {
        Some(id) => Some(Cast {
            id,
            actor: row.get(7)?,
            actress: row.get(8)?,
        }),
        None => None,
    };
    Ok(Movie {
        id: row.get(0)?,
        title: row.get(1)?,
        rating: row.get(2)?,
        director,
        cast,
    })
}
