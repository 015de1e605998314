use movie_vault_core::{NewCast, NewDirector, NewMovie};
use movie_vault_db::*;
use rusqlite::Connection;

fn seed(conn: &Connection, titles: &[&str]) -> Vec<i64> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let movie = NewMovie::new(
                *title,
                (i % 11) as i64,
                NewDirector::new(format!("Director {}", i % 2), 40 + i as i64),
                NewCast::new(format!("Actor {i}"), format!("Actress {i}")),
            );
            create_movie(conn, &movie, Deadline::none())
                .unwrap()
                .movie_id
        })
        .collect()
}

#[test]
fn get_movie_rebuilds_nested_shape() {
    let conn = open_memory().unwrap();
    let ids = seed(&conn, &["Alien"]);

    let movie = get_movie_by_id(&conn, ids[0]).unwrap();
    assert_eq!(movie.id, ids[0]);
    assert_eq!(movie.title, "Alien");
    assert_eq!(movie.rating, 0);

    let director = movie.director.expect("director should be joined");
    assert_eq!(director.name, "Director 0");
    assert_eq!(director.age, 40);

    let cast = movie.cast.expect("cast should be joined");
    assert_eq!(cast.actor, "Actor 0");
    assert_eq!(cast.actress, "Actress 0");
}

#[test]
fn get_missing_movie_is_not_found() {
    let conn = open_memory().unwrap();
    let err = get_movie_by_id(&conn, 7).unwrap_err();
    assert!(
        matches!(
            err,
            StoreError::NotFound {
                entity_type: "movie",
                id: 7
            }
        ),
        "got {err:?}"
    );
}

#[test]
fn joined_rows_match_stored_foreign_keys() {
    let conn = open_memory().unwrap();
    seed(&conn, &["A", "B", "C"]);

    for movie in list_movies(&conn, 50, 0).unwrap() {
        let (director_id, cast_id): (i64, i64) = conn
            .query_row(
                "SELECT director_id, cast_id FROM movies WHERE id = ?1",
                [movie.id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(movie.director.unwrap().id, director_id);
        assert_eq!(movie.cast.unwrap().id, cast_id);
    }
}

#[test]
fn pagination_is_disjoint_and_ordered() {
    let conn = open_memory().unwrap();
    let ids = seed(&conn, &["One", "Two", "Three", "Four"]);

    let first: Vec<i64> = list_movies(&conn, 2, 0)
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    let second: Vec<i64> = list_movies(&conn, 2, 2)
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();

    assert_eq!(first, ids[..2].to_vec());
    assert_eq!(second, ids[2..].to_vec());
}

#[test]
fn offset_past_end_is_empty() {
    let conn = open_memory().unwrap();
    seed(&conn, &["Only"]);
    assert!(list_movies(&conn, 10, 5).unwrap().is_empty());
}

#[test]
fn empty_table_lists_nothing() {
    let conn = open_memory().unwrap();
    let movies = list_movies(&conn, 10, 0).unwrap();
    assert!(movies.is_empty());
    assert_eq!(movie_count(&conn).unwrap(), 0);
}

#[test]
fn shared_director_appears_on_each_movie() {
    let conn = open_memory().unwrap();
    seed(&conn, &["A", "B", "C"]);

    let movies = list_movies(&conn, 10, 0).unwrap();
    assert_eq!(movies.len(), 3);
    let a = movies[0].director.as_ref().unwrap();
    let c = movies[2].director.as_ref().unwrap();
    assert_eq!(a, c);
}
