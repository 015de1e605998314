use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use movie_vault_db::{SqliteRepository, StoreOptions};
use movie_vault_server::config::HttpConfig;
use movie_vault_server::{AppState, router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_app(dir: &tempfile::TempDir) -> Router {
    let repo =
        SqliteRepository::open(dir.path().join("movies.db"), StoreOptions::default()).unwrap();
    let http = HttpConfig {
        request_timeout_ms: Duration::from_secs(30).as_millis() as u64,
        ..HttpConfig::default()
    };
    router(Arc::new(AppState::new(Arc::new(repo), &http)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn movie_body(title: &str, rating: i64, age: i64) -> Value {
    json!({
        "name": title,
        "rating": rating,
        "director": {"name": "Kathryn Bigelow", "age": age},
        "cast": {"actor": "Keanu Reeves", "actress": "Lori Petty"}
    })
}

#[tokio::test]
async fn create_then_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/movies",
        Some(movie_body("Point Break", 7, 38)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], "OK");
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body["message"], format!("Movie created with ID: {id}"));

    let (status, movie) = send(&app, Method::GET, &format!("/api/v1/movies/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(movie["name"], "Point Break");
    assert_eq!(movie["director"]["name"], "Kathryn Bigelow");
    assert_eq!(movie["cast"]["actress"], "Lori Petty");
}

#[tokio::test]
async fn repeated_title_returns_same_id() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (_, first) = send(&app, Method::POST, "/api/v1/movies", Some(movie_body("Strange Days", 7, 40))).await;
    let (status, second) = send(&app, Method::POST, "/api/v1/movies", Some(movie_body("Strange Days", 2, 41))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["id"], second["id"]);
}

#[tokio::test]
async fn boundary_values_are_validated() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, Method::POST, "/api/v1/movies", Some(movie_body("Too Good", 11, 40))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "Error");

    let (status, _) = send(&app, Method::POST, "/api/v1/movies", Some(movie_body("Too Old", 5, 111))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/api/v1/movies", Some(movie_body("Low", 0, 0))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/api/v1/movies", Some(movie_body("High", 10, 110))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, list) = send(&app, Method::GET, "/api/v1/movies", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_requests_are_bad_requests() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, Method::POST, "/api/v1/movies", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "empty body");

    let (status, _) = send(&app, Method::POST, "/api/v1/movies", Some(json!({"name": "No Director"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/v1/movies/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/v1/movies?limit=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/v1/movies?offset=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_movies_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, Method::GET, "/api/v1/movies/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "Error");

    let (status, _) = send(&app, Method::PUT, "/api/v1/movies/99", Some(movie_body("Ghost", 5, 50))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/movies/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_list_is_an_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, Method::GET, "/api/v1/movies", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_pages_in_id_order() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let mut ids = Vec::new();
    for title in ["A", "B", "C", "D"] {
        let (_, body) = send(&app, Method::POST, "/api/v1/movies", Some(movie_body(title, 5, 50))).await;
        ids.push(body["id"].as_i64().unwrap());
    }

    let page_ids = |v: &Value| -> Vec<i64> {
        v.as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_i64().unwrap())
            .collect()
    };
    let (_, first) = send(&app, Method::GET, "/api/v1/movies?limit=2&offset=0", None).await;
    let (_, second) = send(&app, Method::GET, "/api/v1/movies?limit=2&offset=2", None).await;
    assert_eq!(page_ids(&first), ids[..2].to_vec());
    assert_eq!(page_ids(&second), ids[2..].to_vec());
}

#[tokio::test]
async fn update_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (_, created) = send(&app, Method::POST, "/api/v1/movies", Some(movie_body("Near Dark", 6, 36))).await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/v1/movies/{id}");

    let (status, body) = send(&app, Method::PUT, &uri, Some(movie_body("Near Dark (1987)", 8, 36))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Movie updated with ID {id}"));

    let (_, movie) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(movie["name"], "Near Dark (1987)");
    assert_eq!(movie["rating"], 8);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_check() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    let (status, _) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}
