#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use movieflix_core::storage::{FileStore, LocalFileStore};
use movieflix_db::repositories::InMemoryMovieRepository;
use tempfile::TempDir;
use tower::ServiceExt;

use movieflix_api::config::ServerConfig;
use movieflix_api::router::build_app_router;
use movieflix_api::services::MovieService;
use movieflix_api::state::AppState;

/// Base URL poster URLs are built from in tests.
pub const TEST_BASE_URL: &str = "http://host";

/// Multipart boundary used by [`multipart_body`].
const BOUNDARY: &str = "movieflix-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(poster_dir: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        poster_dir: poster_dir.to_string(),
        base_url: TEST_BASE_URL.to_string(),
        max_upload_bytes: 1024 * 1024,
        database_url: None,
    }
}

/// A router wired to an in-memory store and a temporary poster directory.
///
/// Keep the struct alive for the duration of the test; dropping it removes
/// the poster directory.
pub struct TestApp {
    pub router: Router,
    pub files: Arc<LocalFileStore>,
    _tmp: TempDir,
}

/// Build the full application router with all middleware layers.
pub fn build_test_app() -> TestApp {
    let tmp = tempfile::tempdir().expect("temp dir");
    let poster_dir = tmp.path().join("posters");
    let config = test_config(poster_dir.to_str().expect("utf-8 temp path"));

    let files = Arc::new(LocalFileStore::new(&poster_dir));
    let shared_files: Arc<dyn FileStore> = files.clone();
    let movies = Arc::new(MovieService::new(
        Arc::new(InMemoryMovieRepository::new()),
        Arc::clone(&shared_files),
        config.base_url.clone(),
    ));

    let state = AppState {
        movies,
        files: shared_files,
    };

    TestApp {
        router: build_app_router(state, &config),
        files,
        _tmp: tmp,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a multipart request built by [`multipart_body`].
pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    body: Vec<u8>,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// One part of a multipart form.
pub enum Part<'a> {
    Text { name: &'a str, value: &'a str },
    File { name: &'a str, file_name: &'a str, content_type: &'a str, bytes: &'a [u8] },
}

/// Encode `parts` as a `multipart/form-data` body.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File { name, file_name, content_type, bytes } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Movie JSON as sent in the `movieDto` part.
pub fn movie_json(title: &str, release_year: i32, cast: &[&str]) -> String {
    serde_json::json!({
        "title": title,
        "director": "Nolan",
        "studio": "WB",
        "releaseYear": release_year,
        "movieCast": cast,
    })
    .to_string()
}

/// Multipart body for creating a movie with a poster.
pub fn movie_form(movie: &str, poster_name: &str) -> Vec<u8> {
    multipart_body(&[
        Part::File {
            name: "file",
            file_name: poster_name,
            content_type: "image/jpeg",
            bytes: b"fake-jpeg-bytes",
        },
        Part::Text {
            name: "movieDto",
            value: movie,
        },
    ])
}

/// Create a movie through the API and return its JSON.
pub async fn create_movie(app: Router, title: &str, year: i32, poster_name: &str) -> serde_json::Value {
    let body = movie_form(&movie_json(title, year, &["Leo", "Ellen"]), poster_name);
    let response = send_multipart(app, Method::POST, "/api/v1/movies", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
