//! HTTP-level integration tests for the `/file` endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_bytes, body_json, build_test_app, create_movie, get, multipart_body, send_multipart, Part,
};
use movieflix_core::storage::FileStore;

fn upload_form(file_name: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    multipart_body(&[Part::File {
        name: "file",
        file_name,
        content_type,
        bytes,
    }])
}

#[tokio::test]
async fn serve_poster_returns_bytes_with_content_type() {
    let app = build_test_app();
    create_movie(app.router.clone(), "Inception", 2010, "inception.jpg").await;

    let response = get(app.router.clone(), "/file/inception.jpg").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/jpeg"
    );
    assert_eq!(body_bytes(response).await, b"fake-jpeg-bytes");
}

#[tokio::test]
async fn serve_missing_file_returns_404() {
    let app = build_test_app();

    let response = get(app.router.clone(), "/file/nothing.png").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn serve_rejects_parent_directory_names() {
    let app = build_test_app();

    let response = get(app.router.clone(), "/file/%2E%2E").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app.router.clone(), "/file/..%2Fsecret").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn names_with_inner_double_dots_round_trip() {
    let app = build_test_app();

    let body = upload_form("a..b.jpg", "image/jpeg", b"dots");
    let response = send_multipart(app.router.clone(), Method::POST, "/file/upload", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let served = get(app.router.clone(), "/file/a..b.jpg").await;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(body_bytes(served).await, b"dots");
}

#[tokio::test]
async fn file_named_upload_can_be_served() {
    let app = build_test_app();

    let body = upload_form("upload", "application/octet-stream", b"raw");
    let response = send_multipart(app.router.clone(), Method::POST, "/file/upload", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let served = get(app.router.clone(), "/file/upload").await;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(
        served.headers().get("content-type").unwrap(),
        "application/octet-stream"
    );
    assert_eq!(body_bytes(served).await, b"raw");
}

#[tokio::test]
async fn upload_stores_file_and_returns_name() {
    let app = build_test_app();

    let body = upload_form("banner.png", "image/png", b"png-bytes");
    let response = send_multipart(app.router.clone(), Method::POST, "/file/upload", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"], "banner.png");

    assert_eq!(app.files.retrieve_file("banner.png").await.unwrap(), b"png-bytes");

    let served = get(app.router.clone(), "/file/banner.png").await;
    assert_eq!(served.headers().get("content-type").unwrap(), "image/png");
}

#[tokio::test]
async fn upload_duplicate_name_returns_409_and_keeps_original() {
    let app = build_test_app();

    let first = upload_form("banner.png", "image/png", b"first");
    let response = send_multipart(app.router.clone(), Method::POST, "/file/upload", first).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let second = upload_form("banner.png", "image/png", b"second");
    let response = send_multipart(app.router.clone(), Method::POST, "/file/upload", second).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    assert_eq!(app.files.retrieve_file("banner.png").await.unwrap(), b"first");
}

#[tokio::test]
async fn upload_without_file_part_returns_400() {
    let app = build_test_app();

    let body = multipart_body(&[Part::Text {
        name: "note",
        value: "no file here",
    }]);
    let response = send_multipart(app.router.clone(), Method::POST, "/file/upload", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
