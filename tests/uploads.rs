mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn image_upload_is_stored_and_served() {
    let app = TestApp::spawn().await;
    let bytes = b"\xFF\xD8\xFF\xE0fake-jpeg-body";

    let (status, body) = app
        .upload("/api/upload", "image", Some("pelaminan.jpg"), bytes)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);

    let filename = body["data"]["filename"].as_str().unwrap();
    let path = body["data"]["path"].as_str().unwrap();
    assert!(filename.starts_with("image-"));
    assert!(filename.ends_with(".jpg"));
    assert_eq!(path, format!("/uploads/{filename}"));

    let (status, served) = app.fetch(path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(served, bytes);
}

#[tokio::test]
async fn upload_without_a_file_writes_nothing() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .upload("/api/upload", "caption", None, b"just text")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": "No file uploaded"}));

    // A text part under the file's name is not a file either
    let (status, body) = app
        .upload("/api/upload", "image", None, b"just a caption")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");

    // The image endpoint ignores a `video` part as well
    let (status, _) = app
        .upload("/api/upload", "video", Some("clip.mp4"), b"mp4")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .upload("/api/upload-video", "image", Some("foto.jpg"), b"jpg")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No video file uploaded");

    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn upload_requires_a_token() {
    let app = TestApp::spawn().await;
    let (status, _) = app.public(Method::POST, "/api/upload", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn deleting_a_video_removes_its_files() {
    let app = TestApp::spawn().await;

    let (_, video) = app
        .upload("/api/upload-video", "video", Some("resepsi.mp4"), b"mp4-bytes")
        .await;
    let (_, thumb) = app
        .upload("/api/upload", "image", Some("resepsi.png"), b"png-bytes")
        .await;
    let video_path = video["data"]["path"].as_str().unwrap();
    let thumb_path = thumb["data"]["path"].as_str().unwrap();
    assert_eq!(app.stored_file_count(), 2);

    let (status, created) = app
        .admin(
            Method::POST,
            "/api/videos",
            Some(json!({
                "title": "Resepsi Adat Jawa",
                "description": "Highlight resepsi",
                "videoPath": video_path,
                "thumbnail": thumb_path
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = app.admin(Method::DELETE, &format!("/api/videos/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Video deleted successfully");
    assert_eq!(app.stored_file_count(), 0);

    let (status, _) = app.fetch(video_path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_video_whose_file_is_gone_still_succeeds() {
    let app = TestApp::spawn().await;

    let (status, created) = app
        .admin(
            Method::POST,
            "/api/wedding-show-videos",
            Some(json!({"videoPath": "/uploads/video-already-removed.mp4"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .admin(Method::DELETE, &format!("/api/wedding-show-videos/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Wedding show video deleted successfully");

    let (status, _) = app
        .public(Method::GET, &format!("/api/wedding-show-videos/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
