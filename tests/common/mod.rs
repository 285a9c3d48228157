#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use wedding_cms::{build_app, AppConfig};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "janur-kuning-2024";
pub const JWT_SECRET: &str = "integration-test-secret";

const BOUNDARY: &str = "wedding-cms-test-boundary";

pub fn test_config(upload_dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::in_memory(upload_dir.path(), JWT_SECRET);
    config.admin_username = Some(ADMIN_USERNAME.to_string());
    config.admin_password = Some(ADMIN_PASSWORD.to_string());
    config
}

/// Router over a fresh in-memory store, logged in as the seeded admin.
pub struct TestApp {
    pub router: Router,
    pub upload_dir: TempDir,
    pub token: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let upload_dir = tempfile::tempdir().expect("temp upload dir");
        let router = build_app(test_config(&upload_dir)).await.expect("build app");

        let mut app = Self {
            router,
            upload_dir,
            token: String::new(),
        };
        let (status, body) = app
            .public(
                Method::POST,
                "/api/admin/login",
                Some(json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        app.token = body["data"]["token"]
            .as_str()
            .expect("token in login response")
            .to_string();
        app
    }

    /// Request without credentials.
    pub async fn public(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.call(method, uri, body, None).await
    }

    /// Request carrying the admin bearer token.
    pub async fn admin(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.call(method, uri, body, Some(&self.token)).await
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    /// Raw JSON text body, for malformed-payload cases.
    pub async fn admin_raw(&self, method: Method, uri: &str, raw: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Multipart upload with a single part named `field`. `filename: None` sends a plain text part.
    pub async fn upload(
        &self,
        uri: &str,
        field: &str,
        filename: Option<&str>,
        contents: &[u8],
    ) -> (StatusCode, Value) {
        let disposition = match filename {
            Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
            None => format!("form-data; name=\"{field}\""),
        };
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(contents);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Plain GET returning status and raw bytes, for static files.
    pub async fn fetch(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!("non-JSON body: {}", String::from_utf8_lossy(&bytes))
            })
        };
        (status, body)
    }

    /// Number of files currently in the upload directory.
    pub fn stored_file_count(&self) -> usize {
        match std::fs::read_dir(self.upload_dir.path()) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }
}

pub fn timestamp(value: &Value) -> chrono::DateTime<chrono::Utc> {
    let raw = value.as_str().expect("timestamp string");
    chrono::DateTime::parse_from_rfc3339(raw)
        .expect("RFC 3339 timestamp")
        .with_timezone(&chrono::Utc)
}
