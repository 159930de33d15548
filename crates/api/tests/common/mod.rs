#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use image::{DynamicImage, ImageFormat, RgbImage};
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use mapboard_api::auth::jwt::{generate_access_token, JwtConfig};
use mapboard_api::config::ServerConfig;
use mapboard_api::router::build_app_router;
use mapboard_api::state::AppState;
use mapboard_core::storage::{AssetStore, LocalAssetStore};
use mapboard_db::models::user::CreateUser;
use mapboard_db::repositories::UserRepo;

const MULTIPART_BOUNDARY: &str = "mapboard-test-boundary";

/// Build a test `ServerConfig` with safe defaults and the given media root.
pub fn test_config(media_root: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_root: media_root.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// A router over a real database and a throwaway media directory.
///
/// The media directory lives as long as this value.
pub struct TestApp {
    pub pool: PgPool,
    pub config: ServerConfig,
    pub store: Arc<LocalAssetStore>,
    _media: TempDir,
}

impl TestApp {
    pub async fn new(pool: PgPool) -> Self {
        let media = tempfile::tempdir().unwrap();
        let config = test_config(media.path());
        let store = LocalAssetStore::new(media.path(), config.max_upload_bytes)
            .await
            .unwrap();
        Self {
            pool,
            config,
            store: Arc::new(store),
            _media: media,
        }
    }

    /// The production router and middleware stack, built fresh per request.
    pub fn router(&self) -> Router {
        let assets: Arc<dyn AssetStore> = self.store.clone();
        let state = AppState {
            pool: self.pool.clone(),
            config: Arc::new(self.config.clone()),
            assets,
        };
        build_app_router(state, &self.config)
    }

    /// Create a user row and return its id.
    pub async fn user(&self, username: &str) -> i64 {
        UserRepo::create(
            &self.pool,
            &CreateUser {
                username: username.to_string(),
            },
        )
        .await
        .unwrap()
        .id
    }

    /// A valid bearer token for `user_id` with the given role.
    pub fn token(&self, user_id: i64, role: &str) -> String {
        generate_access_token(user_id, role, &self.config.jwt).unwrap()
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(t) => builder.header("authorization", format!("Bearer {t}")),
        None => builder,
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = builder(Method::GET, uri, None).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let request = builder(Method::POST, uri, token)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let request = builder(Method::DELETE, uri, token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// One field of a multipart form.
pub enum Part {
    Text(&'static str, String),
    File {
        name: &'static str,
        filename: &'static str,
        data: Vec<u8>,
    },
}

pub fn text(name: &'static str, value: &str) -> Part {
    Part::Text(name, value.to_string())
}

pub fn file(filename: &'static str, data: Vec<u8>) -> Part {
    Part::File {
        name: "image",
        filename,
        data,
    }
}

fn multipart_body(parts: Vec<Part>) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(&data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    parts: Vec<Part>,
) -> Response<Body> {
    let request = builder(method, uri, token)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Encode a blank image of the given size and format.
pub fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut out, format)
        .unwrap();
    out.into_inner()
}

/// Encode a blank PNG of the given size.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    encoded(width, height, ImageFormat::Png)
}

/// Create a map through the API and return the response `data` object.
pub async fn create_map(
    app: &TestApp,
    token: &str,
    name: &str,
    mode: &str,
    image: Vec<u8>,
) -> serde_json::Value {
    let response = send_multipart(
        app.router(),
        Method::POST,
        "/api/v1/maps",
        Some(token),
        vec![text("name", name), text("mode", mode), file("map.png", image)],
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
