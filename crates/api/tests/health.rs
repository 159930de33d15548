//! Service health and the middleware stack shared by every route.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, TestApp};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database_and_media_store(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let response = get(app.router(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["media_healthy"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_media_directory_degrades_health(pool: PgPool) {
    let app = TestApp::new(pool).await;
    std::fs::remove_dir_all(app.store.root()).unwrap();

    let json = body_json(get(app.router(), "/health").await).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["media_healthy"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_nested_route_returns_404(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let response = get(app.router(), "/api/v1/maps/1/layers").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn map_list_carries_request_id(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let response = get(app.router(), "/api/v1/maps").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("map list response should carry x-request-id");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn map_upload_preflight_allows_configured_origin(pool: PgPool) {
    let app = TestApp::new(pool).await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/maps")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "authorization")
        .body(Body::empty())
        .unwrap();
    let response = common::send(app.router(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:5173"
    );
}
