//! HTTP-level integration tests for map drawings and the tool list.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_map, delete, get, png, post_json, TestApp};
use serde_json::json;
use sqlx::PgPool;

/// A user with a map of their own. Returns (user id, token, map id).
async fn owner_with_map(app: &TestApp) -> (i64, String, i64) {
    let user = app.user("cartographer").await;
    let token = app.token(user, "user");
    let map = create_map(app, &token, "Overlay Test", "random", png(100, 100)).await;
    (user, token, map["id"].as_i64().unwrap())
}

async fn add_drawing(app: &TestApp, token: &str, map_id: i64, body: serde_json::Value) -> i64 {
    let response = post_json(
        app.router(),
        &format!("/api/v1/maps/{map_id}/drawings"),
        Some(token),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Create / list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_drawing_applies_default_color(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let (user, token, map_id) = owner_with_map(&app).await;

    let response = post_json(
        app.router(),
        &format!("/api/v1/maps/{map_id}/drawings"),
        Some(&token),
        json!({
            "tool_type": "polygon",
            "coordinates": [[0, 0], [10, 0], [10, 10]],
            "label": "Objective A",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["game_map_id"], map_id);
    assert_eq!(json["data"]["tool_type"], "polygon");
    assert_eq!(json["data"]["color"], "#ff0000");
    assert_eq!(json["data"]["coordinates"], json!([[0, 0], [10, 0], [10, 10]]));
    assert_eq!(json["data"]["label"], "Objective A");
    assert_eq!(json["data"]["created_by"], user);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn drawings_are_listed_newest_first(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let (_, token, map_id) = owner_with_map(&app).await;

    let first = add_drawing(
        &app,
        &token,
        map_id,
        json!({"tool_type": "marker", "coordinates": {"x": 1, "y": 2}}),
    )
    .await;
    let second = add_drawing(
        &app,
        &token,
        map_id,
        json!({"tool_type": "text", "color": "#00AAff", "coordinates": {"x": 5, "y": 5}, "label": "Spawn"}),
    )
    .await;

    let response = get(app.router(), &format!("/api/v1/maps/{map_id}/drawings")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);
    assert_eq!(json["data"][0]["color"], "#00AAff");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn drawings_of_unknown_map_return_404(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let user = app.user("alice").await;

    let response = get(app.router(), "/api/v1/maps/999999/drawings").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(
        app.router(),
        "/api/v1/maps/999999/drawings",
        Some(&app.token(user, "user")),
        json!({"tool_type": "marker", "coordinates": {}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_drawing_rejects_invalid_input(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let (_, token, map_id) = owner_with_map(&app).await;
    let uri = format!("/api/v1/maps/{map_id}/drawings");

    let cases = [
        json!({"tool_type": "spray", "coordinates": {}}),
        json!({"tool_type": "marker", "color": "red", "coordinates": {}}),
        json!({"tool_type": "marker", "color": "#12345g", "coordinates": {}}),
        json!({"tool_type": "text", "coordinates": {}, "label": "x".repeat(101)}),
    ];
    for body in cases {
        let response = post_json(app.router(), &uri, Some(&token), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let json = body_json(get(app.router(), &uri).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_drawing_requires_authentication(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let (_, _, map_id) = owner_with_map(&app).await;

    let response = post_json(
        app.router(),
        &format!("/api/v1/maps/{map_id}/drawings"),
        None,
        json!({"tool_type": "marker", "coordinates": {}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn drawing_delete_permissions(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let (_, owner_token, map_id) = owner_with_map(&app).await;
    let author = app.user("author").await;
    let author_token = app.token(author, "user");
    let stranger = app.user("stranger").await;
    let stranger_token = app.token(stranger, "user");

    let by_author = add_drawing(
        &app,
        &author_token,
        map_id,
        json!({"tool_type": "circle", "coordinates": {"cx": 1, "cy": 1, "r": 3}}),
    )
    .await;
    let also_by_author = add_drawing(
        &app,
        &author_token,
        map_id,
        json!({"tool_type": "rectangle", "coordinates": [[0, 0], [2, 2]]}),
    )
    .await;

    let uri = |id: i64| format!("/api/v1/maps/{map_id}/drawings/{id}");

    let response = delete(app.router(), &uri(by_author), Some(&stranger_token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete(app.router(), &uri(by_author), Some(&author_token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The map owner may remove anyone's drawing on their map.
    let response = delete(app.router(), &uri(also_by_author), Some(&owner_token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(app.router(), &uri(also_by_author), Some(&owner_token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn drawing_must_belong_to_the_addressed_map(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let (user, token, map_id) = owner_with_map(&app).await;
    let other_map = create_map(&app, &token, "Elsewhere", "clash", png(10, 10)).await;
    let other_map_id = other_map["id"].as_i64().unwrap();

    let drawing = add_drawing(
        &app,
        &token,
        map_id,
        json!({"tool_type": "polyline", "coordinates": [[0, 0], [4, 4]]}),
    )
    .await;

    let admin = app.token(user, "admin");
    let response = delete(
        app.router(),
        &format!("/api/v1/maps/{other_map_id}/drawings/{drawing}"),
        Some(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_map_removes_its_drawings(pool: PgPool) {
    let app = TestApp::new(pool.clone()).await;
    let (_, token, map_id) = owner_with_map(&app).await;
    add_drawing(
        &app,
        &token,
        map_id,
        json!({"tool_type": "marker", "coordinates": {"x": 0, "y": 0}}),
    )
    .await;

    let response = delete(app.router(), &format!("/api/v1/maps/{map_id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM map_drawings WHERE game_map_id = $1")
            .bind(map_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(remaining, 0);
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn tools_lists_every_tool_type(pool: PgPool) {
    let app = TestApp::new(pool).await;

    let response = get(app.router(), "/api/v1/tools").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let tools = json["data"].as_array().unwrap();
    let values: Vec<&str> = tools.iter().map(|t| t["value"].as_str().unwrap()).collect();
    assert_eq!(
        values,
        ["marker", "polyline", "polygon", "rectangle", "circle", "text"]
    );
    assert_eq!(tools[1]["label"], "Line");
    assert_eq!(tools[2]["label"], "Area");
}
