//! Route definitions for the `/maps` resource.
//!
//! Also nests drawing routes under `/maps/{id}/drawings`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{drawings, maps};
use crate::state::AppState;

/// Routes mounted at `/maps`.
///
/// ```text
/// GET    /                                -> list
/// POST   /                                -> create
/// GET    /{id}                            -> get_by_id
/// PUT    /{id}                            -> update
/// DELETE /{id}                            -> delete
///
/// GET    /{id}/drawings                   -> list_by_map
/// POST   /{id}/drawings                   -> create
/// DELETE /{id}/drawings/{drawing_id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    let drawing_routes = Router::new()
        .route("/", get(drawings::list_by_map).post(drawings::create))
        .route("/{drawing_id}", delete(drawings::delete));

    Router::new()
        .route("/", get(maps::list).post(maps::create))
        .route(
            "/{id}",
            get(maps::get_by_id).put(maps::update).delete(maps::delete),
        )
        .nest("/{id}/drawings", drawing_routes)
}
