pub mod health;
pub mod maps;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /maps                                  list, create (create requires auth)
/// /maps/{id}                             get, update, delete (owner or admin)
/// /maps/{id}/drawings                    list, create (create requires auth)
/// /maps/{id}/drawings/{drawing_id}       delete (author, map owner, or admin)
///
/// /tools                                 drawing tool choices
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/maps", maps::router())
        .route("/tools", get(handlers::drawings::list_tools))
}
