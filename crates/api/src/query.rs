//! Query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for the map list (`?search=&mode=&sort=`).
///
/// Values are kept raw so they can be echoed back exactly as received.
#[derive(Debug, Default, Deserialize)]
pub struct MapListParams {
    pub search: Option<String>,
    pub mode: Option<String>,
    pub sort: Option<String>,
}
