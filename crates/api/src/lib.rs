//! Map board API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! maintenance tasks) so integration tests and the binaries can share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod maintenance;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
