//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token validation (tokens are issued elsewhere).

pub mod jwt;
