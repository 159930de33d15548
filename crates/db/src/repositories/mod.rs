//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod game_map_repo;
pub mod map_drawing_repo;
pub mod user_repo;

pub use game_map_repo::GameMapRepo;
pub use map_drawing_repo::MapDrawingRepo;
pub use user_repo::UserRepo;
