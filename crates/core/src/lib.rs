//! Domain logic for the map board: game modes, drawing tools, list query
//! parsing, image dimension detection, asset storage, and the dimension
//! resync report.

pub mod dimensions;
pub mod drawing;
pub mod error;
pub mod game_map;
pub mod map_query;
pub mod resync;
pub mod storage;
pub mod types;
