//! The tile map: file format and loading in `data`, the scrollable
//! collision grid in `tile`.

pub mod data;
pub mod tile;

pub use data::{load_map, load_map_from_str, load_or_default, MapData, MapError, COLLIDABLE_CODE};
pub use tile::{Axis, Tile, TileGrid};
