//! **nomine-core** — core types for the sine-nomine dungeon crawler.
//!
//! This crate provides the foundational types shared by the path-finding,
//! field-of-view and generation crates: unsigned grid coordinates with
//! bounds-checked offsets, tile flags, and the [`Level`] that owns a tile grid.

pub mod geom;
pub mod level;
pub mod tile;

pub use geom::{Coordinate, Dimension, DimensionIter, Offset};
pub use level::Level;
pub use tile::{Tile, TileFlags};
