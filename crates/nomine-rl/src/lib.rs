//! Roguelike utilities for sine-nomine: Bresenham lines, field of view and
//! rooms-and-corridors dungeon generation.

pub mod dungeon;
pub mod fov;
pub mod line;

pub use dungeon::{DungeonGen, Room};
pub use line::rasterize;
