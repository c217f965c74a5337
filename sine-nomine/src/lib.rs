//! sine-nomine: a small dungeon crawler.
//!
//! A [`Game`] is created from a [`GameConfig`]. It generates a rooms-and-
//! corridors level, scatters torches over the floor and drops the player in
//! the first room. From there the player moves with [`Game::step`] or lets
//! [`Game::autoexplore`] walk towards the nearest unexplored tile or known
//! torch. Each torch picked up extends the player's sight by one tile.
//!
//! ```
//! use sine_nomine::{Game, GameConfig};
//!
//! let config = GameConfig { seed: Some(7), ..GameConfig::default() };
//! let mut game = Game::new(&config).unwrap();
//! while game.autoexplore().is_some() {}
//! assert!(game.turn() > 0);
//! ```
//!
//! Rendering and input are left to the embedding application.

pub mod config;
pub mod game;

pub use config::{ConfigError, GameConfig, SizeRange};
pub use game::{Direction, Game, Player};
pub use nomine_core::{Coordinate, Dimension, Level, Tile, TileFlags};
