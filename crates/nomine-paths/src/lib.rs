//! Distance maps for grid-based dungeons.
//!
//! A [`DistanceMap`] ("dijkstra map") records, for every tile, the number of
//! cardinal steps to the nearest of a set of weighted targets. Targets are
//! added one at a time and each addition only tightens distances, which
//! makes it cheap to layer several target sets:
//!
//! ```
//! use nomine_core::{Coordinate, Dimension, Level};
//! use nomine_paths::DistanceMap;
//!
//! let level = Level::new(Dimension::new(6, 5));
//! let mut map = DistanceMap::create(&level);
//! map.add_target(&level, Coordinate::new(0, 0), 0);
//! assert_eq!(map.get_value(Coordinate::new(5, 4)), 9);
//! ```
//!
//! Unreached tiles hold [`DISTANCE_MAX`]. Relaxation only enters tiles the
//! [`Passable`] terrain allows; for a [`Level`](nomine_core::Level) that is
//! every tile except walls.

mod distance_map;
mod traits;

pub use distance_map::{DISTANCE_MAX, DistanceMap, flood};
pub use traits::Passable;
