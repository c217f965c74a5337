//! Rooms-and-corridors dungeon generation.
//!
//! The generator carves a number of random rectangular rooms into a level
//! filled with walls, picks an anchor tile inside each room and joins the
//! anchors of consecutive rooms with L-shaped corridors. Because every room
//! is chained to the next one, all floor tiles end up in a single connected
//! region.

use nomine_core::{Coordinate, Dimension, Level, TileFlags};
use rand::Rng;
use rand::seq::IndexedRandom;

/// A room carved by [`DungeonGen::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    /// Top-left tile of the room.
    pub origin: Coordinate,
    pub size: Dimension,
    /// Corridor endpoint, always a tile of the room.
    pub anchor: Coordinate,
}

impl Room {
    /// Whether `c` lies inside the room rectangle.
    pub fn contains(&self, c: Coordinate) -> bool {
        c.y >= self.origin.y
            && c.x >= self.origin.x
            && c.y - self.origin.y < self.size.height
            && c.x - self.origin.x < self.size.width
    }
}

/// Dungeon generator driven by a random number generator.
pub struct DungeonGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> DungeonGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Overwrite `level` with `rooms` rooms joined by corridors.
    ///
    /// Every tile first becomes a wall. Room sizes are drawn uniformly from
    /// `room_min..=room_max` on each axis and rooms are placed uniformly so
    /// that the outermost ring of the level stays wall. Rooms may overlap.
    /// Returns the rooms in generation order; corridors join room `i` to
    /// room `i + 1`.
    ///
    /// # Panics
    ///
    /// Panics if `rooms` is zero, if `room_min` has a zero side, if
    /// `room_min` exceeds `room_max` on either axis, or if `room_max` does
    /// not fit inside the level minus its one-tile border.
    pub fn generate(
        &mut self,
        level: &mut Level,
        rooms: u32,
        room_min: Dimension,
        room_max: Dimension,
    ) -> Vec<Room> {
        let dim = level.dimension();
        assert!(rooms > 0, "DungeonGen::generate: no rooms requested");
        assert!(
            room_min.is_valid(),
            "DungeonGen::generate: invalid minimum room size {room_min}"
        );
        assert!(
            room_max.fits(room_min),
            "DungeonGen::generate: minimum room size {room_min} exceeds maximum {room_max}"
        );
        let inner = Dimension::new(dim.height.saturating_sub(2), dim.width.saturating_sub(2));
        assert!(
            inner.fits(room_max),
            "DungeonGen::generate: room size {room_max} does not fit level {dim}"
        );

        level.fill(TileFlags::WALL);

        let carved: Vec<Room> = (0..rooms)
            .map(|_| self.carve_room(level, room_min, room_max))
            .collect();

        for pair in carved.windows(2) {
            connect(level, pair[0].anchor, pair[1].anchor);
        }

        log::debug!(
            "generated {dim} level: {} rooms, {} floor tiles",
            carved.len(),
            level.count(TileFlags::FLOOR)
        );
        carved
    }

    fn carve_room(&mut self, level: &mut Level, room_min: Dimension, room_max: Dimension) -> Room {
        let dim = level.dimension();
        let height = self.rng.random_range(room_min.height..=room_max.height);
        let width = self.rng.random_range(room_min.width..=room_max.width);

        // Rows 0 and height - 1 (likewise columns) are the border ring.
        let oy = self.rng.random_range(1..=dim.height - height - 1);
        let ox = self.rng.random_range(1..=dim.width - width - 1);

        for y in oy..oy + height {
            for x in ox..ox + width {
                level.set_flags(Coordinate::new(y, x), TileFlags::FLOOR);
            }
        }

        let anchor = Coordinate::new(
            self.rng.random_range(oy..oy + height),
            self.rng.random_range(ox..ox + width),
        );

        let room = Room {
            origin: Coordinate::new(oy, ox),
            size: Dimension::new(height, width),
            anchor,
        };
        log::trace!("room {} at {} anchored at {}", room.size, room.origin, room.anchor);
        room
    }

    /// Add `flags` to `count` distinct floor tiles chosen uniformly.
    ///
    /// If the level has fewer floor tiles than requested, every floor tile is
    /// marked. Returns the chosen tiles.
    pub fn scatter(&mut self, level: &mut Level, count: usize, flags: TileFlags) -> Vec<Coordinate> {
        let floor = level.find(TileFlags::FLOOR);
        if count > floor.len() {
            log::warn!(
                "cannot scatter {count} features on {} floor tiles",
                floor.len()
            );
        }

        let chosen: Vec<Coordinate> = floor
            .choose_multiple(&mut self.rng, count)
            .copied()
            .collect();
        for &c in &chosen {
            level.insert_flags(c, flags);
        }

        log::debug!("scattered {} tiles with {flags:?}", chosen.len());
        chosen
    }
}

/// Carve an L-shaped corridor: along `start`'s row to `stop`'s column, then
/// along `stop`'s column to `stop`'s row. Both runs are inclusive.
pub fn connect(level: &mut Level, start: Coordinate, stop: Coordinate) {
    let (x0, x1) = (start.x.min(stop.x), start.x.max(stop.x));
    for x in x0..=x1 {
        level.set_flags(Coordinate::new(start.y, x), TileFlags::FLOOR);
    }

    let (y0, y1) = (start.y.min(stop.y), start.y.max(stop.y));
    for y in y0..=y1 {
        level.set_flags(Coordinate::new(y, stop.x), TileFlags::FLOOR);
    }
}
