//! The [`Level`] type: a rectangular grid of [`Tile`]s.
//!
//! A level owns all of its tile storage in a single row-major buffer. There
//! are no views or shared slices: generation, field-of-view and gameplay
//! mutate it through `&mut Level`.

use crate::geom::{Coordinate, Dimension};
use crate::tile::{Tile, TileFlags};

/// A dungeon level.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "LevelData"))]
pub struct Level {
    dimension: Dimension,
    tiles: Vec<Tile>,
}

/// Unchecked wire form of a [`Level`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct LevelData {
    dimension: Dimension,
    tiles: Vec<Tile>,
}

#[cfg(feature = "serde")]
impl TryFrom<LevelData> for Level {
    type Error = String;

    fn try_from(data: LevelData) -> Result<Self, Self::Error> {
        let LevelData { dimension, tiles } = data;
        if !dimension.is_valid() {
            return Err(format!("invalid level dimension {dimension}"));
        }
        if tiles.len() != dimension.len() {
            return Err(format!(
                "level {dimension} needs {} tiles, got {}",
                dimension.len(),
                tiles.len()
            ));
        }
        Ok(Self { dimension, tiles })
    }
}

impl Level {
    /// Create a level of the given size with every tile empty (no flags).
    ///
    /// # Panics
    ///
    /// Panics if either side of `dimension` is zero.
    pub fn new(dimension: Dimension) -> Self {
        assert!(
            dimension.is_valid(),
            "Level::new: invalid dimension {dimension}"
        );
        Self {
            dimension,
            tiles: vec![Tile::default(); dimension.len()],
        }
    }

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.dimension.height
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.dimension.width
    }

    #[inline]
    pub fn contains(&self, c: Coordinate) -> bool {
        self.dimension.contains(c)
    }

    /// The tile at `c`, or `None` if out of bounds.
    #[inline]
    pub fn tile(&self, c: Coordinate) -> Option<&Tile> {
        self.dimension.index(c).map(|i| &self.tiles[i])
    }

    #[inline]
    pub fn tile_mut(&mut self, c: Coordinate) -> Option<&mut Tile> {
        self.dimension.index(c).map(|i| &mut self.tiles[i])
    }

    /// Flags at `c`; out-of-bounds tiles report no flags.
    #[inline]
    pub fn flags(&self, c: Coordinate) -> TileFlags {
        self.tile(c).map_or(TileFlags::NONE, |t| t.flags)
    }

    /// Replace the flags at `c`. Does nothing if out of bounds.
    pub fn set_flags(&mut self, c: Coordinate, flags: TileFlags) {
        if let Some(t) = self.tile_mut(c) {
            t.flags = flags;
        }
    }

    /// Add `flags` at `c`. Does nothing if out of bounds.
    pub fn insert_flags(&mut self, c: Coordinate, flags: TileFlags) {
        if let Some(t) = self.tile_mut(c) {
            t.flags.insert(flags);
        }
    }

    /// Clear `flags` at `c`. Does nothing if out of bounds.
    pub fn remove_flags(&mut self, c: Coordinate, flags: TileFlags) {
        if let Some(t) = self.tile_mut(c) {
            t.flags.remove(flags);
        }
    }

    /// Reset every tile to `flags`, dropping any recorded distance.
    pub fn fill(&mut self, flags: TileFlags) {
        self.tiles.fill(Tile::new(flags));
    }

    /// Clear `flags` from every tile.
    pub fn remove_flags_all(&mut self, flags: TileFlags) {
        for t in &mut self.tiles {
            t.flags.remove(flags);
        }
    }

    /// Whether `c` is a wall. Out-of-bounds tiles are not walls.
    #[inline]
    pub fn is_wall(&self, c: Coordinate) -> bool {
        self.tile(c).is_some_and(Tile::is_wall)
    }

    #[inline]
    pub fn is_floor(&self, c: Coordinate) -> bool {
        self.tile(c).is_some_and(Tile::is_floor)
    }

    /// Iterate over `(Coordinate, &Tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &Tile)> + '_ {
        self.dimension.iter().zip(self.tiles.iter())
    }

    /// Iterate mutably over `(Coordinate, &mut Tile)` pairs in row-major order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Coordinate, &mut Tile)> + '_ {
        self.dimension.iter().zip(self.tiles.iter_mut())
    }

    /// Coordinates of every tile containing all of `flags`.
    pub fn find(&self, flags: TileFlags) -> Vec<Coordinate> {
        self.iter()
            .filter(|(_, t)| t.flags.contains(flags))
            .map(|(c, _)| c)
            .collect()
    }

    /// Count how many tiles contain all of `flags`.
    pub fn count(&self, flags: TileFlags) -> usize {
        self.tiles.iter().filter(|t| t.flags.contains(flags)).count()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn level_round_trip() {
        let mut l = Level::new(Dimension::new(2, 3));
        l.set_flags(Coordinate::new(1, 2), TileFlags::FLOOR | TileFlags::TORCH);
        let json = serde_json::to_string(&l).unwrap();
        let back: Level = serde_json::from_str(&json).unwrap();
        assert_eq!(back, l);
    }

    #[test]
    fn malformed_level_is_rejected() {
        let mut value = serde_json::to_value(Level::new(Dimension::new(2, 3))).unwrap();
        value["tiles"].as_array_mut().unwrap().pop();
        let err = serde_json::from_value::<Level>(value).unwrap_err();
        assert!(err.to_string().contains("needs 6 tiles, got 5"), "{err}");

        let mut value = serde_json::to_value(Level::new(Dimension::new(2, 3))).unwrap();
        value["dimension"]["height"] = serde_json::json!(0);
        assert!(serde_json::from_value::<Level>(value).is_err());
    }
}
