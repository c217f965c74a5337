use nomine_core::{Coordinate, Dimension, Level};

/// Minimal terrain interface for distance relaxation.
pub trait Passable {
    /// Size of the searched area.
    fn dimension(&self) -> Dimension;

    /// Whether the search may enter `c`. Only called for in-bounds tiles.
    fn passable(&self, c: Coordinate) -> bool;
}

impl Passable for Level {
    fn dimension(&self) -> Dimension {
        Level::dimension(self)
    }

    /// Everything but walls, including tiles with no flags at all.
    fn passable(&self, c: Coordinate) -> bool {
        !self.is_wall(c)
    }
}
