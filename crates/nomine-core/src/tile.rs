//! Map tiles: [`TileFlags`] and [`Tile`].

use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

// ---------------------------------------------------------------------------
// TileFlags
// ---------------------------------------------------------------------------

/// Bitmask of tile attributes.
///
/// A generated level marks every tile with exactly one of [`FLOOR`](Self::FLOOR)
/// or [`WALL`](Self::WALL). Field-of-view sets [`VISIBLE`](Self::VISIBLE) and
/// [`KNOWN`](Self::KNOWN) together; `KNOWN` is never cleared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileFlags(pub u32);

impl TileFlags {
    pub const NONE: Self = Self(0);
    pub const FLOOR: Self = Self(1 << 0);
    pub const WALL: Self = Self(1 << 1);
    pub const VISIBLE: Self = Self(1 << 2);
    pub const KNOWN: Self = Self(1 << 3);
    pub const TORCH: Self = Self(1 << 4);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether this mask shares at least one bit with `other`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for TileFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TileFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for TileFlags {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for TileFlags {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        Self(!self.0)
    }
}

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// One grid cell: its flags and, optionally, the distance last written by a
/// distance map.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub flags: TileFlags,
    pub distance: Option<u32>,
}

impl Tile {
    /// A tile with the given flags and no distance.
    #[inline]
    pub const fn new(flags: TileFlags) -> Self {
        Self {
            flags,
            distance: None,
        }
    }

    /// Whether movement and light are blocked here.
    #[inline]
    pub const fn is_wall(&self) -> bool {
        self.flags.contains(TileFlags::WALL)
    }

    #[inline]
    pub const fn is_floor(&self) -> bool {
        self.flags.contains(TileFlags::FLOOR)
    }

    #[inline]
    pub const fn is_visible(&self) -> bool {
        self.flags.contains(TileFlags::VISIBLE)
    }

    #[inline]
    pub const fn is_known(&self) -> bool {
        self.flags.contains(TileFlags::KNOWN)
    }

    #[inline]
    pub const fn has_torch(&self) -> bool {
        self.flags.contains(TileFlags::TORCH)
    }
}
