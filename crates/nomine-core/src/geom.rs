//! Geometry primitives: [`Coordinate`], [`Offset`] and [`Dimension`].
//!
//! Coordinates are unsigned and always address a tile inside some
//! [`Dimension`] once validated. Signed movement is expressed with an
//! [`Offset`] and applied through [`Coordinate::checked_offset`], which never
//! underflows.

use std::fmt;

// ---------------------------------------------------------------------------
// Coordinate
// ---------------------------------------------------------------------------

/// A tile position. `y` is the row (grows down), `x` the column (grows right).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub y: u32,
    pub x: u32,
}

impl Coordinate {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { y: 0, x: 0 };

    /// Create a new coordinate from a row and a column.
    #[inline]
    pub const fn new(y: u32, x: u32) -> Self {
        Self { y, x }
    }

    /// Apply `off`, returning `None` if the result would be negative or
    /// outside `dim`.
    #[inline]
    pub fn checked_offset(self, off: Offset, dim: Dimension) -> Option<Self> {
        let y = i64::from(self.y) + i64::from(off.y);
        let x = i64::from(self.x) + i64::from(off.x);
        if y < 0 || x < 0 {
            return None;
        }
        let c = Self::new(u32::try_from(y).ok()?, u32::try_from(x).ok()?);
        dim.contains(c).then_some(c)
    }

    /// Signed delta `self - other`.
    #[inline]
    pub fn offset_from(self, other: Coordinate) -> Offset {
        Offset::new(
            (i64::from(self.y) - i64::from(other.y)) as i32,
            (i64::from(self.x) - i64::from(other.x)) as i32,
        )
    }

    /// The four cardinal neighbours inside `dim`, in up, right, down, left
    /// order.
    pub fn neighbors_4(self, dim: Dimension) -> impl Iterator<Item = Coordinate> {
        Offset::CARDINAL
            .into_iter()
            .filter_map(move |off| self.checked_offset(off, dim))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    /// Row-major ordering.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}

impl From<(u32, u32)> for Coordinate {
    fn from((y, x): (u32, u32)) -> Self {
        Self::new(y, x)
    }
}

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A signed (row, column) delta.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub y: i32,
    pub x: i32,
}

impl Offset {
    pub const UP: Self = Self::new(-1, 0);
    pub const RIGHT: Self = Self::new(0, 1);
    pub const DOWN: Self = Self::new(1, 0);
    pub const LEFT: Self = Self::new(0, -1);

    /// Cardinal directions in the order neighbours are always visited.
    pub const CARDINAL: [Self; 4] = [Self::UP, Self::RIGHT, Self::DOWN, Self::LEFT];

    #[inline]
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    /// Euclidean length of the offset.
    #[inline]
    pub fn length(self) -> f64 {
        f64::from(self.x).hypot(f64::from(self.y))
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, {:+})", self.y, self.x)
    }
}

// ---------------------------------------------------------------------------
// Dimension
// ---------------------------------------------------------------------------

/// Size of a rectangular area. A valid dimension has both sides > 0; the
/// types that own storage assert this on construction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    pub height: u32,
    pub width: u32,
}

impl Dimension {
    #[inline]
    pub const fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// Whether both sides are strictly positive.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.height > 0 && self.width > 0
    }

    /// Total number of tiles.
    #[inline]
    pub const fn len(self) -> usize {
        self.height as usize * self.width as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Whether `c` lies inside the dimension.
    #[inline]
    pub const fn contains(self, c: Coordinate) -> bool {
        c.y < self.height && c.x < self.width
    }

    /// Whether `other` fits inside this dimension on both axes.
    #[inline]
    pub const fn fits(self, other: Dimension) -> bool {
        other.height <= self.height && other.width <= self.width
    }

    /// Flat row-major index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(self, c: Coordinate) -> Option<usize> {
        self.contains(c)
            .then(|| c.y as usize * self.width as usize + c.x as usize)
    }

    /// Coordinate at flat index `idx`.
    #[inline]
    pub fn coordinate(self, idx: usize) -> Coordinate {
        let w = self.width as usize;
        Coordinate::new((idx / w) as u32, (idx % w) as u32)
    }

    /// Row-major iterator over every coordinate.
    #[inline]
    pub fn iter(self) -> DimensionIter {
        DimensionIter {
            dim: self,
            next: 0,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

impl IntoIterator for Dimension {
    type Item = Coordinate;
    type IntoIter = DimensionIter;
    #[inline]
    fn into_iter(self) -> DimensionIter {
        self.iter()
    }
}

/// Row-major iterator over the coordinates of a [`Dimension`].
#[derive(Clone, Debug)]
pub struct DimensionIter {
    dim: Dimension,
    next: usize,
}

impl Iterator for DimensionIter {
    type Item = Coordinate;

    #[inline]
    fn next(&mut self) -> Option<Coordinate> {
        if self.next >= self.dim.len() {
            return None;
        }
        let c = self.dim.coordinate(self.next);
        self.next += 1;
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dim.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DimensionIter {}
