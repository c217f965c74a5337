//! Session configuration.
//!
//! [`GameConfig`] gathers the values a front end collects from its user
//! (level size, room count and sizes, torch count, sight range). It is
//! validated as a whole before any level is built, so the generator's
//! assertions can only fire on programming errors.

use std::fmt;

use nomine_core::Dimension;

/// An inclusive `min..=max` range of sizes or counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeRange {
    pub min: u32,
    pub max: u32,
}

impl SizeRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn contains(self, n: u32) -> bool {
        self.min <= n && n <= self.max
    }

    pub const fn is_empty(self) -> bool {
        self.min > self.max
    }
}

impl fmt::Display for SizeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Settings for one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Size of the level, border included.
    pub dimension: Dimension,
    /// Number of rooms to carve.
    pub rooms: u32,
    /// Side length of each (square) room.
    pub room_size: SizeRange,
    /// How many torches to scatter.
    pub torches: SizeRange,
    /// Starting sight range of the player.
    pub fov_range: u32,
    /// Seed for the session's random number generator; `None` seeds from
    /// the operating system.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dimension: Dimension::new(40, 80),
            rooms: 8,
            room_size: SizeRange::new(4, 10),
            torches: SizeRange::new(2, 5),
            fov_range: 4,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Smallest room the generator may carve.
    pub fn room_min(&self) -> Dimension {
        Dimension::new(self.room_size.min, self.room_size.min)
    }

    /// Largest room the generator may carve.
    pub fn room_max(&self) -> Dimension {
        Dimension::new(self.room_size.max, self.room_size.max)
    }

    /// Check that a level can be generated from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dimension.is_valid() {
            return Err(ConfigError::InvalidDimension(self.dimension));
        }
        if self.rooms == 0 {
            return Err(ConfigError::NoRooms);
        }
        if self.room_size.min == 0 || self.room_size.is_empty() {
            return Err(ConfigError::InvalidRoomSize(self.room_size));
        }
        let inner = Dimension::new(
            self.dimension.height.saturating_sub(2),
            self.dimension.width.saturating_sub(2),
        );
        if !inner.fits(self.room_max()) {
            return Err(ConfigError::RoomTooLarge {
                room: self.room_size.max,
                level: self.dimension,
            });
        }
        if self.torches.is_empty() {
            return Err(ConfigError::InvalidTorchRange(self.torches));
        }
        Ok(())
    }
}

/// Errors reported by [`GameConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The level has a zero side.
    InvalidDimension(Dimension),
    /// No rooms were requested.
    NoRooms,
    /// Room sizes are zero or inverted.
    InvalidRoomSize(SizeRange),
    /// The largest room does not fit inside the level border.
    RoomTooLarge { room: u32, level: Dimension },
    /// The torch range is inverted.
    InvalidTorchRange(SizeRange),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension(d) => write!(f, "config: invalid level dimension {d}"),
            Self::NoRooms => write!(f, "config: at least one room is required"),
            Self::InvalidRoomSize(r) => write!(f, "config: invalid room size range {r}"),
            Self::RoomTooLarge { room, level } => write!(
                f,
                "config: rooms of size {room} do not fit a {level} level with its border"
            ),
            Self::InvalidTorchRange(r) => write!(f, "config: invalid torch range {r}"),
        }
    }
}

impl std::error::Error for ConfigError {}
