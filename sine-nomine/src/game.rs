//! Core game state.

use nomine_core::{Coordinate, Level, Offset, TileFlags};
use nomine_paths::DistanceMap;
use nomine_rl::{DungeonGen, Room, fov};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, GameConfig};

/// Exploration weight of a tile the player has never seen.
pub const UNEXPLORED_WEIGHT: u32 = 20;
/// Exploration weight of a known torch. Lower than any unexplored tile, so
/// autoexplore collects torches it knows about before wandering off.
pub const TORCH_WEIGHT: u32 = 0;

/// The four directions the player can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub const fn offset(self) -> Offset {
        match self {
            Direction::Up => Offset::UP,
            Direction::Right => Offset::RIGHT,
            Direction::Down => Offset::DOWN,
            Direction::Left => Offset::LEFT,
        }
    }

    /// The direction leading from `from` to the adjacent tile `to`, or
    /// `None` if the two are not cardinal neighbours.
    pub fn between(from: Coordinate, to: Coordinate) -> Option<Direction> {
        let delta = to.offset_from(from);
        Self::ALL.into_iter().find(|d| d.offset() == delta)
    }
}

/// The player character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub position: Coordinate,
    /// Field of view range; every torch picked up extends it by one.
    pub range: u32,
}

/// Core game state.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    level: Level,
    rooms: Vec<Room>,
    player: Player,
    turn: u64,
}

impl Game {
    /// Start a new session, seeding the generator from `config.seed` or,
    /// if unset, from the operating system.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }

    /// Start a new session driven by `rng`: generate the level, scatter
    /// torches and place the player on the first room's anchor.
    pub fn with_rng<R: Rng>(config: &GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut level = Level::new(config.dimension);
        let mut dungeon = DungeonGen::new(rng);
        let rooms = dungeon.generate(
            &mut level,
            config.rooms,
            config.room_min(),
            config.room_max(),
        );

        let torches = dungeon
            .rng
            .random_range(config.torches.min..=config.torches.max);
        let placed = dungeon.scatter(&mut level, torches as usize, TileFlags::TORCH);
        log::debug!("torches at {placed:?}");

        let player = Player {
            position: rooms[0].anchor,
            range: config.fov_range,
        };
        let mut game = Self {
            level,
            rooms,
            player,
            turn: 0,
        };
        game.apply_effects();
        game.update_fov();

        log::info!(
            "new game: {} level, {} rooms, {} torches, player at {}",
            game.level.dimension(),
            game.rooms.len(),
            placed.len(),
            game.player.position
        );
        Ok(game)
    }

    /// Build a session around an existing level, such as a hand-built test level.
    ///
    /// # Panics
    ///
    /// Panics if the player stands outside the level.
    pub fn from_parts(level: Level, player: Player) -> Self {
        let mut game = Self {
            level,
            rooms: Vec::new(),
            player,
            turn: 0,
        };
        game.apply_effects();
        game.update_fov();
        game
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Rooms of the generated level; empty for sessions built with
    /// [`Game::from_parts`].
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Number of successful moves so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    // -------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------

    /// Recompute what the player sees from their current position.
    pub fn update_fov(&mut self) {
        fov::compute(&mut self.level, self.player.position, self.player.range);
    }

    /// Move the player one tile. Moves off the level or into a wall are
    /// refused and cost nothing. Returns whether the player moved.
    pub fn step(&mut self, direction: Direction) -> bool {
        let Some(to) = self
            .player
            .position
            .checked_offset(direction.offset(), self.level.dimension())
        else {
            return false;
        };
        if self.level.is_wall(to) {
            return false;
        }

        self.player.position = to;
        self.turn += 1;
        self.apply_effects();
        self.update_fov();
        true
    }

    fn apply_effects(&mut self) {
        let pos = self.player.position;
        if self.level.flags(pos).contains(TileFlags::TORCH) {
            self.level.remove_flags(pos, TileFlags::TORCH);
            self.player.range = self.player.range.saturating_add(1);
            log::info!(
                "picked up a torch at {pos}, sight range now {}",
                self.player.range
            );
        }
    }

    /// Distance map guiding autoexplore: known torches are seeded at
    /// [`TORCH_WEIGHT`] and every passable tile not yet known at
    /// [`UNEXPLORED_WEIGHT`].
    pub fn exploration_map(&self) -> DistanceMap {
        let mut map = DistanceMap::create(&self.level);
        for (c, t) in self.level.iter() {
            if t.is_known() {
                if t.has_torch() {
                    map.add_target(&self.level, c, TORCH_WEIGHT);
                }
            } else if !t.is_wall() {
                map.add_target(&self.level, c, UNEXPLORED_WEIGHT);
            }
        }
        map
    }

    /// Take one step towards the nearest thing worth visiting. Returns the
    /// direction taken, or `None` once nothing reachable is left to explore
    /// or collect.
    pub fn autoexplore(&mut self) -> Option<Direction> {
        let from = self.player.position;
        let next = self.exploration_map().downhill(&self.level, from)?;
        let direction = Direction::between(from, next)?;
        self.step(direction).then_some(direction)
    }
}
