use std::collections::VecDeque;

use nomine_core::{Coordinate, Dimension, Level, TileFlags};

use crate::traits::Passable;

/// Sentinel value meaning "not reached" in a [`DistanceMap`].
pub const DISTANCE_MAX: u32 = u32::MAX;

/// A per-tile distance field built by incremental breadth-first relaxation.
///
/// Targets are layered with [`add_target`](Self::add_target): each call only
/// ever lowers distances, so several independently weighted target sets can
/// be combined in one map, in any order, without resetting in between.
///
/// The map does not keep a reference to the terrain it was built over; every
/// relaxing call takes the terrain explicitly and asserts that its dimension
/// matches.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DistanceMapData"))]
pub struct DistanceMap {
    dimension: Dimension,
    values: Vec<u32>,
    // FIFO scratch queue of flat indices, kept to avoid reallocating.
    #[cfg_attr(feature = "serde", serde(skip))]
    queue: VecDeque<usize>,
}

/// Unchecked wire form of a [`DistanceMap`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct DistanceMapData {
    dimension: Dimension,
    values: Vec<u32>,
}

#[cfg(feature = "serde")]
impl TryFrom<DistanceMapData> for DistanceMap {
    type Error = String;

    fn try_from(data: DistanceMapData) -> Result<Self, Self::Error> {
        let DistanceMapData { dimension, values } = data;
        if !dimension.is_valid() {
            return Err(format!("invalid distance map dimension {dimension}"));
        }
        if values.len() != dimension.len() {
            return Err(format!(
                "distance map {dimension} needs {} values, got {}",
                dimension.len(),
                values.len()
            ));
        }
        Ok(Self {
            dimension,
            values,
            queue: VecDeque::new(),
        })
    }
}

impl DistanceMap {
    /// Create a map of the given size with every tile unreached.
    ///
    /// # Panics
    ///
    /// Panics if either side of `dimension` is zero.
    pub fn new(dimension: Dimension) -> Self {
        assert!(
            dimension.is_valid(),
            "DistanceMap::new: invalid dimension {dimension}"
        );
        Self {
            dimension,
            values: vec![DISTANCE_MAX; dimension.len()],
            queue: VecDeque::new(),
        }
    }

    /// Create an empty map matching `terrain`'s dimension.
    pub fn create<P: Passable>(terrain: &P) -> Self {
        Self::new(terrain.dimension())
    }

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Mark every tile unreached again.
    pub fn reset(&mut self) {
        self.values.fill(DISTANCE_MAX);
    }

    fn index(&self, position: Coordinate, op: &str) -> usize {
        match self.dimension.index(position) {
            Some(i) => i,
            None => panic!(
                "DistanceMap::{op}: {position} outside {}",
                self.dimension
            ),
        }
    }

    /// Seed `position` with distance `value` and relax its surroundings.
    ///
    /// Does nothing if `position` already holds a distance `<= value`.
    /// Otherwise neighbours are visited breadth-first over the four cardinal
    /// directions (up, right, down, left); a neighbour is updated and
    /// enqueued when it is passable and its distance is strictly greater
    /// than the current tile's distance plus one.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds or `terrain` has a different
    /// dimension.
    pub fn add_target<P: Passable>(&mut self, terrain: &P, position: Coordinate, value: u32) {
        assert_eq!(
            terrain.dimension(),
            self.dimension,
            "DistanceMap::add_target: terrain dimension mismatch"
        );
        let si = self.index(position, "add_target");
        if self.values[si] <= value {
            return;
        }

        let dim = self.dimension;
        self.values[si] = value;
        self.queue.clear();
        self.queue.push_back(si);

        let mut relaxed = 1usize;
        while let Some(ci) = self.queue.pop_front() {
            let next = self.values[ci].saturating_add(1);
            let cp = dim.coordinate(ci);
            for np in cp.neighbors_4(dim) {
                let Some(ni) = dim.index(np) else {
                    continue;
                };
                if self.values[ni] <= next {
                    continue;
                }
                if !terrain.passable(np) {
                    continue;
                }
                self.values[ni] = next;
                self.queue.push_back(ni);
                relaxed += 1;
            }
        }

        log::trace!("distance target {position} = {value}: {relaxed} tiles updated");
    }

    /// The recorded distance at `position`, or [`DISTANCE_MAX`] if unreached.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    #[inline]
    pub fn get_value(&self, position: Coordinate) -> u32 {
        self.values[self.index(position, "get_value")]
    }

    /// Whether `position` is in bounds and has been reached.
    #[inline]
    pub fn is_reachable(&self, position: Coordinate) -> bool {
        self.dimension
            .index(position)
            .is_some_and(|i| self.values[i] != DISTANCE_MAX)
    }

    /// Iterate over `(Coordinate, distance)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, u32)> + '_ {
        self.dimension.iter().zip(self.values.iter().copied())
    }

    /// The passable neighbour of `from` that is strictly closer than `from`
    /// itself, or `None` if there is none.
    ///
    /// Neighbours are checked in up, right, down, left order and only a
    /// strictly smaller distance replaces the current best, so ties go to
    /// the first direction in that order.
    pub fn downhill<P: Passable>(&self, terrain: &P, from: Coordinate) -> Option<Coordinate> {
        let mut best = self.get_value(from);
        let mut step = None;
        for n in from.neighbors_4(self.dimension) {
            if !terrain.passable(n) {
                continue;
            }
            let v = self.get_value(n);
            if v < best {
                best = v;
                step = Some(n);
            }
        }
        step
    }

    /// Floor tiles of `level` this map has not reached.
    ///
    /// After [`flood`] from any floor tile an empty result means the floor
    /// is fully connected.
    pub fn unreached(&self, level: &Level) -> Vec<Coordinate> {
        assert_eq!(
            level.dimension(),
            self.dimension,
            "DistanceMap::unreached: level dimension mismatch"
        );
        level
            .iter()
            .zip(self.values.iter())
            .filter(|((_, t), v)| t.flags.contains(TileFlags::FLOOR) && **v == DISTANCE_MAX)
            .map(|((c, _), _)| c)
            .collect()
    }

    /// Copy the distance field into each tile's `distance`; unreached tiles
    /// get `None`.
    pub fn annotate(&self, level: &mut Level) {
        assert_eq!(
            level.dimension(),
            self.dimension,
            "DistanceMap::annotate: level dimension mismatch"
        );
        for ((_, t), &v) in level.iter_mut().zip(self.values.iter()) {
            t.distance = (v != DISTANCE_MAX).then_some(v);
        }
    }
}

/// A fresh map seeded with distance 0 at `origin`.
pub fn flood<P: Passable>(terrain: &P, origin: Coordinate) -> DistanceMap {
    let mut map = DistanceMap::create(terrain);
    map.add_target(terrain, origin, 0);
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEIGHT: u32 = 6;
    const WIDTH: u32 = 5;
    const M: u32 = DISTANCE_MAX;

    fn empty_level() -> Level {
        Level::new(Dimension::new(HEIGHT, WIDTH))
    }

    fn walled_level() -> Level {
        let mut l = empty_level();
        for y in 0..4 {
            l.insert_flags(Coordinate::new(y, 2), TileFlags::WALL);
        }
        l
    }

    fn assert_table(map: &DistanceMap, expected: [[u32; WIDTH as usize]; HEIGHT as usize]) {
        for (c, v) in map.iter() {
            assert_eq!(
                v, expected[c.y as usize][c.x as usize],
                "distance mismatch at {c}"
            );
        }
    }

    #[test]
    fn create_is_unreached() {
        let l = empty_level();
        let map = DistanceMap::create(&l);
        assert!(map.iter().all(|(_, v)| v == DISTANCE_MAX));
        assert!(!map.is_reachable(Coordinate::ZERO));
    }

    #[test]
    fn empty_level_one_target() {
        let l = empty_level();
        let mut map = DistanceMap::create(&l);
        map.add_target(&l, Coordinate::new(0, 0), 0);
        for (c, v) in map.iter() {
            assert_eq!(v, c.y + c.x);
        }
    }

    #[test]
    fn empty_level_two_targets() {
        let l = empty_level();
        let mut map = DistanceMap::create(&l);
        map.add_target(&l, Coordinate::new(0, 0), 0);
        map.add_target(&l, Coordinate::new(3, 3), 3);
        assert_table(
            &map,
            [
                [0, 1, 2, 3, 4],
                [1, 2, 3, 4, 5],
                [2, 3, 4, 4, 5],
                [3, 4, 4, 3, 4],
                [4, 5, 5, 4, 5],
                [5, 6, 6, 5, 6],
            ],
        );
    }

    #[test]
    fn walled_level_one_target() {
        let l = walled_level();
        let mut map = DistanceMap::create(&l);
        map.add_target(&l, Coordinate::new(0, 0), 0);
        assert_table(
            &map,
            [
                [0, 1, M, 11, 12],
                [1, 2, M, 10, 11],
                [2, 3, M, 9, 10],
                [3, 4, M, 8, 9],
                [4, 5, 6, 7, 8],
                [5, 6, 7, 8, 9],
            ],
        );
    }

    #[test]
    fn walled_level_two_targets() {
        let l = walled_level();
        let mut map = DistanceMap::create(&l);
        map.add_target(&l, Coordinate::new(0, 0), 0);
        map.add_target(&l, Coordinate::new(3, 3), 3);
        assert_table(
            &map,
            [
                [0, 1, M, 6, 7],
                [1, 2, M, 5, 6],
                [2, 3, M, 4, 5],
                [3, 4, M, 3, 4],
                [4, 5, 5, 4, 5],
                [5, 6, 6, 5, 6],
            ],
        );
    }

    #[test]
    fn target_order_does_not_matter() {
        let l = walled_level();
        let mut a = DistanceMap::create(&l);
        a.add_target(&l, Coordinate::new(0, 0), 0);
        a.add_target(&l, Coordinate::new(3, 3), 3);
        let mut b = DistanceMap::create(&l);
        b.add_target(&l, Coordinate::new(3, 3), 3);
        b.add_target(&l, Coordinate::new(0, 0), 0);
        assert!(a.iter().eq(b.iter()));
    }

    #[test]
    fn higher_value_is_noop() {
        let l = empty_level();
        let mut map = DistanceMap::create(&l);
        map.add_target(&l, Coordinate::new(0, 0), 0);
        let before: Vec<_> = map.iter().collect();
        // (2, 2) already sits at 4.
        map.add_target(&l, Coordinate::new(2, 2), 4);
        map.add_target(&l, Coordinate::new(2, 2), 9);
        let after: Vec<_> = map.iter().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn neighbours_differ_by_at_most_one() {
        let l = walled_level();
        let mut map = DistanceMap::create(&l);
        map.add_target(&l, Coordinate::new(5, 4), 7);
        map.add_target(&l, Coordinate::new(0, 0), 20);
        map.add_target(&l, Coordinate::new(1, 3), 0);
        map.add_target(&l, Coordinate::new(2, 0), 2);
        let dim = l.dimension();
        for (c, v) in map.iter() {
            if l.is_wall(c) || v == DISTANCE_MAX {
                continue;
            }
            for n in c.neighbors_4(dim) {
                if l.is_wall(n) {
                    continue;
                }
                assert!(v.abs_diff(map.get_value(n)) <= 1, "{c} vs {n}");
            }
        }
    }

    #[test]
    fn downhill_prefers_up_right_down_left() {
        let l = empty_level();
        let mut map = DistanceMap::create(&l);
        // Every neighbour of (1, 1) is one step closer; up is checked first.
        map.add_target(&l, Coordinate::new(0, 2), 0);
        map.add_target(&l, Coordinate::new(2, 0), 0);
        assert_eq!(
            map.downhill(&l, Coordinate::new(1, 1)),
            Some(Coordinate::new(0, 1))
        );
        // A target has nowhere lower to go.
        assert_eq!(map.downhill(&l, Coordinate::new(0, 2)), None);
    }

    #[test]
    fn downhill_skips_walls() {
        let l = walled_level();
        let map = flood(&l, Coordinate::new(0, 3));
        // From (0, 1) the only way is down and around.
        assert_eq!(
            map.downhill(&l, Coordinate::new(0, 1)),
            Some(Coordinate::new(1, 1))
        );
    }

    #[test]
    fn unreached_reports_isolated_floor() {
        let mut l = Level::new(Dimension::new(3, 5));
        l.fill(TileFlags::WALL);
        for x in [0, 1, 3, 4] {
            l.set_flags(Coordinate::new(1, x), TileFlags::FLOOR);
        }
        let map = flood(&l, Coordinate::new(1, 0));
        assert_eq!(
            map.unreached(&l),
            vec![Coordinate::new(1, 3), Coordinate::new(1, 4)]
        );
        l.set_flags(Coordinate::new(1, 2), TileFlags::FLOOR);
        let map = flood(&l, Coordinate::new(1, 0));
        assert!(map.unreached(&l).is_empty());
    }

    #[test]
    fn annotate_writes_tile_distances() {
        let mut l = walled_level();
        let map = flood(&l, Coordinate::ZERO);
        map.annotate(&mut l);
        assert_eq!(l.tile(Coordinate::new(5, 4)).unwrap().distance, Some(9));
        assert_eq!(l.tile(Coordinate::new(0, 2)).unwrap().distance, None);
    }

    #[test]
    fn reset_clears() {
        let l = empty_level();
        let mut map = flood(&l, Coordinate::ZERO);
        map.reset();
        assert!(map.iter().all(|(_, v)| v == DISTANCE_MAX));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_bounds_target_panics() {
        let l = empty_level();
        let mut map = DistanceMap::create(&l);
        map.add_target(&l, Coordinate::new(HEIGHT, 0), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn distance_map_round_trip() {
        let l = Level::new(Dimension::new(3, 3));
        let map = flood(&l, Coordinate::new(1, 1));
        let json = serde_json::to_string(&map).unwrap();
        let back: DistanceMap = serde_json::from_str(&json).unwrap();
        assert!(back.iter().eq(map.iter()));
    }

    #[test]
    fn malformed_distance_map_is_rejected() {
        let l = Level::new(Dimension::new(3, 3));
        let mut value = serde_json::to_value(flood(&l, Coordinate::new(0, 0))).unwrap();
        value["values"].as_array_mut().unwrap().push(serde_json::json!(7));
        let err = serde_json::from_value::<DistanceMap>(value).unwrap_err();
        assert!(err.to_string().contains("needs 9 values, got 10"), "{err}");
    }
}
