//! Line-of-sight field of view.
//!
//! Visibility is computed by casting a Bresenham ray from the viewer to every
//! tile inside a circular range. A ray lights each tile it crosses and stops
//! right after the first wall, so walls themselves are seen but nothing
//! behind them along that ray.

use nomine_core::{Coordinate, Level, TileFlags};

use crate::line::rasterize;

/// Whether `target` lies within `range` of `viewer`, measuring the Euclidean
/// distance rounded to the nearest integer (halves round up).
pub fn in_range(viewer: Coordinate, target: Coordinate, range: u32) -> bool {
    target.offset_from(viewer).length().round() <= f64::from(range)
}

/// Recompute [`VISIBLE`](TileFlags::VISIBLE) for the whole level as seen
/// from `viewer`.
///
/// Every tile that ends up visible is also marked
/// [`KNOWN`](TileFlags::KNOWN). `KNOWN` is never cleared, so it accumulates
/// everything the viewer has ever seen. The viewer's own tile is always
/// visible.
///
/// # Panics
///
/// Panics if `viewer` is outside the level.
pub fn compute(level: &mut Level, viewer: Coordinate, range: u32) {
    assert!(
        level.contains(viewer),
        "fov::compute: viewer {viewer} outside {}",
        level.dimension()
    );
    level.remove_flags_all(TileFlags::VISIBLE);

    let dim = level.dimension();
    let y_max = viewer.y.saturating_add(range).min(dim.height - 1);
    let x_max = viewer.x.saturating_add(range).min(dim.width - 1);

    for y in viewer.y.saturating_sub(range)..=y_max {
        for x in viewer.x.saturating_sub(range)..=x_max {
            let target = Coordinate::new(y, x);
            if !in_range(viewer, target, range) {
                continue;
            }
            cast(level, viewer, target);
        }
    }

    log::trace!(
        "fov from {viewer} range {range}: {} visible",
        level.count(TileFlags::VISIBLE)
    );
}

fn cast(level: &mut Level, viewer: Coordinate, target: Coordinate) {
    for p in rasterize(viewer, target) {
        let Some(tile) = level.tile_mut(p) else {
            break;
        };
        tile.flags.insert(TileFlags::VISIBLE | TileFlags::KNOWN);
        if tile.is_wall() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomine_core::Dimension;

    fn floor_level(height: u32, width: u32) -> Level {
        let mut l = Level::new(Dimension::new(height, width));
        l.fill(TileFlags::FLOOR);
        l
    }

    #[test]
    fn open_field_is_a_disc() {
        let mut l = floor_level(9, 9);
        let viewer = Coordinate::new(4, 4);
        compute(&mut l, viewer, 2);
        for (c, t) in l.iter() {
            let expected = in_range(viewer, c, 2);
            assert_eq!(t.is_visible(), expected, "{c}");
        }
        // hypot(1, 2) rounds to 2, hypot(2, 2) rounds to 3.
        assert!(l.tile(Coordinate::new(2, 5)).unwrap().is_visible());
        assert!(!l.tile(Coordinate::new(2, 6)).unwrap().is_visible());
        assert_eq!(l.count(TileFlags::VISIBLE), 21);
    }

    #[test]
    fn range_zero_sees_only_viewer() {
        let mut l = floor_level(5, 5);
        compute(&mut l, Coordinate::new(2, 2), 0);
        assert_eq!(l.find(TileFlags::VISIBLE), vec![Coordinate::new(2, 2)]);
    }

    #[test]
    fn wall_blocks_but_is_seen() {
        let mut l = floor_level(1, 8);
        l.set_flags(Coordinate::new(0, 3), TileFlags::WALL);
        compute(&mut l, Coordinate::new(0, 0), 7);
        for x in 0..=3 {
            let t = l.tile(Coordinate::new(0, x)).unwrap();
            assert!(t.is_visible() && t.is_known(), "x = {x}");
        }
        for x in 4..8 {
            let t = l.tile(Coordinate::new(0, x)).unwrap();
            assert!(!t.is_visible() && !t.is_known(), "x = {x}");
        }
    }

    #[test]
    fn wall_shadows_diagonal_ray() {
        let mut l = floor_level(5, 5);
        // The ray (0, 0) -> (4, 4) is the main diagonal.
        l.set_flags(Coordinate::new(2, 2), TileFlags::WALL);
        compute(&mut l, Coordinate::new(0, 0), 10);
        assert!(l.tile(Coordinate::new(2, 2)).unwrap().is_visible());
        assert!(!l.tile(Coordinate::new(3, 3)).unwrap().is_visible());
        assert!(!l.tile(Coordinate::new(4, 4)).unwrap().is_visible());
    }

    #[test]
    fn viewer_on_wall_still_sees_itself() {
        let mut l = floor_level(3, 3);
        l.set_flags(Coordinate::new(1, 1), TileFlags::WALL);
        compute(&mut l, Coordinate::new(1, 1), 3);
        assert_eq!(l.find(TileFlags::VISIBLE), vec![Coordinate::new(1, 1)]);
    }

    #[test]
    fn known_persists_visible_does_not() {
        let mut l = floor_level(1, 20);
        compute(&mut l, Coordinate::new(0, 0), 3);
        compute(&mut l, Coordinate::new(0, 19), 3);
        let first = l.tile(Coordinate::new(0, 2)).unwrap();
        assert!(first.is_known());
        assert!(!first.is_visible());
        let now = l.tile(Coordinate::new(0, 17)).unwrap();
        assert!(now.is_known() && now.is_visible());
        assert_eq!(l.count(TileFlags::KNOWN), 8);
    }

    #[test]
    fn visible_implies_known_and_in_range() {
        let mut l = floor_level(15, 15);
        for y in 3..12 {
            l.set_flags(Coordinate::new(y, 9), TileFlags::WALL);
        }
        let viewer = Coordinate::new(7, 6);
        compute(&mut l, viewer, 5);
        for (c, t) in l.iter() {
            if t.is_visible() {
                assert!(t.is_known());
                assert!(in_range(viewer, c, 5), "{c}");
                assert!(c.x <= 9, "{c} is behind the wall");
            }
        }
    }

    #[test]
    fn huge_range_is_clamped_to_level() {
        let mut l = floor_level(4, 6);
        compute(&mut l, Coordinate::new(3, 5), u32::MAX);
        assert_eq!(l.count(TileFlags::VISIBLE), 24);
    }
}
