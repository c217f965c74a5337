//! Bresenham line rasterization.

use std::mem;

use nomine_core::Coordinate;

/// Rasterize the segment from `start` to `stop` with Bresenham's algorithm.
///
/// The result runs from `start` to `stop`, both included, and is never
/// empty. Lines are walked along their major axis from the lower end, so
/// `rasterize(b, a)` is exactly `rasterize(a, b)` reversed. No bounds are
/// checked; the points always lie in the bounding box of the two endpoints.
pub fn rasterize(start: Coordinate, stop: Coordinate) -> Vec<Coordinate> {
    let (mut x0, mut y0) = (i64::from(start.x), i64::from(start.y));
    let (mut x1, mut y1) = (i64::from(stop.x), i64::from(stop.y));

    // Walk along y instead of x when the line is steep.
    let is_steep = (y1 - y0).abs() > (x1 - x0).abs();
    if is_steep {
        mem::swap(&mut x0, &mut y0);
        mem::swap(&mut x1, &mut y1);
    }

    let swapped = x0 > x1;
    if swapped {
        mem::swap(&mut x0, &mut x1);
        mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let mut error = dx / 2;
    let ystep = if y0 < y1 { 1 } else { -1 };

    let mut line = Vec::with_capacity(dx as usize + 1);
    let mut y = y0;
    for x in x0..=x1 {
        let (row, col) = if is_steep { (x, y) } else { (y, x) };
        line.push(Coordinate::new(row as u32, col as u32));
        error -= dy;
        if error < 0 {
            y += ystep;
            error += dx;
        }
    }

    if swapped {
        line.reverse();
    }
    line
}
