//! Field-of-view computation.
//!
//! A cell is visible from `origin` when:
//!
//! 1. its squared Euclidean distance is at most `sight_range²` (exact integer
//!    comparison, so a cell at exactly the sight range is included), and
//! 2. the Bresenham line from `origin` to it crosses no opaque cell strictly
//!    between the two endpoints.
//!
//! Opaque cells are themselves visible, so walls bounding the view show up.
//! Diagonal steps of the ray cost the same as orthogonal ones. The ray is
//! always traced from the viewer outwards, which keeps the result a pure
//! function of (grid, origin, range).
//!
//! Cost is O(R²) candidates times O(R) per ray, with the candidate window
//! clamped to the grid, so very large ranges degrade to the grid area.

use crate::grid::Grid;
use crate::state::Coordinates;

/// Cells perceived from `origin`, row-major.
///
/// Returns an empty list when `origin` lies outside the grid.
pub fn visible_cells(grid: &Grid, origin: Coordinates, sight_range: u32) -> Vec<Coordinates> {
    if !grid.contains(origin) {
        return Vec::new();
    }

    let range_squared = u64::from(sight_range) * u64::from(sight_range);
    let min_x = origin.x.saturating_sub(sight_range);
    let min_y = origin.y.saturating_sub(sight_range);
    let max_x = origin.x.saturating_add(sight_range).min(grid.width() - 1);
    let max_y = origin.y.saturating_add(sight_range).min(grid.height() - 1);

    let mut visible = Vec::new();
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let target = Coordinates::new(x, y);
            if origin.distance_squared(target) <= range_squared
                && has_line_of_sight(grid, origin, target)
            {
                visible.push(target);
            }
        }
    }
    visible
}

/// True when no opaque cell lies strictly between `from` and `to`.
pub fn has_line_of_sight(grid: &Grid, from: Coordinates, to: Coordinates) -> bool {
    let (x1, y1) = (i64::from(to.x), i64::from(to.y));
    let (mut x, mut y) = (i64::from(from.x), i64::from(from.y));

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    while (x, y) != (x1, y1) {
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x += sx;
        }
        if doubled <= dx {
            err += dx;
            y += sy;
        }
        if (x, y) == (x1, y1) {
            break;
        }
        // The ray stays inside the bounding box of two on-grid endpoints.
        let step = Coordinates::new(x as u32, y as u32);
        if !grid.is_transparent_at(step) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UnplacedObject;

    #[test]
    fn origin_is_always_visible() {
        let grid = Grid::new(7, 7);
        let origin = Coordinates::new(3, 3);
        assert_eq!(visible_cells(&grid, origin, 0), vec![origin]);
        assert!(visible_cells(&grid, origin, 2).contains(&origin));
    }

    #[test]
    fn every_visible_cell_is_within_range() {
        let grid = Grid::new(21, 21);
        let origin = Coordinates::new(10, 10);
        let visible = visible_cells(&grid, origin, 4);

        assert!(
            visible
                .iter()
                .all(|cell| origin.distance(*cell) <= 4.0 + f64::EPSILON)
        );
        // Boundary cells at exactly the range are included.
        assert!(visible.contains(&Coordinates::new(14, 10)));
        assert!(!visible.contains(&Coordinates::new(14, 11)));
        assert!(!visible.contains(&Coordinates::new(13, 13)));
    }

    #[test]
    fn opaque_cell_hides_what_lies_behind() {
        let mut grid = Grid::new(9, 5);
        grid.place_object(UnplacedObject::block(), Coordinates::new(3, 2))
            .unwrap();
        let origin = Coordinates::new(1, 2);
        let visible = visible_cells(&grid, origin, 6);

        assert!(visible.contains(&Coordinates::new(2, 2)));
        assert!(visible.contains(&Coordinates::new(3, 2)));
        assert!(!visible.contains(&Coordinates::new(4, 2)));
        assert!(!visible.contains(&Coordinates::new(5, 2)));
    }

    #[test]
    fn transparent_occupants_do_not_block() {
        let mut grid = Grid::new(9, 5);
        grid.place_object(UnplacedObject::exit(), Coordinates::new(3, 2))
            .unwrap();
        let visible = visible_cells(&grid, Coordinates::new(1, 2), 6);
        assert!(visible.contains(&Coordinates::new(5, 2)));
    }

    #[test]
    fn huge_range_is_clipped_to_grid() {
        let grid = Grid::new(6, 4);
        let visible = visible_cells(&grid, Coordinates::new(2, 1), u32::MAX);
        assert!(visible.iter().all(|cell| grid.contains(*cell)));
        assert!(visible.contains(&Coordinates::new(2, 1)));
    }

    #[test]
    fn result_is_deterministic() {
        let mut grid = Grid::new(15, 15);
        for x in [4, 6, 9] {
            grid.place_object(UnplacedObject::block(), Coordinates::new(x, 7))
                .unwrap();
        }
        let origin = Coordinates::new(7, 9);
        assert_eq!(
            visible_cells(&grid, origin, 6),
            visible_cells(&grid, origin, 6)
        );
    }

    #[test]
    fn origin_off_grid_sees_nothing() {
        let grid = Grid::new(4, 4);
        assert!(visible_cells(&grid, Coordinates::new(9, 9), 3).is_empty());
    }
}
