//! The plain Cartesian grid: ownership of the aspect ratio.

use tracing::debug;

use crate::coordinate::{AspectRatio, Coordinate};
use crate::lattice::Lattice;

/// A bounded Cartesian coordinate grid.
///
/// Owns nothing but its aspect ratio; the whole spatial surface comes from
/// the [`Lattice`] capability. Cloning is a deep copy.
#[derive(Clone, Debug)]
pub struct CartesianGrid {
    dimension: AspectRatio,
}

impl CartesianGrid {
    /// Creates a grid spanning the origin up to and including `ar`.
    pub fn new(ar: AspectRatio) -> Self {
        debug_assert!(!ar.is_dead(), "aspect ratio must be a live coordinate");

        Self { dimension: ar }
    }

    /// Replaces the aspect ratio wholesale. There is no incremental growth.
    pub fn resize(&mut self, ar: AspectRatio) {
        debug_assert!(!ar.is_dead(), "aspect ratio must be a live coordinate");

        debug!(from = %self.dimension, to = %ar, "resizing grid");
        self.dimension = ar;
    }
}

impl Default for CartesianGrid {
    /// A 1×1×1 grid holding the single coordinate `(0, 0, 0)`.
    fn default() -> Self {
        Self::new(Coordinate::new(0, 0, 0))
    }
}

impl Lattice for CartesianGrid {
    fn bound(&self) -> Coordinate {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(x: u32, y: u32) -> Coordinate {
        Coordinate::new_xy(x, y)
    }

    #[test]
    fn structural_properties() {
        let grid = CartesianGrid::new(Coordinate::new(9, 7, 1));
        assert_eq!(grid.x(), 9);
        assert_eq!(grid.y(), 7);
        assert_eq!(grid.z(), 1);
        assert_eq!(grid.area(), 80);
        assert_eq!(grid.volume(), 160);

        let single = CartesianGrid::default();
        assert_eq!(single.volume(), 1);
    }

    #[test]
    fn resize_replaces_the_dimension() {
        let mut grid = CartesianGrid::default();
        grid.resize(Coordinate::new(4, 2, 1));
        assert_eq!(grid.bound(), Coordinate::new(4, 2, 1));
        assert!(grid.is_within_bounds(Coordinate::new(4, 2, 1)));
    }

    #[test]
    fn cardinal_moves_clamp_at_borders() {
        let grid = CartesianGrid::new(Coordinate::new(2, 2, 1));

        assert_eq!(grid.north(coord(1, 1)), coord(1, 0));
        assert_eq!(grid.north(coord(1, 0)), coord(1, 0));
        assert_eq!(grid.east(coord(1, 1)), coord(2, 1));
        assert_eq!(grid.east(coord(2, 1)), coord(2, 1));
        assert_eq!(grid.south(coord(1, 1)), coord(1, 2));
        assert_eq!(grid.south(coord(1, 2)), coord(1, 2));
        assert_eq!(grid.west(coord(1, 1)), coord(0, 1));
        assert_eq!(grid.west(coord(0, 1)), coord(0, 1));

        assert_eq!(grid.above(coord(1, 1)), Coordinate::new(1, 1, 1));
        assert_eq!(grid.above(Coordinate::new(1, 1, 1)), Coordinate::new(1, 1, 1));
        assert_eq!(grid.below(Coordinate::new(1, 1, 1)), coord(1, 1));
        assert_eq!(grid.below(coord(1, 1)), coord(1, 1));
    }

    #[test]
    fn out_of_bounds_moves_produce_the_dead_sentinel() {
        let grid = CartesianGrid::new(Coordinate::new(2, 2, 0));

        assert!(grid.east(coord(3, 0)).is_dead());
        assert!(grid.south(coord(0, 3)).is_dead());
        assert!(grid.above(Coordinate::new(0, 0, 1)).is_dead());
    }

    #[test]
    fn boundary_idempotence() {
        // north(south(c)) == c unless c was already at the southern border
        let grid = CartesianGrid::new(Coordinate::new(3, 3, 0));

        for c in grid.coordinates() {
            if !grid.is_at_southern_border(c) {
                assert_eq!(grid.north(grid.south(c)), c);
            }
            if !grid.is_at_eastern_border(c) {
                assert_eq!(grid.west(grid.east(c)), c);
            }
        }
    }

    #[test]
    fn relative_position_predicates() {
        let grid = CartesianGrid::new(Coordinate::new(2, 2, 1));

        assert!(grid.is_north_of(coord(1, 1), coord(1, 0)));
        assert!(grid.is_east_of(coord(1, 1), coord(2, 1)));
        assert!(grid.is_south_of(coord(1, 1), coord(1, 2)));
        assert!(grid.is_west_of(coord(1, 1), coord(0, 1)));
        assert!(grid.is_above_of(coord(1, 1), Coordinate::new(1, 1, 1)));
        assert!(grid.is_below_of(Coordinate::new(1, 1, 1), coord(1, 1)));

        assert!(grid.is_adjacent_of(coord(1, 1), coord(2, 1)));
        assert!(!grid.is_adjacent_of(coord(1, 1), coord(2, 2)));
        assert!(grid.is_adjacent_elevation_of(coord(1, 1), Coordinate::new(2, 1, 1)));

        // clamped moves are not genuine neighbors
        assert!(!grid.is_north_of(coord(0, 0), coord(0, 0)));
    }

    #[test]
    fn border_predicates_and_projections() {
        let grid = CartesianGrid::new(Coordinate::new(4, 4, 0));

        assert!(grid.is_at_northern_border(coord(2, 0)));
        assert!(grid.is_at_eastern_border(coord(4, 2)));
        assert!(grid.is_at_southern_border(coord(2, 4)));
        assert!(grid.is_at_western_border(coord(0, 2)));
        assert!(grid.is_at_border(coord(0, 2)));
        assert!(!grid.is_at_border(coord(2, 2)));

        assert_eq!(grid.northern_border_of(coord(2, 3)), coord(2, 0));
        assert_eq!(grid.eastern_border_of(coord(2, 3)), coord(4, 3));
        assert_eq!(grid.southern_border_of(coord(2, 3)), coord(2, 4));
        assert_eq!(grid.western_border_of(coord(2, 3)), coord(0, 3));
    }

    #[test]
    fn layer_predicates_and_bounds() {
        let grid = CartesianGrid::new(Coordinate::new(2, 2, 1));

        assert!(grid.is_ground_layer(coord(1, 1)));
        assert!(grid.is_crossing_layer(Coordinate::new(1, 1, 1)));

        for c in grid.coordinates() {
            assert!(grid.is_within_bounds(c));
        }
        assert!(!grid.is_within_bounds(coord(3, 0)));
        assert!(!grid.is_within_bounds(Coordinate::default()));
    }

    #[test]
    fn coordinate_iteration_covers_the_grid() {
        let grid = CartesianGrid::new(Coordinate::new(2, 2, 1));

        let all: Vec<Coordinate> = grid.coordinates().collect();
        assert_eq!(all.len() as u64, grid.volume());
        assert_eq!(all.first().copied(), Some(coord(0, 0)));
        assert_eq!(all.last().copied(), Some(Coordinate::new(2, 2, 1)));

        let ground: Vec<Coordinate> = grid.ground_coordinates().collect();
        assert_eq!(ground.len() as u64, grid.area());
        assert!(ground.iter().all(|c| c.z() == 0));
    }

    #[test]
    fn adjacency_helpers() {
        let grid = CartesianGrid::new(Coordinate::new(2, 2, 0));

        let inner = grid.adjacent_coordinates(coord(1, 1));
        assert_eq!(
            inner,
            vec![coord(1, 0), coord(2, 1), coord(1, 2), coord(0, 1)]
        );

        let corner = grid.adjacent_coordinates(coord(0, 0));
        assert_eq!(corner, vec![coord(1, 0), coord(0, 1)]);

        let pairs = grid.adjacent_opposite_coordinates(coord(1, 1));
        assert_eq!(
            pairs,
            vec![(coord(1, 0), coord(1, 2)), (coord(2, 1), coord(0, 1))]
        );

        // at a border, only the fully-present pair survives
        let edge_pairs = grid.adjacent_opposite_coordinates(coord(1, 0));
        assert_eq!(edge_pairs, vec![(coord(2, 0), coord(0, 0))]);

        assert!(grid.adjacent_opposite_coordinates(coord(0, 0)).is_empty());
    }
}
