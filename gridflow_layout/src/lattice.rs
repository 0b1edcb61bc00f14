//! The [`Lattice`] capability: everything a bounded coordinate grid can
//! answer from its aspect ratio alone. Implementors only provide the bound;
//! navigation, border tests, and ranged iteration are derived here so that
//! wrapper layers regain the full surface by delegating a single method.

use std::cmp::Ordering;

use crate::coordinate::{CoordIter, Coordinate};

/// Maximum number of inputs a tile of a cardinal-direction grid can receive.
pub const MAX_FANIN_SIZE: u8 = 3;

/// Spatial contract of a bounded cardinal-direction grid.
///
/// Cardinal moves saturate: a coordinate at the respective border is
/// returned unchanged, while a coordinate already *outside* the grid on the
/// queried axis yields the dead sentinel. Callers distinguish "neighbor is
/// the tile itself" from "no such neighbor" through exactly this asymmetry.
pub trait Lattice {
    /// The inclusive maximum coordinate of the grid.
    fn bound(&self) -> Coordinate;

    /// Maximum x position.
    fn x(&self) -> u32 {
        self.bound().x()
    }

    /// Maximum y position.
    fn y(&self) -> u32 {
        self.bound().y()
    }

    /// Maximum z position.
    fn z(&self) -> u8 {
        self.bound().z()
    }

    /// Number of coordinates in one layer.
    fn area(&self) -> u64 {
        self.bound().area()
    }

    /// Number of coordinates in the grid.
    fn volume(&self) -> u64 {
        self.bound().volume()
    }

    /// Northern neighbor of `c`, or `c` if `c.y() == 0`.
    fn north(&self, c: Coordinate) -> Coordinate {
        if c.y() == 0 { c } else { c.with_y(c.y() - 1) }
    }

    /// Eastern neighbor of `c`, `c` itself at the eastern border, or the
    /// dead sentinel if `c` is already out of bounds in x.
    fn east(&self, c: Coordinate) -> Coordinate {
        match c.x().cmp(&self.x()) {
            Ordering::Greater => c.as_dead(),
            Ordering::Less => c.with_x(c.x() + 1),
            Ordering::Equal => c,
        }
    }

    /// Southern neighbor of `c`, `c` itself at the southern border, or the
    /// dead sentinel if `c` is already out of bounds in y.
    fn south(&self, c: Coordinate) -> Coordinate {
        match c.y().cmp(&self.y()) {
            Ordering::Greater => c.as_dead(),
            Ordering::Less => c.with_y(c.y() + 1),
            Ordering::Equal => c,
        }
    }

    /// Western neighbor of `c`, or `c` if `c.x() == 0`.
    fn west(&self, c: Coordinate) -> Coordinate {
        if c.x() == 0 { c } else { c.with_x(c.x() - 1) }
    }

    /// Coordinate directly above `c`, `c` itself in the topmost layer, or
    /// the dead sentinel if `c` is already out of bounds in z.
    fn above(&self, c: Coordinate) -> Coordinate {
        match c.z().cmp(&self.z()) {
            Ordering::Greater => c.as_dead(),
            Ordering::Less => c.with_z(c.z() + 1),
            Ordering::Equal => c,
        }
    }

    /// Coordinate directly below `c`, or `c` in the ground layer.
    fn below(&self, c: Coordinate) -> Coordinate {
        if c.z() == 0 { c } else { c.with_z(c.z() - 1) }
    }

    /// `true` iff `c1` is directly north of `c2`.
    fn is_north_of(&self, c1: Coordinate, c2: Coordinate) -> bool {
        c1 != c2 && self.north(c1) == c2
    }

    /// `true` iff `c1` is directly east of `c2`.
    fn is_east_of(&self, c1: Coordinate, c2: Coordinate) -> bool {
        c1 != c2 && self.east(c1) == c2
    }

    /// `true` iff `c1` is directly south of `c2`.
    fn is_south_of(&self, c1: Coordinate, c2: Coordinate) -> bool {
        c1 != c2 && self.south(c1) == c2
    }

    /// `true` iff `c1` is directly west of `c2`.
    fn is_west_of(&self, c1: Coordinate, c2: Coordinate) -> bool {
        c1 != c2 && self.west(c1) == c2
    }

    /// `true` iff `c1` is a cardinal neighbor of `c2`.
    fn is_adjacent_of(&self, c1: Coordinate, c2: Coordinate) -> bool {
        self.is_north_of(c1, c2)
            || self.is_east_of(c1, c2)
            || self.is_south_of(c1, c2)
            || self.is_west_of(c1, c2)
    }

    /// `true` iff `c1` is a cardinal neighbor of `c2`, of the coordinate
    /// above `c2`, or of the coordinate below `c2`.
    fn is_adjacent_elevation_of(&self, c1: Coordinate, c2: Coordinate) -> bool {
        self.is_adjacent_of(c1, c2)
            || self.is_adjacent_of(c1, self.above(c2))
            || self.is_adjacent_of(c1, self.below(c2))
    }

    /// `true` iff `c1` is directly above `c2`.
    fn is_above_of(&self, c1: Coordinate, c2: Coordinate) -> bool {
        c1 != c2 && self.above(c1) == c2
    }

    /// `true` iff `c1` is directly below `c2`.
    fn is_below_of(&self, c1: Coordinate, c2: Coordinate) -> bool {
        c1 != c2 && self.below(c1) == c2
    }

    /// `true` iff `c` sits at the northern border.
    fn is_at_northern_border(&self, c: Coordinate) -> bool {
        c.y() == 0
    }

    /// `true` iff `c` sits at the eastern border.
    fn is_at_eastern_border(&self, c: Coordinate) -> bool {
        c.x() == self.x()
    }

    /// `true` iff `c` sits at the southern border.
    fn is_at_southern_border(&self, c: Coordinate) -> bool {
        c.y() == self.y()
    }

    /// `true` iff `c` sits at the western border.
    fn is_at_western_border(&self, c: Coordinate) -> bool {
        c.x() == 0
    }

    /// `true` iff `c` sits at any border of the grid.
    fn is_at_border(&self, c: Coordinate) -> bool {
        self.is_at_northern_border(c)
            || self.is_at_eastern_border(c)
            || self.is_at_southern_border(c)
            || self.is_at_western_border(c)
    }

    /// Projection of `c` onto the northern border.
    fn northern_border_of(&self, c: Coordinate) -> Coordinate {
        c.with_y(0)
    }

    /// Projection of `c` onto the eastern border.
    fn eastern_border_of(&self, c: Coordinate) -> Coordinate {
        c.with_x(self.x())
    }

    /// Projection of `c` onto the southern border.
    fn southern_border_of(&self, c: Coordinate) -> Coordinate {
        c.with_y(self.y())
    }

    /// Projection of `c` onto the western border.
    fn western_border_of(&self, c: Coordinate) -> Coordinate {
        c.with_x(0)
    }

    /// `true` iff `c` lies in the ground layer.
    fn is_ground_layer(&self, c: Coordinate) -> bool {
        c.z() == 0
    }

    /// `true` iff `c` lies in a crossing layer.
    fn is_crossing_layer(&self, c: Coordinate) -> bool {
        c.z() > 0
    }

    /// `true` iff `c` is a live coordinate within the grid.
    fn is_within_bounds(&self, c: Coordinate) -> bool {
        !c.is_dead() && c.x() <= self.x() && c.y() <= self.y() && c.z() <= self.z()
    }

    /// Lazily enumerates every coordinate of the grid in `(z, y, x)` order,
    /// x-fastest.
    fn coordinates(&self) -> CoordIter {
        CoordIter::new(self.bound(), Coordinate::default(), Coordinate::default())
    }

    /// Lazily enumerates `[start, stop)`; dead arguments select the grid
    /// origin and the natural end of the range, respectively.
    fn coordinate_range(&self, start: Coordinate, stop: Coordinate) -> CoordIter {
        CoordIter::new(self.bound(), start, stop)
    }

    /// Lazily enumerates every ground-layer coordinate.
    fn ground_coordinates(&self) -> CoordIter {
        self.ground_coordinate_range(Coordinate::default(), Coordinate::default())
    }

    /// Ground-layer variant of [`Lattice::coordinate_range`]. Both bounds
    /// must lie in the ground layer.
    fn ground_coordinate_range(&self, start: Coordinate, stop: Coordinate) -> CoordIter {
        debug_assert!(start.is_dead() || start.z() == 0);
        debug_assert!(stop.is_dead() || stop.z() == 0);

        let ground = Coordinate::new(self.x(), self.y(), 0);
        CoordIter::new(ground, start, stop)
    }

    /// The at most four distinct cardinal neighbors of `c`; clamped
    /// self-returns are excluded.
    fn adjacent_coordinates(&self, c: Coordinate) -> Vec<Coordinate> {
        [self.north(c), self.east(c), self.south(c), self.west(c)]
            .into_iter()
            .filter(|&cardinal| cardinal != c)
            .collect()
    }

    /// The (north, south) and (east, west) neighbor pairs of `c`; a pair is
    /// included only if both sides are genuine neighbors.
    fn adjacent_opposite_coordinates(&self, c: Coordinate) -> Vec<(Coordinate, Coordinate)> {
        [
            (self.north(c), self.south(c)),
            (self.east(c), self.west(c)),
        ]
        .into_iter()
        .filter(|&(c1, c2)| c1 != c && c2 != c)
        .collect()
    }
}
