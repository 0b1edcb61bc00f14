//! The clock-aware grid: a Cartesian grid with an attached clocking scheme.

use tracing::debug;

use crate::cartesian::CartesianGrid;
use crate::clocking::{ClockNumber, ClockingScheme, NumClocks, open_clocking};
use crate::coordinate::{AspectRatio, Coordinate};
use crate::lattice::Lattice;

/// Clock-derived dataflow queries over a [`Lattice`].
///
/// The incoming/outgoing predicates are the only primitives that encode
/// dataflow direction; layers above must derive direction through them so
/// that wraparound at the clock period is handled in exactly one place.
pub trait ClockedLattice: Lattice {
    /// The attached clocking scheme.
    fn scheme(&self) -> &ClockingScheme;

    /// Mutable access to the attached clocking scheme.
    fn scheme_mut(&mut self) -> &mut ClockingScheme;

    /// The clock number assigned to `cz`.
    fn clock_number(&self, cz: Coordinate) -> ClockNumber {
        self.scheme().clock_number(cz)
    }

    /// Number of clock phases of the attached scheme.
    fn num_clocks(&self) -> ClockNumber {
        self.scheme().num_clocks()
    }

    /// `true` iff the attached scheme is purely regular.
    fn is_regularly_clocked(&self) -> bool {
        self.scheme().is_regular()
    }

    /// `true` iff the attached scheme carries the given name.
    fn is_clocking_scheme(&self, name: &str) -> bool {
        self.scheme().has_name(name)
    }

    /// Overrides the clock number of a single zone.
    fn assign_clock_number(&mut self, cz: Coordinate, cn: ClockNumber) {
        self.scheme_mut().override_clock_number(cz, cn);
    }

    /// Atomically replaces the attached scheme.
    fn replace_clocking_scheme(&mut self, scheme: ClockingScheme) {
        debug!(scheme = scheme.name(), "replacing clocking scheme");
        *self.scheme_mut() = scheme;
    }

    /// `true` iff `cz2` feeds `cz1` under the clocking, i.e. `cz2`'s clock
    /// number is one before `cz1`'s modulo the period.
    fn is_incoming_clocked(&self, cz1: Coordinate, cz2: Coordinate) -> bool {
        if cz1 == cz2 {
            return false;
        }

        (self.clock_number(cz2) + 1) % self.num_clocks() == self.clock_number(cz1)
    }

    /// `true` iff `cz1` feeds `cz2` under the clocking.
    fn is_outgoing_clocked(&self, cz1: Coordinate, cz2: Coordinate) -> bool {
        if cz1 == cz2 {
            return false;
        }

        (self.clock_number(cz1) + 1) % self.num_clocks() == self.clock_number(cz2)
    }

    /// Cardinal neighbors of `cz` that feed it under the clocking.
    fn incoming_clocked_zones(&self, cz: Coordinate) -> Vec<Coordinate> {
        self.adjacent_coordinates(cz)
            .into_iter()
            .filter(|&adj| self.is_incoming_clocked(cz, adj))
            .collect()
    }

    /// Cardinal neighbors of `cz` that it feeds under the clocking.
    fn outgoing_clocked_zones(&self, cz: Coordinate) -> Vec<Coordinate> {
        self.adjacent_coordinates(cz)
            .into_iter()
            .filter(|&adj| self.is_outgoing_clocked(cz, adj))
            .collect()
    }

    /// Number of incoming clocked zones of `cz`.
    fn in_degree(&self, cz: Coordinate) -> u8 {
        self.incoming_clocked_zones(cz).len() as u8
    }

    /// Number of outgoing clocked zones of `cz`.
    fn out_degree(&self, cz: Coordinate) -> u8 {
        self.outgoing_clocked_zones(cz).len() as u8
    }

    /// Total number of clocked zones adjacent to `cz`.
    fn degree(&self, cz: Coordinate) -> u8 {
        self.in_degree(cz) + self.out_degree(cz)
    }
}

/// A Cartesian grid with a clocking scheme attached.
///
/// Stateless beyond the scheme itself: all direction queries derive from the
/// scheme and the underlying grid on the fly.
#[derive(Clone, Debug)]
pub struct ClockedGrid {
    grid: CartesianGrid,
    scheme: ClockingScheme,
}

impl ClockedGrid {
    /// Creates a clocked grid with the open 4-phase scheme.
    pub fn new(ar: AspectRatio) -> Self {
        Self::with_scheme(ar, open_clocking(NumClocks::Four))
    }

    /// Creates a clocked grid with an explicit scheme.
    pub fn with_scheme(ar: AspectRatio, scheme: ClockingScheme) -> Self {
        Self {
            grid: CartesianGrid::new(ar),
            scheme,
        }
    }

    /// Clocks an existing grid, consuming it.
    pub fn from_grid(grid: CartesianGrid, scheme: ClockingScheme) -> Self {
        Self { grid, scheme }
    }

    /// Replaces the aspect ratio of the underlying grid.
    pub fn resize(&mut self, ar: AspectRatio) {
        self.grid.resize(ar);
    }
}

impl Lattice for ClockedGrid {
    fn bound(&self) -> Coordinate {
        self.grid.bound()
    }
}

impl ClockedLattice for ClockedGrid {
    fn scheme(&self) -> &ClockingScheme {
        &self.scheme
    }

    fn scheme_mut(&mut self) -> &mut ClockingScheme {
        &mut self.scheme
    }
}
