//! Spatial substrate for field-coupled nanocomputing layouts.
//!
//! A layout is modeled as a bounded rectangular-cuboid lattice of
//! [`Coordinate`]s. [`CartesianGrid`] owns the aspect ratio and provides
//! cardinal navigation and ranged iteration through the [`Lattice`]
//! capability; [`ClockedGrid`] attaches a [`ClockingScheme`] on top and
//! derives directed adjacency from clock-number ordering through
//! [`ClockedLattice`]. Higher layers (the gate-level network) compose these
//! grids by value and regain their surface via trait delegation.

mod cartesian;
mod clocked;
mod clocking;
mod coordinate;
mod lattice;

pub use cartesian::CartesianGrid;
pub use clocked::{ClockedGrid, ClockedLattice};
pub use clocking::{
    ClockFn, ClockNumber, ClockingScheme, NumClocks, SchemeError, bancs_clocking, clock_name,
    columnar_clocking, open_clocking, res_clocking, twoddwave_clocking, twoddwave_hex_clocking,
    use_clocking,
};
pub use coordinate::{AspectRatio, CoordIter, Coordinate};
pub use lattice::{Lattice, MAX_FANIN_SIZE};
