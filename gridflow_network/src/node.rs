//! Node identities, signals, and per-node storage.

use std::fmt;

use gridflow_layout::Coordinate;

/// Index of a placed logic element. Indices start at 0, with nodes 0 and 1
/// reserved for the constants; allocation is monotonically increasing and
/// slots are never reused.
pub type Node = u32;

/// The flat-integer encoding of a tile, used as a pointer to "whatever node
/// currently occupies that tile". Signals are never complemented; inversion
/// requires an explicit NOT node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signal(u64);

impl Signal {
    /// Reconstructs a signal from its flat key.
    pub const fn from_repr(repr: u64) -> Self {
        Self(repr)
    }

    /// The flat key of this signal.
    pub const fn repr(self) -> u64 {
        self.0
    }

    /// The tile this signal denotes.
    pub const fn tile(self) -> Coordinate {
        Coordinate::from_repr(self.0)
    }
}

impl From<Coordinate> for Signal {
    fn from(t: Coordinate) -> Self {
        Self(t.repr())
    }
}

impl From<Signal> for Coordinate {
    fn from(s: Signal) -> Self {
        s.tile()
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signal@{:?}", self.tile())
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tile())
    }
}

/// Arena slot of a single node.
///
/// Slots are tombstoned rather than freed: killing a node sets the dead bit
/// and leaves the slot allocated so that indices stay stable for the
/// lifetime of the network.
#[derive(Clone, Debug)]
pub(crate) struct NodeData {
    /// Function literal into the shared cache.
    pub literal: u32,
    /// Child signals, in creation order.
    pub children: Vec<Signal>,
    /// How many other nodes point at this one.
    pub refs: u32,
    /// Tombstone bit; dead nodes are excluded from iteration and counts.
    pub dead: bool,
    /// Application-specific scratch value.
    pub value: u32,
    /// Visited flag for traversals.
    pub visited: u32,
}

impl NodeData {
    /// A fresh, unplaced (hence dead) node computing `literal`.
    pub fn with_literal(literal: u32) -> Self {
        Self {
            literal,
            children: Vec::new(),
            refs: 0,
            dead: true,
            value: 0,
            visited: 0,
        }
    }

    /// A constant slot: permanently alive, never placed on a live tile.
    pub fn constant(literal: u32) -> Self {
        Self {
            dead: false,
            ..Self::with_literal(literal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_round_trips_its_tile() {
        let t = Coordinate::new(3, 1, 1);
        let s = Signal::from(t);
        assert_eq!(s.tile(), t);
        assert_eq!(s.repr(), t.repr());
        assert_eq!(Coordinate::from(s), t);
        assert_eq!(Signal::from_repr(s.repr()), s);
    }

    #[test]
    fn signals_of_distinct_tiles_differ() {
        let a = Signal::from(Coordinate::new_xy(0, 1));
        let b = Signal::from(Coordinate::new_xy(1, 0));
        assert_ne!(a, b);
    }
}
