//! The generic logic-network contract consumed by external synthesis,
//! verification, and DRC algorithms.
//!
//! Anything wrapping a [`GateGrid`] for such an algorithm must expose
//! exactly this shape: node indices starting at 0 with nodes 0/1 reserved as
//! constants, monotonically increasing allocation with no slot reuse, and
//! the classification and iteration semantics below.

use crate::function::TruthTable;
use crate::network::GateGrid;
use crate::node::{Node, Signal};

/// Read-only logic-graph surface of a gate-level network.
pub trait LogicNetwork {
    /// Total number of allocated node slots, dead ones included.
    fn size(&self) -> u32;

    /// Number of primary inputs.
    fn num_pis(&self) -> usize;

    /// Number of primary outputs.
    fn num_pos(&self) -> usize;

    /// Number of live non-identity nodes.
    fn num_gates(&self) -> u32;

    /// Number of live identity nodes.
    fn num_wires(&self) -> u32;

    /// `true` iff `n` is a reserved constant.
    fn is_constant(&self, n: Node) -> bool;

    /// `true` iff `n` is a primary input.
    fn is_pi(&self, n: Node) -> bool;

    /// `true` iff `n` is currently recorded as a primary output.
    fn is_po(&self, n: Node) -> bool;

    /// `true` iff `n` is a non-input function node.
    fn is_gate(&self, n: Node) -> bool;

    /// `true` iff `n` computes the identity function.
    fn is_wire(&self, n: Node) -> bool;

    /// `true` iff `n` is tombstoned.
    fn is_dead(&self, n: Node) -> bool;

    /// The Boolean function computed by `n`.
    fn node_function(&self, n: Node) -> TruthTable;

    /// All live nodes in index order, constants included.
    fn nodes(&self) -> impl Iterator<Item = Node> + '_;

    /// All live gates in index order.
    fn gates(&self) -> impl Iterator<Item = Node> + '_;

    /// All live wires in index order.
    fn wires(&self) -> impl Iterator<Item = Node> + '_;

    /// Primary inputs in creation order.
    fn pis(&self) -> impl Iterator<Item = Node> + '_;

    /// Primary output signals in creation order.
    fn pos(&self) -> impl Iterator<Item = Signal> + '_;

    /// Signals feeding `n`.
    fn fanins(&self, n: Node) -> impl Iterator<Item = Signal> + '_;

    /// Signals consuming `n`.
    fn fanouts(&self, n: Node) -> impl Iterator<Item = Signal> + '_;

    /// Number of signals feeding `n`.
    fn fanin_size(&self, n: Node) -> usize;

    /// Number of signals consuming `n`.
    fn fanout_size(&self, n: Node) -> usize;
}

impl LogicNetwork for GateGrid {
    fn size(&self) -> u32 {
        GateGrid::size(self)
    }

    fn num_pis(&self) -> usize {
        GateGrid::num_pis(self)
    }

    fn num_pos(&self) -> usize {
        GateGrid::num_pos(self)
    }

    fn num_gates(&self) -> u32 {
        GateGrid::num_gates(self)
    }

    fn num_wires(&self) -> u32 {
        GateGrid::num_wires(self)
    }

    fn is_constant(&self, n: Node) -> bool {
        GateGrid::is_constant(self, n)
    }

    fn is_pi(&self, n: Node) -> bool {
        GateGrid::is_pi(self, n)
    }

    fn is_po(&self, n: Node) -> bool {
        GateGrid::is_po(self, n)
    }

    fn is_gate(&self, n: Node) -> bool {
        GateGrid::is_gate(self, n)
    }

    fn is_wire(&self, n: Node) -> bool {
        GateGrid::is_wire(self, n)
    }

    fn is_dead(&self, n: Node) -> bool {
        GateGrid::is_dead(self, n)
    }

    fn node_function(&self, n: Node) -> TruthTable {
        GateGrid::node_function(self, n)
    }

    fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        GateGrid::nodes(self)
    }

    fn gates(&self) -> impl Iterator<Item = Node> + '_ {
        GateGrid::gates(self)
    }

    fn wires(&self) -> impl Iterator<Item = Node> + '_ {
        GateGrid::wires(self)
    }

    fn pis(&self) -> impl Iterator<Item = Node> + '_ {
        GateGrid::pis(self)
    }

    fn pos(&self) -> impl Iterator<Item = Signal> + '_ {
        GateGrid::pos(self)
    }

    fn fanins(&self, n: Node) -> impl Iterator<Item = Signal> + '_ {
        GateGrid::fanins(self, n)
    }

    fn fanouts(&self, n: Node) -> impl Iterator<Item = Signal> + '_ {
        GateGrid::fanouts(self, n)
    }

    fn fanin_size(&self, n: Node) -> usize {
        GateGrid::fanin_size(self, n)
    }

    fn fanout_size(&self, n: Node) -> usize {
        GateGrid::fanout_size(self, n)
    }
}
