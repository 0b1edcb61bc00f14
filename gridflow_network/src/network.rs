//! The gate-level network: function-bearing nodes placed on a clocked grid.

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexSet;
use itertools::Itertools;
use tracing::debug;

use gridflow_layout::{
    AspectRatio, ClockedGrid, ClockedLattice, ClockingScheme, Coordinate, Lattice, NumClocks,
    open_clocking,
};

use crate::function::{FunctionCache, TruthTable, literal};
use crate::node::{Node, NodeData, Signal};

/// Sentinel signal hosting the constant-0 node.
const CONST0_SIG: Signal = Signal::from_repr(0x8000_0000_0000_0000);
/// Sentinel signal hosting the constant-1 node.
const CONST1_SIG: Signal = Signal::from_repr(0xC000_0000_0000_0000);

/// A gate-level network over a clocked grid.
///
/// Maintains the tile↔node bijection, primary I/O membership, and the
/// denormalized gate/wire/crossing counters; answers fanin/fanout queries
/// that combine geometric adjacency, clocking direction, and vertical
/// stacking. Nodes 0 and 1 are the permanently-alive constants, pinned to
/// two sentinel tiles excluded from normal placement.
///
/// Not internally synchronized: mutating operations assume exclusive access.
/// Cloning deep-copies all storage, including the clocking scheme snapshot.
#[derive(Clone, Debug)]
pub struct GateGrid {
    clocked: ClockedGrid,
    nodes: Vec<NodeData>,
    inputs: IndexSet<Node>,
    outputs: Vec<Signal>,
    tile_node: HashMap<Signal, Node>,
    node_tile: HashMap<Node, Signal>,
    fn_cache: FunctionCache,
    pi_names: HashMap<Node, String>,
    po_names: HashMap<Node, String>,
    layout_name: String,
    num_gates: u32,
    num_wires: u32,
    num_crossings: u32,
    trav_id: u32,
    respect_clocking: bool,
}

impl GateGrid {
    /// Creates a network over the given aspect ratio with the open 4-phase
    /// clocking, ready for manual zone assignment.
    pub fn new(ar: AspectRatio) -> Self {
        Self::with_scheme(ar, open_clocking(NumClocks::Four))
    }

    /// Creates a network over the given aspect ratio and clocking scheme.
    pub fn with_scheme(ar: AspectRatio, scheme: ClockingScheme) -> Self {
        Self::from_clocked(ClockedGrid::with_scheme(ar, scheme))
    }

    /// Wraps an existing clocked grid, consuming it.
    pub fn from_clocked(clocked: ClockedGrid) -> Self {
        let mut network = Self {
            clocked,
            nodes: vec![
                NodeData::constant(literal::CONST0),
                NodeData::constant(literal::CONST1),
            ],
            inputs: IndexSet::new(),
            outputs: Vec::new(),
            tile_node: HashMap::new(),
            node_tile: HashMap::new(),
            fn_cache: FunctionCache::new(),
            pi_names: HashMap::new(),
            po_names: HashMap::new(),
            layout_name: String::new(),
            num_gates: 0,
            num_wires: 0,
            num_crossings: 0,
            trav_id: 0,
            respect_clocking: true,
        };

        network.tile_node.insert(CONST0_SIG, 0);
        network.tile_node.insert(CONST1_SIG, 1);
        network.node_tile.insert(0, CONST0_SIG);
        network.node_tile.insert(1, CONST1_SIG);

        network
    }

    /// Name of the layout.
    pub fn layout_name(&self) -> &str {
        &self.layout_name
    }

    /// Renames the layout.
    pub fn set_layout_name(&mut self, name: impl Into<String>) {
        self.layout_name = name.into();
    }

    /// `true` iff fanin/fanout derivation filters neighbors through the
    /// clocking direction; when disabled, plain adjacency is used.
    pub fn respects_clocking(&self) -> bool {
        self.respect_clocking
    }

    /// Toggles whether data-flow queries respect the clocking.
    pub fn set_respect_clocking(&mut self, respect: bool) {
        self.respect_clocking = respect;
    }

    // ##########################################
    // constants and primary I/O

    /// The signal of the requested constant.
    pub fn get_constant(&self, value: bool) -> Signal {
        if value { CONST1_SIG } else { CONST0_SIG }
    }

    /// `true` iff `n` is one of the two reserved constants.
    pub fn is_constant(&self, n: Node) -> bool {
        n <= 1
    }

    /// The Boolean value of a constant node.
    pub fn constant_value(&self, n: Node) -> bool {
        n == 1
    }

    /// Allocates an identity-function input node on `t` and returns the
    /// tile's signal. A dead tile leaves the node unplaced and dangling.
    pub fn create_pi(&mut self, name: impl Into<String>, t: Coordinate) -> Signal {
        let n = self.allocate_node(literal::BUF, Vec::new());
        self.inputs.insert(n);

        let name = name.into();
        if !name.is_empty() {
            self.pi_names.insert(n, name);
        }

        self.assign_node(t, n);
        debug!(node = n, tile = %t, "created primary input");

        Signal::from(t)
    }

    /// Allocates an identity-function output node on `t`, wires it to `s`,
    /// and records the output. A dead tile leaves the node unplaced.
    pub fn create_po(&mut self, s: Signal, name: impl Into<String>, t: Coordinate) -> Signal {
        let n = self.allocate_node(literal::BUF, vec![s]);

        let name = name.into();
        if !name.is_empty() {
            self.po_names.insert(n, name);
        }

        let child = self.get_node(s);
        self.nodes[child as usize].refs += 1;

        // displace any occupant first so its output entry cannot swallow ours
        self.assign_node(t, n);
        self.outputs.push(Signal::from(t));
        debug!(node = n, tile = %t, "created primary output");

        Signal::from(t)
    }

    /// `true` iff `n` was created as a primary input.
    pub fn is_pi(&self, n: Node) -> bool {
        self.inputs.contains(&n)
    }

    /// `true` iff the node on `t` is a primary input.
    pub fn is_pi_tile(&self, t: Coordinate) -> bool {
        self.is_pi(self.get_node_at(t))
    }

    /// `true` iff `n` is currently recorded as a primary output.
    pub fn is_po(&self, n: Node) -> bool {
        self.outputs.iter().any(|&o| self.get_node(o) == n)
    }

    /// `true` iff the node on `t` is a primary output.
    pub fn is_po_tile(&self, t: Coordinate) -> bool {
        self.is_po(self.get_node_at(t))
    }

    /// The recorded name of a primary input, if any.
    pub fn get_input_name(&self, n: Node) -> Option<&str> {
        self.pi_names.get(&n).map(String::as_str)
    }

    /// The recorded name of a primary output, if any.
    pub fn get_output_name(&self, n: Node) -> Option<&str> {
        self.po_names.get(&n).map(String::as_str)
    }

    // ##########################################
    // gate creation

    /// Creates a wire segment forwarding `a`.
    pub fn create_buf(&mut self, a: Signal, t: Coordinate) -> Signal {
        self.create_node_from_literal(vec![a], literal::BUF, t)
    }

    /// Creates an inverter of `a`.
    pub fn create_not(&mut self, a: Signal, t: Coordinate) -> Signal {
        self.create_node_from_literal(vec![a], literal::NOT, t)
    }

    /// Creates a conjunction of `a` and `b`.
    pub fn create_and(&mut self, a: Signal, b: Signal, t: Coordinate) -> Signal {
        self.create_node_from_literal(vec![a, b], literal::AND, t)
    }

    /// Creates a negated conjunction of `a` and `b`.
    pub fn create_nand(&mut self, a: Signal, b: Signal, t: Coordinate) -> Signal {
        self.create_node_from_literal(vec![a, b], literal::NAND, t)
    }

    /// Creates a disjunction of `a` and `b`.
    pub fn create_or(&mut self, a: Signal, b: Signal, t: Coordinate) -> Signal {
        self.create_node_from_literal(vec![a, b], literal::OR, t)
    }

    /// Creates a negated disjunction of `a` and `b`.
    pub fn create_nor(&mut self, a: Signal, b: Signal, t: Coordinate) -> Signal {
        self.create_node_from_literal(vec![a, b], literal::NOR, t)
    }

    /// Creates an exclusive disjunction of `a` and `b`.
    pub fn create_xor(&mut self, a: Signal, b: Signal, t: Coordinate) -> Signal {
        self.create_node_from_literal(vec![a, b], literal::XOR, t)
    }

    /// Creates a negated exclusive disjunction of `a` and `b`.
    pub fn create_xnor(&mut self, a: Signal, b: Signal, t: Coordinate) -> Signal {
        self.create_node_from_literal(vec![a, b], literal::XNOR, t)
    }

    /// Creates a majority gate over `a`, `b`, and `c`.
    pub fn create_maj(&mut self, a: Signal, b: Signal, c: Signal, t: Coordinate) -> Signal {
        self.create_node_from_literal(vec![a, b, c], literal::MAJ, t)
    }

    /// Creates a node of arbitrary function and arity. With no children the
    /// function must be constant and the matching constant signal is
    /// returned without allocating a node.
    pub fn create_node(
        &mut self,
        children: &[Signal],
        function: &TruthTable,
        t: Coordinate,
    ) -> Signal {
        if children.is_empty() {
            debug_assert_eq!(function.num_vars(), 0);
            return self.get_constant(!function.is_const0());
        }

        debug_assert_eq!(usize::from(function.num_vars()), children.len());

        let lit = self.fn_cache.insert(function);
        self.create_node_from_literal(children.to_vec(), lit, t)
    }

    // ##########################################
    // nodes and signals

    /// The node occupying the signal's tile; the constant-0 node when the
    /// tile is empty. Absence is not an error.
    pub fn get_node(&self, s: Signal) -> Node {
        self.tile_node.get(&s).copied().unwrap_or(0)
    }

    /// The node occupying `t`; the constant-0 node when empty.
    pub fn get_node_at(&self, t: Coordinate) -> Node {
        self.get_node(Signal::from(t))
    }

    /// The tile hosting `n`; the dead sentinel when `n` is unplaced.
    pub fn get_tile(&self, n: Node) -> Coordinate {
        self.node_tile
            .get(&n)
            .map(|s| s.tile())
            .unwrap_or_default()
    }

    /// The signal currently denoting `n`.
    pub fn make_signal(&self, n: Node) -> Signal {
        Signal::from(self.get_tile(n))
    }

    /// `true` iff `n` is tombstoned (unplaced or cleared).
    pub fn is_dead(&self, n: Node) -> bool {
        self.nodes[n as usize].dead
    }

    /// Signals are never complemented.
    pub fn is_complemented(&self, _s: Signal) -> bool {
        false
    }

    /// Moves `n` to `t`, replacing its children with `new_children`.
    ///
    /// The old children's reference counts are dropped. If the tile changes,
    /// the old tile is cleared (killing the node), the node is re-registered
    /// and revived on `t`, and a recorded primary output on the old tile is
    /// rewritten to point at the new one. With `t` equal to the old tile
    /// only the children change, which is the rewire-in-place path.
    pub fn move_node(&mut self, n: Node, t: Coordinate, new_children: &[Signal]) -> Signal {
        let old_t = self.get_tile(n);

        let old_children = std::mem::take(&mut self.nodes[n as usize].children);
        for c in old_children {
            let child = self.get_node(c);
            self.nodes[child as usize].refs -= 1;
        }

        if t != old_t {
            let old_sig = Signal::from(old_t);
            let po_entry = self.outputs.iter().position(|&o| o == old_sig);

            self.clear_tile(old_t);
            self.assign_node(t, n);

            if let Some(pos) = po_entry {
                self.outputs.insert(pos, Signal::from(t));
            }

            debug!(node = n, from = %old_t, to = %t, "moved node");
        }

        for &c in new_children {
            let child = self.get_node(c);
            self.nodes[child as usize].refs += 1;
        }
        self.nodes[n as usize].children.extend_from_slice(new_children);

        Signal::from(t)
    }

    /// Empties `t`: updates the gate/wire (and, when applicable, crossing)
    /// counters, drops a matching primary-output entry, kills the hosted
    /// node, and removes both bijection entries. No-op on empty tiles and on
    /// the constant sentinels.
    pub fn clear_tile(&mut self, t: Coordinate) {
        if t.is_dead() {
            return;
        }

        let s = Signal::from(t);
        let Some(&n) = self.tile_node.get(&s) else {
            return;
        };

        // classification must happen before the counters change
        if self.is_wire(n) {
            self.num_wires -= 1;
            if self.crossing_counted_at(t) {
                self.num_crossings -= 1;
            }
        } else {
            self.num_gates -= 1;
        }

        self.outputs.retain(|&o| o != s);
        self.kill_node(n);
        self.node_tile.remove(&n);
        self.tile_node.remove(&s);

        debug!(node = n, tile = %t, "cleared tile");
    }

    // ##########################################
    // classification

    /// The Boolean function computed by `n`.
    pub fn node_function(&self, n: Node) -> TruthTable {
        self.fn_cache.get(self.nodes[n as usize].literal)
    }

    /// `true` iff `n` computes an actual function, i.e. is not a constant.
    pub fn is_function(&self, n: Node) -> bool {
        n > 1
    }

    /// `true` iff `n` is a non-input function node. Note that wire segments
    /// and outputs count as gates here; use [`GateGrid::is_wire`] to tell
    /// identity tiles apart.
    pub fn is_gate(&self, n: Node) -> bool {
        self.nodes[n as usize].literal >= literal::BUF && !self.is_pi(n)
    }

    /// `true` iff `n` computes the identity function.
    pub fn is_buf(&self, n: Node) -> bool {
        self.nodes[n as usize].literal == literal::BUF
    }

    /// Alias of [`GateGrid::is_buf`]: identity tiles are wire segments.
    pub fn is_wire(&self, n: Node) -> bool {
        self.is_buf(n)
    }

    /// `true` iff `n` is an inverter.
    pub fn is_inv(&self, n: Node) -> bool {
        self.nodes[n as usize].literal == literal::NOT
    }

    pub fn is_and(&self, n: Node) -> bool {
        self.nodes[n as usize].literal == literal::AND
    }

    pub fn is_nand(&self, n: Node) -> bool {
        self.nodes[n as usize].literal == literal::NAND
    }

    pub fn is_or(&self, n: Node) -> bool {
        self.nodes[n as usize].literal == literal::OR
    }

    pub fn is_nor(&self, n: Node) -> bool {
        self.nodes[n as usize].literal == literal::NOR
    }

    pub fn is_xor(&self, n: Node) -> bool {
        self.nodes[n as usize].literal == literal::XOR
    }

    pub fn is_xnor(&self, n: Node) -> bool {
        self.nodes[n as usize].literal == literal::XNOR
    }

    pub fn is_maj(&self, n: Node) -> bool {
        self.nodes[n as usize].literal == literal::MAJ
    }

    /// `true` iff `n` is a wire with more than one live outgoing connection.
    pub fn is_fanout(&self, n: Node) -> bool {
        self.is_wire(n) && self.fanout_size(n) > 1
    }

    /// `true` iff the node on `t` is a (non-wire or wire) gate.
    pub fn is_gate_tile(&self, t: Coordinate) -> bool {
        self.is_gate(self.get_node_at(t))
    }

    /// `true` iff the node on `t` computes the identity function.
    pub fn is_wire_tile(&self, t: Coordinate) -> bool {
        self.is_wire(self.get_node_at(t))
    }

    /// `true` iff no live node occupies `t`.
    pub fn is_empty_tile(&self, t: Coordinate) -> bool {
        !self.is_gate_tile(t) && !self.is_wire_tile(t)
    }

    // ##########################################
    // structural properties

    /// Total number of allocated node slots, dead ones included.
    pub fn size(&self) -> u32 {
        self.nodes.len() as u32
    }

    /// Number of primary inputs.
    pub fn num_pis(&self) -> usize {
        self.inputs.len()
    }

    /// Number of primary outputs.
    pub fn num_pos(&self) -> usize {
        self.outputs.len()
    }

    /// Number of combinational inputs; identical to [`GateGrid::num_pis`].
    pub fn num_cis(&self) -> usize {
        self.num_pis()
    }

    /// Number of combinational outputs; identical to [`GateGrid::num_pos`].
    pub fn num_cos(&self) -> usize {
        self.num_pos()
    }

    /// Number of live non-identity nodes.
    pub fn num_gates(&self) -> u32 {
        self.num_gates
    }

    /// Number of live identity nodes, primary I/O included.
    pub fn num_wires(&self) -> u32 {
        self.num_wires
    }

    /// Number of wire crossings currently on the grid.
    pub fn num_crossings(&self) -> u32 {
        self.num_crossings
    }

    /// The network is purely combinational.
    pub fn is_combinational(&self) -> bool {
        true
    }

    /// Number of tiles feeding `n`, honoring the clocking toggle.
    pub fn fanin_size(&self, n: Node) -> usize {
        if self.is_constant(n) {
            return 0;
        }

        self.incoming_data_flow(self.get_tile(n)).len()
    }

    /// Number of tiles consuming `n`, honoring the clocking toggle.
    /// Derived by scanning neighbors; O(degree) per query.
    pub fn fanout_size(&self, n: Node) -> usize {
        if self.is_constant(n) {
            return 0;
        }

        self.outgoing_data_flow(self.get_tile(n)).len()
    }

    // ##########################################
    // data flow

    /// The tiles feeding `t`: the recorded children of the node on `t`,
    /// kept when their tile lies within one layer of elevation of `t` and,
    /// if clocking is respected, is incoming-clocked relative to `t`.
    /// Enumerates in coordinate order.
    pub fn incoming_data_flow(&self, t: Coordinate) -> Vec<Coordinate> {
        if t.is_dead() {
            return Vec::new();
        }

        let n = self.get_node_at(t);
        let elevations = [t.z(), self.above(t).z(), self.below(t).z()];
        let mut flow = BTreeSet::new();

        for c in &self.nodes[n as usize].children {
            let ct = c.tile();
            if ct.is_dead() || !elevations.contains(&ct.z()) {
                continue;
            }
            if self.respect_clocking && !self.is_incoming_clocked(t, ct) {
                continue;
            }

            flow.insert(ct);
        }

        flow.into_iter().collect()
    }

    /// The tiles consuming `t`, derived the inverse way: scan the
    /// outgoing-clocked (or merely adjacent, when clocking is not respected)
    /// zones of `t` plus their vertical stack, and keep those whose node
    /// lists a signal for `t` among its children. Children are stored only
    /// on the consuming node, hence the neighbor-then-verify scan.
    /// Enumerates in coordinate order.
    pub fn outgoing_data_flow(&self, t: Coordinate) -> Vec<Coordinate> {
        if t.is_dead() {
            return Vec::new();
        }

        let s = Signal::from(t);
        let mut flow = BTreeSet::new();

        for out in self.outgoing_zones(t) {
            for dt in [out, self.above(out), self.below(out)] {
                if self.is_child(self.get_node_at(dt), s) {
                    flow.insert(dt);
                }
            }
        }

        flow.into_iter().collect()
    }

    /// Signals feeding `n`, in coordinate order of their tiles.
    pub fn fanins(&self, n: Node) -> impl Iterator<Item = Signal> + '_ {
        let tiles = if self.is_constant(n) {
            Vec::new()
        } else {
            self.incoming_data_flow(self.get_tile(n))
        };

        tiles.into_iter().map(Signal::from)
    }

    /// Signals consuming `n`, in coordinate order of their tiles.
    pub fn fanouts(&self, n: Node) -> impl Iterator<Item = Signal> + '_ {
        let tiles = if self.is_constant(n) {
            Vec::new()
        } else {
            self.outgoing_data_flow(self.get_tile(n))
        };

        tiles.into_iter().map(Signal::from)
    }

    // ##########################################
    // direction probes

    /// `true` iff `s` or its vertical stack feeds `t`.
    pub fn is_incoming_signal(&self, t: Coordinate, s: Signal) -> bool {
        self.incoming_data_flow(t).into_iter().any(|i| {
            Signal::from(i) == s
                || Signal::from(self.above(i)) == s
                || Signal::from(self.below(i)) == s
        })
    }

    /// `true` iff a signal enters `t` from the north.
    pub fn has_northern_incoming_signal(&self, t: Coordinate) -> bool {
        self.is_incoming_signal(t, Signal::from(self.north(t)))
    }

    /// `true` iff a signal enters `t` from the east.
    pub fn has_eastern_incoming_signal(&self, t: Coordinate) -> bool {
        self.is_incoming_signal(t, Signal::from(self.east(t)))
    }

    /// `true` iff a signal enters `t` from the south.
    pub fn has_southern_incoming_signal(&self, t: Coordinate) -> bool {
        self.is_incoming_signal(t, Signal::from(self.south(t)))
    }

    /// `true` iff a signal enters `t` from the west.
    pub fn has_western_incoming_signal(&self, t: Coordinate) -> bool {
        self.is_incoming_signal(t, Signal::from(self.west(t)))
    }

    /// `true` iff nothing feeds `t`.
    pub fn has_no_incoming_signal(&self, t: Coordinate) -> bool {
        self.incoming_data_flow(t).is_empty()
    }

    /// `true` iff `s` or its vertical stack consumes `t`.
    pub fn is_outgoing_signal(&self, t: Coordinate, s: Signal) -> bool {
        self.outgoing_data_flow(t).into_iter().any(|o| {
            Signal::from(o) == s
                || Signal::from(self.above(o)) == s
                || Signal::from(self.below(o)) == s
        })
    }

    /// `true` iff a signal leaves `t` to the north.
    pub fn has_northern_outgoing_signal(&self, t: Coordinate) -> bool {
        self.is_outgoing_signal(t, Signal::from(self.north(t)))
    }

    /// `true` iff a signal leaves `t` to the east.
    pub fn has_eastern_outgoing_signal(&self, t: Coordinate) -> bool {
        self.is_outgoing_signal(t, Signal::from(self.east(t)))
    }

    /// `true` iff a signal leaves `t` to the south.
    pub fn has_southern_outgoing_signal(&self, t: Coordinate) -> bool {
        self.is_outgoing_signal(t, Signal::from(self.south(t)))
    }

    /// `true` iff a signal leaves `t` to the west.
    pub fn has_western_outgoing_signal(&self, t: Coordinate) -> bool {
        self.is_outgoing_signal(t, Signal::from(self.west(t)))
    }

    /// `true` iff nothing consumes `t`.
    pub fn has_no_outgoing_signal(&self, t: Coordinate) -> bool {
        self.outgoing_data_flow(t).is_empty()
    }

    /// `true` iff `t` passes a signal straight through an opposite neighbor
    /// pair, in either orientation.
    pub fn has_opposite_incoming_and_outgoing_signals(&self, t: Coordinate) -> bool {
        self.adjacent_opposite_coordinates(t)
            .into_iter()
            .any(|(c1, c2)| {
                (self.is_incoming_signal(t, Signal::from(c1))
                    && self.is_outgoing_signal(t, Signal::from(c2)))
                    || (self.is_incoming_signal(t, Signal::from(c2))
                        && self.is_outgoing_signal(t, Signal::from(c1)))
            })
    }

    // ##########################################
    // iteration

    /// All live nodes, constants included, in index order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        (0..self.size()).filter(move |&n| !self.is_dead(n))
    }

    /// All live gate nodes in index order.
    pub fn gates(&self) -> impl Iterator<Item = Node> + '_ {
        (2..self.size()).filter(move |&n| self.is_gate(n) && !self.is_dead(n))
    }

    /// All live wire nodes in index order.
    pub fn wires(&self) -> impl Iterator<Item = Node> + '_ {
        (2..self.size()).filter(move |&n| self.is_wire(n) && !self.is_dead(n))
    }

    /// Primary inputs in creation order.
    pub fn pis(&self) -> impl Iterator<Item = Node> + '_ {
        self.inputs.iter().copied()
    }

    /// Primary output signals in creation order.
    pub fn pos(&self) -> impl Iterator<Item = Signal> + '_ {
        self.outputs.iter().copied()
    }

    /// All currently occupied tiles in coordinate order, sentinels excluded.
    pub fn occupied_tiles(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.tile_node
            .keys()
            .map(|s| s.tile())
            .filter(|t| !t.is_dead())
            .sorted()
    }

    // ##########################################
    // scratch values

    /// The application-specific value of `n`.
    pub fn value(&self, n: Node) -> u32 {
        self.nodes[n as usize].value
    }

    /// Sets the application-specific value of `n`.
    pub fn set_value(&mut self, n: Node, v: u32) {
        self.nodes[n as usize].value = v;
    }

    /// Post-increments and returns the previous value of `n`.
    pub fn incr_value(&mut self, n: Node) -> u32 {
        let old = self.nodes[n as usize].value;
        self.nodes[n as usize].value = old + 1;
        old
    }

    /// Pre-decrements and returns the new value of `n`.
    pub fn decr_value(&mut self, n: Node) -> u32 {
        self.nodes[n as usize].value -= 1;
        self.nodes[n as usize].value
    }

    /// Resets every node's value to 0.
    pub fn clear_values(&mut self) {
        for node in &mut self.nodes {
            node.value = 0;
        }
    }

    /// The visited flag of `n`.
    pub fn visited(&self, n: Node) -> u32 {
        self.nodes[n as usize].visited
    }

    /// Sets the visited flag of `n`.
    pub fn set_visited(&mut self, n: Node, v: u32) {
        self.nodes[n as usize].visited = v;
    }

    /// Resets every node's visited flag.
    pub fn clear_visited(&mut self) {
        for node in &mut self.nodes {
            node.visited = 0;
        }
    }

    /// The current traversal id.
    pub fn trav_id(&self) -> u32 {
        self.trav_id
    }

    /// Starts a new traversal round.
    pub fn incr_trav_id(&mut self) {
        self.trav_id += 1;
    }

    // ##########################################
    // internals

    fn allocate_node(&mut self, lit: u32, children: Vec<Signal>) -> Node {
        let n = self.nodes.len() as Node;
        let mut data = NodeData::with_literal(lit);
        data.children = children;
        self.nodes.push(data);
        n
    }

    fn create_node_from_literal(
        &mut self,
        children: Vec<Signal>,
        lit: u32,
        t: Coordinate,
    ) -> Signal {
        let n = self.allocate_node(lit, children.clone());

        for c in children {
            let child = self.get_node(c);
            self.nodes[child as usize].refs += 1;
        }

        self.assign_node(t, n);
        debug!(node = n, literal = lit, tile = %t, "created node");

        Signal::from(t)
    }

    /// Registers `n` on `t`, displacing any occupant, reviving `n`, and
    /// updating the wire/gate and crossing counters. Dead tiles leave the
    /// node unplaced.
    fn assign_node(&mut self, t: Coordinate, n: Node) {
        if t.is_dead() {
            return;
        }

        self.clear_tile(t);

        self.tile_node.insert(Signal::from(t), n);
        self.node_tile.insert(n, Signal::from(t));
        self.nodes[n as usize].dead = false;

        if self.is_wire(n) {
            self.num_wires += 1;
            if self.crossing_counted_at(t) {
                self.num_crossings += 1;
            }
        } else {
            self.num_gates += 1;
        }
    }

    /// Whether a wire on `t` participates in a counted crossing: either `t`
    /// sits in a crossing layer over a non-empty tile, or `t` sits in the
    /// ground layer under a non-empty wire tile. Checking both directions
    /// keeps the count independent of placement order.
    fn crossing_counted_at(&self, t: Coordinate) -> bool {
        if self.is_crossing_layer(t) {
            return !self.is_empty_tile(self.below(t));
        }

        let above = self.above(t);
        above != t && !self.is_empty_tile(above) && self.is_wire_tile(above)
    }

    fn kill_node(&mut self, n: Node) {
        if !self.is_constant(n) {
            self.nodes[n as usize].dead = true;
        }
    }

    fn is_child(&self, n: Node, s: Signal) -> bool {
        self.nodes[n as usize].children.contains(&s)
    }

    fn outgoing_zones(&self, t: Coordinate) -> Vec<Coordinate> {
        if self.respect_clocking {
            self.outgoing_clocked_zones(t)
        } else {
            self.adjacent_coordinates(t)
        }
    }
}

impl Lattice for GateGrid {
    fn bound(&self) -> Coordinate {
        self.clocked.bound()
    }
}

impl ClockedLattice for GateGrid {
    fn scheme(&self) -> &ClockingScheme {
        self.clocked.scheme()
    }

    fn scheme_mut(&mut self) -> &mut ClockingScheme {
        self.clocked.scheme_mut()
    }
}
