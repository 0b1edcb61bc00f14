//! Gate-level networks on clocked grids.
//!
//! [`GateGrid`] places function-bearing nodes onto the tiles of a
//! [`gridflow_layout::ClockedGrid`] and behaves simultaneously as a directed
//! logic graph and as a bounded spatial lattice: node/tile lookups, primary
//! I/O bookkeeping, gate/wire/crossing counting, and fanin/fanout traversal
//! that combines geometric adjacency, clocking direction, and vertical
//! stacking. External synthesis and verification algorithms consume it
//! through the [`LogicNetwork`] contract.

mod contract;
mod function;
mod network;
mod node;


pub use contract::LogicNetwork;
pub use function::{FunctionCache, TruthTable, literal};
pub use network::GateGrid;
pub use node::{Node, Signal};
