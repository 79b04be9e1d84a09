//! SSA node model
//!
//! Two disjoint node kinds: expressions, which always know their type,
//! and operations, which carry side effects or transfer control. Nodes
//! live in an arena graph and reference each other by stable indices.

mod graph;
mod node;
pub mod pretty;

pub use graph::IrGraph;
pub use node::{BinOp, CmpOp, Const, Expr, ExprId, InvokeKind, Op, OpId};
pub use pretty::{Listing, PrettyPrint};
