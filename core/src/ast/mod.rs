//! The program tree handed over by the parser.
//!
//! Nodes live in a flat arena ([`Tree`]) and refer to each other by
//! [`NodeId`]. Every node knows its parent, which lets the compiler walk the
//! tree iteratively without a call stack.

mod node;
mod tree;


pub use node::{AssignOp, BinOp, MathFn, Node, NodeFlags, NodeId, NodeKind, UnOp};
pub use tree::{Tree, TreeBuilder};
