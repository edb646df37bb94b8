//! `astree` stores abstract syntax trees in a slot arena.
//!
//! Nodes live in one growable array and refer to each other by [`NodeId`]
//! rather than by pointer, so the whole tree can be reallocated without
//! invalidating any index a parser holds on to.
//!
//! ## Examples
//!
//! ```rust
//! use astree::{Literal, NodeKind, OpKind, Tree};
//!
//! let mut tree = Tree::new().unwrap();
//! let root = tree.root();
//!
//! let lhs = tree.add_child_with_kind(root, NodeKind::Literal(Literal::Int(3))).unwrap();
//! let rhs = tree.add_child_with_kind(root, NodeKind::Literal(Literal::Int(4))).unwrap();
//!
//! // The parser only now learns the two literals are operands of `+`.
//! let add = tree.insert_parent_above_children(root).unwrap();
//! tree.set_kind(add, NodeKind::Op(OpKind::Add)).unwrap();
//!
//! assert_eq!(tree.children(add).collect::<Vec<_>>(), vec![lhs, rhs]);
//! assert!(tree.render().contains("op node: add"));
//! ```
mod arena;
mod dump;
mod error;
mod node;
mod options;
mod tree;

pub use arena::{NodeArena, NodeId};
pub use dump::{DumpSink, TREE_MAP_BEGIN, TREE_MAP_END, TracingSink};
pub use error::{Result, TreeError};
pub use node::{CondOp, Literal, Name, Node, NodeKind, OpKind};
pub use options::{DEFAULT_MAX_CAPACITY, DumpOptions, TreeOptions};
pub use tree::{Children, Tree};
