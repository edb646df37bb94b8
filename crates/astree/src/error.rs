use std::collections::TryReserveError;

use miette::Diagnostic;
use thiserror::Error;

use crate::arena::NodeId;

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors raised while building or inspecting a [`Tree`](crate::Tree).
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Could not allocate syntax tree storage: {0}")]
    #[diagnostic(code(astree::allocation))]
    Allocation(#[from] TryReserveError),

    #[error("Cannot grow node arena beyond {capacity} slots (limit {max})")]
    #[diagnostic(
        code(astree::capacity_overflow),
        help("The tree is larger than this arena was configured for; raise `TreeOptions::max_capacity`.")
    )]
    CapacityOverflow { capacity: usize, max: usize },

    #[error("Node index {0} is out of range")]
    #[diagnostic(code(astree::invalid_index))]
    InvalidIndex(NodeId),

    #[error("Node index {0} refers to a free slot")]
    #[diagnostic(code(astree::inactive_node))]
    InactiveNode(NodeId),

    #[error("Tree is corrupted at node {node}: {reason}")]
    #[diagnostic(code(astree::corrupted))]
    Corrupted { node: NodeId, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TreeError::CapacityOverflow { capacity: 4, max: 4 }, "Cannot grow node arena beyond 4 slots (limit 4)")]
    #[case(TreeError::InvalidIndex(NodeId::new(9)), "Node index 9 is out of range")]
    #[case(TreeError::InactiveNode(NodeId::new(2)), "Node index 2 refers to a free slot")]
    #[case(
        TreeError::Corrupted { node: NodeId::new(1), reason: "orphan".to_string() },
        "Tree is corrupted at node 1: orphan"
    )]
    fn test_display(#[case] err: TreeError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_diagnostic_code() {
        let err = TreeError::InvalidIndex(NodeId::new(3));
        assert_eq!(
            err.code().map(|code| code.to_string()),
            Some("astree::invalid_index".to_string())
        );
    }
}
