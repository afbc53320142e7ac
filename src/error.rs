//! Errors reported by the trees.
//!
//! [`TreeError`] covers what a caller can get wrong. [`Violation`] is what
//! [`Tree::validate`][crate::Tree::validate] reports when a structural invariant does not hold,
//! which always means a bug in the engine or a rebalancing policy rather than bad input.

use thiserror::Error;

use crate::balance::BalanceKind;
use crate::node::NodeId;

/// Errors returned by fallible tree operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// An absent value was offered for insertion.
    #[error("cannot insert an absent value")]
    InvalidArgument,
    /// The handle does not name a live node of this tree.
    #[error("{0} is not a node of this tree")]
    NotFound(NodeId),
    /// The operation needs at least one element.
    #[error("the tree is empty")]
    EmptyStructure,
    /// Rotations are reserved for the rebalancer of a self-balancing tree.
    #[error("{0} trees cannot be rotated by their users")]
    OperationNotPermitted(BalanceKind),
    /// A balancing discipline name that could not be parsed.
    #[error("unknown balancing discipline `{0}`")]
    UnknownBalance(String),
}

/// A broken structural invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A child does not point back at its parent (or the root has a parent).
    #[error("parent link of {0} is broken")]
    BrokenLink(NodeId),
    /// The number of reachable nodes differs from the recorded length.
    #[error("tree reports {expected} elements but {found} are reachable")]
    LenMismatch {
        /// The recorded length.
        expected: usize,
        /// The number of nodes reachable from the root.
        found: usize,
    },
    /// An in-order walk produced a decreasing pair.
    #[error("{0} is out of order")]
    Unordered(NodeId),
    /// A stored AVL height disagrees with the heights of the children.
    #[error("stored height of {0} is stale")]
    StaleHeight(NodeId),
    /// An AVL node whose subtrees differ in height by more than one.
    #[error("{node} has balance factor {factor}")]
    Unbalanced {
        /// The offending node.
        node: NodeId,
        /// Left height minus right height.
        factor: i32,
    },
    /// A red-black node that was never colored.
    #[error("{0} has no color")]
    Uncolored(NodeId),
    /// The red-black root is red.
    #[error("the root {0} is red")]
    RedRoot(NodeId),
    /// A red node with a red child.
    #[error("red {0} has a red child")]
    RedChild(NodeId),
    /// Two paths below a node cross a different number of black nodes.
    #[error("black heights below {0} differ")]
    BlackHeight(NodeId),
}
