use crate::balance::Balance;
use crate::error::Violation;
use crate::node::NodeId;
use crate::tree::Tree;

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The left child.
    Left,
    /// The right child.
    Right,
}

impl Side {
    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// What the engine hands a policy after physically unlinking a node that had at most one child.
pub struct Removed<M> {
    /// The parent of the unlinked node, `None` if it was the root.
    pub parent: Option<NodeId>,
    /// The child spliced into the vacated slot, if any.
    pub child: Option<NodeId>,
    /// The slot of `parent` that `child` now occupies. `None` when the root was unlinked.
    pub side: Option<Side>,
    /// The balancing tag the unlinked node carried.
    pub tag: M,
}

/// Rebalancing hooks. This lives in a private module so that [`Balance`][crate::Balance] is
/// sealed: only the policies in this crate can reach into the engine.
pub trait Hooks: Sized {
    /// Called once a freshly allocated node has been linked into the tree.
    fn inserted<T>(tree: &mut Tree<T, Self>, node: NodeId)
    where
        Self: Balance;

    /// Called once a node has been unlinked from the tree.
    fn removed<T>(tree: &mut Tree<T, Self>, removed: Removed<<Self as Balance>::Tag>)
    where
        Self: Balance;

    /// Checks the policy-specific invariants over the whole tree.
    fn check<T>(tree: &Tree<T, Self>) -> Result<(), Violation>
    where
        Self: Balance;
}
