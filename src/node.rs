//! Nodes and the handles used to address them.
//!
//! Every tree keeps its nodes in an arena and links them with [`NodeId`]s, so the parent link is
//! just another index and never owns anything.

use std::fmt;

/// A handle to a node inside one particular tree.
///
/// Handles stay valid across rotations and recolorings since those never move a node within the
/// arena. Deleting an element frees a slot that a later insert may reuse, so a handle held across
/// a deletion may name a different element afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The position of this node in its tree's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node #{}", self.0)
    }
}

/// The color of a red-black node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// A red node. Both of its children are black.
    Red,
    /// A black node.
    Black,
    /// A node that has not been through an insertion fixup yet.
    #[default]
    Unset,
}

impl Color {
    /// Whether this is [`Color::Red`]. [`Color::Unset`] counts as not red.
    pub fn is_red(self) -> bool {
        matches!(self, Self::Red)
    }
}

pub(crate) struct Node<T, M> {
    pub(crate) element: T,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) tag: M,
}

impl<T, M: Default> Node<T, M> {
    pub(crate) fn new(element: T) -> Self {
        Self {
            element,
            left: None,
            right: None,
            parent: None,
            tag: M::default(),
        }
    }
}

impl<T: Clone, M: Copy> Clone for Node<T, M> {
    fn clone(&self) -> Self {
        Self {
            element: self.element.clone(),
            left: self.left,
            right: self.right,
            parent: self.parent,
            tag: self.tag,
        }
    }
}

/// A read-only view of one node, borrowed from its tree.
pub struct NodeRef<'a, T, M> {
    pub(crate) nodes: &'a [Option<Node<T, M>>],
    pub(crate) id: NodeId,
}

impl<T, M> Clone for NodeRef<'_, T, M> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T, M> Copy for NodeRef<'_, T, M> {}

impl<'a, T, M: Copy> NodeRef<'a, T, M> {
    pub(crate) fn new(nodes: &'a [Option<Node<T, M>>], id: NodeId) -> Option<Self> {
        nodes.get(id.0)?.as_ref()?;
        Some(Self { nodes, id })
    }

    fn raw(&self) -> &'a Node<T, M> {
        self.nodes[self.id.0]
            .as_ref()
            .expect("a NodeRef always names a live node")
    }

    fn at(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self {
            nodes: self.nodes,
            id,
        })
    }

    /// The handle of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The element stored in this node.
    pub fn element(&self) -> &'a T {
        &self.raw().element
    }

    /// The balancing tag: `()`, an AVL height, or a [`Color`].
    pub fn tag(&self) -> M {
        self.raw().tag
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<Self> {
        self.at(self.raw().left)
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<Self> {
        self.at(self.raw().right)
    }

    /// The parent, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.at(self.raw().parent)
    }

    /// How many edges separate this node from the root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = *self;
        while let Some(parent) = current.parent() {
            depth += 1;
            current = parent;
        }
        depth
    }
}

impl<T, M> fmt::Debug for NodeRef<'_, T, M>
where
    T: fmt::Debug,
    M: fmt::Debug + Copy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("element", self.element())
            .field("tag", &self.tag())
            .finish()
    }
}
