//! The ordered collection contract and a tree whose balancing is chosen at runtime.
//!
//! # Examples
//!
//! ```
//! use ordtree::{AnyTree, BalanceKind, OrderedCollection, TreeError};
//!
//! let kind: BalanceKind = "avl".parse()?;
//! let mut tree = AnyTree::new(kind);
//! for x in [3, 1, 2] {
//!     tree.insert(x);
//! }
//!
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
//!
//! // Balanced trees refuse to be rotated by hand.
//! let root = tree.search(&2).unwrap();
//! assert_eq!(
//!     tree.rotate_left(root),
//!     Err(TreeError::OperationNotPermitted(BalanceKind::HeightBalanced))
//! );
//! # Ok::<(), TreeError>(())
//! ```

use crate::avl::Avl;
use crate::balance::{Balance, BalanceKind, Rotatable, Unbalanced};
use crate::error::{TreeError, Violation};
use crate::iter::Iter;
use crate::node::{Color, NodeId};
use crate::red_black::RedBlack;
use crate::tree::Tree;

/// What every ordered container in this crate offers.
pub trait OrderedCollection<T> {
    /// The in-order iterator.
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Adds an element. Equal elements are kept side by side.
    fn insert(&mut self, element: T);

    /// Removes one element equal to `element`, returning it.
    fn delete(&mut self, element: &T) -> Option<T>;

    /// Whether an element equal to `element` is present.
    fn contains(&self, element: &T) -> bool;

    /// Whether the collection is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of elements.
    fn len(&self) -> usize;

    /// Removes every element.
    fn clear(&mut self);

    /// Iterates in order, smallest first.
    fn iter(&self) -> Self::Iter<'_>;
}

impl<T: Ord, B: Balance> OrderedCollection<T> for Tree<T, B> {
    type Iter<'a> = Iter<'a, T, B::Tag>
    where
        Self: 'a,
        T: 'a;

    fn insert(&mut self, element: T) {
        Tree::insert(self, element);
    }

    fn delete(&mut self, element: &T) -> Option<T> {
        Tree::delete(self, element)
    }

    fn contains(&self, element: &T) -> bool {
        Tree::contains(self, element)
    }

    fn len(&self) -> usize {
        Tree::len(self)
    }

    fn clear(&mut self) {
        Tree::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        Tree::iter(self)
    }
}

/// A tree whose balancing discipline is picked at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyTree<T> {
    /// A plain ordered tree.
    Plain(Tree<T, Unbalanced>),
    /// An AVL tree.
    HeightBalanced(Tree<T, Avl>),
    /// A red-black tree.
    ColorBalanced(Tree<T, RedBlack>),
}

/// Runs `$body` with `$tree` bound to whichever tree `$any` holds.
macro_rules! dispatch {
    ($any:expr, $tree:ident => $body:expr) => {
        match $any {
            AnyTree::Plain($tree) => $body,
            AnyTree::HeightBalanced($tree) => $body,
            AnyTree::ColorBalanced($tree) => $body,
        }
    };
}

impl<T> AnyTree<T> {
    /// An empty tree balanced by `kind`.
    pub fn new(kind: BalanceKind) -> Self {
        match kind {
            BalanceKind::None => Self::Plain(Tree::new()),
            BalanceKind::HeightBalanced => Self::HeightBalanced(Tree::new()),
            BalanceKind::ColorBalanced => Self::ColorBalanced(Tree::new()),
        }
    }

    /// The balancing discipline of this tree.
    pub fn kind(&self) -> BalanceKind {
        dispatch!(self, tree => tree.kind())
    }

    /// See [`Tree::insert`].
    pub fn insert(&mut self, element: T) -> NodeId
    where
        T: Ord,
    {
        dispatch!(self, tree => tree.insert(element))
    }

    /// See [`Tree::try_insert`].
    pub fn try_insert(&mut self, element: Option<T>) -> Result<NodeId, TreeError>
    where
        T: Ord,
    {
        dispatch!(self, tree => tree.try_insert(element))
    }

    /// See [`Tree::last_inserted`]; the same caveats apply.
    pub fn last_inserted(&self) -> Option<NodeId> {
        dispatch!(self, tree => tree.last_inserted())
    }

    /// See [`Tree::search`].
    pub fn search(&self, element: &T) -> Option<NodeId>
    where
        T: Ord,
    {
        dispatch!(self, tree => tree.search(element))
    }

    /// See [`Tree::get`].
    pub fn get(&self, node: NodeId) -> Option<&T> {
        dispatch!(self, tree => tree.get(node))
    }

    /// See [`Tree::delete`].
    pub fn delete(&mut self, element: &T) -> Option<T>
    where
        T: Ord,
    {
        dispatch!(self, tree => tree.delete(element))
    }

    /// See [`Tree::contains`].
    pub fn contains(&self, element: &T) -> bool
    where
        T: Ord,
    {
        dispatch!(self, tree => tree.contains(element))
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        dispatch!(self, tree => tree.len())
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        dispatch!(self, tree => tree.is_empty())
    }

    /// Removes every element, keeping the balancing discipline.
    pub fn clear(&mut self) {
        dispatch!(self, tree => tree.clear())
    }

    /// See [`Tree::first`].
    pub fn first(&self) -> Option<&T> {
        dispatch!(self, tree => tree.first())
    }

    /// See [`Tree::last`].
    pub fn last(&self) -> Option<&T> {
        dispatch!(self, tree => tree.last())
    }

    /// See [`Tree::pop_first`].
    pub fn pop_first(&mut self) -> Result<T, TreeError> {
        dispatch!(self, tree => tree.pop_first())
    }

    /// See [`Tree::pop_last`].
    pub fn pop_last(&mut self) -> Result<T, TreeError> {
        dispatch!(self, tree => tree.pop_last())
    }

    /// See [`Tree::height`].
    pub fn height(&self) -> Option<usize> {
        dispatch!(self, tree => tree.height())
    }

    /// The color of `node` if this is a red-black tree.
    pub fn color(&self, node: NodeId) -> Option<Color> {
        match self {
            Self::ColorBalanced(tree) => tree.color(node),
            _ => None,
        }
    }

    /// The stored height of `node` if this is an AVL tree.
    pub fn node_height(&self, node: NodeId) -> Option<i32> {
        match self {
            Self::HeightBalanced(tree) => tree.node_height(node),
            _ => None,
        }
    }

    /// See [`Tree::validate`].
    pub fn validate(&self) -> Result<(), Violation>
    where
        T: Ord,
    {
        dispatch!(self, tree => tree.validate())
    }

    /// Rotates a plain tree left around `node`. Balanced trees refuse with
    /// [`TreeError::OperationNotPermitted`] and are left untouched.
    pub fn rotate_left(&mut self, node: NodeId) -> Result<(), TreeError> {
        match self {
            Self::Plain(tree) => tree.rotate_left(node),
            other => Err(TreeError::OperationNotPermitted(other.kind())),
        }
    }

    /// Rotates a plain tree right around `node`. Balanced trees refuse with
    /// [`TreeError::OperationNotPermitted`] and are left untouched.
    pub fn rotate_right(&mut self, node: NodeId) -> Result<(), TreeError> {
        match self {
            Self::Plain(tree) => tree.rotate_right(node),
            other => Err(TreeError::OperationNotPermitted(other.kind())),
        }
    }

    /// Iterates in order, smallest first.
    pub fn iter(&self) -> AnyIter<'_, T> {
        match self {
            Self::Plain(tree) => AnyIter::Plain(tree.iter()),
            Self::HeightBalanced(tree) => AnyIter::HeightBalanced(tree.iter()),
            Self::ColorBalanced(tree) => AnyIter::ColorBalanced(tree.iter()),
        }
    }
}

impl<T> From<Tree<T, Unbalanced>> for AnyTree<T> {
    fn from(tree: Tree<T, Unbalanced>) -> Self {
        Self::Plain(tree)
    }
}

impl<T> From<Tree<T, Avl>> for AnyTree<T> {
    fn from(tree: Tree<T, Avl>) -> Self {
        Self::HeightBalanced(tree)
    }
}

impl<T> From<Tree<T, RedBlack>> for AnyTree<T> {
    fn from(tree: Tree<T, RedBlack>) -> Self {
        Self::ColorBalanced(tree)
    }
}

/// The in-order iterator of an [`AnyTree`].
pub enum AnyIter<'a, T> {
    /// Over a plain tree.
    Plain(Iter<'a, T, ()>),
    /// Over an AVL tree.
    HeightBalanced(Iter<'a, T, i32>),
    /// Over a red-black tree.
    ColorBalanced(Iter<'a, T, Color>),
}

impl<'a, T> Iterator for AnyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match self {
            Self::Plain(iter) => iter.next(),
            Self::HeightBalanced(iter) => iter.next(),
            Self::ColorBalanced(iter) => iter.next(),
        }
    }
}

impl<T: Ord> OrderedCollection<T> for AnyTree<T> {
    type Iter<'a> = AnyIter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn insert(&mut self, element: T) {
        AnyTree::insert(self, element);
    }

    fn delete(&mut self, element: &T) -> Option<T> {
        AnyTree::delete(self, element)
    }

    fn contains(&self, element: &T) -> bool {
        AnyTree::contains(self, element)
    }

    fn len(&self) -> usize {
        AnyTree::len(self)
    }

    fn clear(&mut self) {
        AnyTree::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        AnyTree::iter(self)
    }
}
