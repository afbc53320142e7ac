//! The ordered binary search tree engine shared by every balancing policy.
//!
//! # Examples
//!
//! ```
//! use ordtree::{Avl, Tree};
//!
//! let mut tree: Tree<i32, Avl> = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! tree.insert(1);
//! tree.insert(3);
//! tree.insert(2);
//! assert!(tree.contains(&2));
//!
//! // Deleting returns the stored element.
//! assert_eq!(tree.delete(&2), Some(2));
//! assert_eq!(tree.delete(&2), None);
//!
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use log::trace;

use crate::balance::{Balance, Unbalanced};
use crate::error::{TreeError, Violation};
use crate::node::{Node, NodeId, NodeRef};
use crate::util::{Removed, Side};

/// An ordered binary search tree, balanced by the policy `B`.
///
/// Elements that compare equal are all kept; a new element goes to the left of any equal one
/// already in the tree. The tree owns all of its nodes in an arena, so dropping, cloning, and
/// traversing never recurse no matter how skewed the tree is.
///
/// Mutation takes `&mut self`, so concurrent readers are only possible between mutations. Wrap
/// the tree in a lock to share it across threads.
pub struct Tree<T, B: Balance = Unbalanced> {
    pub(crate) nodes: Vec<Option<Node<T, B::Tag>>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
    pub(crate) last_inserted: Option<NodeId>,
    balance: PhantomData<B>,
}

impl<T, B: Balance> Default for Tree<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B: Balance> Tree<T, B> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            last_inserted: None,
            balance: PhantomData,
        }
    }

    /// The number of elements in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
        self.last_inserted = None;
    }

    /// The balancing discipline of this tree.
    pub fn kind(&self) -> crate::BalanceKind {
        B::KIND
    }

    /// The root node, `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_, T, B::Tag>> {
        self.root.and_then(|root| self.node(root))
    }

    /// A view of the node behind `id`, `None` if the handle is not live.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T, B::Tag>> {
        NodeRef::new(&self.nodes, id)
    }

    /// The element stored at `id`, `None` if the handle is not live.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.0)?.as_ref().map(|node| &node.element)
    }

    /// The node created by the most recent insertion.
    ///
    /// This is only meaningful *immediately* after [`insert`][Tree::insert]. Any other mutation
    /// in between (deleting, popping, rotating, clearing) resets it to `None`.
    pub fn last_inserted(&self) -> Option<NodeId> {
        self.last_inserted
    }

    /// Inserts `element` and returns the handle of its new node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let mut tree: Tree<i32> = Tree::new();
    /// let id = tree.insert(7);
    ///
    /// assert_eq!(tree.get(id), Some(&7));
    /// assert_eq!(tree.last_inserted(), Some(id));
    /// ```
    pub fn insert(&mut self, element: T) -> NodeId
    where
        T: Ord,
    {
        let id = self.alloc(element);
        match self.root {
            None => self.root = Some(id),
            Some(mut current) => loop {
                let side = if self.raw(id).element <= self.raw(current).element {
                    Side::Left
                } else {
                    Side::Right
                };
                match self.child(current, side) {
                    Some(next) => current = next,
                    None => {
                        self.set_child(current, side, Some(id));
                        self.raw_mut(id).parent = Some(current);
                        break;
                    }
                }
            },
        }
        self.len += 1;

        if cfg!(debug_assertions) {
            if let Some(parent) = self.parent(id) {
                match self.side_of(id) {
                    Some(Side::Left) => assert!(self.raw(id).element <= self.raw(parent).element),
                    _ => assert!(self.raw(id).element > self.raw(parent).element),
                }
            }
        }

        B::inserted(self, id);
        self.last_inserted = Some(id);
        id
    }

    /// Inserts an element that may be absent. An absent element is rejected with
    /// [`TreeError::InvalidArgument`] and the tree is left as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{Tree, TreeError};
    ///
    /// let mut tree: Tree<i32> = Tree::new();
    ///
    /// assert_eq!(tree.try_insert(None), Err(TreeError::InvalidArgument));
    /// assert!(tree.is_empty());
    ///
    /// assert!(tree.try_insert(Some(3)).is_ok());
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn try_insert(&mut self, element: Option<T>) -> Result<NodeId, TreeError>
    where
        T: Ord,
    {
        element
            .map(|element| self.insert(element))
            .ok_or(TreeError::InvalidArgument)
    }

    /// Finds a node holding an element equal to `element`. With duplicates this is whichever
    /// equal node the descent meets first.
    pub fn search(&self, element: &T) -> Option<NodeId>
    where
        T: Ord,
    {
        let mut current = self.root;
        while let Some(id) = current {
            current = match element.cmp(&self.raw(id).element) {
                Ordering::Equal => return Some(id),
                Ordering::Less => self.left(id),
                Ordering::Greater => self.right(id),
            };
        }
        None
    }

    /// Whether an element equal to `element` is in the tree.
    pub fn contains(&self, element: &T) -> bool
    where
        T: Ord,
    {
        self.search(element).is_some()
    }

    /// Removes one element equal to `element` and returns it. If the tree holds no such element,
    /// nothing happens.
    pub fn delete(&mut self, element: &T) -> Option<T>
    where
        T: Ord,
    {
        let id = self.search(element)?;
        Some(self.remove(id))
    }

    /// The smallest element.
    pub fn first(&self) -> Option<&T> {
        self.root
            .map(|root| &self.raw(self.extreme(root, Side::Left)).element)
    }

    /// The largest element.
    pub fn last(&self) -> Option<&T> {
        self.root
            .map(|root| &self.raw(self.extreme(root, Side::Right)).element)
    }

    /// Removes and returns the smallest element.
    pub fn pop_first(&mut self) -> Result<T, TreeError> {
        let root = self.root.ok_or(TreeError::EmptyStructure)?;
        let id = self.extreme(root, Side::Left);
        Ok(self.remove(id))
    }

    /// Removes and returns the largest element.
    pub fn pop_last(&mut self) -> Result<T, TreeError> {
        let root = self.root.ok_or(TreeError::EmptyStructure)?;
        let id = self.extreme(root, Side::Right);
        Ok(self.remove(id))
    }

    /// The number of edges on the longest path down from the root, `None` for an empty tree.
    pub fn height(&self) -> Option<usize> {
        let mut stack = vec![(self.root?, 0)];
        let mut height = 0;
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(
                [self.left(id), self.right(id)]
                    .into_iter()
                    .flatten()
                    .map(|child| (child, depth + 1)),
            );
        }
        Some(height)
    }

    /// Checks every structural invariant: parent links, the element count, the ordering, and
    /// whatever the balancing policy promises on top of that.
    ///
    /// A violation is always a bug in this crate; it is exposed for tests and debugging.
    pub fn validate(&self) -> Result<(), Violation>
    where
        T: Ord,
    {
        if let Some(root) = self.root {
            if self.raw(root).parent.is_some() {
                return Err(Violation::BrokenLink(root));
            }
        }

        let mut found = 0;
        let mut previous: Option<NodeId> = None;
        for id in self.in_order_ids() {
            found += 1;
            for child in [self.left(id), self.right(id)].into_iter().flatten() {
                if self.parent(child) != Some(id) {
                    return Err(Violation::BrokenLink(child));
                }
            }
            if let Some(previous) = previous {
                if self.raw(previous).element > self.raw(id).element {
                    return Err(Violation::Unordered(id));
                }
            }
            previous = Some(id);
        }
        if found != self.len {
            return Err(Violation::LenMismatch {
                expected: self.len,
                found,
            });
        }

        B::check(self)
    }

    /// Removes the node `id` and returns its element, running the policy's fixup.
    fn remove(&mut self, id: NodeId) -> T {
        let mut target = id;
        if let (Some(left), Some(_)) = (self.left(id), self.right(id)) {
            let predecessor = self.extreme(left, Side::Right);
            self.swap_elements(id, predecessor);
            target = predecessor;
        }

        let removed = self.unlink(target);
        let node = self.release(target);
        self.len -= 1;
        self.last_inserted = None;
        B::removed(self, removed);
        node.element
    }

    /// Splices a node with at most one child out of the tree, moving the child into its slot.
    fn unlink(&mut self, id: NodeId) -> Removed<B::Tag> {
        let node = self.raw(id);
        debug_assert!(node.left.is_none() || node.right.is_none());
        let child = node.left.or(node.right);
        let parent = node.parent;
        let tag = node.tag;
        let side = self.side_of(id);

        self.replace_in_parent(parent, id, child);
        if let Some(child) = child {
            self.raw_mut(child).parent = parent;
        }
        trace!("unlinked {} (child {:?}, parent {:?})", id, child, parent);

        Removed {
            parent,
            child,
            side,
            tag,
        }
    }

    fn alloc(&mut self, element: T) -> NodeId {
        let node = Some(Node::new(element));
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Node<T, B::Tag> {
        let node = self.nodes[id.0]
            .take()
            .expect("Releasing a node requires it to be live");
        self.free.push(id);
        node
    }

    fn swap_elements(&mut self, a: NodeId, b: NodeId) {
        debug_assert_ne!(a, b);
        let (low, high) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.nodes.split_at_mut(high);
        let first = head[low].as_mut().expect("Swapping requires live nodes");
        let second = tail[0].as_mut().expect("Swapping requires live nodes");
        std::mem::swap(&mut first.element, &mut second.element);
    }

    /// Follows `side` links from `id` as far as they go.
    fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(next) = self.child(id, side) {
            id = next;
        }
        id
    }

    pub(crate) fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn is_live(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.0), Some(Some(_)))
    }

    pub(crate) fn raw(&self, id: NodeId) -> &Node<T, B::Tag> {
        self.nodes[id.0]
            .as_ref()
            .expect("Linked handles always name live nodes")
    }

    pub(crate) fn raw_mut(&mut self, id: NodeId) -> &mut Node<T, B::Tag> {
        self.nodes[id.0]
            .as_mut()
            .expect("Linked handles always name live nodes")
    }

    pub(crate) fn left(&self, id: NodeId) -> Option<NodeId> {
        self.raw(id).left
    }

    pub(crate) fn right(&self, id: NodeId) -> Option<NodeId> {
        self.raw(id).right
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.raw(id).parent
    }

    pub(crate) fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left(id),
            Side::Right => self.right(id),
        }
    }

    pub(crate) fn tag(&self, id: NodeId) -> B::Tag {
        self.raw(id).tag
    }

    pub(crate) fn set_tag(&mut self, id: NodeId, tag: B::Tag) {
        self.raw_mut(id).tag = tag;
    }

    /// Which child of its parent `id` is, `None` for the root.
    pub(crate) fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.parent(id)?;
        if self.left(parent) == Some(id) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        let node = self.raw_mut(id);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    /// Points whatever referenced `old` (its parent's slot, or the root) at `new`.
    fn replace_in_parent(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let node = self.raw_mut(parent);
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            }
        }
    }

    /// Rotates around `id` in `direction`: rotating left lifts the right child into `id`'s place
    /// and rotating right lifts the left child. Returns `false` without touching anything when
    /// that child is missing.
    ///
    /// ```text
    ///      parent                parent
    ///        |                     |
    ///        id                  pivot
    ///       /  \     left ->     /   \
    ///      a  pivot             id    c
    ///         /  \             /  \
    ///     inner   c           a  inner
    /// ```
    ///
    /// This is the unguarded rotation the policies use. Callers only get it through
    /// [`Rotatable`][crate::Rotatable], which exists for the plain tree alone.
    pub(crate) fn rotate(&mut self, id: NodeId, direction: Side) -> bool {
        let Some(pivot) = self.child(id, direction.opposite()) else {
            return false;
        };
        let parent = self.parent(id);
        let inner = self.child(pivot, direction);

        self.replace_in_parent(parent, id, Some(pivot));
        self.raw_mut(pivot).parent = parent;

        self.set_child(id, direction.opposite(), inner);
        if let Some(inner) = inner {
            self.raw_mut(inner).parent = Some(id);
        }

        self.set_child(pivot, direction, Some(id));
        self.raw_mut(id).parent = Some(pivot);

        trace!("rotated {:?} around {}, {} rises", direction, id, pivot);
        true
    }
}

impl<T, B> Clone for Tree<T, B>
where
    T: Clone,
    B: Balance,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            free: self.free.clone(),
            root: self.root,
            len: self.len,
            last_inserted: self.last_inserted,
            balance: PhantomData,
        }
    }
}

impl<T, B> fmt::Debug for Tree<T, B>
where
    T: fmt::Debug,
    B: Balance,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Two trees are equal when they have the same shape, the same elements in the same places, and
/// the same balancing tags. Where nodes sit inside the arenas does not matter.
impl<T, B> PartialEq for Tree<T, B>
where
    T: PartialEq,
    B: Balance,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.shape().eq(other.shape())
    }
}

impl<T: Eq, B: Balance> Eq for Tree<T, B> {}

impl<T: Ord, B: Balance> FromIterator<T> for Tree<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord, B: Balance> Extend<T> for Tree<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}
