//! Iteration and traversal.
//!
//! Iterating a tree yields its elements in order, smallest first. Besides that there are visitor
//! style walks in pre-order, in-order, post-order, and breadth-first order that hand out
//! [`NodeRef`]s so the shape of the tree can be inspected. None of them recurse.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::balance::Balance;
use crate::node::{Node, NodeId, NodeRef};
use crate::tree::Tree;

/// Node handles in order. Each one carries its own stack, so any number of walks can run over
/// the same tree.
pub(crate) struct InOrderIds<'a, T, M> {
    nodes: &'a [Option<Node<T, M>>],
    stack: Vec<NodeId>,
}

impl<'a, T, M> InOrderIds<'a, T, M> {
    fn new(nodes: &'a [Option<Node<T, M>>], root: Option<NodeId>) -> Self {
        let mut ids = Self {
            nodes,
            stack: Vec::new(),
        };
        ids.push_left_spine(root);
        ids
    }

    fn raw(&self, id: NodeId) -> &'a Node<T, M> {
        self.nodes[id.0]
            .as_ref()
            .expect("Linked handles always name live nodes")
    }

    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.raw(id).left;
        }
    }
}

impl<T, M> Iterator for InOrderIds<'_, T, M> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.push_left_spine(self.raw(id).right);
        Some(id)
    }
}

/// A borrowing iterator over the elements of a [`Tree`], in order.
///
/// Created by [`Tree::iter`].
pub struct Iter<'a, T, M> {
    ids: InOrderIds<'a, T, M>,
    remaining: usize,
}

impl<'a, T, M> Iterator for Iter<'a, T, M> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.ids.next()?;
        self.remaining -= 1;
        Some(&self.ids.raw(id).element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, M> ExactSizeIterator for Iter<'_, T, M> {}
impl<T, M> FusedIterator for Iter<'_, T, M> {}

/// An owning iterator over the elements of a [`Tree`], in order.
///
/// Created by [`Tree::into_iter`][IntoIterator::into_iter].
pub struct IntoIter<T, M> {
    nodes: Vec<Option<Node<T, M>>>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<T, M> IntoIter<T, M> {
    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.nodes[id.0].as_ref().and_then(|node| node.left);
        }
    }
}

impl<T, M> Iterator for IntoIter<T, M> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let id = self.stack.pop()?;
        // Everything left of `id` has been yielded already, so its slot is never looked at again.
        let node = self.nodes[id.0]
            .take()
            .expect("Each node is yielded exactly once");
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some(node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, M> ExactSizeIterator for IntoIter<T, M> {}
impl<T, M> FusedIterator for IntoIter<T, M> {}

impl<'a, T, B: Balance> IntoIterator for &'a Tree<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, B::Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, B: Balance> IntoIterator for Tree<T, B> {
    type Item = T;
    type IntoIter = IntoIter<T, B::Tag>;

    fn into_iter(self) -> Self::IntoIter {
        let root = self.root_id();
        let remaining = self.len();
        let mut iter = IntoIter {
            nodes: self.nodes,
            stack: Vec::new(),
            remaining,
        };
        iter.push_left_spine(root);
        iter
    }
}

impl<T, B: Balance> Tree<T, B> {
    /// Iterates over the elements in order. Every call starts a fresh walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{RedBlack, Tree};
    ///
    /// let tree: Tree<i32, RedBlack> = [3, 1, 2].into_iter().collect();
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// assert_eq!(tree.iter().next(), Some(&1));
    /// ```
    pub fn iter(&self) -> Iter<'_, T, B::Tag> {
        Iter {
            ids: self.in_order_ids(),
            remaining: self.len(),
        }
    }

    pub(crate) fn in_order_ids(&self) -> InOrderIds<'_, T, B::Tag> {
        InOrderIds::new(&self.nodes, self.root_id())
    }

    /// Visits every node before its children, left subtree before right.
    pub fn pre_order<F>(&self, mut visit: F)
    where
        F: FnMut(NodeRef<'_, T, B::Tag>),
    {
        let mut stack: Vec<NodeId> = self.root_id().into_iter().collect();
        while let Some(id) = stack.pop() {
            stack.extend(self.right(id));
            stack.extend(self.left(id));
            visit(self.view(id));
        }
    }

    /// Visits every node between its left and right subtrees, which is sorted order.
    pub fn in_order<F>(&self, mut visit: F)
    where
        F: FnMut(NodeRef<'_, T, B::Tag>),
    {
        for id in self.in_order_ids() {
            visit(self.view(id));
        }
    }

    /// Visits every node after both of its subtrees.
    pub fn post_order<F>(&self, mut visit: F)
    where
        F: FnMut(NodeRef<'_, T, B::Tag>),
    {
        // Node, right, left reversed is left, right, node.
        let mut stack: Vec<NodeId> = self.root_id().into_iter().collect();
        let mut order = Vec::with_capacity(self.len());
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.left(id));
            stack.extend(self.right(id));
        }
        for id in order.into_iter().rev() {
            visit(self.view(id));
        }
    }

    /// Visits the nodes level by level from the root, left to right within a level.
    pub fn breadth_first<F>(&self, mut visit: F)
    where
        F: FnMut(NodeRef<'_, T, B::Tag>),
    {
        let mut queue: VecDeque<NodeId> = self.root_id().into_iter().collect();
        while let Some(id) = queue.pop_front() {
            queue.extend(self.left(id));
            queue.extend(self.right(id));
            visit(self.view(id));
        }
    }

    /// The tree in pre-order with every absent child spelled out as `None`. Two trees with equal
    /// shapes are structurally identical.
    pub(crate) fn shape(&self) -> impl Iterator<Item = Option<(&T, B::Tag)>> + '_ {
        let mut stack = vec![self.root_id()];
        std::iter::from_fn(move || {
            let slot = stack.pop()?;
            Some(slot.map(|id| {
                stack.push(self.right(id));
                stack.push(self.left(id));
                let node = self.raw(id);
                (&node.element, node.tag)
            }))
        })
    }

    fn view(&self, id: NodeId) -> NodeRef<'_, T, B::Tag> {
        NodeRef {
            nodes: &self.nodes,
            id,
        }
    }
}
