//! A color-balanced tree (a red-black tree).
//!
//! Between operations a red-black tree satisfies:
//!
//! 1. Every node is red or black.
//! 2. The root is black.
//! 3. Absent children count as black leaves.
//! 4. A red node has two black children.
//! 5. Every path from a node down to an absent child crosses the same number of black nodes.
//!
//! Together these keep the longest root-to-leaf path within twice the shortest.
//!
//! # Examples
//!
//! ```
//! use ordtree::{Color, RedBlack, Tree};
//!
//! let mut tree: Tree<i32, RedBlack> = Tree::new();
//! for x in [10, 18, 7, 15, 16, 30, 25, 40, 60, 2, 1, 70] {
//!     tree.insert(x);
//! }
//!
//! let root = tree.root().unwrap();
//! assert_eq!(tree.color(root.id()), Some(Color::Black));
//! assert_eq!(tree.validate(), Ok(()));
//! ```

use log::debug;

use crate::balance::{Balance, BalanceKind};
use crate::error::Violation;
use crate::node::{Color, NodeId};
use crate::tree::Tree;
use crate::util::{Hooks, Removed, Side};

/// The red-black balancing policy. Its per-node tag is a [`Color`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedBlack;

impl Balance for RedBlack {
    type Tag = Color;
    const KIND: BalanceKind = BalanceKind::ColorBalanced;
}

impl Hooks for RedBlack {
    fn inserted<T>(tree: &mut Tree<T, Self>, node: NodeId) {
        tree.set_tag(node, Color::Red);
        insert_fixup(tree, node);
    }

    fn removed<T>(tree: &mut Tree<T, Self>, removed: Removed<Color>) {
        let child_is_red = is_red(tree, removed.child);
        if child_is_red || removed.tag.is_red() {
            // One red node absorbs the missing black. When the child is absent it is one of the
            // black leaves already.
            if let Some(child) = removed.child {
                tree.set_tag(child, Color::Black);
            }
        } else if let (Some(parent), Some(side)) = (removed.parent, removed.side) {
            delete_fixup(tree, parent, side);
        }

        if cfg!(debug_assertions) {
            if let Some(root) = tree.root_id() {
                assert_eq!(tree.tag(root), Color::Black);
            }
        }
    }

    fn check<T>(tree: &Tree<T, Self>) -> Result<(), Violation> {
        let Some(root) = tree.root_id() else {
            return Ok(());
        };
        if tree.tag(root).is_red() {
            return Err(Violation::RedRoot(root));
        }

        // Post-order so both children's black heights are known when their parent comes up.
        let mut black_heights = vec![0usize; tree.nodes.len()];
        let mut stack = vec![(root, false)];
        while let Some((id, children_done)) = stack.pop() {
            if !children_done {
                stack.push((id, true));
                stack.extend(
                    [tree.left(id), tree.right(id)]
                        .into_iter()
                        .flatten()
                        .map(|child| (child, false)),
                );
                continue;
            }

            let color = tree.tag(id);
            if color == Color::Unset {
                return Err(Violation::Uncolored(id));
            }
            let children = [tree.left(id), tree.right(id)];
            if color.is_red() && children.iter().any(|&child| is_red(tree, child)) {
                return Err(Violation::RedChild(id));
            }
            let [left, right] = children.map(|child| child.map_or(0, |c| black_heights[c.0]));
            if left != right {
                return Err(Violation::BlackHeight(id));
            }
            black_heights[id.0] = left + usize::from(color == Color::Black);
        }
        Ok(())
    }
}

impl<T> Tree<T, RedBlack> {
    /// The color of `node`, `None` if the handle is not live.
    pub fn color(&self, node: NodeId) -> Option<Color> {
        self.node(node).map(|n| n.tag())
    }
}

fn is_red<T>(tree: &Tree<T, RedBlack>, node: Option<NodeId>) -> bool {
    node.map_or(false, |id| tree.tag(id).is_red())
}

fn paint<T>(tree: &mut Tree<T, RedBlack>, node: NodeId, color: Color) {
    tree.set_tag(node, color);
}

/// Restores the invariants after `node` was linked in and painted red. Only property 4 can be
/// broken, and only between `node` and its parent.
fn insert_fixup<T>(tree: &mut Tree<T, RedBlack>, node: NodeId) {
    let mut node = node;
    loop {
        let Some(mut parent) = tree.parent(node) else {
            paint(tree, node, Color::Black);
            return;
        };
        if !tree.tag(parent).is_red() {
            return;
        }

        let grandparent = tree.parent(parent).expect("A red parent is never the root");
        let parent_side = tree.side_of(parent).expect("A red parent is never the root");
        let uncle = tree.child(grandparent, parent_side.opposite());

        if let Some(uncle) = uncle.filter(|&uncle| tree.tag(uncle).is_red()) {
            debug!("red-black insert: red uncle of {}, recoloring", node);
            paint(tree, parent, Color::Black);
            paint(tree, uncle, Color::Black);
            paint(tree, grandparent, Color::Red);
            node = grandparent;
            continue;
        }

        if tree.side_of(node) != Some(parent_side) {
            debug!("red-black insert: straightening {} under {}", node, parent);
            tree.rotate(parent, parent_side);
            std::mem::swap(&mut node, &mut parent);
        }

        debug!("red-black insert: rotating {} to lift {}", grandparent, parent);
        paint(tree, parent, Color::Black);
        paint(tree, grandparent, Color::Red);
        tree.rotate(grandparent, parent_side.opposite());
        return;
    }
}

/// Restores the black height after a black node with no red replacement was removed.
///
/// The "double black" position is tracked as a slot: `side` of `parent`. Whatever sits in that
/// slot (possibly nothing, when a black leaf was removed) has one black node too few on each of
/// its paths. An empty slot plays the role of a temporary black placeholder.
fn delete_fixup<T>(tree: &mut Tree<T, RedBlack>, parent: NodeId, side: Side) {
    let mut parent = parent;
    let mut side = side;
    loop {
        let mut sibling = sibling_of(tree, parent, side);

        // Case 1: red sibling. Turn it into one of the black sibling cases.
        if tree.tag(sibling).is_red() {
            debug!("red-black delete: red sibling {} under {}", sibling, parent);
            paint(tree, sibling, Color::Black);
            paint(tree, parent, Color::Red);
            tree.rotate(parent, side);
            sibling = sibling_of(tree, parent, side);
        }

        let near = tree.child(sibling, side);
        let far = tree.child(sibling, side.opposite());
        let nephews_black = !is_red(tree, near) && !is_red(tree, far);

        // Case 2: everything black. Push the deficit up a level.
        if nephews_black && !tree.tag(parent).is_red() {
            debug!("red-black delete: all black around {}, moving up", parent);
            paint(tree, sibling, Color::Red);
            match (tree.parent(parent), tree.side_of(parent)) {
                (Some(up), Some(up_side)) => {
                    parent = up;
                    side = up_side;
                    continue;
                }
                // The deficit reached the root, where it shortens every path alike.
                _ => return,
            }
        }

        // Case 3: red parent, black sibling and nephews. Swapping colors settles it.
        if nephews_black {
            debug!("red-black delete: red parent {}, recoloring", parent);
            paint(tree, sibling, Color::Red);
            paint(tree, parent, Color::Black);
            return;
        }

        // Case 4: the far nephew is black, so the near one is red. Rotate it into the far spot.
        if !is_red(tree, far) {
            let near = near.expect("The near nephew is red here");
            debug!("red-black delete: red near nephew {}, rotating {}", near, sibling);
            paint(tree, sibling, Color::Red);
            paint(tree, near, Color::Black);
            tree.rotate(sibling, side.opposite());
            sibling = sibling_of(tree, parent, side);
        }

        // Case 5: the far nephew is red. One rotation restores the black height.
        debug!("red-black delete: red far nephew, rotating {}", parent);
        let far = tree
            .child(sibling, side.opposite())
            .expect("The far nephew is red here");
        paint(tree, sibling, tree.tag(parent));
        paint(tree, parent, Color::Black);
        paint(tree, far, Color::Black);
        tree.rotate(parent, side);
        return;
    }
}

/// The other child of `parent`. A slot short of one black node always has a sibling, since the
/// sibling's subtree holds at least one black node on every path.
fn sibling_of<T>(tree: &Tree<T, RedBlack>, parent: NodeId, side: Side) -> NodeId {
    tree.child(parent, side.opposite())
        .expect("A double black slot always has a sibling")
}
