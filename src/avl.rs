//! A height-balanced tree (an AVL tree).
//!
//! Every node stores the height of its subtree: a leaf has height `0` and an absent child counts
//! as `-1`. After each insertion or removal the path from the change up to the root is walked,
//! heights are recomputed, and any node whose subtrees differ in height by two is fixed with one
//! or two rotations. See [the Wikipedia page][wiki] for the terminology.
//!
//! [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing
//!
//! # Examples
//!
//! ```
//! use ordtree::{Avl, Tree};
//!
//! let tree: Tree<i32, Avl> = (1..=7).collect();
//!
//! // Ascending inserts would make a plain tree a path of height 6.
//! assert_eq!(tree.height(), Some(2));
//! assert_eq!(tree.root().map(|n| *n.element()), Some(4));
//! ```

use log::debug;

use crate::balance::{Balance, BalanceKind};
use crate::error::Violation;
use crate::node::NodeId;
use crate::tree::Tree;
use crate::util::{Hooks, Removed, Side};

/// The AVL balancing policy. Its per-node tag is the height of the node's subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Avl;

impl Balance for Avl {
    type Tag = i32;
    const KIND: BalanceKind = BalanceKind::HeightBalanced;
}

impl Hooks for Avl {
    fn inserted<T>(tree: &mut Tree<T, Self>, node: NodeId) {
        rebalance(tree, Some(node));
    }

    fn removed<T>(tree: &mut Tree<T, Self>, removed: Removed<i32>) {
        rebalance(tree, removed.parent);
    }

    fn check<T>(tree: &Tree<T, Self>) -> Result<(), Violation> {
        for id in tree.in_order_ids() {
            let (left, right) = child_heights(tree, id);
            if tree.tag(id) != 1 + left.max(right) {
                return Err(Violation::StaleHeight(id));
            }
            let factor = left - right;
            if factor.abs() > 1 {
                return Err(Violation::Unbalanced { node: id, factor });
            }
        }
        Ok(())
    }
}

impl<T> Tree<T, Avl> {
    /// The stored height of the subtree rooted at `node`, `None` if the handle is not live.
    pub fn node_height(&self, node: NodeId) -> Option<i32> {
        self.node(node).map(|n| n.tag())
    }
}

fn height<T>(tree: &Tree<T, Avl>, node: Option<NodeId>) -> i32 {
    node.map_or(-1, |id| tree.tag(id))
}

fn child_heights<T>(tree: &Tree<T, Avl>, node: NodeId) -> (i32, i32) {
    (
        height(tree, tree.left(node)),
        height(tree, tree.right(node)),
    )
}

fn fix_height<T>(tree: &mut Tree<T, Avl>, node: NodeId) {
    let (left, right) = child_heights(tree, node);
    tree.set_tag(node, 1 + left.max(right));
}

/// Left height minus right height.
fn balance_factor<T>(tree: &Tree<T, Avl>, node: NodeId) -> i32 {
    let (left, right) = child_heights(tree, node);
    left - right
}

/// Walks from `start` up to the root, fixing heights and rotating wherever a node is two levels
/// out of balance.
fn rebalance<T>(tree: &mut Tree<T, Avl>, start: Option<NodeId>) {
    let mut current = start;
    while let Some(node) = current {
        fix_height(tree, node);
        let top = match balance_factor(tree, node) {
            // Right heavy.
            -2 => {
                let right = tree.right(node).expect("Right heavy => right child");
                if balance_factor(tree, right) == 1 {
                    debug!("AVL right-left rotation at {}", node);
                    rotate(tree, right, Side::Right);
                } else {
                    debug!("AVL left rotation at {}", node);
                }
                rotate(tree, node, Side::Left)
            }
            // Left heavy.
            2 => {
                let left = tree.left(node).expect("Left heavy => left child");
                if balance_factor(tree, left) == -1 {
                    debug!("AVL left-right rotation at {}", node);
                    rotate(tree, left, Side::Left);
                } else {
                    debug!("AVL right rotation at {}", node);
                }
                rotate(tree, node, Side::Right)
            }
            _ => node,
        };

        if cfg!(debug_assertions) {
            assert!(balance_factor(tree, top).abs() <= 1);
        }

        current = tree.parent(top);
    }
}

/// Rotates around `node` and refreshes the heights of the two nodes whose subtrees changed: the
/// one moving down first, then the one moving up. Returns the node that moved up.
fn rotate<T>(tree: &mut Tree<T, Avl>, node: NodeId, direction: Side) -> NodeId {
    let rotated = tree.rotate(node, direction);
    debug_assert!(rotated, "AVL rotations always have a child to lift");
    fix_height(tree, node);
    let risen = tree.parent(node).expect("A rotation leaves the lowered node a parent");
    fix_height(tree, risen);
    risen
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Assert the heights of the root, its left child, and its right child.
    macro_rules! assert_heights {
        ($tree:ident, $height:expr, $left_height:expr, $right_height:expr) => {{
            let root = $tree.root().expect("tree is not empty");
            assert_eq!(root.tag(), $height);
            assert_eq!(root.left().map_or(-1, |n| n.tag()), $left_height);
            assert_eq!(root.right().map_or(-1, |n| n.tag()), $right_height);
        }};
    }

    fn assert_valid(tree: &Tree<i32, Avl>) {
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut tree: Tree<i32, Avl> = Tree::new();
        for x in 1..=7 {
            tree.insert(x);
            assert_valid(&tree);
        }

        assert_eq!(tree.height(), Some(2));
        assert_heights!(tree, 2, 1, 1);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn always_adding_left() {
        let mut tree: Tree<i32, Avl> = Tree::new();
        for key in (1..=10).rev() {
            tree.insert(key);
            assert_valid(&tree);
            assert!((key..=10).all(|k| tree.contains(&k)));
        }
        assert_eq!(tree.height(), Some(3));
    }

    #[test]
    fn left_right_rebalance() {
        let mut tree: Tree<i32, Avl> = Tree::new();
        tree.insert(0);
        tree.insert(-2);
        tree.insert(-1);

        assert_heights!(tree, 1, 0, 0);
        assert_eq!(tree.root().map(|n| *n.element()), Some(-1));
    }

    #[test]
    fn right_left_rebalance() {
        let mut tree: Tree<i32, Avl> = Tree::new();
        tree.insert(0);
        tree.insert(2);
        tree.insert(1);

        assert_heights!(tree, 1, 0, 0);
        assert_eq!(tree.root().map(|n| *n.element()), Some(1));
    }

    #[test]
    fn heights_follow_deletes() {
        let mut tree: Tree<i32, Avl> = Tree::new();
        let one = tree.insert(1);
        assert_eq!(tree.node_height(one), Some(0));

        tree.insert(2);
        assert_heights!(tree, 1, -1, 0);

        tree.insert(0);
        assert_heights!(tree, 1, 0, 0);

        tree.delete(&0);
        assert_heights!(tree, 1, -1, 0);

        // The root has two children, so it takes its predecessor's element.
        tree.insert(0);
        tree.delete(&1);
        assert_heights!(tree, 1, -1, 0);
        assert_valid(&tree);
    }

    #[test]
    fn delete_rotates_when_sibling_is_balanced() {
        //      2
        //     / \
        //    1   4
        //       / \
        //      3   5
        let mut tree: Tree<i32, Avl> = [2, 1, 4, 3, 5].into_iter().collect();
        tree.delete(&1);

        assert_valid(&tree);
        assert_eq!(tree.root().map(|n| *n.element()), Some(4));
        assert_heights!(tree, 2, 1, 0);
    }

    #[test]
    fn quickcheck_found_invalid_height_after_deletion() {
        let mut tree: Tree<i32, Avl> = Tree::new();
        for x in [77, -22, 0, -127, 5, 109, -58, -105, -65, -86, 45, -11, -39] {
            tree.insert(x);
        }
        tree.delete(&0);
        tree.delete(&-122);
        assert_valid(&tree);
    }

    #[test]
    fn quickcheck_found_invalid_height_after_deletion2() {
        let mut tree: Tree<i32, Avl> = Tree::new();
        for x in [-49, -107, 127, -22, -77, -128, -119, -69, -122, 109, 115, -118] {
            tree.insert(x);
        }
        tree.delete(&-49);
        tree.delete(&-77);
        assert_valid(&tree);
    }

    #[test]
    fn rotations_fix_parent_links() {
        let mut tree: Tree<i32, Avl> = Tree::new();
        for x in [5, 3, 9, 4, 2, 1] {
            tree.insert(x);
        }

        let root = tree.root().unwrap();
        assert_eq!(*root.element(), 3);
        let five = root.right().unwrap();
        let nine = five.right().unwrap();
        assert_eq!(nine.parent().map(|n| n.id()), Some(five.id()));
        assert_valid(&tree);
    }

    #[test]
    fn teardown_matches_fresh_tree() {
        let mut tree: Tree<i32, Avl> = (0..32).collect();
        for x in (0..32).rev().step_by(3).chain((0..32).filter(|x| (31 - x) % 3 != 0)) {
            assert_eq!(tree.delete(&x), Some(x));
            assert_valid(&tree);
        }
        assert_eq!(tree, Tree::new());
    }
}
