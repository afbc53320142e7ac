//! This crate provides an ordered binary search tree with a choice of balancing: none at all,
//! height balancing (AVL), or color balancing (red-black).
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored elements. It is made of nodes, each storing one element and up to two children. The
//! invariant that makes it a search tree is:
//!
//! 1. For every node, every element in its left subtree is less than or equal to its own.
//! 2. For every node, every element in its right subtree is greater than its own.
//!
//! > Nodes without children are called "leaf nodes".
//!
//! Searching, inserting, and deleting all take `O(height)` steps, where the height is the number
//! of edges on the longest path from the root down to a leaf. Inserting elements in ascending
//! order turns a plain tree into a path of height `N - 1`. The self-balancing trees restructure
//! themselves after every change so the height stays `O(lg N)`:
//!
//! - [`Avl`] keeps the heights of sibling subtrees within one of each other.
//! - [`RedBlack`] colors nodes so no path is more than twice as long as any other.
//!
//! All three share the same [`Tree`] engine and differ only in their [`Balance`] policy. Iterating
//! a tree always yields its elements in sorted order.
//!
//! ```
//! use ordtree::{Avl, Tree, Unbalanced};
//!
//! let plain: Tree<u32, Unbalanced> = (0..127).collect();
//! let avl: Tree<u32, Avl> = (0..127).collect();
//!
//! assert_eq!(plain.height(), Some(126));
//! assert_eq!(avl.height(), Some(6));
//! assert!(plain.iter().eq(avl.iter()));
//! ```
//!
//! When the balancing has to be chosen at runtime, [`AnyTree`] wraps all three.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod balance;
pub mod collection;
pub mod error;
pub mod iter;
mod node;
pub mod red_black;
mod tree;
mod util;


pub use avl::Avl;
pub use balance::{Balance, BalanceKind, Rotatable, Unbalanced};
pub use collection::{AnyIter, AnyTree, OrderedCollection};
pub use error::{TreeError, Violation};
pub use iter::{IntoIter, Iter};
pub use node::{Color, NodeId, NodeRef};
pub use red_black::RedBlack;
pub use tree::Tree;
