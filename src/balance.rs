//! Rebalancing policies.
//!
//! A [`Tree`] is the same ordered engine whatever its policy. The policy picks the per-node tag
//! and gets to restructure the tree right after each insertion and removal:
//!
//! | policy          | [`BalanceKind`]                  | tag           |
//! |-----------------|----------------------------------|---------------|
//! | [`Unbalanced`]  | [`BalanceKind::None`]            | `()`          |
//! | [`Avl`]         | [`BalanceKind::HeightBalanced`]  | `i32` height  |
//! | [`RedBlack`]    | [`BalanceKind::ColorBalanced`]   | [`Color`]     |
//!
//! Only the plain tree implements [`Rotatable`]. Letting callers rotate a balanced tree would
//! break its height or color invariants, so those trees have no rotation methods at all.
//!
//! [`Avl`]: crate::Avl
//! [`RedBlack`]: crate::RedBlack
//! [`Color`]: crate::Color

use std::fmt;
use std::str::FromStr;

use crate::error::{TreeError, Violation};
use crate::node::NodeId;
use crate::tree::Tree;
use crate::util::{Hooks, Removed, Side};

/// A rebalancing discipline. This trait is sealed.
pub trait Balance: Hooks {
    /// Per-node balancing data.
    type Tag: Copy + Default + fmt::Debug + PartialEq;

    /// Which discipline this is.
    const KIND: BalanceKind;
}

/// The three balancing disciplines, for choosing one at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BalanceKind {
    /// A plain ordered tree.
    None,
    /// AVL: sibling subtree heights differ by at most one.
    HeightBalanced,
    /// Red-black: colors bound every path to twice the shortest.
    ColorBalanced,
}

impl fmt::Display for BalanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "plain",
            Self::HeightBalanced => "AVL",
            Self::ColorBalanced => "red-black",
        })
    }
}

impl FromStr for BalanceKind {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "none" | "bst" => Ok(Self::None),
            "avl" | "height" => Ok(Self::HeightBalanced),
            "red-black" | "redblack" | "rb" | "color" => Ok(Self::ColorBalanced),
            _ => Err(TreeError::UnknownBalance(s.to_string())),
        }
    }
}

/// The policy of a plain ordered tree: nothing is ever rebalanced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unbalanced;

impl Balance for Unbalanced {
    type Tag = ();
    const KIND: BalanceKind = BalanceKind::None;
}

impl Hooks for Unbalanced {
    fn inserted<T>(_tree: &mut Tree<T, Self>, _node: NodeId) {}

    fn removed<T>(_tree: &mut Tree<T, Self>, _removed: Removed<()>) {}

    fn check<T>(_tree: &Tree<T, Self>) -> Result<(), Violation> {
        Ok(())
    }
}

/// Trees that callers may restructure by hand.
///
/// Rotations keep the in-order sequence intact and are a no-op when the child that would move
/// up is missing.
pub trait Rotatable {
    /// Moves the right child of `node` up into its place.
    fn rotate_left(&mut self, node: NodeId) -> Result<(), TreeError>;

    /// Moves the left child of `node` up into its place.
    fn rotate_right(&mut self, node: NodeId) -> Result<(), TreeError>;
}

impl<T> Rotatable for Tree<T, Unbalanced> {
    fn rotate_left(&mut self, node: NodeId) -> Result<(), TreeError> {
        self.checked_rotate(node, Side::Left)
    }

    fn rotate_right(&mut self, node: NodeId) -> Result<(), TreeError> {
        self.checked_rotate(node, Side::Right)
    }
}

impl<T> Tree<T, Unbalanced> {
    fn checked_rotate(&mut self, node: NodeId, direction: Side) -> Result<(), TreeError> {
        if !self.is_live(node) {
            return Err(TreeError::NotFound(node));
        }
        self.rotate(node, direction);
        self.last_inserted = None;
        Ok(())
    }
}
