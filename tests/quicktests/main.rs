//! Property tests run against the public API of every kind of tree.

mod any;
mod trees;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Insert the T into the tree
    Insert(T),
    /// Delete one T equal to this one
    Delete(T),
    /// Remove the smallest element
    PopFirst,
    /// Remove the largest element
    PopLast,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2, 3]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Delete(T::arbitrary(g)),
            2 => Op::PopFirst,
            3 => Op::PopLast,
            _ => unreachable!(),
        }
    }
}
