use ordtree::{Avl, Balance, RedBlack, Rotatable, Tree, TreeError, Unbalanced};
use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies `ops` to a tree and to a sorted `Vec` standing in for it, checking after every step
/// that the two agree and that the tree is still structurally sound.
fn agrees_with_model<B: Balance>(ops: &[Op<i8>]) -> bool {
    let mut tree: Tree<i8, B> = Tree::new();
    let mut model: Vec<i8> = Vec::new();

    for op in ops {
        match *op {
            Op::Insert(x) => {
                let id = tree.insert(x);
                if tree.get(id) != Some(&x) || tree.last_inserted() != Some(id) {
                    return false;
                }
                let at = model.partition_point(|&y| y < x);
                model.insert(at, x);
            }
            Op::Delete(x) => {
                let expected = model.binary_search(&x).ok().map(|at| model.remove(at));
                if tree.delete(&x) != expected {
                    return false;
                }
            }
            Op::PopFirst => {
                let expected = if model.is_empty() {
                    Err(TreeError::EmptyStructure)
                } else {
                    Ok(model.remove(0))
                };
                if tree.pop_first() != expected {
                    return false;
                }
            }
            Op::PopLast => {
                let expected = model.pop().ok_or(TreeError::EmptyStructure);
                if tree.pop_last() != expected {
                    return false;
                }
            }
        }

        if tree.validate().is_err()
            || tree.len() != model.len()
            || !tree.iter().eq(model.iter())
            || tree.first() != model.first()
            || tree.last() != model.last()
        {
            return false;
        }
    }

    true
}

#[quickcheck]
fn fuzz_multiple_operations_plain(ops: Vec<Op<i8>>) -> bool {
    agrees_with_model::<Unbalanced>(&ops)
}

#[quickcheck]
fn fuzz_multiple_operations_avl(ops: Vec<Op<i8>>) -> bool {
    agrees_with_model::<Avl>(&ops)
}

#[quickcheck]
fn fuzz_multiple_operations_red_black(ops: Vec<Op<i8>>) -> bool {
    agrees_with_model::<RedBlack>(&ops)
}

/// Inserts every element, then deletes them again in the order given by `order`.
fn teardown<B: Balance>(xs: &[i16], order: &[usize]) -> bool {
    let mut tree: Tree<i16, B> = xs.iter().copied().collect();
    let mut remaining = xs.to_vec();

    for &pick in order {
        if remaining.is_empty() {
            break;
        }
        let x = remaining.swap_remove(pick % remaining.len());
        if tree.delete(&x) != Some(x) || tree.validate().is_err() {
            return false;
        }
    }
    for x in remaining {
        if tree.delete(&x) != Some(x) {
            return false;
        }
    }

    tree.is_empty() && tree.height().is_none() && tree == Tree::new()
}

#[quickcheck]
fn teardown_plain(xs: Vec<i16>, order: Vec<usize>) -> bool {
    teardown::<Unbalanced>(&xs, &order)
}

#[quickcheck]
fn teardown_avl(xs: Vec<i16>, order: Vec<usize>) -> bool {
    teardown::<Avl>(&xs, &order)
}

#[quickcheck]
fn teardown_red_black(xs: Vec<i16>, order: Vec<usize>) -> bool {
    teardown::<RedBlack>(&xs, &order)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let plain: Tree<i8> = xs.iter().copied().collect();
    let avl: Tree<i8, Avl> = xs.iter().copied().collect();
    let red_black: Tree<i8, RedBlack> = xs.iter().copied().collect();

    xs.iter()
        .all(|x| plain.contains(x) && avl.contains(x) && red_black.contains(x))
}

#[quickcheck]
fn iterates_sorted(xs: Vec<i32>) -> bool {
    let tree: Tree<i32, RedBlack> = xs.iter().copied().collect();
    let mut sorted = xs;
    sorted.sort_unstable();

    tree.into_iter().eq(sorted)
}

#[quickcheck]
fn red_black_height_is_bounded(xs: Vec<u16>) -> bool {
    let tree: Tree<u16, RedBlack> = xs.iter().copied().collect();
    // A red-black tree with n nodes is no taller than 2 * log2(n + 1).
    let bound = 2.0 * ((tree.len() + 1) as f64).log2();
    tree.height().map_or(true, |h| (h as f64) <= bound)
}

#[quickcheck]
fn avl_heights_are_consistent(xs: Vec<i16>) -> bool {
    let tree: Tree<i16, Avl> = xs.iter().copied().collect();
    let mut consistent = true;
    tree.post_order(|node| {
        let left = node.left().map_or(-1, |n| n.tag());
        let right = node.right().map_or(-1, |n| n.tag());
        consistent &= node.tag() == 1 + left.max(right) && (left - right).abs() <= 1;
    });
    consistent
}

#[quickcheck]
fn rotations_keep_order(xs: Vec<i8>, rotations: Vec<(usize, bool)>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    let before: Vec<i8> = tree.iter().copied().collect();

    let mut ids = Vec::new();
    tree.in_order(|node| ids.push(node.id()));
    if ids.is_empty() {
        return true;
    }

    for (pick, left) in rotations {
        let id = ids[pick % ids.len()];
        let rotated = if left {
            tree.rotate_left(id)
        } else {
            tree.rotate_right(id)
        };
        if rotated.is_err() || tree.validate().is_err() {
            return false;
        }
    }

    tree.iter().copied().eq(before)
}
