use ordtree::{AnyTree, BalanceKind, OrderedCollection, TreeError};
use quickcheck_macros::quickcheck;

use crate::Op;

const KINDS: [BalanceKind; 3] = [
    BalanceKind::None,
    BalanceKind::HeightBalanced,
    BalanceKind::ColorBalanced,
];

fn run(tree: &mut AnyTree<i8>, ops: &[Op<i8>]) {
    for op in ops {
        match *op {
            Op::Insert(x) => OrderedCollection::insert(tree, x),
            Op::Delete(x) => {
                tree.delete(&x);
            }
            Op::PopFirst => {
                let _ = tree.pop_first();
            }
            Op::PopLast => {
                let _ = tree.pop_last();
            }
        }
    }
}

#[quickcheck]
fn every_kind_holds_the_same_elements(ops: Vec<Op<i8>>) -> bool {
    let trees: Vec<AnyTree<i8>> = KINDS
        .into_iter()
        .map(|kind| {
            let mut tree = AnyTree::new(kind);
            run(&mut tree, &ops);
            tree
        })
        .collect();

    trees.iter().all(|tree| tree.validate().is_ok())
        && trees
            .windows(2)
            .all(|pair| pair[0].iter().eq(pair[1].iter()))
}

#[quickcheck]
fn balanced_trees_refuse_rotation(ops: Vec<Op<i8>>, pick: usize) -> bool {
    [BalanceKind::HeightBalanced, BalanceKind::ColorBalanced]
        .into_iter()
        .all(|kind| {
            let mut tree = AnyTree::new(kind);
            run(&mut tree, &ops);
            let Some(&x) = tree.iter().nth(pick % tree.len().max(1)) else {
                return true;
            };
            let Some(id) = tree.search(&x) else {
                return false;
            };

            let before = tree.clone();
            tree.rotate_left(id) == Err(TreeError::OperationNotPermitted(kind))
                && tree.rotate_right(id) == Err(TreeError::OperationNotPermitted(kind))
                && tree == before
                && tree.validate().is_ok()
        })
}

#[test]
fn kinds_parse_from_names() {
    for kind in KINDS {
        assert_eq!(kind.to_string().parse::<BalanceKind>(), Ok(kind));
    }
    assert_eq!(
        "splay".parse::<BalanceKind>(),
        Err(TreeError::UnknownBalance("splay".to_string()))
    );
}
