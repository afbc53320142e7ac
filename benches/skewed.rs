use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ordtree::{Avl, Balance, RedBlack, Tree, Unbalanced};

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: usize) -> usize {
    2usize.pow(num_levels as u32) - 1
}

/// Builds a tree by inserting values in ascending order. Unless the tree balances itself this
/// leaves it a single path.
fn ascending_tree<B: Balance>(num_levels: usize) -> Tree<i32, B> {
    (0..num_nodes_in_full_tree(num_levels) as i32).collect()
}

/// Measures searching for the largest element, which sits at the bottom of the path in a skewed
/// plain tree.
fn bench_find<B: Balance>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("ascending-{name}"));

    for num_levels in [3, 7, 11] {
        let tree: Tree<i32, B> = ascending_tree(num_levels);
        let largest_element_in_tree = num_nodes_in_full_tree(num_levels) as i32 - 1;
        let id = BenchmarkId::new("contains", largest_element_in_tree);

        group.bench_with_input(id, &largest_element_in_tree, |b, x| {
            b.iter(|| black_box(tree.contains(x)))
        });
    }

    group.finish();
}

/// Measures building a whole tree from ascending input, rebalancing included.
fn bench_build<B: Balance>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("build-{name}"));

    for num_levels in [3, 7, 11] {
        let id = BenchmarkId::new("ascending", num_nodes_in_full_tree(num_levels));
        group.bench_with_input(id, &num_levels, |b, &levels| {
            b.iter(|| black_box(ascending_tree::<B>(levels)))
        });
    }

    group.finish();
}

/// Compares the policies on input that skews a plain tree as badly as possible.
pub fn criterion_benchmark(c: &mut Criterion) {
    bench_find::<Unbalanced>(c, "plain");
    bench_find::<Avl>(c, "avl");
    bench_find::<RedBlack>(c, "red-black");

    bench_build::<Unbalanced>(c, "plain");
    bench_build::<Avl>(c, "avl");
    bench_build::<RedBlack>(c, "red-black");
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
