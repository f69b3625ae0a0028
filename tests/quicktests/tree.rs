use bstree::{Error, Tree};

use quickcheck_macros::quickcheck;
use std::collections::HashSet;

/// Keys sorted ascending with duplicates removed.
fn sorted_unique(mut xs: Vec<i8>) -> Vec<i8> {
    xs.sort_unstable();
    xs.dedup();
    xs
}

/// A binary tree is a search tree exactly when its inorder keys strictly increase.
fn is_strictly_ascending(tree: &Tree<i8>) -> bool {
    tree.inorder().windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn construction_round_trips(xs: Vec<i8>) -> bool {
    let tree = Tree::new(xs.clone());
    let expected = sorted_unique(xs);

    tree.len() == expected.len()
        && tree.inorder().into_iter().eq(expected.iter())
        && tree.balanced()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::default();
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter().all(|x| tree.find(x).map(|node| node.key()) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::default();
    for x in &xs {
        tree.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none() && tree.depth(x) != Ok(0))
}

#[quickcheck]
fn duplicate_inserts_change_nothing(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new(xs.clone());
    let before = tree.preorder().into_iter().copied().collect::<Vec<_>>();

    let all_existing = xs.iter().all(|x| {
        let insertion = tree.insert(*x);
        !insertion.is_new() && insertion.key() == x
    });

    all_existing
        && tree.len() == before.len()
        && tree.preorder().into_iter().copied().eq(before.into_iter())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::default();
    for x in &xs {
        tree.insert(*x);
    }
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same key multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
        && tree.len() == sorted_unique(still_present).len()
        && is_strictly_ascending(&tree)
}

#[quickcheck]
fn rebalance_keeps_keys(xs: Vec<i8>) -> bool {
    let mut tree = Tree::default();
    for x in &xs {
        tree.insert(*x);
    }
    let before = tree.inorder().into_iter().copied().collect::<Vec<_>>();

    tree.rebalance();

    tree.balanced()
        && tree.inorder().into_iter().copied().eq(before.into_iter())
        && tree.level_order_iterative() == tree.level_order_recursive()
}

#[test]
fn empty_tree_errors() {
    let tree = Tree::<i8>::default();

    assert_eq!(tree.height(), Err(Error::EmptyTree));
    assert_eq!(tree.depth(&0), Err(Error::EmptyTree));
    assert!(tree.inorder().is_empty());
    assert!(tree.balanced());
}
