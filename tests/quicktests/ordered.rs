use ordered_tree::{OrderedTree, TreeNode};

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops<K>(ops: &[Op<K>], bst: &mut OrderedTree<K>, set: &mut BTreeSet<K>)
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                bst.insert(k.clone());
                set.insert(k.clone());
            }
            Op::Delete(k) => {
                bst.delete(k);
                set.remove(k);
            }
        }
    }
}

/// Walks the whole tree checking that every key sits strictly between the
/// bounds its ancestors impose.
fn ordered_between(node: Option<&TreeNode<i8>>, lower: Option<i8>, upper: Option<i8>) -> bool {
    match node {
        None => true,
        Some(n) => {
            let key = *n.key();
            lower.map_or(true, |l| l < key)
                && upper.map_or(true, |u| key < u)
                && ordered_between(n.left(), lower, Some(key))
                && ordered_between(n.right(), Some(key), upper)
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = OrderedTree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.len() == set.len()
        && set.iter().all(|key| tree.search(key))
        && tree.in_order() == set.into_iter().collect::<Vec<_>>()
}

#[quickcheck]
fn order_invariant_holds(ops: Vec<Op<i8>>) -> bool {
    let mut tree = OrderedTree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    ordered_between(tree.root(), None, None)
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.into_iter().collect();

    tree.in_order().windows(2).all(|w| w[0] < w[1])
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.search(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.search(x))
}

#[quickcheck]
fn duplicate_insert_changes_nothing(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: OrderedTree<_> = xs.into_iter().collect();
    tree.insert(x);
    let before = tree.pre_order();

    !tree.insert(x) && tree.pre_order() == before
}

#[quickcheck]
fn delete_agrees_with_search(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: OrderedTree<_> = xs.into_iter().collect();

    deletes.iter().all(|x| {
        let present = tree.search(x);
        tree.delete(x) == present && !tree.search(x)
    })
}

#[quickcheck]
fn count_conservation(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let unique: BTreeSet<_> = xs.iter().copied().collect();
    let mut tree: OrderedTree<_> = xs.into_iter().collect();

    let removed = deletes.iter().filter(|x| tree.delete(x)).count();
    tree.len() == unique.len() - removed
}

#[quickcheck]
fn post_order_emits_children_first(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.into_iter().collect();
    let post = tree.post_order();
    let position = |key: &i8| post.iter().position(|k| k == key);

    // Every key shows up after both of its children.
    let mut stack: Vec<&TreeNode<i8>> = tree.root().into_iter().collect();
    while let Some(node) = stack.pop() {
        for child in [node.left(), node.right()].into_iter().flatten() {
            if position(child.key()) >= position(node.key()) {
                return false;
            }
            stack.push(child);
        }
    }

    post.len() == tree.len()
}
