use crate::ordered::TreeNode;

/// Whether every key in each node's left subtree is smaller than the node's
/// key and every key in its right subtree is larger.
pub(crate) fn is_ordered<K: Ord>(root: Option<&TreeNode<K>>) -> bool {
    // Each node with the exclusive bounds its ancestors impose on it.
    let mut stack: Vec<(&TreeNode<K>, Option<&K>, Option<&K>)> =
        root.map(|n| (n, None, None)).into_iter().collect();
    while let Some((node, lower, upper)) = stack.pop() {
        let key = node.key();
        if lower.map_or(false, |lower| key <= lower) || upper.map_or(false, |upper| key >= upper) {
            return false;
        }
        stack.extend(node.left().map(|n| (n, lower, Some(key))));
        stack.extend(node.right().map(|n| (n, Some(key), upper)));
    }
    true
}

/// The number of nodes reachable from `root`.
pub(crate) fn count<K>(root: Option<&TreeNode<K>>) -> usize {
    let mut count = 0;
    let mut stack: Vec<&TreeNode<K>> = root.into_iter().collect();
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.left());
        stack.extend(node.right());
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderedTree;

    #[test]
    fn empty_is_ordered() {
        assert!(is_ordered::<i32>(None));
        assert_eq!(count::<i32>(None), 0);
    }

    #[test]
    fn counts_every_node() {
        let tree: OrderedTree<_> = [4, 2, 6, 1, 3].into_iter().collect();

        assert!(is_ordered(tree.root()));
        assert_eq!(count(tree.root()), 5);
    }
}
