//! `Arbitrary` for [`OrderedTree`], available to downstream crates with the
//! `quickcheck` cargo feature. It is always compiled for this crate's own
//! tests, where `quickcheck` is a dev-dependency.

use quickcheck::{Arbitrary, Gen};

use crate::OrderedTree;

/// Trees are generated by inserting arbitrary keys in arbitrary order, so
/// degenerate shapes show up as often as bushy ones.
impl<K> Arbitrary for OrderedTree<K>
where
    K: Arbitrary + Ord,
{
    fn arbitrary(g: &mut Gen) -> Self {
        Vec::<K>::arbitrary(g).into_iter().collect()
    }

    /// Shrinks the pre-order sequence. Replaying a pre-order sequence rebuilds
    /// the same shape, so every shrunk tree is a pruned version of this one.
    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.pre_order().shrink().map(|keys| keys.into_iter().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util;

    quickcheck::quickcheck! {
        fn arbitrary_trees_are_ordered(tree: OrderedTree<i8>) -> bool {
            util::is_ordered(tree.root()) && util::count(tree.root()) == tree.len()
        }
    }

    quickcheck::quickcheck! {
        fn shrunk_trees_are_ordered_and_no_larger(tree: OrderedTree<i8>) -> bool {
            tree.shrink().take(32).all(|smaller| {
                util::is_ordered(smaller.root()) && smaller.len() <= tree.len()
            })
        }
    }

    #[test]
    fn empty_tree_does_not_shrink() {
        assert!(OrderedTree::<i8>::new().shrink().next().is_none());
    }
}
