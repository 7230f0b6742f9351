//! Hooks for a presentation layer that wants to redraw after every change.
//!
//! An [`OrderedTree`][crate::OrderedTree] never pushes anything unless an
//! [`Observer`] has been installed with
//! [`set_observer`][crate::OrderedTree::set_observer]. Reading the tree back
//! with a traversal or [`root`][crate::OrderedTree::root] always works
//! without one.
//!
//! # Examples
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use ordered_tree::{Mutation, OrderedTree, TreeNode};
//!
//! let redraws = Rc::new(RefCell::new(Vec::new()));
//! let log = Rc::clone(&redraws);
//!
//! let mut tree = OrderedTree::new();
//! tree.set_observer(move |mutation: &Mutation<'_, i64>, root: Option<&TreeNode<i64>>| {
//!     log.borrow_mut().push((mutation.to_string(), root.map(|n| *n.key())));
//! });
//!
//! tree.insert(5);
//! tree.insert(5); // duplicate, nothing to redraw
//! tree.delete(&5);
//!
//! assert_eq!(
//!     *redraws.borrow(),
//!     [("inserted 5".to_string(), Some(5)), ("deleted 5".to_string(), None)]
//! );
//! ```

use std::fmt;

use crate::ordered::TreeNode;

/// A change that was just applied to a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation<'a, K> {
    /// A new key was linked in as a leaf.
    Inserted(&'a K),
    /// A key was removed.
    Deleted(&'a K),
    /// Every key was dropped.
    Cleared,
}

impl<K> fmt::Display for Mutation<'_, K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inserted(key) => write!(f, "inserted {}", key),
            Self::Deleted(key) => write!(f, "deleted {}", key),
            Self::Cleared => f.write_str("cleared"),
        }
    }
}

/// Receives a [`Mutation`] together with the tree's root after the mutation
/// has completed. Rejected inserts and missed deletes are not reported.
pub trait Observer<K> {
    /// Called once per successful mutation.
    fn on_mutation(&mut self, mutation: &Mutation<'_, K>, root: Option<&TreeNode<K>>);
}

impl<K, F> Observer<K> for F
where
    F: FnMut(&Mutation<'_, K>, Option<&TreeNode<K>>),
{
    fn on_mutation(&mut self, mutation: &Mutation<'_, K>, root: Option<&TreeNode<K>>) {
        self(mutation, root)
    }
}
