//! An ordered container of unique keys backed by a plain (unbalanced)
//! Binary Search Tree (BST).
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` where `height` is the longest path
//! from the root `Node` to a leaf `Node`. The tree in this crate never
//! rebalances, so inserting keys in sorted order produces a chain whose height
//! equals the number of keys. That shape is kept on purpose: it is exactly what
//! the insertion order dictates.
//!
//! Visiting the left subtree, then the subtree root, then the right subtree
//! yields the keys in sorted order. [`OrderedTree`] also exposes the pre-order
//! and post-order walks, and a read-only view of its nodes so a presentation
//! layer can draw the tree after each change.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//! for key in [50, 30, 70, 20, 40, 60, 80] {
//!     assert!(tree.insert(key));
//! }
//!
//! // Duplicates are rejected.
//! assert!(!tree.insert(50));
//!
//! assert_eq!(tree.in_order(), [20, 30, 40, 50, 60, 70, 80]);
//! assert_eq!(tree.pre_order(), [50, 30, 20, 40, 70, 60, 80]);
//! assert_eq!(tree.post_order(), [20, 40, 30, 60, 80, 70, 50]);
//!
//! // The root has two children so it is replaced by its in-order successor.
//! assert!(tree.delete(&50));
//! assert_eq!(tree.root().map(|n| *n.key()), Some(60));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod observer;
pub mod ordered;

#[cfg(any(test, feature = "quickcheck"))]
mod quickcheck;
mod util;

pub use observer::{Mutation, Observer};
pub use ordered::{OrderedTree, Traversal, TreeNode};
