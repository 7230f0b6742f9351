//! A mutable, unbalanced BST of unique keys. Mutations walk a cursor down to
//! the child slot that changes and store the (possibly new) subtree root
//! there. Nodes never point at their parents.
//!
//! Sorted input makes the tree a chain as deep as it is long, so every walk
//! over the tree is a loop or uses an explicit stack rather than recursing
//! once per level.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{OrderedTree, Traversal};
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.search(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.search(&1));
//!
//! // Inserting a key twice is rejected and leaves the tree alone.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! // Deleting reports whether the key was there.
//! assert!(tree.delete(&1));
//! assert!(!tree.delete(&1));
//! assert_eq!(tree.traverse(Traversal::InOrder), Vec::<i32>::new());
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, instrument, trace};

use crate::observer::{Mutation, Observer};

type Link<K> = Option<Box<TreeNode<K>>>;

/// The order in which a traversal visits a node relative to its subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// Left subtree, node, right subtree. Yields the keys in ascending order.
    InOrder,
    /// Node, left subtree, right subtree. Replaying these keys as inserts
    /// into an empty tree rebuilds the exact same shape.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

/// Pending work on the explicit stack of [`TreeNode::walk`].
enum Visit<'a, K> {
    /// Push this node's subtrees and the node itself in visiting order.
    Expand(&'a TreeNode<K>),
    /// Hand this node to the visitor.
    Emit(&'a TreeNode<K>),
}

/// Pending work on the explicit stack of [`TreeNode::clone_link`].
enum Duplicate<'a, K> {
    /// Copy this subtree. `None` copies to an empty slot.
    Subtree(Option<&'a TreeNode<K>>),
    /// Both subtrees of this node are copied; join them under a copy of it.
    Join(&'a TreeNode<K>),
}

/// One stored key and the subtrees hanging off it.
pub struct TreeNode<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> TreeNode<K> {
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
        })
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The root of the subtree holding every smaller key, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the subtree holding every larger key, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn find<'a>(mut node: Option<&'a Self>, key: &K) -> Option<&'a Self>
    where
        K: Ord,
    {
        while let Some(n) = node {
            node = match key.cmp(&n.key) {
                Ordering::Less => n.left(),
                Ordering::Equal => return Some(n),
                Ordering::Greater => n.right(),
            };
        }
        None
    }

    /// The left/right turns taken from the root down to `key`, or down to the
    /// empty slot where `key` would be linked in.
    fn path(mut node: Option<&Self>, key: &K) -> Vec<Ordering>
    where
        K: Ord,
    {
        let mut path = Vec::new();
        while let Some(n) = node {
            let turn = key.cmp(&n.key);
            node = match turn {
                Ordering::Less => n.left(),
                Ordering::Equal => break,
                Ordering::Greater => n.right(),
            };
            path.push(turn);
        }
        path
    }

    /// Follows the turns of [`TreeNode::path`] back down from `node`.
    fn follow<'a>(mut node: Option<&'a Self>, path: &[Ordering]) -> Option<&'a Self> {
        for turn in path {
            node = node.and_then(|n| match turn {
                Ordering::Less => n.left(),
                _ => n.right(),
            });
        }
        node
    }

    /// Walks from `link` down to the slot holding `key`, or to the empty slot
    /// where `key` belongs.
    fn slot<'a>(mut link: &'a mut Link<K>, key: &K) -> &'a mut Link<K>
    where
        K: Ord,
    {
        while let Some(turn) = link.as_deref().map(|n| key.cmp(&n.key)) {
            link = match (turn, link) {
                (Ordering::Less, Some(node)) => &mut node.left,
                (Ordering::Greater, Some(node)) => &mut node.right,
                (_, link) => return link,
            };
        }
        link
    }

    /// Removes this node from its subtree and returns what the parent should
    /// hold in its place.
    fn unlink(mut self: Box<Self>) -> Link<K> {
        match (self.left.take(), self.right.take()) {
            (None, only) | (only, None) => only,

            // With two children we always promote the in-order successor,
            // i.e. the smallest key in the right subtree. Only the key
            // moves; this node keeps its place and its left subtree.
            (left, right) => {
                self.left = left;
                self.right = right;
                if let Some(successor) = Self::delete_smallest(&mut self.right) {
                    self.key = successor;
                }
                Some(self)
            }
        }
    }

    /// Removes the smallest key below `link` and returns it. The smallest node
    /// has no left child so its right child takes its slot.
    fn delete_smallest(mut link: &mut Link<K>) -> Option<K> {
        while link.as_deref().map_or(false, |n| n.left.is_some()) {
            link = match link {
                Some(node) => &mut node.left,
                None => return None,
            };
        }
        let Self { key, right, .. } = *link.take()?;
        *link = right;
        Some(key)
    }

    fn height(root: Option<&Self>) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Self, usize)> = root.map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|n| (n, depth + 1)));
            stack.extend(node.right().map(|n| (n, depth + 1)));
        }
        height
    }

    /// Calls `visit` on every node below `root` in the given order.
    fn walk<'a>(root: Option<&'a Self>, order: Traversal, mut visit: impl FnMut(&'a Self)) {
        let mut stack: Vec<Visit<'a, K>> = root.map(Visit::Expand).into_iter().collect();
        while let Some(next) = stack.pop() {
            let node = match next {
                Visit::Emit(node) => {
                    visit(node);
                    continue;
                }
                Visit::Expand(node) => node,
            };
            // Pushed in reverse: the last push is visited first.
            let right = node.right().map(Visit::Expand);
            let left = node.left().map(Visit::Expand);
            match order {
                Traversal::PreOrder => {
                    stack.extend(right);
                    stack.extend(left);
                    stack.push(Visit::Emit(node));
                }
                Traversal::InOrder => {
                    stack.extend(right);
                    stack.push(Visit::Emit(node));
                    stack.extend(left);
                }
                Traversal::PostOrder => {
                    stack.push(Visit::Emit(node));
                    stack.extend(right);
                    stack.extend(left);
                }
            }
        }
    }

    /// Deep copy of the subtree at `root`, built bottom-up.
    fn clone_link(root: Option<&Self>) -> Link<K>
    where
        K: Clone,
    {
        let mut stack = vec![Duplicate::Subtree(root)];
        let mut copies: Vec<Link<K>> = Vec::new();
        while let Some(next) = stack.pop() {
            match next {
                Duplicate::Subtree(None) => copies.push(None),
                Duplicate::Subtree(Some(node)) => {
                    stack.push(Duplicate::Join(node));
                    stack.push(Duplicate::Subtree(node.right()));
                    stack.push(Duplicate::Subtree(node.left()));
                }
                Duplicate::Join(node) => {
                    let right = copies.pop().flatten();
                    let left = copies.pop().flatten();
                    copies.push(Some(Box::new(Self {
                        key: node.key.clone(),
                        left,
                        right,
                    })));
                }
            }
        }
        copies.pop().flatten()
    }
}

/// Shows the node and the keys of its children, not the whole subtree.
impl<K> fmt::Debug for TreeNode<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("key", &self.key)
            .field("left", &self.left().map(Self::key))
            .field("right", &self.right().map(Self::key))
            .finish()
    }
}

/// A Binary Search Tree of unique keys. This can be used for inserting,
/// searching and deleting keys and for listing them in in-order, pre-order
/// or post-order.
///
/// The tree is never rebalanced: its shape is determined entirely by the order
/// of inserts and deletes.
pub struct OrderedTree<K> {
    root: Link<K>,
    len: usize,
    observer: Option<Box<dyn Observer<K>>>,
}

impl<K> Default for OrderedTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Manual implementation of `Clone` because the observer is not cloneable. The
/// clone starts out without one.
impl<K> Clone for OrderedTree<K>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: TreeNode::clone_link(self.root()),
            len: self.len,
            observer: None,
        }
    }
}

/// Prints the pre-order keys, which pin down the exact shape.
impl<K> fmt::Debug for OrderedTree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pre_order = Vec::with_capacity(self.len);
        TreeNode::walk(self.root(), Traversal::PreOrder, |n| pre_order.push(&n.key));
        f.debug_struct("OrderedTree")
            .field("len", &self.len)
            .field("pre_order", &pre_order)
            .finish()
    }
}

impl<K> Drop for OrderedTree<K> {
    fn drop(&mut self) {
        self.drop_nodes();
    }
}

impl<K> OrderedTree<K> {
    /// Generates a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            observer: None,
        }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of levels in the tree. An empty tree has height 0 and a
    /// single node has height 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = (1..=7).collect();
    /// assert_eq!(tree.height(), 7);
    ///
    /// let tree: OrderedTree<_> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        TreeNode::height(self.root())
    }

    /// A read-only view of the root node, for drawing the current shape.
    pub fn root(&self) -> Option<&TreeNode<K>> {
        self.root.as_deref()
    }

    /// Installs `observer`, replacing any previous one. It will be told about
    /// every successful mutation from now on.
    pub fn set_observer(&mut self, observer: impl Observer<K> + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Removes and returns the installed observer, if any.
    pub fn take_observer(&mut self) -> Option<Box<dyn Observer<K>>> {
        self.observer.take()
    }

    /// Drops every key, resetting the tree to its empty state. The observer,
    /// if any, is kept and told about it.
    #[instrument(level = "trace", skip_all)]
    pub fn clear(&mut self) {
        let dropped = self.len;
        self.drop_nodes();
        debug!(dropped, "cleared tree");
        self.notify(Mutation::Cleared);
    }

    /// Drops all nodes with an explicit stack. A degenerate chain is as deep
    /// as it is long, so the default recursive `Box` drop could overflow.
    fn drop_nodes(&mut self) {
        let mut stack: Vec<Box<TreeNode<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    fn notify(&mut self, mutation: Mutation<'_, K>) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_mutation(&mutation, self.root.as_deref());
        }
    }

    /// Returns the node holding `key`, if any. This is what a presentation
    /// layer highlights after a search. The tree itself does not remember it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// let found = tree.find(&2).unwrap();
    /// assert_eq!(found.left().map(|n| *n.key()), Some(1));
    /// assert_eq!(found.right().map(|n| *n.key()), Some(3));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, key: &K) -> Option<&TreeNode<K>>
    where
        K: Ord,
    {
        TreeNode::find(self.root(), key)
    }

    /// Whether `key` is stored in the tree. Runs in time proportional to the
    /// height of the tree.
    #[instrument(level = "trace", skip_all)]
    pub fn search(&self, key: &K) -> bool
    where
        K: Ord,
    {
        let found = self.find(key).is_some();
        trace!(found, "search");
        found
    }

    /// Inserts `key` as a new leaf. Returns `false` and leaves the tree
    /// untouched when the key is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    ///
    /// assert!(tree.insert(50));
    /// assert!(!tree.insert(50));
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let path = self
            .observer
            .is_some()
            .then(|| TreeNode::path(self.root(), &key));

        let slot = TreeNode::slot(&mut self.root, &key);
        if slot.is_some() {
            trace!(len = self.len, "duplicate key rejected");
            return false;
        }
        *slot = Some(TreeNode::new_boxed(key));
        self.len += 1;
        self.check_invariants();
        trace!(len = self.len, "inserted key");

        if let Some(path) = path {
            self.notify_inserted(&path);
        }
        true
    }

    /// Tells the observer about the node at the end of `path`.
    fn notify_inserted(&mut self, path: &[Ordering]) {
        let inserted = TreeNode::follow(self.root.as_deref(), path);
        if let (Some(observer), Some(inserted)) = (self.observer.as_mut(), inserted) {
            observer.on_mutation(&Mutation::Inserted(&inserted.key), self.root.as_deref());
        }
    }

    /// Deletes `key` from the tree. Returns `false` when it was not present.
    ///
    /// A node with two children takes the key of its in-order successor (the
    /// smallest key of its right subtree), and the successor's node is spliced
    /// out instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = [50, 30, 70, 60, 80].into_iter().collect();
    ///
    /// assert!(tree.delete(&50));
    /// assert!(!tree.delete(&50));
    /// assert_eq!(tree.pre_order(), [60, 30, 70, 80]);
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn delete(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        if !self.search(key) {
            trace!(len = self.len, "key to delete not found");
            return false;
        }

        let slot = TreeNode::slot(&mut self.root, key);
        if let Some(node) = slot.take() {
            *slot = node.unlink();
        }
        self.len -= 1;
        self.check_invariants();
        trace!(len = self.len, "deleted key");

        self.notify(Mutation::Deleted(key));
        true
    }

    /// Lists every key in the given order. The result is a snapshot; later
    /// changes to the tree do not affect it.
    pub fn traverse(&self, order: Traversal) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.len);
        TreeNode::walk(self.root(), order, |n| keys.push(n.key.clone()));
        keys
    }

    /// The keys in ascending order.
    pub fn in_order(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.traverse(Traversal::InOrder)
    }

    /// The keys with every node listed before its subtrees.
    pub fn pre_order(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.traverse(Traversal::PreOrder)
    }

    /// The keys with every node listed after its subtrees.
    pub fn post_order(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.traverse(Traversal::PostOrder)
    }

    /// In tests, after every mutation, assert that the order invariant and the
    /// key count still hold.
    fn check_invariants(&self)
    where
        K: Ord,
    {
        if cfg!(test) {
            assert!(crate::util::is_ordered(self.root()));
            assert_eq!(crate::util::count(self.root()), self.len);
        }
    }
}

impl<K> FromIterator<K> for OrderedTree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Inserts keys in iteration order, skipping duplicates.
impl<K> Extend<K> for OrderedTree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}
