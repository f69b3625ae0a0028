//! An ordered set of unique keys stored in a Binary Search Tree that is not
//! self-balancing. Construction and [`Tree::rebalance`] produce a tree of minimal
//! height; [`Tree::insert`] and [`Tree::delete`] edit the existing nodes in place
//! and may leave it lopsided.
//!
//! # Examples
//!
//! ```
//! use bstree::{Error, Tree};
//!
//! let mut tree = Tree::new(vec![4, 2, 6]);
//!
//! // Duplicates are reported, not stored.
//! assert!(tree.insert(7).is_new());
//! assert!(!tree.insert(7).is_new());
//! assert_eq!(tree.len(), 4);
//!
//! assert_eq!(tree.depth(&7), Ok(2));
//! assert_eq!(tree.depth(&42), Err(Error::KeyNotFound));
//!
//! // Skew the tree and put it back into shape.
//! for key in 8..12 {
//!     tree.insert(key);
//! }
//! assert!(!tree.balanced());
//!
//! tree.rebalance();
//! assert!(tree.balanced());
//! assert_eq!(tree.height(), Ok(3));
//! ```

use std::cmp::Ordering;
use std::iter::FromIterator;
use std::mem;

use tracing::{debug, trace};

use crate::error::{Error, Result};

type Link<K> = Option<Box<Node<K>>>;

/// A Binary Search Tree holding unique keys. See the [module docs][self] for an
/// overview.
#[derive(Clone, Debug)]
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K> Drop for Tree<K> {
    // Boxes drop recursively, which would overflow the stack on a degenerate tree, so
    // detach every node before it goes out of scope.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<K> Tree<K> {
    /// Builds a tree of minimal height out of the given keys. The keys may come in any
    /// order and may contain duplicates; only one copy of each key is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree = Tree::new(vec![5, 3, 8, 3, 1]);
    ///
    /// assert_eq!(tree.len(), 4);
    /// assert_eq!(tree.inorder(), vec![&1, &3, &5, &8]);
    /// assert_eq!(tree.root().map(|root| *root.key()), Some(3));
    /// ```
    pub fn new<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Ord,
    {
        let mut keys: Vec<K> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        Self::from_sorted(keys)
    }

    /// Builds a tree from keys that are already sorted ascending and unique.
    fn from_sorted(keys: Vec<K>) -> Self {
        let len = keys.len();
        let root = Node::build(len, &mut keys.into_iter());
        let tree = Self { root, len };
        debug!(len, height = ?tree.height().ok(), "built tree");

        tree
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if the tree is not empty.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Finds the node holding the given key. If no node has the key, `None` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree = Tree::new(vec![1, 2, 3]);
    ///
    /// assert_eq!(tree.find(&3).map(|node| node.key()), Some(&3));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right(),
            };
        }

        None
    }

    /// Whether the tree holds the given key.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<&K> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(&node.key)
    }

    /// The largest key in the tree.
    pub fn max(&self) -> Option<&K> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(&node.key)
    }

    /// Inserts the given key as a new leaf. If the tree already holds the key nothing
    /// changes and the stored key is handed back as [`Insertion::Existing`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{Insertion, Tree};
    ///
    /// let mut tree = Tree::default();
    ///
    /// assert_eq!(tree.insert(1), Insertion::Inserted(&1));
    /// assert_eq!(tree.insert(1), Insertion::Existing(&1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> Insertion<'_, K>
    where
        K: Ord,
    {
        let mut link = &mut self.root;
        loop {
            match link {
                None => {
                    self.len += 1;
                    trace!(len = self.len, "inserted key");
                    let node = link.insert(Node::new_boxed(key));
                    return Insertion::Inserted(&node.key);
                }
                Some(node) => match key.cmp(&node.key) {
                    Ordering::Less => link = &mut node.left,
                    Ordering::Equal => {
                        trace!("key already present");
                        return Insertion::Existing(&node.key);
                    }
                    Ordering::Greater => link = &mut node.right,
                },
            }
        }
    }

    /// Deletes the given key from the tree and returns it. If the tree does not contain
    /// the key, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new(1..=7);
    ///
    /// assert_eq!(tree.delete(&4), Some(4));
    /// assert_eq!(tree.delete(&4), None);
    /// assert_eq!(tree.inorder(), vec![&1, &2, &3, &5, &6, &7]);
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<K>
    where
        K: Ord,
    {
        let (root, deleted) = Node::delete(self.root.take(), key);
        self.root = root;
        if deleted.is_some() {
            self.len -= 1;
        }

        deleted
    }

    /// The height of the tree: the number of edges on the longest path from the root
    /// down to a leaf. A tree with a single key has height 0.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if there are no nodes to measure.
    pub fn height(&self) -> Result<usize> {
        self.root().map(Node::height).ok_or(Error::EmptyTree)
    }

    /// The number of edges between the root and the node holding `key`. The root has
    /// depth 0.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the tree is empty and [`Error::KeyNotFound`] if no node
    /// holds `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{Error, Tree};
    ///
    /// let tree = Tree::new(1..=7);
    ///
    /// assert_eq!(tree.depth(&4), Ok(0));
    /// assert_eq!(tree.depth(&7), Ok(2));
    /// assert_eq!(tree.depth(&8), Err(Error::KeyNotFound));
    /// assert_eq!(Tree::<i32>::default().depth(&1), Err(Error::EmptyTree));
    /// ```
    pub fn depth(&self, key: &K) -> Result<usize>
    where
        K: Ord,
    {
        let mut node = self.root().ok_or(Error::EmptyTree)?;
        let mut depth = 0;
        loop {
            let next = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Ok(depth),
                Ordering::Greater => node.right(),
            };
            node = next.ok_or(Error::KeyNotFound)?;
            depth += 1;
        }
    }

    /// Whether, for every node, the heights of its two subtrees differ by at most one.
    /// An empty tree is balanced.
    pub fn balanced(&self) -> bool {
        balanced_height(self.root()).is_some()
    }

    /// Rebuilds the tree with minimal height, keeping the same keys. Every existing node
    /// is discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::default();
    /// for key in 0..15 {
    ///     tree.insert(key);
    /// }
    /// assert_eq!(tree.height(), Ok(14));
    ///
    /// tree.rebalance();
    /// assert_eq!(tree.height(), Ok(3));
    /// assert!(tree.balanced());
    /// ```
    pub fn rebalance(&mut self) {
        let mut keys = Vec::with_capacity(self.len);
        Node::drain_inorder(self.root.take(), &mut keys);
        debug!(len = keys.len(), "rebalancing tree");
        *self = Self::from_sorted(keys);
    }
}

/// What [`Tree::insert`] did with a key.
#[derive(Debug, PartialEq, Eq)]
pub enum Insertion<'a, K> {
    /// The key was new and now lives in a fresh leaf.
    Inserted(&'a K),
    /// An equal key was already stored. This is that stored key.
    Existing(&'a K),
}

// Manual implementations so that `Insertion` is `Copy` even when `K` isn't.
impl<'a, K> Clone for Insertion<'a, K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, K> Copy for Insertion<'a, K> {}

impl<'a, K> Insertion<'a, K> {
    /// The key stored in the tree, whether or not it was just inserted.
    pub fn key(self) -> &'a K {
        match self {
            Self::Inserted(key) | Self::Existing(key) => key,
        }
    }

    /// Whether the tree gained a node.
    pub fn is_new(self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

/// A `Node` has a key that is used for searching/sorting and up to two children.
#[derive(Clone, Debug)]
pub struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
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

    /// The root of this node's left subtree. All of its keys are smaller than
    /// [`Node::key`].
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of this node's right subtree. All of its keys are larger than
    /// [`Node::key`].
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// How many edges are on the longest path from this node down to a leaf in its
    /// subtree. A leaf has a height of 0.
    pub fn height(&self) -> usize {
        // Never negative for an existing node.
        subtree_height(Some(self)) as usize
    }

    /// Builds a subtree of minimal height out of the next `len` keys of `keys`, which
    /// must be sorted ascending. The key at the floor midpoint becomes the subtree root
    /// and the keys on either side of it become its children, built the same way.
    fn build<I>(len: usize, keys: &mut I) -> Link<K>
    where
        I: Iterator<Item = K>,
    {
        if len == 0 {
            return None;
        }

        let mid = (len - 1) / 2;
        let left = Self::build(mid, keys);
        let key = keys.next()?;
        let right = Self::build(len - mid - 1, keys);

        Some(Box::new(Self { key, left, right }))
    }

    /// Deletes `key` from the subtree rooted at `link`. Returns the new subtree root
    /// along with the deleted key, if it was found.
    fn delete(link: Link<K>, key: &K) -> (Link<K>, Option<K>)
    where
        K: Ord,
    {
        let Some(mut node) = link else {
            trace!("key to delete not found");
            return (None, None);
        };

        match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, deleted) = Self::delete(node.left.take(), key);
                node.left = left;
                (Some(node), deleted)
            }
            Ordering::Greater => {
                let (right, deleted) = Self::delete(node.right.take(), key);
                node.right = right;
                (Some(node), deleted)
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                // Also covers leaves, which are replaced by nothing.
                (None, right) => {
                    trace!("deleted node without left child");
                    (right, Some(node.key))
                }
                (left @ Some(_), None) => {
                    trace!("deleted node without right child");
                    (left, Some(node.key))
                }
                // With two children the node stays put and takes over the key of its
                // in-order successor, whose own node is removed instead.
                (Some(left), Some(right)) => {
                    let (successor, right) = right.take_min();
                    let deleted = mem::replace(&mut node.key, successor);
                    node.left = Some(left);
                    node.right = right;

                    if cfg!(debug_assertions) {
                        if let Some(left) = node.left() {
                            assert!(left.key < node.key);
                        }
                        if let Some(right) = node.right() {
                            assert!(node.key < right.key);
                        }
                    }

                    trace!("deleted node with two children");
                    (Some(node), Some(deleted))
                }
            },
        }
    }

    /// Removes the smallest node of this subtree by recursing to the left until there is
    /// no left child. Returns its key and what is left of the subtree.
    fn take_min(mut self: Box<Self>) -> (K, Link<K>) {
        match self.left.take() {
            Some(left) => {
                let (min, left) = left.take_min();
                self.left = left;
                (min, Some(self))
            }
            None => {
                let Self { key, right, .. } = *self;
                (key, right)
            }
        }
    }

    /// Moves every key of the subtree rooted at `link` into `keys`, in ascending order.
    /// Iterative so that flattening a degenerate tree can't overflow the stack.
    fn drain_inorder(link: Link<K>, keys: &mut Vec<K>) {
        let mut stack = Vec::new();
        let mut current = link;
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                stack.push(node);
            }

            match stack.pop() {
                Some(node) => {
                    let Self { key, right, .. } = *node;
                    keys.push(key);
                    current = right;
                }
                None => break,
            }
        }
    }
}

/// The height of a possibly absent subtree. An absent subtree has a height of -1 so
/// that a leaf ends up with a height of 0.
fn subtree_height<K>(node: Option<&Node<K>>) -> isize {
    node.map_or(-1, |node| {
        1 + subtree_height(node.left()).max(subtree_height(node.right()))
    })
}

/// Returns the height of the subtree if it, and every subtree below it, is balanced.
fn balanced_height<K>(node: Option<&Node<K>>) -> Option<isize> {
    let Some(node) = node else {
        return Some(-1);
    };

    let left = balanced_height(node.left())?;
    let right = balanced_height(node.right())?;
    if (left - right).abs() > 1 {
        return None;
    }

    Some(1 + left.max(right))
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::tests::is_search_tree;
    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we have the same set of keys in both.
    fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, set: &mut BTreeSet<K>)
    where
        K: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    assert_eq!(bst.insert(k.clone()).is_new(), set.insert(k.clone()));
                }
                Op::Delete(k) => {
                    assert_eq!(bst.delete(k), set.take(k));
                }
                Op::Rebalance => {
                    bst.rebalance();
                    assert!(bst.balanced());
                }
            }
        }
    }

    /// `floor(log2(n))` for a positive `n`.
    fn floor_log2(n: usize) -> usize {
        (usize::BITS - 1 - n.leading_zeros()) as usize
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::default();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            is_search_tree(tree.root(), None, None)
                && tree.len() == set.len()
                && tree.inorder().into_iter().eq(set.iter())
        }
    }

    quickcheck::quickcheck! {
        fn rebalance_is_minimal(xs: Vec<i16>) -> bool {
            let mut tree = Tree::default();
            for x in &xs {
                tree.insert(*x);
            }
            tree.rebalance();

            match tree.height() {
                Ok(height) => tree.balanced() && height == floor_log2(tree.len()),
                Err(_) => xs.is_empty(),
            }
        }
    }

    quickcheck::quickcheck! {
        fn depth_matches_path_length(xs: Vec<i8>) -> bool {
            let mut tree = Tree::default();
            for x in &xs {
                tree.insert(*x);
            }

            xs.iter().all(|x| {
                let depth = tree.depth(x).unwrap();
                let mut node = tree.root().unwrap();
                for _ in 0..depth {
                    node = (if x < node.key() { node.left() } else { node.right() }).unwrap();
                }
                node.key() == x
            })
        }
    }
}
