//! An in-memory ordered key store built on an unbalanced Binary Search Tree (BST)
//! that can be rebalanced on demand.
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
//! Searching for keys in the tree takes `O(height)` (where `height` is the longest
//! path from the root `Node` to a leaf `Node`). [`Tree::new`] and
//! [`Tree::rebalance`] build a tree whose height is `floor(lg N)` where `N` is the
//! number of keys, but [`Tree::insert`] and [`Tree::delete`] do not rebalance, so
//! skewed insertions can make the tree degenerate into a list. Use
//! [`Tree::balanced`] to detect this and [`Tree::rebalance`] to fix it.
//!
//! ## Stack usage
//!
//! [`Tree::find`], [`Tree::insert`], [`Tree::depth`] and dropping a [`Tree`] are
//! iterative. Everything else recurses once per level of the tree, so on a
//! degenerate tree of `N` keys it uses `O(N)` stack. Rebalance large skewed trees
//! before traversing them.
//!
//! # Examples
//!
//! ```
//! use bstree::Tree;
//!
//! let mut tree = Tree::new(vec![5, 3, 8, 3, 1]);
//! assert_eq!(tree.inorder(), vec![&1, &3, &5, &8]);
//! assert!(tree.balanced());
//!
//! tree.insert(6);
//! assert!(tree.contains(&6));
//!
//! tree.delete(&5);
//! assert_eq!(tree.inorder(), vec![&1, &3, &6, &8]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
mod traverse;
pub mod tree;

pub use error::{Error, Result};
pub use tree::{Insertion, Node, Tree};
