//! The five traversal orders of a [`Tree`]. Every order comes as a pair: a method
//! that collects the keys in order and a `visit_*` method that hands each node to a
//! callback instead.

use std::collections::VecDeque;

use crate::tree::{Node, Tree};

impl<K> Tree<K> {
    /// Keys level by level from the root down, left to right within a level, using a
    /// queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree = Tree::new(1..=7);
    ///
    /// assert_eq!(tree.level_order_iterative(), vec![&4, &2, &6, &1, &3, &5, &7]);
    /// ```
    pub fn level_order_iterative(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len());
        self.visit_level_order_iterative(|node| keys.push(node.key()));
        keys
    }

    /// Keys in the same order as [`Tree::level_order_iterative`], computed by recursing
    /// once per level of the tree.
    pub fn level_order_recursive(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len());
        self.visit_level_order_recursive(|node| keys.push(node.key()));
        keys
    }

    /// Keys with every node before its left subtree, and the left subtree before the
    /// right one.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree = Tree::new(1..=7);
    ///
    /// assert_eq!(tree.preorder(), vec![&4, &2, &1, &3, &6, &5, &7]);
    /// ```
    pub fn preorder(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len());
        self.visit_preorder(|node| keys.push(node.key()));
        keys
    }

    /// Keys in ascending order.
    pub fn inorder(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len());
        self.visit_inorder(|node| keys.push(node.key()));
        keys
    }

    /// Keys with both subtrees of a node, left first, before the node itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree = Tree::new(1..=7);
    ///
    /// assert_eq!(tree.postorder(), vec![&1, &3, &2, &5, &7, &6, &4]);
    /// ```
    pub fn postorder(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len());
        self.visit_postorder(|node| keys.push(node.key()));
        keys
    }

    /// Calls `visit` on every node in the order of [`Tree::level_order_iterative`].
    pub fn visit_level_order_iterative<'a>(&'a self, mut visit: impl FnMut(&'a Node<K>)) {
        level_order_iterative(self.root(), &mut visit);
    }

    /// Calls `visit` on every node in the order of [`Tree::level_order_recursive`].
    pub fn visit_level_order_recursive<'a>(&'a self, mut visit: impl FnMut(&'a Node<K>)) {
        level_order_recursive(self.root().into_iter().collect(), &mut visit);
    }

    /// Calls `visit` on every node in the order of [`Tree::preorder`].
    pub fn visit_preorder<'a>(&'a self, mut visit: impl FnMut(&'a Node<K>)) {
        preorder(self.root(), &mut visit);
    }

    /// Calls `visit` on every node in the order of [`Tree::inorder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree = Tree::new(vec![3, 1, 2]);
    /// let mut leaves = Vec::new();
    /// tree.visit_inorder(|node| {
    ///     if node.is_leaf() {
    ///         leaves.push(*node.key());
    ///     }
    /// });
    ///
    /// assert_eq!(leaves, vec![1, 3]);
    /// ```
    pub fn visit_inorder<'a>(&'a self, mut visit: impl FnMut(&'a Node<K>)) {
        inorder(self.root(), &mut visit);
    }

    /// Calls `visit` on every node in the order of [`Tree::postorder`].
    pub fn visit_postorder<'a>(&'a self, mut visit: impl FnMut(&'a Node<K>)) {
        postorder(self.root(), &mut visit);
    }
}

fn level_order_iterative<'a, K, F>(root: Option<&'a Node<K>>, visit: &mut F)
where
    F: FnMut(&'a Node<K>),
{
    let mut queue: VecDeque<_> = root.into_iter().collect();
    while let Some(node) = queue.pop_front() {
        visit(node);
        queue.extend(node.left());
        queue.extend(node.right());
    }
}

/// Drains the queue holding one level of the tree while filling the queue for the next
/// level, then recurses on that one. Stops at the first empty level.
fn level_order_recursive<'a, K, F>(mut level: VecDeque<&'a Node<K>>, visit: &mut F)
where
    F: FnMut(&'a Node<K>),
{
    if level.is_empty() {
        return;
    }

    let mut next = VecDeque::with_capacity(level.len() * 2);
    while let Some(node) = level.pop_front() {
        visit(node);
        next.extend(node.left());
        next.extend(node.right());
    }

    level_order_recursive(next, visit);
}

fn preorder<'a, K, F>(node: Option<&'a Node<K>>, visit: &mut F)
where
    F: FnMut(&'a Node<K>),
{
    if let Some(node) = node {
        visit(node);
        preorder(node.left(), visit);
        preorder(node.right(), visit);
    }
}

fn inorder<'a, K, F>(node: Option<&'a Node<K>>, visit: &mut F)
where
    F: FnMut(&'a Node<K>),
{
    if let Some(node) = node {
        inorder(node.left(), visit);
        visit(node);
        inorder(node.right(), visit);
    }
}

fn postorder<'a, K, F>(node: Option<&'a Node<K>>, visit: &mut F)
where
    F: FnMut(&'a Node<K>),
{
    if let Some(node) = node {
        postorder(node.left(), visit);
        postorder(node.right(), visit);
        visit(node);
    }
}
