//! Errors returned by fallible [`Tree`][crate::Tree] queries.

use thiserror::Error;

/// Failures of queries that need a node to measure from.
///
/// Mutations never fail: inserting a duplicate and deleting a missing key are
/// both ordinary outcomes, reported through their return values.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested key is not stored in the tree.
    #[error("key not found in tree")]
    KeyNotFound,
    /// The operation needs a root but the tree is empty.
    #[error("tree is empty")]
    EmptyTree,
}

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
