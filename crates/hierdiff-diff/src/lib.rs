//! Diff engine for hierdiff.
//!
//! Compares two key-labeled trees and produces an ordered list of edit
//! records: subtrees that were inserted, deleted, or paired across both
//! trees. Children are matched by key within each parent.
//!
//! # Key Types
//!
//! - [`compare`] -- Comparison of two optional subtrees below a path prefix
//! - [`TreeDiff`] -- Ordered record set returned by [`diff_trees`]
//! - [`Pair`] / [`pair_children`] -- Per-level sibling matching

pub mod error;
pub mod pairing;
pub mod tree_diff;

pub use error::{DiffError, DiffResult};
pub use pairing::{pair_children, Pair};
pub use tree_diff::{compare, deleted, diff_trees, inserted, TreeDiff};
