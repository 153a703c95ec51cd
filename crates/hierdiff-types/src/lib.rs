//! Foundation types for hierdiff.
//!
//! This crate provides the value types shared by the comparator and its
//! collaborators. Every other hierdiff crate depends on `hierdiff-types`.
//!
//! # Key Types
//!
//! - [`Node`] — One position in a key-labeled tree with an opaque payload
//! - [`TreePath`] — Ordered keys from the root to a node, inclusive
//! - [`Record`] — A single emitted diff entry
//! - [`EditKind`] — Insert, delete, or paired change

pub mod error;
pub mod node;
pub mod path;
pub mod record;

pub use error::TypeError;
pub use node::{Node, Walk};
pub use path::TreePath;
pub use record::{EditKind, Record};
