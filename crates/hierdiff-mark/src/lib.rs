//! Hierarchy documents and the mark pass for hierdiff.
//!
//! Loads two JSON hierarchy documents, turns them into key-labeled trees,
//! diffs them, and appends a suffix to the names of the objects that were
//! deleted from the base or added in the target.
//!
//! # Key Types
//!
//! - [`HierarchyObject`] — One object of a hierarchy document
//! - [`MarkConfig`] / [`ExtractSide`] — Which side to mark and with what
//! - [`Marker`] / [`MarkOutcome`] — The diff-and-mark workflow
//! - [`Markable`] — Payloads that can carry a suffix

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod mark;

pub use config::{ExtractSide, MarkConfig, TreeLimits};
pub use error::{MarkError, MarkResult};
pub use hierarchy::{from_tree, to_tree, HierarchyObject, ObjectData};
pub use mark::{mark_tree, MarkOutcome, Markable, Marker};
