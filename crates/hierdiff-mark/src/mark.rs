//! The mark pass: tag deleted or inserted objects by renaming them.
//!
//! Records are matched to nodes by path with the root segment dropped on
//! both sides, so two hierarchies whose roots carry different names still
//! line up.

use std::collections::HashSet;

use hierdiff_diff::{diff_trees, TreeDiff};
use hierdiff_types::{EditKind, Node, Record};

use crate::config::{ExtractSide, MarkConfig};
use crate::error::MarkResult;
use crate::hierarchy::{from_tree, to_tree, HierarchyObject, ObjectData};

/// A payload that can carry a visible mark.
pub trait Markable {
    fn append_suffix(&mut self, suffix: &str);
}

impl Markable for String {
    fn append_suffix(&mut self, suffix: &str) {
        self.push_str(suffix);
    }
}

impl Markable for ObjectData {
    fn append_suffix(&mut self, suffix: &str) {
        self.name.push_str(suffix);
    }
}

/// Append `suffix` to every node of `tree` addressed by a record of `kind`.
///
/// A node is marked at most once, however many records address it.
/// Returns the number of marked nodes.
pub fn mark_tree<T: Markable, U>(
    tree: &mut Node<T>,
    records: &[Record<U>],
    kind: EditKind,
    suffix: &str,
) -> usize {
    let targets: HashSet<&[String]> = records
        .iter()
        .filter(|r| r.kind == kind)
        .map(|r| r.path.without_root())
        .collect();
    if targets.is_empty() {
        return 0;
    }

    let mut rest = Vec::new();
    let mut marked = 0;
    mark_node(tree, &mut rest, &targets, suffix, &mut marked);
    marked
}

fn mark_node<T: Markable>(
    node: &mut Node<T>,
    rest: &mut Vec<String>,
    targets: &HashSet<&[String]>,
    suffix: &str,
    marked: &mut usize,
) {
    if targets.contains(rest.as_slice()) {
        node.value.append_suffix(suffix);
        *marked += 1;
    }
    for child in &mut node.children {
        rest.push(child.key.clone());
        mark_node(child, rest, targets, suffix, marked);
        rest.pop();
    }
}

/// Result of a [`Marker::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct MarkOutcome {
    pub side: ExtractSide,
    /// The marked hierarchy of the chosen side.
    pub document: HierarchyObject,
    /// Number of objects that received the suffix.
    pub marked: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub changes: usize,
}

/// Runs the full diff-and-mark workflow for two hierarchy documents.
#[derive(Clone, Debug)]
pub struct Marker {
    config: MarkConfig,
}

impl Marker {
    /// Create a marker. The configuration is validated up front.
    pub fn new(config: MarkConfig) -> MarkResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MarkConfig {
        &self.config
    }

    /// Diff `base` against `target` and mark the configured side.
    pub fn run(&self, base: &HierarchyObject, target: &HierarchyObject) -> MarkResult<MarkOutcome> {
        let limits = &self.config.limits;
        let base_tree = to_tree(base, limits)?;
        let target_tree = to_tree(target, limits)?;

        let diff: TreeDiff<ObjectData> = diff_trees(&base_tree, &target_tree);

        let side = self.config.side;
        let kind = side.kind();
        let mut tree = match side {
            ExtractSide::Base => base_tree,
            ExtractSide::Target => target_tree,
        };

        let marked = if diff.count(kind) == 0 {
            tracing::warn!(%side, "no diffs found");
            0
        } else {
            tracing::info!(%side, suffix = %self.config.suffix(), "extracting diffs");
            mark_tree(&mut tree, &diff.records, kind, self.config.suffix())
        };

        Ok(MarkOutcome {
            side,
            document: from_tree(tree),
            marked,
            insertions: diff.insertions(),
            deletions: diff.deletions(),
            changes: diff.changes(),
        })
    }
}
