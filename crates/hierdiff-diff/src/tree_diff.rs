//! Tree-level diff: compare two labeled trees and produce edit records.
//!
//! Nodes are matched by key, level by level. Every paired node yields a
//! [`EditKind::Change`] record whether or not its payload differs, since
//! payloads are opaque here. Unpaired subtrees yield one `Insert` or
//! `Delete` record per node. Records come out in pre-order.

use serde::{Deserialize, Serialize};

use hierdiff_types::{EditKind, Node, Record, TreePath};

use crate::error::{DiffError, DiffResult};
use crate::pairing::{pair_children, Pair};

/// The result of comparing two trees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeDiff<T> {
    /// Records in pre-order.
    pub records: Vec<Record<T>>,
}

impl<T> Default for TreeDiff<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T> TreeDiff<T> {
    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Number of records of the given kind.
    pub fn count(&self, kind: EditKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }

    pub fn insertions(&self) -> usize {
        self.count(EditKind::Insert)
    }

    pub fn deletions(&self) -> usize {
        self.count(EditKind::Delete)
    }

    pub fn changes(&self) -> usize {
        self.count(EditKind::Change)
    }

    /// Records of one kind, in their original order.
    pub fn of_kind(&self, kind: EditKind) -> impl Iterator<Item = &Record<T>> {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record<T>> {
        self.records.iter()
    }
}

impl<T> From<Vec<Record<T>>> for TreeDiff<T> {
    fn from(records: Vec<Record<T>>) -> Self {
        Self { records }
    }
}

impl<T> IntoIterator for TreeDiff<T> {
    type Item = Record<T>;
    type IntoIter = std::vec::IntoIter<Record<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a TreeDiff<T> {
    type Item = &'a Record<T>;
    type IntoIter = std::slice::Iter<'a, Record<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Compare two optional subtrees below `prefix`.
///
/// - `base` absent: the whole of `target` is reported as inserted.
/// - `target` absent: the whole of `base` is reported as deleted.
/// - both present: a `Change` for `base`'s key, then the children are
///   paired by key and compared in turn.
///
/// Fails with [`DiffError::InvariantViolation`] when both sides are absent.
pub fn compare<T: Clone>(
    base: Option<&Node<T>>,
    target: Option<&Node<T>>,
    prefix: &TreePath,
) -> DiffResult<Vec<Record<T>>> {
    let pair = Pair::from_options(base, target).ok_or(DiffError::InvariantViolation(
        "at least one node must be present",
    ))?;
    Ok(compare_pair(pair, prefix))
}

/// Compare two present trees from their roots.
///
/// The roots are always treated as paired, even when their keys differ,
/// so the first record is a `Change` for the base root.
pub fn diff_trees<T: Clone>(base: &Node<T>, target: &Node<T>) -> TreeDiff<T> {
    tracing::debug!(
        base = %base.key,
        target = %target.key,
        base_nodes = base.size(),
        target_nodes = target.size(),
        "diffing trees"
    );

    let diff = TreeDiff::from(compare_pair(Pair::Both(base, target), &TreePath::root()));

    tracing::debug!(
        records = diff.len(),
        insertions = diff.insertions(),
        deletions = diff.deletions(),
        changes = diff.changes(),
        "diff complete"
    );
    diff
}

/// Report every node of `target` as inserted.
pub fn inserted<T: Clone>(target: &Node<T>) -> TreeDiff<T> {
    TreeDiff::from(compare_pair(Pair::Target(target), &TreePath::root()))
}

/// Report every node of `base` as deleted.
pub fn deleted<T: Clone>(base: &Node<T>) -> TreeDiff<T> {
    TreeDiff::from(compare_pair(Pair::Base(base), &TreePath::root()))
}

fn compare_pair<T: Clone>(pair: Pair<'_, T>, prefix: &TreePath) -> Vec<Record<T>> {
    match pair {
        Pair::Target(b) => {
            let path = prefix.child(b.key.as_str());
            let mut records = vec![Record::insert(path.clone(), b.value.clone())];
            for child in &b.children {
                records.extend(compare_pair(Pair::Target(child), &path));
            }
            records
        }
        Pair::Base(a) => {
            let path = prefix.child(a.key.as_str());
            let mut records = vec![Record::delete(path.clone(), a.value.clone())];
            for child in &a.children {
                records.extend(compare_pair(Pair::Base(child), &path));
            }
            records
        }
        Pair::Both(a, b) => {
            let path = prefix.child(a.key.as_str());
            let mut records = vec![Record::change(path.clone(), a.value.clone())];
            for child_pair in pair_children(&a.children, &b.children) {
                records.extend(compare_pair(child_pair, &path));
            }
            records
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn leaf(key: &str) -> Node<String> {
        Node::new(key, key.to_uppercase())
    }

    fn branch(key: &str, children: Vec<Node<String>>) -> Node<String> {
        leaf(key).with_children(children)
    }

    fn summaries<T>(records: &[Record<T>]) -> Vec<String> {
        records.iter().map(Record::summary).collect()
    }

    #[test]
    fn both_absent_is_an_invariant_violation() {
        let result = compare::<()>(None, None, &TreePath::root());
        assert_eq!(
            result,
            Err(DiffError::InvariantViolation("at least one node must be present"))
        );
    }

    #[test]
    fn end_to_end_sibling_changes() {
        let base = branch("root", vec![leaf("foo"), leaf("bar")]);
        let target = branch("root", vec![leaf("foo"), leaf("baz")]);

        let records = compare(Some(&base), Some(&target), &TreePath::root()).unwrap();
        assert_eq!(
            summaries(&records),
            vec!["~ root", "~ root/foo", "- root/bar", "+ root/baz"]
        );
    }

    #[test]
    fn change_records_carry_base_value() {
        let base = Node::new("root", 1).with_children(vec![Node::new("a", 10)]);
        let target = Node::new("root", 2).with_children(vec![Node::new("a", 20)]);

        let diff = diff_trees(&base, &target);
        let values: Vec<i32> = diff.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![1, 10]);
        assert_eq!(diff.changes(), 2);
    }

    #[test]
    fn insert_and_delete_values_come_from_their_side() {
        let base = Node::new("root", 0).with_children(vec![Node::new("gone", 1)]);
        let target = Node::new("root", 0).with_children(vec![Node::new("new", 2)]);

        let diff = diff_trees(&base, &target);
        let deleted: Vec<i32> = diff.of_kind(EditKind::Delete).map(|r| r.value).collect();
        let inserted: Vec<i32> = diff.of_kind(EditKind::Insert).map(|r| r.value).collect();
        assert_eq!(deleted, vec![1]);
        assert_eq!(inserted, vec![2]);
    }

    #[test]
    fn inserted_subtree_is_preorder() {
        let target = branch(
            "root",
            vec![branch("a", vec![leaf("a1"), leaf("a2")]), leaf("b")],
        );

        let records = compare(None, Some(&target), &TreePath::root()).unwrap();
        assert_eq!(
            summaries(&records),
            vec!["+ root", "+ root/a", "+ root/a/a1", "+ root/a/a2", "+ root/b"]
        );
        assert_eq!(inserted(&target).records, records);
    }

    #[test]
    fn deleted_subtree_is_preorder() {
        let base = branch("root", vec![branch("a", vec![leaf("a1")]), leaf("b")]);

        let records = compare(Some(&base), None, &TreePath::root()).unwrap();
        assert_eq!(
            summaries(&records),
            vec!["- root", "- root/a", "- root/a/a1", "- root/b"]
        );
        assert_eq!(deleted(&base).records, records);
    }

    #[test]
    fn prefix_is_prepended() {
        let prefix: TreePath = ["scene", "level"].into_iter().collect();
        let records = compare(None, Some(&leaf("enemy")), &prefix).unwrap();
        assert_eq!(records[0].path.to_string(), "scene/level/enemy");
    }

    #[test]
    fn nested_insert_below_paired_node() {
        let base = branch("root", vec![branch("a", vec![])]);
        let target = branch("root", vec![branch("a", vec![branch("x", vec![leaf("y")])])]);

        let diff = diff_trees(&base, &target);
        assert_eq!(
            summaries(&diff.records),
            vec!["~ root", "~ root/a", "+ root/a/x", "+ root/a/x/y"]
        );
    }

    #[test]
    fn disjoint_roots_paired_by_caller() {
        let base = branch("left", vec![leaf("a")]);
        let target = branch("right", vec![leaf("b")]);

        let diff = diff_trees(&base, &target);
        assert_eq!(
            summaries(&diff.records),
            vec!["~ left", "- left/a", "+ left/b"]
        );
    }

    #[test]
    fn disjoint_roots_as_one_sided_calls() {
        let base = branch("left", vec![leaf("a")]);
        let target = branch("right", vec![leaf("b")]);

        let deletions = compare(Some(&base), None, &TreePath::root()).unwrap();
        let insertions = compare(None, Some(&target), &TreePath::root()).unwrap();
        assert!(deletions.iter().all(|r| r.kind == EditKind::Delete));
        assert!(insertions.iter().all(|r| r.kind == EditKind::Insert));
        assert_eq!(deletions.len(), 2);
        assert_eq!(insertions.len(), 2);
    }

    #[test]
    fn duplicate_sibling_key_reports_spurious_delete() {
        let base = branch("root", vec![leaf("x"), leaf("x")]);
        let target = branch("root", vec![leaf("x")]);

        let diff = diff_trees(&base, &target);
        assert_eq!(
            summaries(&diff.records),
            vec!["~ root", "~ root/x", "- root/x"]
        );
    }

    #[test]
    fn duplicate_sibling_key_on_target_reports_spurious_insert() {
        let base = branch("root", vec![leaf("x")]);
        let target = branch("root", vec![leaf("x"), leaf("x")]);

        let diff = diff_trees(&base, &target);
        assert_eq!(
            summaries(&diff.records),
            vec!["~ root", "~ root/x", "+ root/x"]
        );
    }

    #[test]
    fn reordered_children_follow_base_order() {
        let base = branch("root", vec![leaf("a"), leaf("b"), leaf("c")]);
        let target = branch("root", vec![leaf("c"), leaf("d"), leaf("a")]);

        let diff = diff_trees(&base, &target);
        assert_eq!(
            summaries(&diff.records),
            vec!["~ root", "~ root/a", "- root/b", "~ root/c", "+ root/d"]
        );
        assert_eq!(diff.insertions(), 1);
        assert_eq!(diff.deletions(), 1);
        assert_eq!(diff.changes(), 3);
    }

    #[test]
    fn tree_diff_serializes_as_array() {
        let diff = inserted(&Node::new("r", 1u8));
        let json = serde_json::to_string(&diff).unwrap();
        assert_eq!(json, r#"[{"kind":"insert","path":["r"],"value":1}]"#);
    }

    /// Trees with unique sibling keys, up to four levels deep.
    fn arb_tree() -> impl Strategy<Value = Node<u32>> {
        let leaf = ("[a-e]", any::<u32>()).prop_map(|(k, v)| Node::new(k, v));
        leaf.prop_recursive(4, 48, 5, |inner| {
            ("[a-e]", any::<u32>(), prop::collection::vec(inner, 0..5)).prop_map(
                |(k, v, children)| {
                    let children = children
                        .into_iter()
                        .enumerate()
                        .map(|(i, mut child)| {
                            child.key = format!("{}{}", child.key, i);
                            child
                        })
                        .collect();
                    Node::new(k, v).with_children(children)
                },
            )
        })
    }

    proptest! {
        #[test]
        fn prop_compare_is_deterministic(a in arb_tree(), b in arb_tree()) {
            let first = compare(Some(&a), Some(&b), &TreePath::root()).unwrap();
            let second = compare(Some(&a), Some(&b), &TreePath::root()).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_self_compare_is_all_changes_in_preorder(a in arb_tree()) {
            let copy = a.clone();
            let diff = diff_trees(&a, &copy);
            prop_assert_eq!(diff.len(), a.size());
            prop_assert_eq!(diff.changes(), a.size());

            let walked: Vec<TreePath> = a.walk().map(|(path, _)| path).collect();
            let paths: Vec<TreePath> = diff.iter().map(|r| r.path.clone()).collect();
            prop_assert_eq!(paths, walked);
        }

        #[test]
        fn prop_one_sided_counts_every_node(a in arb_tree()) {
            let inserts = compare(None, Some(&a), &TreePath::root()).unwrap();
            let deletes = compare(Some(&a), None, &TreePath::root()).unwrap();
            prop_assert_eq!(inserts.len(), a.size());
            prop_assert_eq!(deletes.len(), a.size());
            prop_assert!(inserts.iter().all(|r| r.kind == EditKind::Insert));
            prop_assert!(deletes.iter().all(|r| r.kind == EditKind::Delete));
        }

        #[test]
        fn prop_paths_resolve_to_their_node(a in arb_tree(), b in arb_tree()) {
            let diff = diff_trees(&a, &b);
            for record in &diff {
                let rest = record.path.without_root();
                let node = match record.kind {
                    EditKind::Insert => b.get(rest),
                    EditKind::Delete | EditKind::Change => a.get(rest),
                };
                prop_assert!(node.is_some(), "unresolved path {}", record.path);
                let node = node.unwrap();
                prop_assert_eq!(node.value, record.value);
                prop_assert_eq!(record.path.last(), Some(node.key.as_str()));
            }
        }

        #[test]
        fn prop_every_node_is_accounted_for(a in arb_tree(), b in arb_tree()) {
            let diff = diff_trees(&a, &b);
            // Base nodes appear as Change or Delete; target nodes as Change or
            // Insert. Roots are always paired.
            prop_assert_eq!(diff.changes() + diff.deletions(), a.size());
            prop_assert_eq!(diff.changes() + diff.insertions(), b.size());
        }
    }
}
