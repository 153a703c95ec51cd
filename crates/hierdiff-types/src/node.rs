//! Key-labeled tree nodes.
//!
//! A [`Node`] is one position in an ordered tree. Its `key` identifies it
//! among its siblings, its `value` is an opaque payload, and its `children`
//! are kept in a caller-determined order. Trees are plain owned values: no
//! sharing, no parent pointers, no cycles.

use serde::{Deserialize, Serialize};

use crate::path::TreePath;

/// One position in a labeled tree.
///
/// Keys are expected to be unique among the children of a single parent.
/// Nothing enforces this, but comparisons only match the first occurrence
/// of a repeated key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node<T> {
    /// Label identifying this node among its siblings.
    pub key: String,
    /// Opaque payload carried through to diff records.
    pub value: T,
    /// Direct descendants, in order.
    #[serde(default = "Vec::new")]
    pub children: Vec<Node<T>>,
}

impl<T> Node<T> {
    /// Create a leaf node.
    pub fn new(key: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            value,
            children: Vec::new(),
        }
    }

    /// Replace the children of this node, builder style.
    pub fn with_children(mut self, children: Vec<Node<T>>) -> Self {
        self.children = children;
        self
    }

    /// Append a child after the existing ones.
    pub fn push_child(&mut self, child: Node<T>) {
        self.children.push(child);
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }

    /// Number of levels in this subtree. A leaf has height 1.
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(Node::height).max().unwrap_or(0)
    }

    /// Find the first child with the given key.
    pub fn child(&self, key: &str) -> Option<&Node<T>> {
        self.children.iter().find(|c| c.key == key)
    }

    /// Resolve a path below this node.
    ///
    /// `rest` excludes this node's own key; an empty slice resolves to
    /// `self`. Each step follows the first child with a matching key.
    pub fn get(&self, rest: &[String]) -> Option<&Node<T>> {
        rest.iter().try_fold(self, |node, key| node.child(key))
    }

    /// Pre-order iterator over this subtree, paired with each node's path.
    ///
    /// The path of `self` is its own key alone.
    pub fn walk(&self) -> Walk<'_, T> {
        Walk {
            stack: vec![(TreePath::root().child(self.key.as_str()), self)],
        }
    }

    /// Transform every payload, keeping keys and shape.
    pub fn map<U, F>(self, mut f: F) -> Node<U>
    where
        F: FnMut(T) -> U,
    {
        self.map_with(&mut f)
    }

    fn map_with<U, F>(self, f: &mut F) -> Node<U>
    where
        F: FnMut(T) -> U,
    {
        let value = f(self.value);
        let children = self
            .children
            .into_iter()
            .map(|child| child.map_with(f))
            .collect();
        Node {
            key: self.key,
            value,
            children,
        }
    }
}

/// Pre-order traversal returned by [`Node::walk`].
pub struct Walk<'a, T> {
    stack: Vec<(TreePath, &'a Node<T>)>,
}

impl<'a, T> Iterator for Walk<'a, T> {
    type Item = (TreePath, &'a Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        // Reversed so the first child is popped next.
        for child in node.children.iter().rev() {
            self.stack.push((path.child(child.key.as_str()), child));
        }
        Some((path, node))
    }
}
