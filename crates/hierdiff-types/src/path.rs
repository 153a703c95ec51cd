//! Key paths from a tree root to one of its nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered sequence of keys from the root of a tree to a node, inclusive.
///
/// The first segment is always the root's own key and the last segment is
/// the node's key, so a path of length `n` addresses a node at depth `n - 1`.
/// The empty path is only used as the starting prefix of a comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreePath(Vec<String>);

impl TreePath {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Return a new path extended by one key. `self` is left untouched.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(key.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The segments after the root key.
    ///
    /// Two trees that share a root are compared on this part only, so a
    /// renamed root does not affect lookups below it.
    pub fn without_root(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Depth of the addressed node; the root is at depth 0.
    ///
    /// Returns `None` for the empty path.
    pub fn depth(&self) -> Option<usize> {
        self.0.len().checked_sub(1)
    }

    /// Key of the addressed node.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl<S: Into<String>> FromIterator<S> for TreePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for TreePath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<TreePath> for Vec<String> {
    fn from(path: TreePath) -> Self {
        path.0
    }
}
