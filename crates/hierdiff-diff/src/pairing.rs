//! Sibling pairing: match the children of two paired nodes by key.
//!
//! Each side gets a first-occurrence index (`key -> position`), so a level
//! with `n` base children and `m` target children pairs in O(n + m).
//! Only the first child carrying a key on each side takes part in
//! matching; later duplicates are reported as one-sided.

use std::collections::HashMap;

use hierdiff_types::Node;

/// One slot produced by [`pair_children`].
#[derive(Debug)]
pub enum Pair<'a, T> {
    /// Present in the base tree only.
    Base(&'a Node<T>),
    /// Present in the target tree only.
    Target(&'a Node<T>),
    /// Present on both sides under the same key.
    Both(&'a Node<T>, &'a Node<T>),
}

impl<'a, T> Pair<'a, T> {
    /// Build a pair from two optional sides. Returns `None` when both are
    /// absent.
    pub fn from_options(base: Option<&'a Node<T>>, target: Option<&'a Node<T>>) -> Option<Self> {
        match (base, target) {
            (Some(a), Some(b)) => Some(Self::Both(a, b)),
            (Some(a), None) => Some(Self::Base(a)),
            (None, Some(b)) => Some(Self::Target(b)),
            (None, None) => None,
        }
    }
}

// Manual impls: deriving would require `T: Clone`/`T: Copy`.
impl<T> Clone for Pair<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Pair<'_, T> {}

fn first_index<T>(nodes: &[Node<T>]) -> HashMap<&str, usize> {
    let mut index = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        index.entry(node.key.as_str()).or_insert(i);
    }
    index
}

/// Pair the children of two nodes by key.
///
/// The result lists every base child in base order (matched or not),
/// followed by the target children that were not matched, in target order.
pub fn pair_children<'a, T>(base: &'a [Node<T>], target: &'a [Node<T>]) -> Vec<Pair<'a, T>> {
    let base_index = first_index(base);
    let target_index = first_index(target);

    let mut pairs = Vec::with_capacity(base.len() + target.len());

    for (i, a) in base.iter().enumerate() {
        let key = a.key.as_str();
        let is_first = base_index.get(key) == Some(&i);
        match target_index.get(key) {
            Some(&j) if is_first => pairs.push(Pair::Both(a, &target[j])),
            _ => pairs.push(Pair::Base(a)),
        }
    }

    for (j, b) in target.iter().enumerate() {
        let key = b.key.as_str();
        let is_first = target_index.get(key) == Some(&j);
        if !(is_first && base_index.contains_key(key)) {
            pairs.push(Pair::Target(b));
        }
    }

    tracing::trace!(
        base = base.len(),
        target = target.len(),
        pairs = pairs.len(),
        "paired children"
    );

    pairs
}
