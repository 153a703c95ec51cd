//! Hierarchy documents and their conversion to labeled trees.
//!
//! A hierarchy document is a JSON object with a `name`, an optional list of
//! `children` and any number of other fields. Each object becomes one tree
//! node keyed by its name; the object's own fields (without children) are
//! the node payload. Unknown fields are kept so a marked document can be
//! written back out unchanged apart from the renamed objects.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hierdiff_types::{Node, TreePath};

use crate::config::TreeLimits;
use crate::error::{MarkError, MarkResult};

/// One object in a hierarchy document, with its descendants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HierarchyObject {
    pub name: String,
    #[serde(default)]
    pub children: Vec<HierarchyObject>,
    /// Every other field of the object, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Node payload: an object's own data without its children.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectData {
    /// Display name. Starts equal to the node key; marking appends to it.
    pub name: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl HierarchyObject {
    /// Create an object with no children and no extra fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<HierarchyObject>) -> Self {
        self.children = children;
        self
    }

    /// Parse a JSON hierarchy document.
    ///
    /// The parser's own nesting limit is lifted; depth is bounded by
    /// [`TreeLimits::max_depth`] when the document is turned into a tree.
    pub fn from_json_str(s: &str) -> MarkResult<Self> {
        let mut de = serde_json::Deserializer::from_str(s);
        de.disable_recursion_limit();
        let object = Self::deserialize(serde_stacker::Deserializer::new(&mut de))?;
        de.end()?;
        Ok(object)
    }

    /// Read and parse a JSON hierarchy document.
    pub fn from_path(path: impl AsRef<Path>) -> MarkResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string_pretty(&self) -> MarkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Convert a hierarchy into a tree, depth first, enforcing `limits`.
pub fn to_tree(root: &HierarchyObject, limits: &TreeLimits) -> MarkResult<Node<ObjectData>> {
    let mut count = 0usize;
    build_node(root, &TreePath::root(), 0, limits, &mut count)
}

fn build_node(
    object: &HierarchyObject,
    parent: &TreePath,
    depth: usize,
    limits: &TreeLimits,
    count: &mut usize,
) -> MarkResult<Node<ObjectData>> {
    let path = parent.child(object.name.as_str());

    if depth >= limits.max_depth {
        return Err(MarkError::LimitExceeded {
            limit: "max_depth",
            value: limits.max_depth,
            path: path.to_string(),
        });
    }
    *count += 1;
    if *count > limits.max_nodes {
        return Err(MarkError::LimitExceeded {
            limit: "max_nodes",
            value: limits.max_nodes,
            path: path.to_string(),
        });
    }

    let mut seen = HashSet::with_capacity(object.children.len());
    for child in &object.children {
        if !seen.insert(child.name.as_str()) {
            tracing::warn!(
                parent = %path,
                name = %child.name,
                "duplicate sibling name; only the first occurrence is matched"
            );
        }
    }

    let mut children = Vec::with_capacity(object.children.len());
    for child in &object.children {
        children.push(build_node(child, &path, depth + 1, limits, count)?);
    }

    let data = ObjectData {
        name: object.name.clone(),
        extra: object.extra.clone(),
    };
    Ok(Node::new(object.name.as_str(), data).with_children(children))
}

/// Convert a tree back into a hierarchy document.
///
/// Object names are taken from the payloads, so any suffix applied by the
/// mark pass shows up in the result. Keys are not used.
pub fn from_tree(node: Node<ObjectData>) -> HierarchyObject {
    HierarchyObject {
        name: node.value.name,
        children: node.children.into_iter().map(from_tree).collect(),
        extra: node.value.extra,
    }
}
