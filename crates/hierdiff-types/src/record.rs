use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::path::TreePath;

/// The kind of edit a [`Record`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    /// The node exists only in the target tree.
    Insert,
    /// The node exists only in the base tree.
    Delete,
    /// The node was paired across both trees. Its payload may or may not
    /// differ; payloads are never compared.
    Change,
}

impl EditKind {
    pub const ALL: [EditKind; 3] = [EditKind::Insert, EditKind::Delete, EditKind::Change];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Change => "change",
        }
    }

    /// Single-character marker used in text output.
    pub fn symbol(&self) -> char {
        match self {
            Self::Insert => '+',
            Self::Delete => '-',
            Self::Change => '~',
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insert" => Ok(Self::Insert),
            "delete" => Ok(Self::Delete),
            "change" => Ok(Self::Change),
            other => Err(TypeError::UnknownEditKind(other.to_string())),
        }
    }
}

/// One emitted diff entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record<T> {
    pub kind: EditKind,
    /// Keys from the root to the affected node, inclusive.
    pub path: TreePath,
    /// Payload of the node on its side. For [`EditKind::Change`] this is
    /// the base side's payload.
    pub value: T,
}

impl<T> Record<T> {
    pub fn new(kind: EditKind, path: TreePath, value: T) -> Self {
        Self { kind, path, value }
    }

    pub fn insert(path: TreePath, value: T) -> Self {
        Self::new(EditKind::Insert, path, value)
    }

    pub fn delete(path: TreePath, value: T) -> Self {
        Self::new(EditKind::Delete, path, value)
    }

    pub fn change(path: TreePath, value: T) -> Self {
        Self::new(EditKind::Change, path, value)
    }

    /// A short human-readable form, e.g. `+ root/child`.
    pub fn summary(&self) -> String {
        format!("{} {}", self.kind.symbol(), self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_kind_parses_its_display_form() {
        for kind in EditKind::ALL {
            assert_eq!(kind.to_string().parse::<EditKind>(), Ok(kind));
        }
        assert_eq!(
            "none".parse::<EditKind>(),
            Err(TypeError::UnknownEditKind("none".into()))
        );
    }

    #[test]
    fn edit_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EditKind::Delete).unwrap(), r#""delete""#);
    }

    #[test]
    fn record_summary() {
        let path: TreePath = ["root", "bar"].into_iter().collect();
        let record = Record::delete(path, ());
        assert_eq!(record.kind, EditKind::Delete);
        assert_eq!(record.summary(), "- root/bar");
    }
}
