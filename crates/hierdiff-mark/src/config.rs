use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use hierdiff_types::EditKind;

use crate::error::{MarkError, MarkResult};

/// Which of the two hierarchies the mark pass writes to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractSide {
    /// Mark objects that are missing from the target (deletions).
    #[default]
    Base,
    /// Mark objects that are new in the target (additions).
    Target,
}

impl ExtractSide {
    /// The record kind that is marked on this side.
    pub fn kind(&self) -> EditKind {
        match self {
            Self::Base => EditKind::Delete,
            Self::Target => EditKind::Insert,
        }
    }
}

impl fmt::Display for ExtractSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::Target => f.write_str("target"),
        }
    }
}

impl FromStr for ExtractSide {
    type Err = MarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(Self::Base),
            "target" => Ok(Self::Target),
            other => Err(MarkError::Config(format!("unknown side '{other}'"))),
        }
    }
}

/// Size limits applied when a hierarchy is turned into a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeLimits {
    /// Maximum number of levels, root included.
    pub max_depth: usize,
    /// Maximum number of objects in one hierarchy.
    pub max_nodes: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_nodes: 100_000,
        }
    }
}

impl TreeLimits {
    /// Both limits must be positive.
    pub fn validate(&self) -> MarkResult<()> {
        if self.max_depth == 0 {
            return Err(MarkError::Config("`limits.max_depth` must be positive".into()));
        }
        if self.max_nodes == 0 {
            return Err(MarkError::Config("`limits.max_nodes` must be positive".into()));
        }
        Ok(())
    }
}

/// Configuration for the mark pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkConfig {
    /// Which hierarchy gets marked.
    pub side: ExtractSide,
    /// Appended to objects that only exist in the target.
    pub addition_suffix: String,
    /// Appended to objects that only exist in the base.
    pub deletion_suffix: String,
    pub limits: TreeLimits,
}

impl Default for MarkConfig {
    fn default() -> Self {
        Self {
            side: ExtractSide::Base,
            addition_suffix: "__added".into(),
            deletion_suffix: "__deleted".into(),
            limits: TreeLimits::default(),
        }
    }
}

impl MarkConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> MarkResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> MarkResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// The suffix used for the configured side.
    pub fn suffix(&self) -> &str {
        match self.side {
            ExtractSide::Base => &self.deletion_suffix,
            ExtractSide::Target => &self.addition_suffix,
        }
    }

    /// Check that the configuration can be used for a run.
    ///
    /// Only the suffix of the configured side must be non-blank.
    pub fn validate(&self) -> MarkResult<()> {
        if self.suffix().trim().is_empty() {
            let field = match self.side {
                ExtractSide::Base => "deletion_suffix",
                ExtractSide::Target => "addition_suffix",
            };
            return Err(MarkError::Config(format!("`{field}` must be specified")));
        }
        self.limits.validate()
    }
}
