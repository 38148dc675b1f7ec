//! Core data structures for the include graph

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::palette::Palette;

/// Identity of a node, assigned in first-seen order starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct NodeId(pub u32);

/// Identity of an edge, assigned in creation order starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct EdgeId(pub u32);

/// Which way edges point relative to the include relation they were built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Relation {
    /// Source includes target.
    Includes,
    /// Source is included by target.
    #[default]
    IncludedBy,
}

impl Relation {
    /// Map an `includer -> included` pair onto `(source, target)`.
    pub fn orient(self, includer: NodeId, included: NodeId) -> (NodeId, NodeId) {
        match self {
            Relation::Includes => (includer, included),
            Relation::IncludedBy => (included, includer),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Includes => "includes",
            Relation::IncludedBy => "included-by",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "includes" => Ok(Relation::Includes),
            "included-by" => Ok(Relation::IncludedBy),
            other => Err(format!(
                "unknown relation '{other}', expected 'includes' or 'included-by'"
            )),
        }
    }
}

/// Initial layout coordinates handed to the visualization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
}

/// One file (or unresolved include token) in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncludeNode {
    pub id: NodeId,
    /// Canonical path, or the raw token when resolution failed. Unique per graph.
    pub path: PathBuf,
    pub label: String,
    pub group: String,
    /// Number of distinct includes when scanned, 1 for include-only nodes.
    pub weight: u32,
    pub placement: Placement,
    pub color: String,
    /// Whether the node has been registered as a scan target.
    pub scanned: bool,
}

/// A directed include relation, already oriented per [`Relation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

/// Presentation settings fixed for the lifetime of a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphOptions {
    pub relation: Relation,
    /// Label nodes with the full path instead of the file name.
    pub full_path: bool,
    /// Trailing directory segments forming the group key.
    pub group_granularity: usize,
    pub palette: Palette,
    /// Seed for colors and placement; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            relation: Relation::default(),
            full_path: false,
            group_granularity: 2,
            palette: Palette::default(),
            seed: None,
        }
    }
}
