//! Serializable graph document consumed by the visualization page

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::{GraphError, Result};
use crate::model::{IncludeEdge, IncludeNode};

/// Visual weight of every edge.
pub const EDGE_SIZE: u32 = 10;

/// Renderer edge style.
pub const EDGE_TYPE: &str = "curvedArrow";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: u32,
    pub label: String,
    pub group: String,
    pub size: u32,
    pub x: f64,
    pub y: f64,
    pub color: String,
}

impl From<&IncludeNode> for NodeRecord {
    fn from(node: &IncludeNode) -> Self {
        NodeRecord {
            id: node.id.0,
            label: node.label.clone(),
            group: node.group.clone(),
            size: node.weight,
            x: node.placement.x,
            y: node.placement.y,
            color: node.color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: u32,
    pub source: u32,
    pub target: u32,
    pub size: u32,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<&IncludeEdge> for EdgeRecord {
    fn from(edge: &IncludeEdge) -> Self {
        EdgeRecord {
            id: edge.id.0,
            source: edge.source.0,
            target: edge.target.0,
            size: EDGE_SIZE,
            kind: EDGE_TYPE.to_string(),
        }
    }
}

/// Nodes and edges in identity order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphDocument {
    /// Pretty JSON with four-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the JSON document, creating parent directories as needed.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let io_err = |source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_json()?).map_err(io_err)?;

        tracing::debug!("Graph document written: {}", path.display());
        Ok(())
    }
}
