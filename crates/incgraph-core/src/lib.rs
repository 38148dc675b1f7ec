//! incgraph core — include graph model, display attributes and the output document

pub mod document;
pub mod error;
pub mod graph;
pub mod model;
pub mod palette;


pub use document::{EdgeRecord, GraphDocument, NodeRecord, EDGE_SIZE, EDGE_TYPE};
pub use error::{GraphError, Result};
pub use graph::IncludeGraph;
pub use model::{EdgeId, GraphOptions, IncludeEdge, IncludeNode, NodeId, Placement, Relation};
pub use palette::Palette;
