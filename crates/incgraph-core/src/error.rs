//! Error types for the graph model

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("invalid color specification {spec:?}: {reason}")]
    InvalidPalette { spec: String, reason: String },

    #[error("color alpha minimum must be in [0, 1], got {0}")]
    InvalidAlpha(f64),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
