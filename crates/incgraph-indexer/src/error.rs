use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not a text file")]
    NotText(PathBuf),

    #[error("invalid glob pattern: {0}")]
    InvalidPattern(#[from] globset::Error),

    #[error("scan root {0} is not a directory")]
    InvalidRoot(PathBuf),

    #[error("no directories to scan")]
    NoRoots,

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Graph(#[from] incgraph_core::GraphError),
}
