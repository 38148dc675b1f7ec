//! Include directive extraction, path resolution and source tree walking

pub mod config;
pub mod error;
pub mod extractor;
pub mod resolver;
pub mod walker;


pub use config::{GraphSettings, ScanSettings, Settings, DEFAULT_PATTERNS};
pub use error::{IndexError, Result};
pub use extractor::{extract, extract_from_str};
pub use resolver::Resolver;
pub use walker::{ScanOptions, WalkSummary, Walker};
