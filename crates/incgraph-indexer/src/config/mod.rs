//! Run settings, loadable from a TOML file and validated before scanning

use std::fs;
use std::path::{Path, PathBuf};

use globset::Glob;
use incgraph_core::{GraphOptions, Palette, Relation};
use serde::Deserialize;

use crate::error::{IndexError, Result};
use crate::walker::ScanOptions;

/// C and C++ sources and headers.
pub const DEFAULT_PATTERNS: &[&str] = &["*.[ch]pp", "*.[ch]"];

/// Everything a run needs, as read from `incgraph.toml`:
///
/// ```toml
/// [scan]
/// roots = ["src"]
/// prefixes = ["include", "/usr/include"]
///
/// [graph]
/// relation = "includes"
/// group_granularity = 1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub scan: ScanSettings,
    pub graph: GraphSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanSettings {
    pub roots: Vec<PathBuf>,
    pub patterns: Vec<String>,
    pub prefixes: Vec<PathBuf>,
    pub respect_ignore_files: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            prefixes: Vec::new(),
            respect_ignore_files: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphSettings {
    pub relation: Relation,
    pub full_path: bool,
    pub group_granularity: usize,
    pub seed: Option<u64>,
    /// Base color as `"r,g,b"`.
    pub colors: String,
    pub color_variation: u32,
    pub color_alpha_min: f64,
}

impl Default for GraphSettings {
    fn default() -> Self {
        let palette = Palette::default();
        let [r, g, b] = palette.base;
        Self {
            relation: Relation::default(),
            full_path: false,
            group_granularity: 2,
            seed: None,
            colors: format!("{r}, {g}, {b}"),
            color_variation: palette.variation,
            color_alpha_min: palette.alpha_min,
        }
    }
}

impl Settings {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded settings from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// Reject anything that would make the run fail midway.
    pub fn validate(&self) -> Result<()> {
        if self.scan.roots.is_empty() {
            return Err(IndexError::NoRoots);
        }
        for root in &self.scan.roots {
            if !root.is_dir() {
                return Err(IndexError::InvalidRoot(root.clone()));
            }
        }
        for pattern in &self.scan.patterns {
            Glob::new(pattern)?;
        }
        self.graph_options()?;
        Ok(())
    }

    pub fn graph_options(&self) -> Result<GraphOptions> {
        let graph = &self.graph;
        let base = Palette::parse_base(&graph.colors)?;
        let palette = Palette::new(base, graph.color_variation, graph.color_alpha_min)?;
        Ok(GraphOptions {
            relation: graph.relation,
            full_path: graph.full_path,
            group_granularity: graph.group_granularity,
            palette,
            seed: graph.seed,
        })
    }

    /// Scan options with `working_dir` searched ahead of the configured prefixes.
    pub fn scan_options(&self, working_dir: &Path) -> ScanOptions {
        let mut prefixes = Vec::with_capacity(self.scan.prefixes.len() + 1);
        prefixes.push(working_dir.to_path_buf());
        prefixes.extend(self.scan.prefixes.iter().cloned());

        ScanOptions {
            roots: self.scan.roots.clone(),
            patterns: self.scan.patterns.clone(),
            prefixes,
            respect_ignore_files: self.scan.respect_ignore_files,
        }
    }
}
