//! Source tree enumeration feeding the include graph
//!
//! Files are enumerated per root and per glob pattern, scanned in parallel,
//! and registered into the graph one at a time in enumeration order so node
//! and edge identities are reproducible.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use incgraph_core::IncludeGraph;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_PATTERNS;
use crate::error::{IndexError, Result};
use crate::extractor;
use crate::resolver::Resolver;

/// What to scan and where to look for included headers.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOptions {
    pub roots: Vec<PathBuf>,
    /// Glob patterns matched against file names.
    pub patterns: Vec<String>,
    /// Extra include directories, searched after the file's own directory
    /// and its scan root.
    pub prefixes: Vec<PathBuf>,
    /// Honor `.gitignore`/`.ignore` files and skip hidden entries.
    pub respect_ignore_files: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            prefixes: Vec::new(),
            respect_ignore_files: false,
        }
    }
}

/// Counters collected over one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub files_scanned: usize,
    pub files_failed: usize,
    pub directories_skipped: usize,
    /// Distinct resolved includes summed over scanned files.
    pub includes: usize,
    pub unresolved: usize,
}

#[derive(Debug)]
struct Candidate {
    path: PathBuf,
    root: PathBuf,
}

#[derive(Debug)]
struct ScannedFile {
    path: PathBuf,
    includes: BTreeSet<PathBuf>,
    unresolved: usize,
}

pub struct Walker {
    options: ScanOptions,
    matchers: Vec<GlobMatcher>,
}

impl Walker {
    /// Compile the glob patterns. Fails on the first invalid one.
    pub fn new(options: ScanOptions) -> Result<Self> {
        let matchers = options
            .patterns
            .iter()
            .map(|pattern| -> Result<GlobMatcher> {
                Ok(Glob::new(pattern)?.compile_matcher())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { options, matchers })
    }

    /// Scan every root and register each matched file into `graph`.
    ///
    /// Invalid roots abort before anything is scanned. Unreadable files
    /// and matched directories are logged, counted and skipped.
    pub fn walk(&self, graph: &mut IncludeGraph) -> Result<WalkSummary> {
        let roots = self.canonical_roots()?;
        let mut summary = WalkSummary::default();

        let mut candidates = Vec::new();
        for root in &roots {
            for matcher in &self.matchers {
                self.enumerate(root, matcher, &mut candidates, &mut summary);
            }
        }
        debug!("{} candidate files", candidates.len());

        let scanned: Vec<Result<ScannedFile>> = candidates
            .par_iter()
            .map(|candidate| self.scan(candidate))
            .collect();

        for result in scanned {
            match result {
                Ok(file) => {
                    summary.files_scanned += 1;
                    summary.includes += file.includes.len();
                    summary.unresolved += file.unresolved;
                    graph.register(&file.path, file.includes);
                }
                Err(e) => {
                    warn!("Skipping file: {}", e);
                    summary.files_failed += 1;
                }
            }
        }

        info!("Result: {}", graph);
        debug!("{:?}", summary);
        Ok(summary)
    }

    fn canonical_roots(&self) -> Result<Vec<PathBuf>> {
        if self.options.roots.is_empty() {
            return Err(IndexError::NoRoots);
        }
        self.options
            .roots
            .iter()
            .map(|root| match fs::canonicalize(root) {
                Ok(path) if path.is_dir() => Ok(path),
                _ => Err(IndexError::InvalidRoot(root.clone())),
            })
            .collect()
    }

    fn enumerate(
        &self,
        root: &Path,
        matcher: &GlobMatcher,
        candidates: &mut Vec<Candidate>,
        summary: &mut WalkSummary,
    ) {
        let entries = WalkBuilder::new(root)
            .standard_filters(self.options.respect_ignore_files)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Cannot read entry under {}: {}", root.display(), e);
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }

            let path = entry.path();
            if !path.file_name().is_some_and(|name| matcher.is_match(name)) {
                continue;
            }
            if path.is_dir() {
                debug!("{} is a directory, skipping", path.display());
                summary.directories_skipped += 1;
                continue;
            }

            candidates.push(Candidate {
                path: entry.into_path(),
                root: root.to_path_buf(),
            });
        }
    }

    fn scan(&self, candidate: &Candidate) -> Result<ScannedFile> {
        let path = fs::canonicalize(&candidate.path).map_err(|source| IndexError::Io {
            path: candidate.path.clone(),
            source,
        })?;
        let tokens = extractor::extract(&path)?;
        let resolver = self.resolver_for(candidate);

        let mut includes = BTreeSet::new();
        let mut unresolved = 0;
        for token in &tokens {
            match resolver.try_resolve(token) {
                Some(resolved) => {
                    includes.insert(resolved);
                }
                None => {
                    unresolved += 1;
                    includes.insert(PathBuf::from(token));
                }
            }
        }

        debug!(
            "{}: {} includes ({} unresolved)",
            path.display(),
            includes.len(),
            unresolved
        );
        Ok(ScannedFile {
            path,
            includes,
            unresolved,
        })
    }

    /// File directory, scan root, configured prefixes, then the empty prefix.
    fn resolver_for(&self, candidate: &Candidate) -> Resolver {
        let mut prefixes = Vec::with_capacity(self.options.prefixes.len() + 3);
        if let Some(dir) = candidate.path.parent() {
            prefixes.push(dir.to_path_buf());
        }
        prefixes.push(candidate.root.clone());
        prefixes.extend(self.options.prefixes.iter().cloned());
        prefixes.push(PathBuf::new());
        Resolver::new(prefixes)
    }
}
