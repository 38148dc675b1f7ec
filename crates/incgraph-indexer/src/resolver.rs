//! Include path resolution against an ordered prefix list

use std::fs;
use std::path::{Path, PathBuf};

/// Resolves raw include tokens the way a compiler walks its include path:
/// the first prefix under which the token names an existing file wins.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    prefixes: Vec<PathBuf>,
}

impl Resolver {
    pub fn new<I, P>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Canonical path of the first match, or the raw token unchanged.
    pub fn resolve(&self, token: &str) -> PathBuf {
        self.try_resolve(token)
            .unwrap_or_else(|| PathBuf::from(token))
    }

    /// Canonical path of the first match, if any prefix yields a file.
    pub fn try_resolve(&self, token: &str) -> Option<PathBuf> {
        self.prefixes
            .iter()
            .find_map(|prefix| canonical_file(&prefix.join(token)))
    }
}

/// Symlink-resolved absolute path, only if it names a regular file.
fn canonical_file(candidate: &Path) -> Option<PathBuf> {
    let canonical = fs::canonicalize(candidate).ok()?;
    canonical.is_file().then_some(canonical)
}
