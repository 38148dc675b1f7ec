//! Line-oriented `#include` directive extraction
//!
//! Only lines that are exactly `#include "token"` or `#include <token>` count.
//! Leading whitespace, trailing comments and line continuations are not
//! recognized; conditional compilation is not evaluated.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{IndexError, Result};

fn directive() -> &'static Regex {
    static DIRECTIVE: OnceLock<Regex> = OnceLock::new();
    DIRECTIVE.get_or_init(|| {
        Regex::new(r#"^#include (?:"([^"]*)"|<([^>]*)>)$"#).expect("include pattern is valid")
    })
}

/// Distinct include tokens in `source`, without their delimiters.
pub fn extract_from_str(source: &str) -> BTreeSet<String> {
    let pattern = directive();
    source
        .lines()
        .filter_map(|line| pattern.captures(line))
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|token| token.as_str().to_string())
        .collect()
}

/// Read `path` as UTF-8 text and extract its include tokens.
pub fn extract(path: &Path) -> Result<BTreeSet<String>> {
    let source = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::InvalidData => IndexError::NotText(path.to_path_buf()),
        _ => IndexError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(extract_from_str(&source))
}
