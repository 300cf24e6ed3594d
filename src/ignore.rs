//! File and directory ignore pattern handling for templates.
//! This module processes the `ignore` file of the scaffold metadata directory
//! to exclude specific paths from generation, similar to .gitignore functionality.

use crate::constants::{IGNORE_FILE, METADATA_DIR};
use crate::error::Result;
use crate::filter::Filter;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::Path;

/// Rejects every path matched by one of its glob patterns.
#[derive(Debug, Clone)]
pub struct GlobFilter {
    patterns: GlobSet,
}

impl GlobFilter {
    /// Compiles the given patterns.
    ///
    /// # Errors
    /// * `Error::GlobError` if a pattern is invalid
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern.as_ref())?);
        }
        Ok(Self { patterns: builder.build()? })
    }

    pub fn empty() -> Self {
        Self { patterns: GlobSet::empty() }
    }
}

impl Filter for GlobFilter {
    fn accept(&self, path: &Path) -> bool {
        !self.patterns.is_match(path)
    }
}

/// Reads the ignore file of a template and compiles it into a [`GlobFilter`].
///
/// # Arguments
/// * `template_root` - Root of the template directory
///
/// # Notes
/// - If the ignore file doesn't exist, returns a filter accepting everything
/// - Each non-empty line is a glob pattern; lines starting with `#` are comments
/// - Invalid patterns result in an `Error::GlobError`
///
/// # Example
/// ```ignore
/// # Contents of .scaffold-config/ignore:
/// *.pyc
/// **/__pycache__/**
/// ```
pub fn parse_ignore_file<P: AsRef<Path>>(template_root: P) -> Result<GlobFilter> {
    let ignore_path = template_root.as_ref().join(METADATA_DIR).join(IGNORE_FILE);
    let contents = match read_to_string(&ignore_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No ignore file at {}", ignore_path.display());
            return Ok(GlobFilter::empty());
        }
        Err(e) => return Err(e.into()),
    };

    let patterns = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    GlobFilter::new(patterns)
}
