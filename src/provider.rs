//! Enumeration of template files.
//!
//! The provider walks the template tree lazily with an explicit queue of
//! pending entries. When a directory is taken from the queue its children are
//! put in front of the queue, so a directory is exhausted before the next
//! sibling of its parent is visited (depth-first pre-order). Within a
//! directory the order is the one returned by the platform's listing.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::processor::Processor;

/// A filesystem entry discovered under the provider root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Path relative to the provider root; never contains the root prefix.
    pub relative_path: PathBuf,
    pub absolute_path: PathBuf,
    pub is_dir: bool,
}

/// Source of template files.
pub trait FileProvider {
    /// Returns the next file accepted by `filter` with an open handle on its content.
    ///
    /// `None` is returned only once every pending directory has been expanded.
    fn next_file(&mut self, filter: &dyn Filter) -> Result<Option<(PathBuf, File)>>;

    /// Feeds every file accepted by `filter` into `processor`, stopping at the first error.
    ///
    /// Errors are wrapped with the relative path of the file that caused them.
    fn provide_files(&mut self, filter: &dyn Filter, processor: &dyn Processor) -> Result<()> {
        while let Some((path, mut file)) = self.next_file(filter)? {
            debug!("Processing file: {}", path.display());
            processor
                .process_file(&path, &mut file)
                .map_err(|e| Error::for_path(&path, e))?;
        }
        Ok(())
    }
}

/// [`FileProvider`] over a directory on the local filesystem.
#[derive(Debug)]
pub struct FileSystemProvider {
    root: PathBuf,
    pending: VecDeque<Entry>,
    indexed: bool,
}

impl FileSystemProvider {
    /// Creates a provider rooted at `root`. The root is listed on the first request.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into(), pending: VecDeque::new(), indexed: false }
    }

    /// Lists `dir` and puts its children in front of the pending queue, keeping
    /// the listing order.
    fn index_dir(&mut self, dir: &Path) -> Result<()> {
        let mut children = Vec::new();
        for dir_entry in fs::read_dir(dir)? {
            let dir_entry = dir_entry?;
            let absolute_path = dir_entry.path();
            let file_type = dir_entry.file_type()?;
            // Symlinked directories are followed; dangling links count as files.
            let is_dir = file_type.is_dir() || (file_type.is_symlink() && absolute_path.is_dir());
            let relative_path = self.relative(&absolute_path)?;
            children.push(Entry { relative_path, absolute_path, is_dir });
        }

        for child in children.into_iter().rev() {
            self.pending.push_front(child);
        }
        Ok(())
    }

    fn relative(&self, path: &Path) -> Result<PathBuf> {
        path.strip_prefix(&self.root).map(Path::to_path_buf).map_err(|_| {
            Error::ConfigError(format!(
                "'{}' is outside of '{}'",
                path.display(),
                self.root.display()
            ))
        })
    }
}

impl FileProvider for FileSystemProvider {
    fn next_file(&mut self, filter: &dyn Filter) -> Result<Option<(PathBuf, File)>> {
        if !self.indexed {
            let root = self.root.clone();
            self.index_dir(&root)?;
            self.indexed = true;
        }

        while let Some(entry) = self.pending.pop_front() {
            if !filter.accept(&entry.relative_path) {
                debug!("Skipping filtered path: {}", entry.relative_path.display());
                continue;
            }
            if entry.is_dir {
                self.index_dir(&entry.absolute_path)?;
                continue;
            }

            let file = File::open(&entry.absolute_path)
                .map_err(|e| Error::for_path(&entry.relative_path, e.into()))?;
            return Ok(Some((entry.relative_path, file)));
        }

        Ok(None)
    }
}
