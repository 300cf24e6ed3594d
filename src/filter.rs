//! Inclusion predicates over template-relative paths.
//!
//! A filter is consulted once per entry before the entry is opened or listed,
//! so a rejected file costs no I/O. Filters never touch the filesystem.

use std::path::{Path, PathBuf};

/// Decides whether a template-relative path takes part in generation.
pub trait Filter {
    /// Returns true when `path` should be processed.
    fn accept(&self, path: &Path) -> bool;
}

impl<F> Filter for F
where
    F: Fn(&Path) -> bool,
{
    fn accept(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Filter used when none is given: accepts everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl Filter for AcceptAll {
    fn accept(&self, _path: &Path) -> bool {
        true
    }
}

/// Rejects a directory and every path beneath it.
#[derive(Debug, Clone)]
pub struct ExcludeDir {
    dir: PathBuf,
}

impl ExcludeDir {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl Filter for ExcludeDir {
    fn accept(&self, path: &Path) -> bool {
        !path.starts_with(&self.dir)
    }
}

/// Accepts a path only if both filters accept it.
#[derive(Debug, Clone)]
pub struct And<A, B> {
    left: A,
    right: B,
}

impl<A: Filter, B: Filter> Filter for And<A, B> {
    fn accept(&self, path: &Path) -> bool {
        self.left.accept(path) && self.right.accept(path)
    }
}

/// Inverts a filter.
#[derive(Debug, Clone)]
pub struct Not<F> {
    inner: F,
}

impl<F: Filter> Filter for Not<F> {
    fn accept(&self, path: &Path) -> bool {
        !self.inner.accept(path)
    }
}

/// Combinators available on every [`Filter`].
pub trait FilterExt: Filter + Sized {
    fn and<B: Filter>(self, other: B) -> And<Self, B> {
        And { left: self, right: other }
    }

    fn not(self) -> Not<Self> {
        Not { inner: self }
    }
}

impl<F: Filter> FilterExt for F {}
