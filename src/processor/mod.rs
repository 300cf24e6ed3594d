//! Content processing chain.
//!
//! Every file surviving the filter is handed to the head of a chain of
//! [`Processor`]s. Each processor transforms the content and forwards it to the
//! processor it owns; the terminal [`WriteProcessor`] persists the bytes.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::constants::TEMPLATE_SUFFIX;
use crate::error::Result;

mod template;
mod writer;

pub use template::TemplateProcessor;
pub use writer::WriteProcessor;

/// A single link of the processing chain.
pub trait Processor {
    /// Consumes the content of the file at the template-relative `path`.
    ///
    /// Returns the first error raised by this processor or any processor after it.
    fn process_file(&self, path: &Path, content: &mut dyn Read) -> Result<()>;
}

/// Checks if a file name follows the `name.ext.tpl` convention.
///
/// A bare `.tpl` file has no name left once the suffix is removed and is
/// therefore copied verbatim.
pub fn is_template_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(TEMPLATE_SUFFIX))
        .is_some_and(|stem| !stem.is_empty())
}

/// Resolves the output path of a template-relative path.
///
/// # Returns
/// * `(PathBuf, bool)` - Target path and whether the content must be rendered
pub fn resolve_target_path<P: AsRef<Path>>(path: P) -> (PathBuf, bool) {
    let path = path.as_ref();
    if !is_template_path(path) {
        return (path.to_path_buf(), false);
    }
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(TEMPLATE_SUFFIX))
        .unwrap_or_default();
    (path.with_file_name(name), true)
}
