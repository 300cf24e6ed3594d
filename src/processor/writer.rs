use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::Builder;

use super::Processor;
use crate::error::Result;

/// Terminal processor persisting content under the output root.
///
/// Content is streamed into a temporary file next to the target which then
/// replaces the target. The source may therefore be the target itself, and a
/// failed write never leaves a truncated file behind.
///
/// The written file takes the permissions of the source file at the same
/// relative path when a source root is set, then those of the file it
/// replaces, and the default file mode otherwise.
#[derive(Debug, Clone)]
pub struct WriteProcessor {
    output_root: PathBuf,
    source_root: Option<PathBuf>,
}

impl WriteProcessor {
    pub fn new<P: Into<PathBuf>>(output_root: P) -> Self {
        Self { output_root: output_root.into(), source_root: None }
    }

    /// Copies permissions from files under `source_root` onto their output.
    pub fn with_source_root<P: Into<PathBuf>>(mut self, source_root: P) -> Self {
        self.source_root = Some(source_root.into());
        self
    }

    fn inherited_permissions(&self, path: &Path, target: &Path) -> Option<fs::Permissions> {
        self.source_root
            .as_ref()
            .map(|root| root.join(path))
            .into_iter()
            .chain(std::iter::once(target.to_path_buf()))
            .find_map(|candidate| fs::metadata(candidate).ok().filter(|m| m.is_file()))
            .map(|metadata| metadata.permissions())
    }
}

impl Processor for WriteProcessor {
    fn process_file(&self, path: &Path, content: &mut dyn Read) -> Result<()> {
        let target = self.output_root.join(path);
        let parent = target.parent().unwrap_or(&self.output_root);
        fs::create_dir_all(parent)?;

        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Regular file mode, narrowed by the process umask.
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut staged = builder.tempfile_in(parent)?;
        io::copy(content, &mut staged)?;
        if let Some(permissions) = self.inherited_permissions(path, &target) {
            staged.as_file().set_permissions(permissions)?;
        }
        staged.persist(&target).map_err(|e| e.error)?;

        debug!("Written file: {}", target.display());
        Ok(())
    }
}
