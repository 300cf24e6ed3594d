//! Command-line interface implementation for the scaffolder.
//! Provides argument parsing using clap and the immutable run configuration
//! derived from it.

use clap::{error::ErrorKind, Parser};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Command-line arguments structure.
#[derive(Parser, Debug)]
#[command(author, version, about = "scaffolder: generate a project from a template directory", long_about = None)]
pub struct Args {
    /// Path to the template directory
    #[arg(long, value_name = "DIR")]
    pub template: PathBuf,

    /// Directory where the generated project will be written
    #[arg(long, value_name = "DIR")]
    pub output: PathBuf,

    /// Remove the scaffold metadata once the project is generated.
    /// When the template and output directories are the same, the rendered
    /// template sources are removed as well.
    #[arg(long)]
    pub remove_source: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Immutable configuration of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
    pub remove_source: bool,
    pub verbose: bool,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        Self {
            template_dir: args.template,
            output_dir: args.output,
            remove_source: args.remove_source,
            verbose: args.verbose,
        }
    }
}

impl RunConfig {
    /// Returns true when the project is generated on top of its own template.
    ///
    /// Paths are compared canonically when both exist, so `./tpl` and
    /// `tpl/` name the same directory.
    pub fn is_in_place(&self) -> bool {
        same_dir(&self.template_dir, &self.output_dir)
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.components().eq(b.components()),
    }
}

/// Parses command line arguments into a [`RunConfig`].
///
/// # Returns
/// * `Result<RunConfig>` - Parsed configuration
///
/// # Errors
/// * `Error::ConfigError` for unknown, missing or malformed arguments
///
/// # Exits
/// * When `--help` or `--version` is requested, after printing the output
pub fn parse_args<I, T>(args: I) -> Result<RunConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(args) {
        Ok(args) => Ok(args.into()),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => Err(Error::ConfigError(e.to_string().trim_end().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_place_detection() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir(root.join("tpl")).unwrap();

        let config = RunConfig {
            template_dir: root.join("tpl"),
            output_dir: root.join("tpl").join(".").join("..").join("tpl"),
            remove_source: true,
            verbose: false,
        };
        assert!(config.is_in_place());

        let config = RunConfig { output_dir: root.join("out"), ..config };
        assert!(!config.is_in_place());
    }

    #[test]
    fn test_in_place_detection_without_existing_dirs() {
        let config = RunConfig {
            template_dir: PathBuf::from("missing/tpl"),
            output_dir: PathBuf::from("missing/tpl/"),
            remove_source: false,
            verbose: false,
        };
        assert!(config.is_in_place());
    }
}
