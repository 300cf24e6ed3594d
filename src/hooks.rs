//! Init script execution.
//! A template may ship `.scaffold-config/init`, executed once the project
//! has been generated.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::constants::{INIT_SCRIPT, METADATA_DIR};
use crate::error::{Error, Result};

/// Returns the path of the init script of a template, whether it exists or not.
pub fn get_init_script<P: AsRef<Path>>(template_dir: P) -> PathBuf {
    template_dir.as_ref().join(METADATA_DIR).join(INIT_SCRIPT)
}

/// Executes init scripts.
pub trait ScriptRunner {
    /// Runs `script` for the project generated in `output_dir`.
    ///
    /// # Arguments
    /// * `script` - Path to the executable script
    /// * `output_dir` - Generated project directory
    /// * `context` - Answers collected from the prompts
    fn run(&self, script: &Path, output_dir: &Path, context: &serde_json::Value) -> Result<()>;
}

/// Runs the script as a child process.
///
/// The output directory is passed as the only argument and used as working
/// directory; the answers are written to stdin as JSON.
#[derive(Debug, Default)]
pub struct ProcessScriptRunner;

impl ScriptRunner for ProcessScriptRunner {
    fn run(&self, script: &Path, output_dir: &Path, context: &serde_json::Value) -> Result<()> {
        // Relative paths would be resolved against the new working directory.
        let script = std::path::absolute(script)?;
        let output_dir = std::path::absolute(output_dir)?;
        debug!("Running init script {} in {}", script.display(), output_dir.display());

        let mut child = Command::new(&script)
            .arg(&output_dir)
            .current_dir(&output_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                Error::InitScriptError(format!("failed to start '{}': {}", script.display(), e))
            })?;

        // Write context to stdin
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(context.to_string().as_bytes()) {
                // The script is free to ignore its input.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                other => other?,
            }
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(Error::InitScriptError(format!(
                "'{}' failed with status: {}",
                script.display(),
                status
            )));
        }

        Ok(())
    }
}
