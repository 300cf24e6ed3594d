//! Error handling for the scaffolder.
//! Defines the error type shared by every stage of a run and the handler
//! invoked when a stage fails fatally.

use std::io;
use thiserror::Error;

/// Custom error types for scaffolder operations.
///
/// This enum represents all possible errors that can occur while generating
/// a project. It implements the standard Error trait through thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors that occur during template rendering
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors while parsing a YAML prompts file
    #[error("Failed to parse YAML: {0}.")]
    YamlParseError(#[from] serde_yaml::Error),

    /// Represents errors while parsing a JSON prompts file
    #[error("Failed to parse JSON: {0}.")]
    JsonParseError(#[from] serde_json::Error),

    /// Represents invalid patterns in the ignore file
    #[error("Invalid ignore pattern: {0}.")]
    GlobError(#[from] globset::Error),

    /// Represents errors while scanning the template tree
    #[error("Directory traversal error: {0}.")]
    WalkDirError(#[from] walkdir::Error),

    /// Represents errors raised by the interactive prompt
    #[error("Prompt error: {0}.")]
    DialoguerError(#[from] dialoguer::Error),

    /// Represents invalid command line input
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents missing or malformed prompt definitions
    #[error("Prompts error: {0}.")]
    PromptsError(String),

    /// Represents a failed init script invocation
    #[error("Init script error: {0}.")]
    InitScriptError(String),

    /// Wraps an error raised while a single file travelled through the pipeline
    #[error("Failed to process '{path}': {source}")]
    ProcessError {
        path: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attaches the relative path of the file being processed to an error.
    pub fn for_path(path: &std::path::Path, source: Error) -> Self {
        Error::ProcessError { path: path.display().to_string(), source: Box::new(source) }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Receives the fatal error that terminates a run.
///
/// The orchestrator calls [`FatalHandler::fatal`] exactly once per failed run and
/// executes nothing afterwards. Production code exits the process; tests record
/// the call instead.
pub trait FatalHandler {
    /// Handles a fatal condition described by a short `label` and its cause.
    fn fatal(&self, label: &str, err: &Error);
}

/// Default fatal handler that prints the error and exits the program.
///
/// # Behavior
/// Prints `label: error` to stderr and exits with status code 1
#[derive(Debug, Default)]
pub struct ExitOnFatal;

impl FatalHandler for ExitOnFatal {
    fn fatal(&self, label: &str, err: &Error) {
        eprintln!("{label}: {err}");
        std::process::exit(1);
    }
}
