//! Run orchestration.
//!
//! A run goes through configuration, prompting, generation, the init script
//! and cleanup. The first failing stage is reported to the [`FatalHandler`]
//! and nothing after it executes.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::cli::{parse_args, RunConfig};
use crate::config::load_prompts;
use crate::constants::METADATA_DIR;
use crate::error::{Error, FatalHandler, Result};
use crate::filter::{ExcludeDir, Filter, FilterExt};
use crate::hooks::{get_init_script, ScriptRunner};
use crate::ignore::parse_ignore_file;
use crate::logger::init_logger;
use crate::processor::{is_template_path, TemplateProcessor, WriteProcessor};
use crate::prompt::{collect_answers, Prompter};
use crate::provider::{FileProvider, FileSystemProvider};
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};

pub const CONFIG_ERROR: &str = "Command line options error";
pub const PROMPTS_ERROR: &str = "Unable to parse prompts file";
pub const PROCESSING_ERROR: &str = "Error while processing files";
pub const INIT_SCRIPT_ERROR: &str = "Error while executing init script";
pub const CLEANUP_ERROR: &str = "Error while removing source";

/// Generates projects from template directories.
pub struct Scaffolder<'a> {
    prompter: &'a dyn Prompter,
    runner: &'a dyn ScriptRunner,
    fatal: &'a dyn FatalHandler,
    engine: MiniJinjaRenderer,
}

impl<'a> Scaffolder<'a> {
    pub fn new(
        prompter: &'a dyn Prompter,
        runner: &'a dyn ScriptRunner,
        fatal: &'a dyn FatalHandler,
    ) -> Self {
        Self { prompter, runner, fatal, engine: MiniJinjaRenderer::new() }
    }

    /// Executes a full run from raw command line arguments, program name included.
    ///
    /// Returns normally on success and right after the fatal handler on failure.
    pub fn run<I, T>(&self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let config = match parse_args(args) {
            Ok(config) => config,
            Err(e) => return self.fatal.fatal(CONFIG_ERROR, &e),
        };
        init_logger(config.verbose);
        self.run_with_config(&config);
    }

    /// Executes every stage after configuration parsing.
    pub fn run_with_config(&self, config: &RunConfig) {
        let answers = match self.collect(config) {
            Ok(answers) => answers,
            Err(e) => return self.fatal.fatal(PROMPTS_ERROR, &e),
        };

        if let Err(e) = self.generate(config, &answers) {
            return self.fatal.fatal(PROCESSING_ERROR, &e);
        }

        if let Err(e) = self.post_generate(config, &answers) {
            return self.fatal.fatal(INIT_SCRIPT_ERROR, &e);
        }

        if config.remove_source {
            if let Err(e) = remove_source(config) {
                return self.fatal.fatal(CLEANUP_ERROR, &e);
            }
        }

        info!("Project generated in {}.", config.output_dir.display());
    }

    fn collect(&self, config: &RunConfig) -> Result<serde_json::Value> {
        let prompts = load_prompts(&config.template_dir)?;
        collect_answers(self.prompter, &self.engine, &prompts)
    }

    fn generate(&self, config: &RunConfig, answers: &serde_json::Value) -> Result<()> {
        info!(
            "Generating {} from {}",
            config.output_dir.display(),
            config.template_dir.display()
        );
        fs::create_dir_all(&config.output_dir)?;

        let filter = generation_filter(config)?;
        let chain = TemplateProcessor::new(
            &self.engine as &dyn TemplateRenderer,
            answers,
            Box::new(
                WriteProcessor::new(&config.output_dir).with_source_root(&config.template_dir),
            ),
        );
        let mut provider = FileSystemProvider::new(&config.template_dir);
        provider.provide_files(&filter, &chain)
    }

    fn post_generate(&self, config: &RunConfig, answers: &serde_json::Value) -> Result<()> {
        let script = get_init_script(&config.template_dir);
        if !script.is_file() {
            debug!("No init script at {}", script.display());
            return Ok(());
        }
        info!("Running init script {}", script.display());
        self.runner.run(&script, &config.output_dir, answers)
    }
}

/// Builds the filter of a generation run: the metadata directory, the
/// template's ignore patterns and an output directory nested in the template
/// are never copied.
fn generation_filter(config: &RunConfig) -> Result<impl Filter> {
    let ignored = parse_ignore_file(&config.template_dir)?;
    let nested_output = nested_output_dir(config);
    let not_output = move |path: &Path| match &nested_output {
        Some(output) => !path.starts_with(output),
        None => true,
    };
    Ok(ExcludeDir::new(METADATA_DIR).and(ignored).and(not_output))
}

fn nested_output_dir(config: &RunConfig) -> Option<PathBuf> {
    if config.is_in_place() {
        return None;
    }
    let template = config.template_dir.canonicalize().ok()?;
    let output = config.output_dir.canonicalize().ok()?;
    output.strip_prefix(&template).ok().map(Path::to_path_buf)
}

/// Removes the consumed scaffold.
///
/// The metadata directory is always removed. When the project was generated
/// in place the rendered `*.tpl` sources are removed too; a separate template
/// directory is otherwise left untouched.
pub fn remove_source(config: &RunConfig) -> Result<()> {
    // Built first: the ignore patterns live in the metadata directory.
    let filter = generation_filter(config)?;

    let metadata_dir = config.template_dir.join(METADATA_DIR);
    match fs::remove_dir_all(&metadata_dir) {
        Ok(()) => debug!("Removed {}", metadata_dir.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    if !config.is_in_place() {
        return Ok(());
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(&config.template_dir) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(&config.template_dir) else {
            continue;
        };
        if entry.file_type().is_file() && is_template_path(relative) && filter.accept(relative) {
            sources.push(entry.into_path());
        }
    }
    for source in sources {
        debug!("Removing template source {}", source.display());
        fs::remove_file(&source).map_err(Error::IoError)?;
    }
    Ok(())
}
