//! Prompt definitions of a template.
//! This module locates and parses the prompts file stored in the scaffold
//! metadata directory.
//!
//! ```yaml
//! prompts:
//!   - name: project_name
//!     type: string
//!     message: Project name
//!     default: my-project
//!   - name: license
//!     type: select
//!     message: License
//!     choices: [MIT, Apache-2.0]
//! ```

use crate::constants::{METADATA_DIR, PROMPT_FILES};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Kind of answer a prompt collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    /// Free text
    #[default]
    String,
    /// Yes/no question
    #[serde(alias = "boolean")]
    Bool,
    /// One value out of `choices`
    Select,
}

/// A single question asked before generation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prompt {
    /// Variable name the answer is stored under
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: PromptKind,
    /// Text shown to the user; rendered against previous answers
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub choices: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PromptsFile {
    #[serde(default)]
    prompts: Vec<Prompt>,
}

/// Locates the prompts file of a template, trying every supported name.
///
/// # Errors
/// * `Error::PromptsError` if none of the files exists
pub fn find_prompts_file<P: AsRef<Path>>(template_root: P) -> Result<PathBuf> {
    let metadata_dir = template_root.as_ref().join(METADATA_DIR);
    PROMPT_FILES
        .iter()
        .map(|file| metadata_dir.join(file))
        .find(|path| path.is_file())
        .ok_or_else(|| {
            Error::PromptsError(format!(
                "no prompts file found in '{}' (tried: {})",
                metadata_dir.display(),
                PROMPT_FILES.join(", ")
            ))
        })
}

/// Parses prompt definitions, keyed by variable name in declaration order.
///
/// JSON is used when `is_json` is set, YAML otherwise.
///
/// # Errors
/// * `Error::YamlParseError` / `Error::JsonParseError` on malformed content
/// * `Error::PromptsError` on empty or duplicate names and on `select`
///   prompts without choices
pub fn parse_prompts(content: &str, is_json: bool) -> Result<IndexMap<String, Prompt>> {
    let file: PromptsFile = if is_json {
        serde_json::from_str(content)?
    } else if content.trim().is_empty() {
        PromptsFile { prompts: Vec::new() }
    } else {
        serde_yaml::from_str(content)?
    };

    let mut prompts = IndexMap::with_capacity(file.prompts.len());
    for prompt in file.prompts {
        if prompt.name.trim().is_empty() {
            return Err(Error::PromptsError("prompt without a name".to_string()));
        }
        if prompt.kind == PromptKind::Select && prompt.choices.is_empty() {
            return Err(Error::PromptsError(format!(
                "prompt '{}' of type select has no choices",
                prompt.name
            )));
        }
        if prompts.contains_key(&prompt.name) {
            return Err(Error::PromptsError(format!("duplicate prompt '{}'", prompt.name)));
        }
        prompts.insert(prompt.name.clone(), prompt);
    }

    Ok(prompts)
}

/// Loads the prompt definitions of the template rooted at `template_root`.
pub fn load_prompts<P: AsRef<Path>>(template_root: P) -> Result<IndexMap<String, Prompt>> {
    let path = find_prompts_file(template_root)?;
    debug!("Loading prompts from {}", path.display());
    let content = std::fs::read_to_string(&path)?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    parse_prompts(&content, is_json)
}
