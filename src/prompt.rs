//! User input and interaction handling.
//! Collects the answers that become the template context.

use crate::config::{Prompt, PromptKind};
use crate::error::Result;
use crate::renderer::TemplateRenderer;
use dialoguer::{Confirm, Input, Select};
use indexmap::IndexMap;
use log::debug;

/// Source of answers for prompt definitions.
pub trait Prompter {
    /// Asks a single question.
    ///
    /// # Arguments
    /// * `prompt` - Definition with its message already rendered
    /// * `default` - Default answer, already rendered for text prompts
    fn ask(&self, prompt: &Prompt, default: serde_json::Value) -> Result<serde_json::Value>;
}

/// Interactive terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, prompt: &Prompt, default: serde_json::Value) -> Result<serde_json::Value> {
        let message = if prompt.message.is_empty() { &prompt.name } else { &prompt.message };
        let answer = match prompt.kind {
            PromptKind::String => {
                let input: String = Input::new()
                    .with_prompt(message)
                    .default(default.as_str().unwrap_or_default().to_string())
                    .interact_text()?;
                serde_json::Value::String(input)
            }
            PromptKind::Bool => {
                let confirmed = Confirm::new()
                    .with_prompt(message)
                    .default(default.as_bool().unwrap_or(false))
                    .interact()?;
                serde_json::Value::Bool(confirmed)
            }
            PromptKind::Select => {
                let default_index = default
                    .as_str()
                    .and_then(|value| prompt.choices.iter().position(|choice| choice == value))
                    .unwrap_or(0);
                let selection = Select::new()
                    .with_prompt(message)
                    .default(default_index)
                    .items(&prompt.choices)
                    .interact()?;
                serde_json::Value::String(prompt.choices[selection].clone())
            }
        };
        Ok(answer)
    }
}

/// Computes the default answer of a prompt.
///
/// Text defaults may reference earlier answers and are rendered with them;
/// a default that fails to render falls back to the raw string.
pub fn get_default(
    prompt: &Prompt,
    context: &serde_json::Value,
    engine: &dyn TemplateRenderer,
) -> serde_json::Value {
    match (prompt.kind, &prompt.default) {
        (PromptKind::String, Some(serde_json::Value::String(s))) => {
            serde_json::Value::String(engine.render(s, context).unwrap_or_else(|_| s.clone()))
        }
        (PromptKind::String, Some(other)) => serde_json::Value::String(other.to_string()),
        (PromptKind::String, None) => serde_json::Value::String(String::new()),
        (PromptKind::Bool, default) => {
            serde_json::Value::Bool(default.as_ref().and_then(|v| v.as_bool()).unwrap_or(false))
        }
        (PromptKind::Select, default) => default
            .as_ref()
            .and_then(|v| v.as_str())
            .filter(|v| prompt.choices.iter().any(|choice| choice == v))
            .or_else(|| prompt.choices.first().map(String::as_str))
            .map(|v| serde_json::Value::String(v.to_string()))
            .unwrap_or(serde_json::Value::Null),
    }
}

/// Asks every prompt in declaration order and returns the answers as a JSON object.
///
/// Each message and default is rendered against the answers collected so far,
/// so later prompts can refer to earlier ones.
pub fn collect_answers(
    prompter: &dyn Prompter,
    engine: &dyn TemplateRenderer,
    prompts: &IndexMap<String, Prompt>,
) -> Result<serde_json::Value> {
    let mut answers = serde_json::Map::new();

    for (name, prompt) in prompts {
        let current_context = serde_json::Value::Object(answers.clone());
        let message = engine
            .render(&prompt.message, &current_context)
            .unwrap_or_else(|_| prompt.message.clone());
        let default = get_default(prompt, &current_context, engine);

        let rendered = Prompt { message, ..prompt.clone() };
        let answer = prompter.ask(&rendered, default)?;
        debug!("Answer for '{}': {}", name, answer);
        answers.insert(name.clone(), answer);
    }

    Ok(serde_json::Value::Object(answers))
}
