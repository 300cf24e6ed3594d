//! Template renderer used by the processing pipeline and the prompt engine.
//! Wraps MiniJinja behind a small trait so callers never depend on the engine.
use crate::error::Result;
use minijinja::{Environment, UndefinedBehavior};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// A field reference written with a leading dot at the start of a directive,
/// as in `{{ .name }}` or `{%- if .flag %}`.
static DOT_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\{\{-?|\{%-?\s*(?:if|elif|for\s+\w+\s+in)?)(\s*)\.([A-Za-z_])").unwrap()
});

/// Rewrites leading-dot field references into plain variable lookups, so
/// `{{ .name }}` renders like `{{ name }}`. Text outside directives is untouched.
pub fn normalize_field_access(template: &str) -> Cow<'_, str> {
    DOT_FIELD.replace_all(template, "${1}${2}${3}")
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer that keeps trailing newlines and rejects undefined variables.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the template has a syntax error or
    ///   references a variable missing from `context`
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        Ok(self.env.render_str(&normalize_field_access(template), context)?)
    }
}
