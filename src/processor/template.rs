use std::io::Read;
use std::path::Path;

use log::debug;

use super::{resolve_target_path, Processor};
use crate::error::Result;
use crate::renderer::TemplateRenderer;

/// Renders `*.tpl` files with the collected answers before passing them on.
///
/// Files without the template suffix are forwarded untouched.
pub struct TemplateProcessor<'a> {
    renderer: &'a dyn TemplateRenderer,
    context: &'a serde_json::Value,
    next: Box<dyn Processor + 'a>,
}

impl<'a> TemplateProcessor<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        context: &'a serde_json::Value,
        next: Box<dyn Processor + 'a>,
    ) -> Self {
        Self { renderer, context, next }
    }
}

impl Processor for TemplateProcessor<'_> {
    fn process_file(&self, path: &Path, content: &mut dyn Read) -> Result<()> {
        let (target, render) = resolve_target_path(path);
        if !render {
            return self.next.process_file(path, content);
        }

        debug!("Rendering template: {}", path.display());
        let mut template = String::new();
        content.read_to_string(&mut template)?;
        let rendered = self.renderer.render(&template, self.context)?;

        self.next.process_file(&target, &mut rendered.as_bytes())
    }
}
