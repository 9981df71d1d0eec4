//! Reconstruction of a symbol's documentation block.

use std::path::PathBuf;

use mdoclet_config::{ConfigError, Doctype, RenderOptions, build_options};
use mdoclet_render::{CmarkEngine, DocRenderer, MarkupEngine, RenderError, escape_tag_like};

use crate::block::DocBlock;
use crate::templates::OutputTemplates;

/// Renders whole documentation blocks for the driver.
///
/// Construct once per tool invocation; options and templates live for the
/// process's duration. Rendering itself is stateless per call, so a driver
/// may share the doclet across symbols freely.
pub struct Doclet {
    renderer: DocRenderer,
    templates: Option<OutputTemplates>,
}

impl std::fmt::Debug for Doclet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Doclet")
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}

impl Doclet {
    /// Create a doclet with the default markup engine.
    ///
    /// `base_dir` is the include base directory if the driver supplied one;
    /// `overrides` are the user's ordered attribute-override tokens.
    /// Template extraction failure degrades to built-in output templates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a malformed override token.
    pub fn new<S: AsRef<str>>(
        base_dir: Option<PathBuf>,
        overrides: &[S],
    ) -> Result<Self, ConfigError> {
        let templates = OutputTemplates::create();
        let template_dir = templates
            .as_ref()
            .map(|t| t.template_dir().to_path_buf());
        let options = build_options(base_dir, template_dir, overrides)?;
        Ok(Self::with_engine(Box::new(CmarkEngine), templates, options))
    }

    /// Create a doclet around a specific engine and pre-built options.
    #[must_use]
    pub fn with_engine(
        engine: Box<dyn MarkupEngine>,
        templates: Option<OutputTemplates>,
        options: RenderOptions,
    ) -> Self {
        Self {
            renderer: DocRenderer::new(engine, options),
            templates,
        }
    }

    /// The options shared by every render call.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        self.renderer.options()
    }

    /// Render a symbol's documentation block into a single buffer.
    ///
    /// The description is rendered in block doctype after annotation-like
    /// tokens are escaped; each tag follows on its own line as
    /// `name <inline fragment>`, in the block's original tag order. The
    /// caller substitutes the buffer as the symbol's new doc source.
    ///
    /// # Errors
    ///
    /// Propagates the first [`RenderError`] from the engine; no partial
    /// output is returned.
    pub fn render_block(&self, block: &DocBlock) -> Result<String, RenderError> {
        tracing::debug!(tags = block.tags().len(), "rendering documentation block");

        let escaped = escape_tag_like(block.description());

        let mut buffer = String::new();
        buffer.push_str(&self.renderer.render(&escaped, Doctype::Block)?);
        buffer.push('\n');

        for tag in block.tags() {
            buffer.push_str(tag.name());
            buffer.push(' ');
            buffer.push_str(&self.renderer.render(tag.text(), Doctype::Inline)?);
            buffer.push('\n');
        }

        Ok(buffer)
    }

    /// Release the template directory.
    ///
    /// Idempotent; safe to call whether or not templates were ever
    /// extracted. Dropping the doclet has the same effect.
    pub fn cleanup(&mut self) {
        if let Some(templates) = self.templates.take() {
            templates.delete();
        }
    }
}
