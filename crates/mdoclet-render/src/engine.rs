//! The markup engine seam and the renderer wrapping it.

use mdoclet_config::{Doctype, RenderOptions};

use crate::sanitize;

/// Rendering error.
///
/// Raised by a [`MarkupEngine`] when it rejects or fails on a given text.
/// Never recovered inside the pipeline; the driver decides whether to abort
/// the documentation pass or skip the current symbol.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The engine rejected the markup source.
    #[error("markup engine error: {0}")]
    Engine(String),
}

/// Converts lightweight markup into rendered output.
///
/// Implementations receive the shared immutable [`RenderOptions`] plus the
/// per-call [`Doctype`]; they must not hold render-mode state between calls.
pub trait MarkupEngine: Send + Sync {
    /// Convert `source` to the backend's output format.
    fn convert(
        &self,
        source: &str,
        options: &RenderOptions,
        doctype: Doctype,
    ) -> Result<String, RenderError>;
}

/// Renders sanitized doc-comment text through a markup engine.
///
/// Owns the engine and the options record built once at startup. Each call
/// is an independent request: the doctype is an argument, nothing on the
/// renderer is mutated.
pub struct DocRenderer {
    engine: Box<dyn MarkupEngine>,
    options: RenderOptions,
}

impl DocRenderer {
    /// Create a renderer from an engine and pre-built options.
    #[must_use]
    pub fn new(engine: Box<dyn MarkupEngine>, options: RenderOptions) -> Self {
        Self { engine, options }
    }

    /// The options record shared by all render calls.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Sanitize `text` and render it with the given doctype.
    ///
    /// # Errors
    ///
    /// Propagates any [`RenderError`] from the engine unmodified.
    pub fn render(&self, text: &str, doctype: Doctype) -> Result<String, RenderError> {
        self.engine.convert(&sanitize(text), &self.options, doctype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdoclet_config::build_options;
    use pretty_assertions::assert_eq;

    const NO_OVERRIDES: &[&str] = &[];

    /// Engine stub that records what it was invoked with.
    struct RecordingEngine;

    impl MarkupEngine for RecordingEngine {
        fn convert(
            &self,
            source: &str,
            _options: &RenderOptions,
            doctype: Doctype,
        ) -> Result<String, RenderError> {
            let mode = match doctype {
                Doctype::Block => "block",
                Doctype::Inline => "inline",
            };
            Ok(format!("[{mode}] {source}"))
        }
    }

    struct FailingEngine;

    impl MarkupEngine for FailingEngine {
        fn convert(
            &self,
            _source: &str,
            _options: &RenderOptions,
            _doctype: Doctype,
        ) -> Result<String, RenderError> {
            Err(RenderError::Engine("syntax error".to_owned()))
        }
    }

    fn renderer(engine: Box<dyn MarkupEngine>) -> DocRenderer {
        DocRenderer::new(engine, build_options(None, None, NO_OVERRIDES).unwrap())
    }

    #[test]
    fn test_render_sanitizes_before_engine() {
        let renderer = renderer(Box::new(RecordingEngine));
        let out = renderer.render("  {at}x  ", Doctype::Block).unwrap();
        assert_eq!(out, "[block] &#64;x");
    }

    #[test]
    fn test_doctype_is_per_call() {
        let renderer = renderer(Box::new(RecordingEngine));
        assert_eq!(
            renderer.render("a", Doctype::Block).unwrap(),
            "[block] a"
        );
        assert_eq!(
            renderer.render("b", Doctype::Inline).unwrap(),
            "[inline] b"
        );
    }

    #[test]
    fn test_no_residual_mode_state() {
        // An inline render in between must not affect later block renders,
        // and the shared options are bitwise-identical throughout.
        let renderer = renderer(Box::new(RecordingEngine));
        let options_before = renderer.options().clone();

        let first = renderer.render("text", Doctype::Block).unwrap();
        renderer.render("other", Doctype::Inline).unwrap();
        let second = renderer.render("text", Doctype::Block).unwrap();

        assert_eq!(first, second);
        assert_eq!(renderer.options(), &options_before);
    }

    #[test]
    fn test_engine_error_propagates() {
        let renderer = renderer(Box::new(FailingEngine));
        let err = renderer.render("text", Doctype::Block).unwrap_err();
        assert!(err.to_string().contains("syntax error"));
    }
}
