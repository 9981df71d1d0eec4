//! Text sanitization and markup rendering for mdoclet.
//!
//! This crate holds the middle of the pipeline:
//!
//! - [`sanitize`]: the fixed-order text cleanup undoing artifacts left in
//!   comment text by the host doc parser
//! - [`escape_tag_like`]: the heuristic that shields annotation-like
//!   `@Tokens` from the host's tag recognition
//! - [`MarkupEngine`]: the seam to the markup engine, with [`CmarkEngine`]
//!   as the pulldown-cmark backed implementation
//! - [`DocRenderer`]: sanitizes input and invokes the engine with a
//!   per-call [`Doctype`](mdoclet_config::Doctype)
//!
//! # Example
//!
//! ```
//! use mdoclet_config::{Doctype, build_options};
//! use mdoclet_render::{CmarkEngine, DocRenderer};
//!
//! let options = build_options::<&str>(None, None, &[]).unwrap();
//! let renderer = DocRenderer::new(Box::new(CmarkEngine), options);
//! let html = renderer.render("Does *something*.", Doctype::Inline).unwrap();
//! assert_eq!(html, "Does <em>something</em>.");
//! ```

mod cmark;
mod engine;
mod escape;
mod sanitize;
mod util;

pub use cmark::CmarkEngine;
pub use engine::{DocRenderer, MarkupEngine, RenderError};
pub use escape::escape_tag_like;
pub use sanitize::{SanitizeStep, sanitize, step_names};
pub use util::escape_html;
