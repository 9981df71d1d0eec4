//! Pre-renders markdown doc-comment blocks for a documentation driver.
//!
//! A documentation driver walks symbols and hands each symbol's raw comment
//! block — description text plus an ordered list of metadata tags — to the
//! [`Doclet`], which returns a single buffer of rendered HTML fragments. The
//! driver substitutes that buffer as the symbol's new doc source, so later
//! stages treat it as already-rendered content.
//!
//! Per block, the doclet:
//! 1. escapes annotation-like `@Tokens` in the description,
//! 2. renders the description in block doctype,
//! 3. renders each tag's text in inline doctype, tag order preserved,
//! 4. concatenates everything into one buffer.
//!
//! # Example
//!
//! ```
//! use mdoclet::{DocBlock, DocTag, Doclet};
//!
//! let doclet = Doclet::new::<&str>(None, &[]).unwrap();
//! let block = DocBlock::new("Does {at}something.")
//!     .with_tag(DocTag::new("author", "Jane"));
//!
//! let buffer = doclet.render_block(&block).unwrap();
//! assert_eq!(buffer, "<p>Does &#64;something.</p>\nauthor Jane\n");
//! ```

mod block;
mod doclet;
mod templates;

pub use block::{DocBlock, DocTag};
pub use doclet::Doclet;
pub use templates::OutputTemplates;

pub use mdoclet_config::{ConfigError, Doctype, RenderOptions, build_options};
pub use mdoclet_render::{CmarkEngine, MarkupEngine, RenderError};
