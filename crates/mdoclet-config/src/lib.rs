//! Configuration for the mdoclet rendering pipeline.
//!
//! Builds the [`RenderOptions`] record handed to the markup engine on every
//! render call: a fixed default [`AttributeTable`] layered with ordered
//! user overrides, a fixed safe mode and backend, and the optional base and
//! template directories supplied by external collaborators.
//!
//! Options are built once per invocation and are immutable afterwards.
//! The render doctype (block vs. inline) is *not* part of the options; it is
//! passed per call as [`Doctype`], so no shared state is mutated between
//! renders.

mod attrs;
mod options;

pub use attrs::{AttrValue, AttributeTable};
pub use options::{Backend, Doctype, RenderOptions, SafeMode, build_options};

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An attribute override token could not be parsed.
    #[error("malformed attribute override: {token:?} (non-empty key required)")]
    MalformedOverride {
        /// The offending token as supplied.
        token: String,
    },
}
