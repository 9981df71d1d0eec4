//! Render options handed to the markup engine.

use std::path::{Path, PathBuf};

use crate::{AttributeTable, ConfigError};

/// Restriction level limiting what the markup engine may do.
///
/// The pipeline always builds options at [`SafeMode::Safe`]; there is no way
/// to escalate an existing options record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SafeMode {
    /// Sandboxed: raw HTML is escaped, no file access from markup.
    Safe,
    /// Unrestricted. Never produced by [`build_options`]; engines may
    /// support it for trusted input outside this pipeline.
    Unsafe,
}

/// Output backend identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Backend {
    /// Semantic HTML5.
    Html5,
}

/// Render doctype, passed per call.
///
/// Block renders a full document body; inline renders an embeddable
/// fragment with no enclosing wrapper. Keeping this out of
/// [`RenderOptions`] means no render call can affect the mode of another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Doctype {
    /// Full document body for a description.
    Block,
    /// Embeddable fragment for tag text.
    Inline,
}

/// Fixed template-engine identifier in the engine wire contract.
const TEMPLATE_ENGINE: &str = "minijinja";

/// Configuration record passed to every markup engine invocation.
///
/// Built once per tool invocation via [`build_options`] and immutable
/// afterwards; the same instance is reused by every render call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderOptions {
    safe_mode: SafeMode,
    backend: Backend,
    template_engine: String,
    base_dir: Option<PathBuf>,
    template_dir: Option<PathBuf>,
    attributes: AttributeTable,
}

impl RenderOptions {
    /// Sandbox level. Always [`SafeMode::Safe`] for pipeline-built options.
    #[must_use]
    pub fn safe_mode(&self) -> SafeMode {
        self.safe_mode
    }

    /// Output backend.
    #[must_use]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Template-engine identifier.
    #[must_use]
    pub fn template_engine(&self) -> &str {
        &self.template_engine
    }

    /// Base directory for resolving include directives, if the driver
    /// supplied one.
    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Directory holding custom output templates, if one was produced.
    #[must_use]
    pub fn template_dir(&self) -> Option<&Path> {
        self.template_dir.as_deref()
    }

    /// Attribute table.
    #[must_use]
    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }
}

/// Assemble the options record for the markup engine.
///
/// Layers the fixed default attributes with `overrides` in the order given
/// (user overrides win and may add new keys). `base_dir` and `template_dir`
/// are set only when the respective collaborator supplied one.
///
/// # Errors
///
/// Returns [`ConfigError::MalformedOverride`] for an override token with an
/// empty key.
pub fn build_options<S: AsRef<str>>(
    base_dir: Option<PathBuf>,
    template_dir: Option<PathBuf>,
    overrides: &[S],
) -> Result<RenderOptions, ConfigError> {
    let mut attributes = AttributeTable::defaults();
    attributes.apply_overrides(overrides)?;

    Ok(RenderOptions {
        safe_mode: SafeMode::Safe,
        backend: Backend::Html5,
        template_engine: TEMPLATE_ENGINE.to_owned(),
        base_dir,
        template_dir,
        attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NO_OVERRIDES: &[&str] = &[];

    #[test]
    fn test_build_options_fixed_fields() {
        let options = build_options(None, None, NO_OVERRIDES).unwrap();
        assert_eq!(options.safe_mode(), SafeMode::Safe);
        assert_eq!(options.backend(), Backend::Html5);
        assert_eq!(options.template_engine(), "minijinja");
        assert!(options.base_dir().is_none());
        assert!(options.template_dir().is_none());
    }

    #[test]
    fn test_build_options_defaults_applied() {
        let options = build_options(None, None, NO_OVERRIDES).unwrap();
        assert_eq!(options.attributes().text("at"), Some("&#64;"));
        assert!(options.attributes().is_flag("notitle"));
    }

    #[test]
    fn test_build_options_directories_passed_through() {
        let options = build_options(
            Some(PathBuf::from("/src/include")),
            Some(PathBuf::from("/tmp/templates")),
            NO_OVERRIDES,
        )
        .unwrap();
        assert_eq!(options.base_dir(), Some(Path::new("/src/include")));
        assert_eq!(options.template_dir(), Some(Path::new("/tmp/templates")));
    }

    #[test]
    fn test_build_options_overrides_win() {
        let options = build_options(None, None, &["at=@@", "custom=yes"]).unwrap();
        assert_eq!(options.attributes().text("at"), Some("@@"));
        assert_eq!(options.attributes().text("custom"), Some("yes"));
    }

    #[test]
    fn test_build_options_malformed_override_fails() {
        let err = build_options(None, None, &["=broken"]).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedOverride { .. }));
    }
}
