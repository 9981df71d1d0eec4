//! Custom output templates, extracted to a temporary directory.
//!
//! The bundled templates customize how the markup engine's templating layer
//! wraps rendered fragments. Extraction failure is never fatal: the run
//! continues without custom templates (the engine falls back to built-in
//! output), which is why [`OutputTemplates::create`] returns an `Option`
//! rather than a `Result`.

use std::io;
use std::path::Path;

use tempfile::TempDir;

/// Bundled template files written into the temporary directory.
const TEMPLATES: &[(&str, &str)] = &[
    ("block.html", include_str!("../templates/block.html")),
    ("inline.html", include_str!("../templates/inline.html")),
];

/// Temporary directory holding the extracted output templates.
///
/// Single-owner lifetime: created once at startup, removed by
/// [`delete`](Self::delete) at shutdown. Dropping the value also removes the
/// directory, so early termination cannot leak it.
#[derive(Debug)]
pub struct OutputTemplates {
    dir: TempDir,
}

impl OutputTemplates {
    /// Extract the bundled templates.
    ///
    /// Returns `None` on failure, after logging the error; callers proceed
    /// in degraded mode without custom templates.
    #[must_use]
    pub fn create() -> Option<Self> {
        match Self::extract() {
            Ok(templates) => Some(templates),
            Err(e) => {
                tracing::warn!(error = %e, "failed to extract output templates, continuing without them");
                None
            }
        }
    }

    fn extract() -> io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("mdoclet-templates-")
            .tempdir()?;
        for (name, contents) in TEMPLATES {
            std::fs::write(dir.path().join(name), contents)?;
        }
        Ok(Self { dir })
    }

    /// Path of the extracted template directory.
    #[must_use]
    pub fn template_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the template directory eagerly, logging any failure.
    pub fn delete(self) {
        if let Err(e) = self.dir.close() {
            tracing::warn!(error = %e, "failed to remove template directory");
        }
    }
}
