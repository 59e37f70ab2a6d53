//! Build configuration document handling.
//!
//! [`BuildConfigWriter`] records each active profile's build flag in the
//! document the native extension build tool reads, so the compiler finds the
//! installed headers and libraries. Entries accumulate across runs.

pub mod document;

pub use document::{header, BuildConfigDocument, BUILD_CONFIG_PATH};

use crate::detection::ActivationSet;
use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What a write pass changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWriteOutcome {
    pub path: PathBuf,
    /// The document did not exist before this pass.
    pub created: bool,
    /// Keys added in this pass, in order.
    pub added: Vec<String>,
}

/// Creates or extends the build configuration document.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildConfigWriter;

impl BuildConfigWriter {
    pub fn new() -> Self {
        Self
    }

    /// Add a flag entry for every active profile that lacks one.
    ///
    /// A new document starts with the default header. Existing keys are
    /// left untouched, and an unchanged document is not rewritten.
    ///
    /// # Errors
    ///
    /// Returns `ConfigWriteFailed` naming the path on any I/O failure.
    pub fn write_or_append(
        &self,
        path: &Path,
        active: &ActivationSet,
    ) -> Result<ConfigWriteOutcome> {
        let mut document = BuildConfigDocument::load(path)?;
        let created = !document.exists();
        let mut added = Vec::new();

        for profile in active {
            let Some((key, value)) = profile.rendered_build_flag() else {
                continue;
            };

            if document.insert_missing(&key, &value) {
                tracing::debug!("Adding {} to {}", key, path.display());
                added.push(key);
            } else {
                tracing::debug!("{} already present in {}", key, path.display());
            }
        }

        if created || !added.is_empty() {
            document.save()?;
        }

        Ok(ConfigWriteOutcome {
            path: path.to_path_buf(),
            created,
            added,
        })
    }
}
