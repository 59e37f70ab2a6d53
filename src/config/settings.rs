//! Run settings.
//!
//! Settings are layered, highest priority first:
//! 1. Explicit values from the command line (`with_*` builders)
//! 2. Environment variables (`NATIVE_DEPS_RELEASE_ROOT`, `NATIVE_DEPS_ASSET_HOST`)
//! 3. The application's `.native-deps.yml`
//! 4. Built-in defaults (`$HOME` as release root, the public asset bucket)

use super::overrides::Overrides;
use crate::error::Result;
use crate::install::{ExtractorKind, IdempotencyCheck};
use std::path::{Path, PathBuf};

/// Default location of the prebuilt archives.
pub const DEFAULT_ASSET_HOST: &str = "https://s3.amazonaws.com/chameleon-heroku-assets";

/// Dynamic linker search path variable.
pub const LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// Environment variable overriding the release root.
pub const RELEASE_ROOT_ENV: &str = "NATIVE_DEPS_RELEASE_ROOT";

/// Environment variable overriding the asset host.
pub const ASSET_HOST_ENV: &str = "NATIVE_DEPS_ASSET_HOST";

/// Resolved settings for one provisioning run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory the application runs from once released.
    pub release_root: PathBuf,

    /// Base URL archive names are joined onto.
    pub asset_host: String,

    /// Application-provided overrides.
    pub overrides: Overrides,

    /// How to decide a profile is already installed.
    pub idempotency: IdempotencyCheck,

    /// How archives are unpacked.
    pub extractor: ExtractorKind,

    /// Name of the aggregated library search path variable.
    pub library_path_var: String,
}

impl Settings {
    /// Resolve settings for an application root from the process environment.
    pub fn for_root(app_root: &Path) -> Result<Self> {
        Self::from_lookup(app_root, |key| std::env::var(key).ok())
    }

    /// Resolve settings using a custom environment lookup.
    pub fn from_lookup(app_root: &Path, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let overrides = Overrides::load_optional(app_root)?;

        let release_root = lookup(RELEASE_ROOT_ENV)
            .filter(|v| !v.is_empty())
            .or_else(|| lookup("HOME").filter(|v| !v.is_empty()))
            .map(PathBuf::from)
            .unwrap_or_else(|| app_root.to_path_buf());

        let asset_host = lookup(ASSET_HOST_ENV)
            .filter(|v| !v.is_empty())
            .or_else(|| overrides.asset_host.clone())
            .unwrap_or_else(|| DEFAULT_ASSET_HOST.to_string());

        Ok(Self {
            release_root,
            asset_host,
            overrides,
            idempotency: IdempotencyCheck::default(),
            extractor: ExtractorKind::default(),
            library_path_var: LIBRARY_PATH_VAR.to_string(),
        })
    }

    /// Override the release root.
    pub fn with_release_root(mut self, release_root: Option<PathBuf>) -> Self {
        if let Some(root) = release_root {
            self.release_root = root;
        }
        self
    }

    /// Override the asset host.
    pub fn with_asset_host(mut self, asset_host: Option<String>) -> Self {
        if let Some(host) = asset_host {
            self.asset_host = host;
        }
        self
    }

    /// Set the idempotency check.
    pub fn with_idempotency(mut self, idempotency: IdempotencyCheck) -> Self {
        self.idempotency = idempotency;
        self
    }

    /// Set the extractor.
    pub fn with_extractor(mut self, extractor: ExtractorKind) -> Self {
        self.extractor = extractor;
        self
    }

    /// Join an archive file name onto the asset host.
    pub fn asset_url(&self, archive: &str) -> String {
        format!("{}/{}", self.asset_host.trim_end_matches('/'), archive)
    }
}
