//! Package installation.
//!
//! Installs one profile's archive into its build-time and release-time
//! directories. Installation is skipped when the release-time directory
//! already holds a previous install.

use super::extract::ArchiveExtractor;
use super::fetch::ArchiveFetcher;
use crate::error::{InstallStep, ProvisionError, Result};
use crate::profile::DependencyProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File written into the release directory after a successful install.
pub const INSTALL_MARKER: &str = ".native-deps-installed";

/// How the installer decides a profile is already installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdempotencyCheck {
    /// The release directory contains any entry.
    #[default]
    NonEmptyDirectory,
    /// The release directory contains [`INSTALL_MARKER`].
    CompletionMarker,
}

/// Result of installing one profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallationOutcome {
    pub profile: String,
    pub attempted: bool,
    pub succeeded: bool,
    pub skipped_because_already_installed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl InstallationOutcome {
    /// Archive fetched and extracted.
    pub fn installed(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            attempted: true,
            succeeded: true,
            ..Default::default()
        }
    }

    /// Previous install found, nothing fetched.
    pub fn skipped(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            attempted: false,
            succeeded: true,
            skipped_because_already_installed: true,
            error_detail: None,
        }
    }

    /// Install attempted and failed.
    pub fn failed(profile: &str, error: &ProvisionError) -> Self {
        Self {
            profile: profile.to_string(),
            attempted: true,
            succeeded: false,
            skipped_because_already_installed: false,
            error_detail: Some(error.to_string()),
        }
    }
}

/// Contents of [`INSTALL_MARKER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallRecord {
    pub profile: String,
    pub archive_url: String,
    pub installed_at: DateTime<Utc>,
}

/// Installs profile archives using pluggable fetch and extract steps.
pub struct PackageInstaller {
    fetcher: Box<dyn ArchiveFetcher>,
    extractor: Box<dyn ArchiveExtractor>,
    idempotency: IdempotencyCheck,
}

impl PackageInstaller {
    pub fn new(fetcher: Box<dyn ArchiveFetcher>, extractor: Box<dyn ArchiveExtractor>) -> Self {
        Self {
            fetcher,
            extractor,
            idempotency: IdempotencyCheck::default(),
        }
    }

    /// Set the idempotency check.
    pub fn with_idempotency(mut self, idempotency: IdempotencyCheck) -> Self {
        self.idempotency = idempotency;
        self
    }

    /// Install a profile.
    ///
    /// # Errors
    ///
    /// - `DirectoryCreationFailed` if an install directory cannot be created
    /// - `PackageFetchFailed` if the download or extraction fails
    ///
    /// A partial extraction is left in place.
    pub fn install(&self, profile: &DependencyProfile) -> Result<InstallationOutcome> {
        let dirs = install_dirs(profile);

        for dir in &dirs {
            fs::create_dir_all(dir).map_err(|source| ProvisionError::DirectoryCreationFailed {
                profile: profile.name.clone(),
                path: dir.clone(),
                source,
            })?;
        }

        if self.is_installed(profile) {
            tracing::info!(
                "{} already installed in {}, skipping",
                profile.name,
                profile.release_install_dir.display()
            );
            return Ok(InstallationOutcome::skipped(&profile.name));
        }

        for dir in &dirs {
            tracing::info!(
                "Installing {} from {} into {}",
                profile.name,
                profile.archive_url,
                dir.display()
            );
            self.fetch_into(profile, dir)?;
        }

        write_record(profile)?;
        tracing::info!("Done installing {} binaries", profile.name);

        Ok(InstallationOutcome::installed(&profile.name))
    }

    /// Check whether the profile's release directory holds a previous install.
    pub fn is_installed(&self, profile: &DependencyProfile) -> bool {
        let dir = &profile.release_install_dir;
        match self.idempotency {
            IdempotencyCheck::NonEmptyDirectory => is_non_empty(dir),
            IdempotencyCheck::CompletionMarker => dir.join(INSTALL_MARKER).is_file(),
        }
    }

    fn fetch_into(&self, profile: &DependencyProfile, dir: &Path) -> Result<()> {
        let stream = self
            .fetcher
            .open(&profile.archive_url)
            .map_err(|e| ProvisionError::PackageFetchFailed {
                profile: profile.name.clone(),
                step: InstallStep::Download,
                message: format!("{:#}", e),
            })?;

        self.extractor
            .extract(stream, dir)
            .map_err(|e| ProvisionError::PackageFetchFailed {
                profile: profile.name.clone(),
                step: InstallStep::Extract,
                message: format!("{:#}", e),
            })
    }
}

/// Distinct install directories, build-time first.
fn install_dirs(profile: &DependencyProfile) -> Vec<PathBuf> {
    let mut dirs = vec![profile.build_time_install_dir.clone()];
    if profile.release_install_dir != profile.build_time_install_dir {
        dirs.push(profile.release_install_dir.clone());
    }
    dirs
}

fn is_non_empty(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

fn write_record(profile: &DependencyProfile) -> Result<()> {
    let path = profile.release_install_dir.join(INSTALL_MARKER);
    let record = InstallRecord {
        profile: profile.name.clone(),
        archive_url: profile.archive_url.clone(),
        installed_at: Utc::now(),
    };

    serde_yaml::to_string(&record)
        .map_err(anyhow::Error::from)
        .and_then(|content| fs::write(&path, content).map_err(anyhow::Error::from))
        .map_err(|e| ProvisionError::PackageFetchFailed {
            profile: profile.name.clone(),
            step: InstallStep::Record,
            message: format!("Failed to write {}: {:#}", path.display(), e),
        })
}

/// Read the install record for a profile, if one was written.
pub fn read_record(profile: &DependencyProfile) -> Option<InstallRecord> {
    let content = fs::read_to_string(profile.release_install_dir.join(INSTALL_MARKER)).ok()?;
    serde_yaml::from_str(&content).ok()
}
