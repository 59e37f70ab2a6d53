//! Error types for provisioning runs.
//!
//! This module defines [`ProvisionError`], the error type returned by every
//! fallible operation in the crate, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - Every variant is fatal to the run: nothing is retried or downgraded
//! - Install failures carry the profile name and the step that failed
//! - Collaborators (fetchers, extractors) return `anyhow::Error`, which the
//!   installer converts into a typed variant before it reaches the caller

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The stage of a package install that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStep {
    /// Opening or reading the archive stream.
    Download,
    /// Unpacking the archive into an install directory.
    Extract,
    /// Writing the completion record after extraction.
    Record,
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallStep::Download => f.write_str("download"),
            InstallStep::Extract => f.write_str("extract"),
            InstallStep::Record => f.write_str("record"),
        }
    }
}

/// Core error type for provisioning operations.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Fetching or extracting a profile's archive failed.
    #[error("Failed to install {profile} binaries ({step} step): {message}")]
    PackageFetchFailed {
        profile: String,
        step: InstallStep,
        message: String,
    },

    /// An install directory could not be created.
    #[error("Failed to create install directory {path} for {profile}: {source}")]
    DirectoryCreationFailed {
        profile: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build configuration document could not be persisted.
    #[error("Failed to write build configuration at {path}: {message}")]
    ConfigWriteFailed { path: PathBuf, message: String },

    /// The overrides file could not be parsed.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A profile or override is structurally invalid.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProvisionError {
    /// Name of the profile the error concerns, if any.
    pub fn profile(&self) -> Option<&str> {
        match self {
            ProvisionError::PackageFetchFailed { profile, .. }
            | ProvisionError::DirectoryCreationFailed { profile, .. } => Some(profile),
            _ => None,
        }
    }
}

/// Result type alias for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisionError>;
