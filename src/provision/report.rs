//! Run summaries.

use crate::build_config::ConfigWriteOutcome;
use crate::environment::EnvironmentBundle;
use crate::install::InstallationOutcome;
use serde::Serialize;
use std::path::PathBuf;

/// Everything a provisioning run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub app_root: PathBuf,
    /// Active profile names, in registry order.
    pub active: Vec<String>,
    pub outcomes: Vec<InstallationOutcome>,
    pub environment: EnvironmentBundle,
    /// Absent when no profile was active.
    pub build_config: Option<ConfigWriteOutcome>,
}

impl ProvisionReport {
    /// Profiles whose archive was fetched this run.
    pub fn installed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.attempted && o.succeeded)
            .map(|o| o.profile.as_str())
            .collect()
    }

    /// Profiles skipped because a previous install was found.
    pub fn skipped(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.skipped_because_already_installed)
            .map(|o| o.profile.as_str())
            .collect()
    }

    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        if self.active.is_empty() {
            return "No native dependencies requested".to_string();
        }

        let list = |names: Vec<&str>| {
            if names.is_empty() {
                "none".to_string()
            } else {
                names.join(", ")
            }
        };

        format!(
            "Found {}; installed {}; skipped {}",
            self.active.join(", "),
            list(self.installed()),
            list(self.skipped())
        )
    }
}
