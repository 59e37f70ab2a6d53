//! Marker-file trigger detection.

use std::path::Path;

use super::ActivationSet;
use crate::profile::ProfileRegistry;

/// Detects which profiles an application requests.
///
/// A profile is active when its trigger marker exists under the
/// application root. Detection is a read-only filesystem query.
#[derive(Debug, Default, Clone, Copy)]
pub struct TriggerDetector;

impl TriggerDetector {
    pub fn new() -> Self {
        Self
    }

    /// Report the active profiles, in registry order.
    ///
    /// A missing or unreadable root yields an empty set.
    pub fn detect(&self, app_root: &Path, registry: &ProfileRegistry) -> ActivationSet {
        if !app_root.is_dir() {
            tracing::debug!("Application root {} is not a directory", app_root.display());
            return ActivationSet::default();
        }

        let active = registry
            .iter()
            .filter(|profile| marker_exists(app_root, &profile.trigger_marker))
            .cloned()
            .collect();

        ActivationSet::new(active)
    }
}

/// Check if a marker exists relative to the application root.
pub fn marker_exists(app_root: &Path, marker: &str) -> bool {
    app_root.join(marker).exists()
}
