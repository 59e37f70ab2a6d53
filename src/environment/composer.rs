//! Environment composition across active profiles.

use super::EnvironmentBundle;
use crate::config::LIBRARY_PATH_VAR;
use crate::detection::ActivationSet;

/// Folds active profiles into an [`EnvironmentBundle`].
#[derive(Debug, Clone)]
pub struct EnvironmentComposer {
    library_path_var: String,
    ambient_library_path: Option<String>,
}

impl Default for EnvironmentComposer {
    fn default() -> Self {
        Self::new(LIBRARY_PATH_VAR, None)
    }
}

impl EnvironmentComposer {
    /// Create a composer with an explicit ambient library path value.
    pub fn new(library_path_var: &str, ambient_library_path: Option<String>) -> Self {
        Self {
            library_path_var: library_path_var.to_string(),
            ambient_library_path,
        }
    }

    /// Create a composer reading the ambient library path from the process.
    pub fn from_process_env(library_path_var: &str) -> Self {
        Self::new(library_path_var, std::env::var(library_path_var).ok())
    }

    /// Compose the environment for the active profiles.
    ///
    /// Profiles are folded in registration order and later profiles win on
    /// repeated names. Library path segments from every profile are joined
    /// with `:` and appended after the ambient value, skipping segments the
    /// ambient value already lists. An empty set yields an empty bundle.
    pub fn compose(&self, active: &ActivationSet) -> EnvironmentBundle {
        let mut bundle = EnvironmentBundle::new();
        let mut segments: Vec<String> = Vec::new();

        for profile in active {
            for (name, value) in profile.environment() {
                bundle.set(&name, value);
            }
            segments.extend(profile.library_paths());
        }

        if !segments.is_empty() {
            let mut parts: Vec<String> = self
                .ambient_library_path
                .iter()
                .flat_map(|ambient| ambient.split(':'))
                .filter(|part| !part.is_empty())
                .map(String::from)
                .collect();
            let ambient_len = parts.len();

            for segment in segments {
                // already exported by an earlier run
                if !parts[..ambient_len].contains(&segment) {
                    parts.push(segment);
                }
            }
            bundle.set(&self.library_path_var, parts.join(":"));
        }

        bundle
    }
}
