//! Trigger detection.
//!
//! Decides which native dependencies an application needs by looking for
//! marker files in its root.

pub mod trigger;

pub use trigger::{marker_exists, TriggerDetector};

use crate::profile::DependencyProfile;

/// Profiles whose trigger marker was present, in registry order.
///
/// Computed once per run and never re-checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationSet {
    profiles: Vec<DependencyProfile>,
}

impl ActivationSet {
    pub fn new(profiles: Vec<DependencyProfile>) -> Self {
        Self { profiles }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DependencyProfile> {
        self.profiles.iter()
    }

    /// Names of the active profiles, in order.
    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl<'a> IntoIterator for &'a ActivationSet {
    type Item = &'a DependencyProfile;
    type IntoIter = std::slice::Iter<'a, DependencyProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.profiles.iter()
    }
}
