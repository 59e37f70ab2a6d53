//! Native dependency profiles.
//!
//! A [`DependencyProfile`] describes one supported native library: the
//! marker file that requests it, where its archive lives, where it is
//! installed, and what it contributes to the environment and the build
//! configuration. Profiles are collected in a [`ProfileRegistry`] whose
//! order is the order everything downstream processes them in.

pub mod registry;

pub use registry::{BuiltinProfile, ProfileRegistry, BUILTIN_PROFILES};

use crate::config::{render, validate_template, TemplateContext};
use crate::error::Result;
use std::path::PathBuf;

/// A build tool configuration entry contributed by a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFlag {
    /// Document key, e.g. `BUNDLE_BUILD__TINY_TDS`.
    pub key: String,
    /// Value template, may reference `${release_dir}` and `${build_dir}`.
    pub value_template: String,
}

/// Static description of one native dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyProfile {
    /// Profile name (e.g., "oracle", "freetds").
    pub name: String,
    /// Marker path relative to the application root.
    pub trigger_marker: String,
    /// Location of the gzip-compressed tar archive.
    pub archive_url: String,
    /// Directory used while compiling native extensions.
    pub build_time_install_dir: PathBuf,
    /// Directory the library lives in once released.
    pub release_install_dir: PathBuf,
    /// Ordered (variable, value template) pairs.
    pub environment_contributions: Vec<(String, String)>,
    /// Ordered templates appended to the library search path.
    pub library_path_segments: Vec<String>,
    /// Optional build configuration entry.
    pub build_flag: Option<BuildFlag>,
}

impl DependencyProfile {
    fn template_context(&self) -> TemplateContext {
        TemplateContext::new()
            .with("build_dir", self.build_time_install_dir.display().to_string())
            .with("release_dir", self.release_install_dir.display().to_string())
    }

    /// Render a template against this profile's install directories.
    pub fn render(&self, template: &str) -> String {
        render(template, &self.template_context())
    }

    /// Rendered environment contributions, in declaration order.
    pub fn environment(&self) -> Vec<(String, String)> {
        let ctx = self.template_context();
        self.environment_contributions
            .iter()
            .map(|(name, template)| (name.clone(), render(template, &ctx)))
            .collect()
    }

    /// Rendered library path segments, in declaration order.
    pub fn library_paths(&self) -> Vec<String> {
        let ctx = self.template_context();
        self.library_path_segments
            .iter()
            .map(|template| render(template, &ctx))
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// Rendered build flag as a `(key, value)` pair.
    ///
    /// Returns `None` when the profile has no flag or its value is empty.
    pub fn rendered_build_flag(&self) -> Option<(String, String)> {
        let flag = self.build_flag.as_ref()?;
        let value = self.render(&flag.value_template);
        if flag.key.is_empty() || value.trim().is_empty() {
            return None;
        }
        Some((flag.key.clone(), value))
    }

    /// Check every template references only known variables.
    pub fn validate(&self) -> Result<()> {
        for (_, template) in &self.environment_contributions {
            validate_template(template)?;
        }
        for template in &self.library_path_segments {
            validate_template(template)?;
        }
        if let Some(flag) = &self.build_flag {
            validate_template(&flag.value_template)?;
        }
        Ok(())
    }
}
