//! Profile registry and built-in definitions.
//!
//! Defines which native dependencies exist and resolves their paths and
//! archive URLs for a given application root and [`Settings`].

use super::{BuildFlag, DependencyProfile};
use crate::config::Settings;
use crate::error::{ProvisionError, Result};
use std::collections::HashSet;
use std::path::Path;

/// Compile-time description of a built-in profile.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinProfile {
    pub name: &'static str,
    pub trigger_marker: &'static str,
    /// Archive file name on the asset host.
    pub archive: &'static str,
    /// Directory name under `vendor/` in both install roots.
    pub vendor_dir: &'static str,
    pub environment: &'static [(&'static str, &'static str)],
    pub library_paths: &'static [&'static str],
    pub build_flag: Option<(&'static str, &'static str)>,
}

/// Built-in profiles in registration order.
pub const BUILTIN_PROFILES: &[BuiltinProfile] = &[
    // Oracle instant client, used by ruby-oci8
    BuiltinProfile {
        name: "oracle",
        trigger_marker: ".oracle.ini",
        archive: "instantclient_11_2_with_libaio_oci8.tar.gz",
        vendor_dir: "instant_client_11_2",
        environment: &[("NLS_LANG", "AMERICAN_AMERICA.UTF8")],
        library_paths: &["${release_dir}"],
        build_flag: Some((
            "BUNDLE_BUILD__RUBY-OCI8",
            "--with-instant-client=${release_dir}",
        )),
    },
    // FreeTDS, used by tiny_tds
    BuiltinProfile {
        name: "freetds",
        trigger_marker: ".freetds.conf",
        archive: "freetds.tar.gz",
        vendor_dir: "freetds",
        environment: &[("FREETDS_DIR", "${release_dir}")],
        library_paths: &["${release_dir}/lib"],
        build_flag: Some(("BUNDLE_BUILD__TINY_TDS", "--with-freetds-dir=${release_dir}")),
    },
    // unixODBC with the SAP HANA driver, used by ruby-odbc
    BuiltinProfile {
        name: "unixodbc",
        trigger_marker: ".odbc.ini",
        archive: "unixodbc.tar.gz",
        vendor_dir: "unixodbc",
        environment: &[],
        library_paths: &["${release_dir}", "${release_dir}/lib"],
        build_flag: Some((
            "BUNDLE_BUILD__RUBY-ODBC",
            "--with-odbc-include=${release_dir}/include --with-odbc-lib=${release_dir}/lib",
        )),
    },
];

impl BuiltinProfile {
    /// Resolve this definition against an application root and settings.
    pub fn resolve(&self, app_root: &Path, settings: &Settings) -> DependencyProfile {
        let archive_url = settings
            .overrides
            .archive_url(self.name)
            .map(String::from)
            .unwrap_or_else(|| settings.asset_url(self.archive));

        DependencyProfile {
            name: self.name.to_string(),
            trigger_marker: self.trigger_marker.to_string(),
            archive_url,
            build_time_install_dir: app_root.join("vendor").join(self.vendor_dir),
            release_install_dir: settings.release_root.join("vendor").join(self.vendor_dir),
            environment_contributions: self
                .environment
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            library_path_segments: self.library_paths.iter().map(|s| s.to_string()).collect(),
            build_flag: self.build_flag.map(|(key, value)| BuildFlag {
                key: key.to_string(),
                value_template: value.to_string(),
            }),
        }
    }
}

/// Ordered registry of profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: Vec<DependencyProfile>,
}

impl ProfileRegistry {
    /// Build a registry from explicit profiles.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` for duplicate names or templates
    /// referencing unknown variables.
    pub fn new(profiles: Vec<DependencyProfile>) -> Result<Self> {
        let mut seen = HashSet::new();
        for profile in &profiles {
            if !seen.insert(profile.name.as_str()) {
                return Err(ProvisionError::ConfigValidationError {
                    message: format!("Duplicate profile name: {}", profile.name),
                });
            }
            profile.validate()?;
        }
        Ok(Self { profiles })
    }

    /// Build the registry of built-in profiles for an application root.
    pub fn builtin(app_root: &Path, settings: &Settings) -> Result<Self> {
        for name in settings.overrides.profiles.keys() {
            if !BUILTIN_PROFILES.iter().any(|p| p.name == name.as_str()) {
                tracing::warn!("Ignoring override for unknown profile '{}'", name);
            }
        }

        let profiles = BUILTIN_PROFILES
            .iter()
            .map(|builtin| builtin.resolve(app_root, settings))
            .collect();

        Self::new(profiles)
    }

    /// Get a profile by name.
    pub fn get(&self, name: &str) -> Option<&DependencyProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Iterate profiles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DependencyProfile> {
        self.profiles.iter()
    }

    /// Profile names in registration order.
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
