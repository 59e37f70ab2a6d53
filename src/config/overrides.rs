//! Per-application overrides file.
//!
//! An application may commit a `.native-deps.yml` at its root to point
//! archive downloads at a mirror:
//!
//! ```yaml
//! asset_host: https://mirror.example.com/assets
//! profiles:
//!   freetds:
//!     archive_url: https://mirror.example.com/freetds-1.4.tar.gz
//! ```

use crate::error::{ProvisionError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// File name of the overrides file, relative to the application root.
pub const OVERRIDES_FILE: &str = ".native-deps.yml";

/// Parsed overrides file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Overrides {
    /// Base URL that default archive names are joined onto.
    #[serde(default)]
    pub asset_host: Option<String>,

    /// Per-profile overrides keyed by profile name.
    #[serde(default)]
    pub profiles: HashMap<String, ProfileOverride>,
}

/// Overrides for a single profile.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverride {
    /// Full archive URL, replacing the asset host default.
    #[serde(default)]
    pub archive_url: Option<String>,
}

impl Overrides {
    /// Parse overrides from YAML content.
    pub fn parse(content: &str, source: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| ProvisionError::ConfigParseError {
            path: source.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load the overrides file from an application root, if present.
    pub fn load_optional(app_root: &Path) -> Result<Self> {
        let path = app_root.join(OVERRIDES_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Self::parse(&content, &path)
    }

    /// Archive URL override for a profile.
    pub fn archive_url(&self, profile: &str) -> Option<&str> {
        self.profiles
            .get(profile)
            .and_then(|p| p.archive_url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_full_file() {
        let content = r#"
asset_host: https://mirror.example.com/assets
profiles:
  freetds:
    archive_url: https://mirror.example.com/freetds-1.4.tar.gz
"#;
        let overrides = Overrides::parse(content, Path::new(OVERRIDES_FILE)).unwrap();

        assert_eq!(
            overrides.asset_host.as_deref(),
            Some("https://mirror.example.com/assets")
        );
        assert_eq!(
            overrides.archive_url("freetds"),
            Some("https://mirror.example.com/freetds-1.4.tar.gz")
        );
        assert_eq!(overrides.archive_url("oracle"), None);
    }

    #[test]
    fn empty_content_is_default() {
        let overrides = Overrides::parse("  \n", Path::new(OVERRIDES_FILE)).unwrap();
        assert_eq!(overrides, Overrides::default());
    }

    #[test]
    fn invalid_yaml_names_file() {
        let err = Overrides::parse("asset_host: [", Path::new("/app/.native-deps.yml"))
            .unwrap_err();
        assert!(matches!(err, ProvisionError::ConfigParseError { .. }));
        assert!(err.to_string().contains("/app/.native-deps.yml"));
    }

    #[test]
    fn unknown_fields_rejected() {
        let result = Overrides::parse("mirror: x\n", Path::new(OVERRIDES_FILE));
        assert!(result.is_err());
    }

    #[test]
    fn load_optional_missing_file() {
        let temp = TempDir::new().unwrap();
        let overrides = Overrides::load_optional(temp.path()).unwrap();
        assert!(overrides.asset_host.is_none());
        assert!(overrides.profiles.is_empty());
    }

    #[test]
    fn load_optional_reads_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(OVERRIDES_FILE),
            "asset_host: http://localhost:9000\n",
        )
        .unwrap();

        let overrides = Overrides::load_optional(temp.path()).unwrap();
        assert_eq!(overrides.asset_host.as_deref(), Some("http://localhost:9000"));
    }
}
