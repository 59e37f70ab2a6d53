//! The persisted build configuration document.
//!
//! A flat YAML mapping read by the native extension build tool. Keys are
//! kept in file order; existing entries are never rewritten. New entries are
//! appended to the existing text so comments and quoting survive.

use crate::error::{ProvisionError, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the document relative to the application root.
pub const BUILD_CONFIG_PATH: &str = ".bundle/config";

/// Default entries written when the document is first created.
pub fn header() -> Mapping {
    let mut mapping = Mapping::new();
    mapping.insert(
        Value::String("BUNDLE_PATH".to_string()),
        Value::String("vendor".to_string()),
    );
    mapping.insert(
        Value::String("BUNDLE_DISABLE_SHARED_GEMS".to_string()),
        Value::String("1".to_string()),
    );
    mapping.insert(
        Value::String("BUNDLE_CACHE_ALL".to_string()),
        Value::Bool(true),
    );
    mapping
}

/// In-memory view of the build configuration document.
#[derive(Debug, Clone)]
pub struct BuildConfigDocument {
    path: PathBuf,
    entries: Mapping,
    exists: bool,
    /// File content as loaded, `None` for a new document.
    source: Option<String>,
    /// Entries added since load, in order.
    added: Mapping,
}

impl BuildConfigDocument {
    /// Path of the document for an application root.
    pub fn path_for(app_root: &Path) -> PathBuf {
        app_root.join(BUILD_CONFIG_PATH)
    }

    /// Load the document, or start a new one with the default header.
    ///
    /// # Errors
    ///
    /// Returns `ConfigWriteFailed` if the file cannot be read or is not a
    /// key/value mapping.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                entries: header(),
                exists: false,
                source: None,
                added: Mapping::new(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| write_failed(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            entries: Self::parse(&content, path)?,
            exists: true,
            source: Some(content),
            added: Mapping::new(),
        })
    }

    /// Parse document content into a mapping.
    pub fn parse(content: &str, path: &Path) -> Result<Mapping> {
        if content.trim().is_empty() {
            return Ok(Mapping::new());
        }

        let value: Value = serde_yaml::from_str(content).map_err(|e| write_failed(path, e))?;
        match value {
            Value::Null => Ok(Mapping::new()),
            Value::Mapping(mapping) => Ok(mapping),
            _ => Err(write_failed(path, "existing document is not a key/value mapping")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the document was on disk when loaded.
    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Keys in document order.
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|(k, _)| k.as_str().map(String::from))
            .collect()
    }

    /// Add an entry unless the key is already present.
    ///
    /// Returns `true` if the entry was added.
    pub fn insert_missing(&mut self, key: &str, value: &str) -> bool {
        if self.contains_key(key) {
            return false;
        }
        let key = Value::String(key.to_string());
        let value = Value::String(value.to_string());
        self.entries.insert(key.clone(), value.clone());
        self.added.insert(key, value);
        true
    }

    /// Serialize the whole document.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.entries).map_err(|e| write_failed(&self.path, e))
    }

    /// Render the document for writing.
    ///
    /// An existing document gets the added entries appended to its text.
    /// When the appended text would not read back as the same mapping (flow
    /// style, end markers) the whole document is serialized instead.
    pub fn render(&self) -> Result<String> {
        let Some(source) = self.source.as_deref() else {
            return self.to_yaml();
        };
        if self.added.is_empty() {
            return Ok(source.to_string());
        }

        let tail = serde_yaml::to_string(&self.added).map_err(|e| write_failed(&self.path, e))?;
        let mut content = source.to_string();
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&tail);

        match serde_yaml::from_str::<Value>(&content) {
            Ok(Value::Mapping(reread)) if reread == self.entries => Ok(content),
            _ => {
                tracing::debug!(
                    "Rewriting {} in full, appended entries would not parse back",
                    self.path.display()
                );
                self.to_yaml()
            }
        }
    }

    /// Persist the document, replacing the file in one step.
    pub fn save(&mut self) -> Result<()> {
        let content = self.render()?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_failed(&self.path, e))?;
        }

        let staging = staging_path(&self.path);
        fs::write(&staging, &content).map_err(|e| write_failed(&self.path, e))?;
        if let Err(e) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(write_failed(&self.path, e));
        }

        self.exists = true;
        self.source = Some(content);
        self.added = Mapping::new();
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_failed(path: &Path, message: impl std::fmt::Display) -> ProvisionError {
    ProvisionError::ConfigWriteFailed {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
