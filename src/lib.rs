//! native-deps - Provision native database driver libraries.
//!
//! Before an application's native extensions are compiled, native-deps
//! looks for marker files in the application root (`.oracle.ini`,
//! `.freetds.conf`, `.odbc.ini`), installs a prebuilt archive for each
//! requested library into build-time and release-time directories, composes
//! the environment the compiler and the running application need, and
//! records compiler flags in the build tool's configuration document.
//!
//! # Modules
//!
//! - [`build_config`] - Build configuration document merging
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings, overrides file, and template interpolation
//! - [`detection`] - Marker-file trigger detection
//! - [`environment`] - Environment composition and application
//! - [`error`] - Error types and result aliases
//! - [`install`] - Archive fetching, extraction and installation
//! - [`profile`] - Native dependency profiles and registry
//! - [`provision`] - Run orchestration
//!
//! # Example
//!
//! ```
//! use native_deps::config::Settings;
//! use native_deps::detection::TriggerDetector;
//! use native_deps::profile::ProfileRegistry;
//!
//! let root = std::env::temp_dir().join("native-deps-doc-example");
//! std::fs::create_dir_all(&root).unwrap();
//!
//! let settings = Settings::for_root(&root).unwrap();
//! let registry = ProfileRegistry::builtin(&root, &settings).unwrap();
//! let active = TriggerDetector::new().detect(&root, &registry);
//! assert!(active.is_empty());
//! ```

pub mod build_config;
pub mod cli;
pub mod config;
pub mod detection;
pub mod environment;
pub mod error;
pub mod install;
pub mod profile;
pub mod provision;

pub use error::{InstallStep, ProvisionError, Result};
pub use provision::{build_native_dependencies, ProvisionReport, Provisioner};
