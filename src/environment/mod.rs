//! Environment variable composition.
//!
//! [`EnvironmentComposer`] turns the active profiles into an
//! [`EnvironmentBundle`]; [`apply`] writes a bundle into an
//! [`EnvironmentSink`] such as the [`ProcessEnvironment`].
//!
//! # Example
//!
//! ```
//! use native_deps::environment::{apply, EnvironmentBundle};
//! use std::collections::HashMap;
//!
//! let mut bundle = EnvironmentBundle::new();
//! bundle.set("NLS_LANG", "AMERICAN_AMERICA.UTF8");
//!
//! let mut vars: HashMap<String, String> = HashMap::new();
//! apply(&bundle, &mut vars);
//! assert_eq!(vars["NLS_LANG"], "AMERICAN_AMERICA.UTF8");
//! ```

pub mod bundle;
pub mod composer;
pub mod sink;

pub use bundle::EnvironmentBundle;
pub use composer::EnvironmentComposer;
pub use sink::{apply, EnvironmentSink, ProcessEnvironment};
