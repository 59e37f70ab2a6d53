//! Run configuration.
//!
//! - [`settings`] - layered settings for a provisioning run
//! - [`overrides`] - the optional `.native-deps.yml` overrides file
//! - [`interpolation`] - `${var}` templates used by profiles

pub mod interpolation;
pub mod overrides;
pub mod settings;

pub use interpolation::{
    extract_variables, parse_interpolation, render, validate_template, Segment, TemplateContext,
    TEMPLATE_VARIABLES,
};
pub use overrides::{Overrides, ProfileOverride, OVERRIDES_FILE};
pub use settings::{
    Settings, ASSET_HOST_ENV, DEFAULT_ASSET_HOST, LIBRARY_PATH_VAR, RELEASE_ROOT_ENV,
};
