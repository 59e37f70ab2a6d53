//! Applying a bundle to an environment.
//!
//! The library only produces [`EnvironmentBundle`] values; the outermost
//! caller decides where they land.

use super::EnvironmentBundle;
use std::collections::HashMap;

/// Something environment variables can be written to.
pub trait EnvironmentSink {
    fn set_var(&mut self, name: &str, value: &str);
}

/// The current process environment, inherited by spawned subprocesses.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl EnvironmentSink for ProcessEnvironment {
    fn set_var(&mut self, name: &str, value: &str) {
        // provisioning is single-threaded
        std::env::set_var(name, value);
    }
}

impl EnvironmentSink for HashMap<String, String> {
    fn set_var(&mut self, name: &str, value: &str) {
        self.insert(name.to_string(), value.to_string());
    }
}

/// Write every variable of the bundle to the sink, in order.
pub fn apply(bundle: &EnvironmentBundle, sink: &mut dyn EnvironmentSink) {
    for (name, value) in bundle.iter() {
        tracing::debug!("Setting {}={}", name, value);
        sink.set_var(name, value);
    }
}
