//! Provisioning orchestration.
//!
//! [`Provisioner::run`] sequences one run: detect active profiles, install
//! each in registry order, compose the environment, and record build flags.
//! The first failure aborts the run. [`build_native_dependencies`] is the
//! entry point for callers and the only place the process environment is
//! modified.

pub mod report;

pub use report::ProvisionReport;

use crate::build_config::{BuildConfigDocument, BuildConfigWriter};
use crate::config::Settings;
use crate::detection::{ActivationSet, TriggerDetector};
use crate::environment::{apply, EnvironmentComposer, EnvironmentSink, ProcessEnvironment};
use crate::error::Result;
use crate::install::{HttpFetcher, InstallationOutcome, PackageInstaller};
use crate::profile::ProfileRegistry;
use std::path::Path;

/// Runs detection, installation, environment composition and config writes.
pub struct Provisioner {
    registry: ProfileRegistry,
    detector: TriggerDetector,
    installer: PackageInstaller,
    composer: EnvironmentComposer,
    writer: BuildConfigWriter,
}

impl Provisioner {
    /// Create a provisioner from explicit collaborators.
    ///
    /// The registry's build-time directories must belong to the root later
    /// passed to [`Provisioner::run`].
    pub fn new(
        registry: ProfileRegistry,
        installer: PackageInstaller,
        composer: EnvironmentComposer,
    ) -> Self {
        Self {
            registry,
            detector: TriggerDetector::new(),
            installer,
            composer,
            writer: BuildConfigWriter::new(),
        }
    }

    /// Create a provisioner for an application root using real collaborators.
    pub fn from_settings(app_root: &Path, settings: &Settings) -> Result<Self> {
        let registry = ProfileRegistry::builtin(app_root, settings)?;
        let installer = PackageInstaller::new(
            Box::new(HttpFetcher::new()?),
            settings.extractor.extractor(),
        )
        .with_idempotency(settings.idempotency);
        let composer = EnvironmentComposer::from_process_env(&settings.library_path_var);

        Ok(Self::new(registry, installer, composer))
    }

    pub fn composer(&self) -> &EnvironmentComposer {
        &self.composer
    }

    /// Report the active profiles for an application root.
    pub fn detect(&self, app_root: &Path) -> ActivationSet {
        self.detector.detect(app_root, &self.registry)
    }

    /// Run provisioning for an application root.
    ///
    /// Nothing is written to the process environment; the returned report
    /// carries the composed bundle.
    pub fn run(&self, app_root: &Path) -> Result<ProvisionReport> {
        tracing::info!("Building native dependencies...");

        let active = self.detect(app_root);
        let mut outcomes = Vec::with_capacity(active.len());

        for profile in &active {
            tracing::info!("Found {} trigger ({})", profile.name, profile.trigger_marker);

            match self.installer.install(profile) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    let failed = InstallationOutcome::failed(&profile.name, &e);
                    tracing::error!(
                        "Install of {} failed: {}",
                        failed.profile,
                        failed.error_detail.as_deref().unwrap_or_default()
                    );
                    return Err(e);
                }
            }
        }

        let environment = self.composer.compose(&active);
        if !environment.is_empty() {
            tracing::info!(
                "Merging variables {}",
                environment
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }

        let build_config = if active.is_empty() {
            None
        } else {
            let path = BuildConfigDocument::path_for(app_root);
            Some(self.writer.write_or_append(&path, &active)?)
        };

        let report = ProvisionReport {
            app_root: app_root.to_path_buf(),
            active: active.names().into_iter().map(String::from).collect(),
            outcomes,
            environment,
            build_config,
        };

        tracing::info!("{}", report.summary());
        tracing::info!("Done building native dependencies.");

        Ok(report)
    }
}

/// Provision an application root using explicit settings, applying the
/// resulting environment to `sink`.
pub fn provision(
    app_root: &Path,
    settings: &Settings,
    sink: &mut dyn EnvironmentSink,
) -> Result<ProvisionReport> {
    let provisioner = Provisioner::from_settings(app_root, settings)?;
    let report = provisioner.run(app_root)?;
    apply(&report.environment, sink);
    Ok(report)
}

/// Provision native dependencies for an application root.
///
/// Settings come from the environment and the application's overrides
/// file. On success the composed variables are set in the current process
/// so that subprocesses spawned afterwards inherit them.
///
/// # Errors
///
/// Returns the first fatal error; no later step runs after it.
pub fn build_native_dependencies(app_root: &Path) -> Result<ProvisionReport> {
    let settings = Settings::for_root(app_root)?;
    provision(app_root, &settings, &mut ProcessEnvironment)
}
