//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::Result;
use crate::install::{ExtractorKind, IdempotencyCheck};

/// native-deps - Provision native database driver libraries.
#[derive(Debug, Parser)]
#[command(name = "native-deps")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory the application runs from once released (default: $HOME)
    #[arg(long, global = true, value_name = "DIR")]
    pub release_root: Option<PathBuf>,

    /// Base URL the prebuilt archives are downloaded from
    #[arg(long, global = true, value_name = "URL")]
    pub asset_host: Option<String>,

    /// Only treat a profile as installed when its completion marker exists
    #[arg(long, global = true)]
    pub completion_marker: bool,

    /// Extract archives with the system tar instead of in process
    #[arg(long, global = true)]
    pub system_tar: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install requested native dependencies and write build configuration
    Build(BuildArgs),

    /// List the native dependencies an application requests
    Detect(DetectArgs),

    /// Print the environment the requested dependencies need
    Env(EnvArgs),
}

/// Arguments for the `build` command.
#[derive(Debug, Clone, clap::Args)]
pub struct BuildArgs {
    /// Application root
    pub root: PathBuf,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `detect` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DetectArgs {
    /// Application root
    pub root: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `env` command.
#[derive(Debug, Clone, clap::Args)]
pub struct EnvArgs {
    /// Application root
    pub root: PathBuf,
}

impl Commands {
    /// Application root the command operates on.
    pub fn root(&self) -> &Path {
        match self {
            Commands::Build(args) => &args.root,
            Commands::Detect(args) => &args.root,
            Commands::Env(args) => &args.root,
        }
    }
}

impl Cli {
    /// Resolve run settings, applying command line overrides.
    pub fn settings(&self, app_root: &Path) -> Result<Settings> {
        let idempotency = if self.completion_marker {
            IdempotencyCheck::CompletionMarker
        } else {
            IdempotencyCheck::NonEmptyDirectory
        };
        let extractor = if self.system_tar {
            ExtractorKind::SystemTar
        } else {
            ExtractorKind::Builtin
        };

        Ok(Settings::for_root(app_root)?
            .with_release_root(self.release_root.clone())
            .with_asset_host(self.asset_host.clone())
            .with_idempotency(idempotency)
            .with_extractor(extractor))
    }
}
