//! Command dispatching.
//!
//! Routes each subcommand to the library and writes its output to the
//! supplied writer. Logging goes through `tracing` separately.

use serde::Serialize;
use std::io::Write;

use crate::cli::args::{Cli, Commands};
use crate::environment::ProcessEnvironment;
use crate::error::Result;
use crate::provision::{provision, Provisioner};

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }
}

/// A profile as reported by `detect --json`.
#[derive(Debug, Serialize)]
struct DetectedProfile<'a> {
    name: &'a str,
    trigger_marker: &'a str,
    archive_url: &'a str,
}

/// Dispatches CLI commands to their implementations.
#[derive(Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        let root = cli.command.root();
        let settings = cli.settings(root)?;

        match &cli.command {
            Commands::Build(args) => {
                let report = provision(root, &settings, &mut ProcessEnvironment)?;
                if args.json {
                    writeln!(out, "{}", to_json(&report)?)?;
                } else {
                    writeln!(out, "{}", report.summary())?;
                }
            }
            Commands::Detect(args) => {
                let provisioner = Provisioner::from_settings(root, &settings)?;
                let active = provisioner.detect(root);

                if args.json {
                    let detected: Vec<DetectedProfile<'_>> = active
                        .iter()
                        .map(|p| DetectedProfile {
                            name: &p.name,
                            trigger_marker: &p.trigger_marker,
                            archive_url: &p.archive_url,
                        })
                        .collect();
                    writeln!(out, "{}", to_json(&detected)?)?;
                } else if active.is_empty() {
                    writeln!(out, "No native dependencies requested")?;
                } else {
                    for profile in &active {
                        writeln!(out, "{}\t{}", profile.name, profile.trigger_marker)?;
                    }
                }
            }
            Commands::Env(_) => {
                let provisioner = Provisioner::from_settings(root, &settings)?;
                let active = provisioner.detect(root);
                let bundle = provisioner.composer().compose(&active);
                write!(out, "{}", bundle.render_exports())?;
            }
        }

        Ok(CommandResult::success())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?)
}
