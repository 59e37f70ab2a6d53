//! Command-line interface for native-deps.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`dispatcher`] - Routes subcommands to the library

pub mod args;
pub mod dispatcher;

pub use args::{BuildArgs, Cli, Commands, DetectArgs, EnvArgs};
pub use dispatcher::{CommandDispatcher, CommandResult};
