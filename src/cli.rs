// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_CONFIG_FILE;

/// Command-line arguments for `assetpipe`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "assetpipe",
    version,
    about = "Compile styles, transpile scripts, copy templates and serve them with live reload.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Built-in defaults are used when the file does not exist.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ASSETPIPE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Task to run. Defaults to `build`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl CliArgs {
    /// The command to run, falling back to `build`.
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Build)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Compile the stylesheet entry to CSS with a source map.
    Styles,
    /// Transpile the script entry.
    Scripts,
    /// Copy the template into the destination root.
    Templates,
    /// Run styles, scripts and templates in order.
    Build,
    /// Serve the destination directory with live reload.
    Live,
    /// Re-run tasks when their sources change.
    Watch,
    /// Build, then serve, then watch.
    Dev,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
