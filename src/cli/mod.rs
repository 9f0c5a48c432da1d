//! cli
//!
//! Command-line interface layer for Linlab.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! the handlers in [`commands`], which call into the domain modules
//! ([`crate::projection`], [`crate::coding`], [`crate::dct`]). Typed errors
//! from the domain get human-readable context here and nowhere else.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::core::config::Config;
use crate::ui::output::{self, Verbosity};
use anyhow::{Context as _, Result};

/// Shared state for command handlers.
#[derive(Debug)]
pub struct Context {
    /// Loaded configuration
    pub config: Config,
    /// Debug logging enabled
    pub debug: bool,
    /// Minimal output
    pub quiet: bool,
    /// Machine-readable JSON output
    pub json: bool,
    /// Interactive prompts allowed
    pub interactive: bool,
}

impl Context {
    /// Output verbosity derived from the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet || self.json, self.debug)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let loaded =
        Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    let ctx = Context {
        interactive: cli.interactive(loaded.config.interactive()),
        debug: cli.debug,
        quiet: cli.quiet,
        json: cli.json,
        config: loaded.config,
    };

    match &loaded.path {
        Some(path) => output::debug(
            format!("config loaded from {}", path.display()),
            ctx.verbosity(),
        ),
        None => output::debug("no config file found, using defaults", ctx.verbosity()),
    }

    commands::dispatch(cli.command, &ctx)
}
