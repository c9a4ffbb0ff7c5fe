//! Command-line interface for threadkeep
//!
//! This module provides the main CLI structure and command handling. It uses
//! clap for argument parsing and drives the library's thread ownership and
//! parallel reduction from the terminal.

use crate::config::Settings;
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

pub use output::Output;

/// threadkeep - join-on-drop threads and deterministic parallel reduction
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Sum an inclusive integer range with the parallel reducer
    Sum {
        /// First value of the range
        #[arg(long, default_value = "1")]
        from: u64,
        /// Last value of the range (inclusive)
        #[arg(long)]
        to: u64,
        /// Hardware concurrency to assume (defaults to the detected value)
        #[arg(short, long)]
        threads: Option<usize>,
        /// Minimum elements per worker
        #[arg(long)]
        min_per_thread: Option<usize>,
    },
    /// Show how a sequence of the given length would be partitioned
    Plan {
        /// Number of elements
        #[arg(short, long)]
        length: usize,
        /// Hardware concurrency to assume (defaults to the detected value)
        #[arg(long)]
        hint: Option<usize>,
        /// Minimum elements per worker
        #[arg(long)]
        min_per_thread: Option<usize>,
    },
    /// Spawn a batch of joining threads and wait for all of them
    Workers {
        /// Number of threads to spawn
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Show version information
    Version,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the merged configuration
    Show,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let settings = Settings::load_with_custom_config(self.config.as_deref())?;
        init_tracing(&settings.logging.level, self.verbose);

        // Initialize output handler with global verbose and quiet settings
        let output = Output::new(self.verbose, self.quiet);

        match self.command {
            Some(Commands::Sum {
                from,
                to,
                threads,
                min_per_thread,
            }) => commands::sum::execute(
                commands::sum::SumArgs {
                    from,
                    to,
                    threads,
                    min_per_thread,
                },
                &settings,
                self.format,
                &output,
            ),
            Some(Commands::Plan {
                length,
                hint,
                min_per_thread,
            }) => commands::plan::execute(length, hint, min_per_thread, &settings, self.format, &output),
            Some(Commands::Workers { count }) => commands::workers::execute(count, self.format, &output),
            Some(Commands::Config(cmd)) => commands::config::execute(cmd, &settings, self.format, &output),
            Some(Commands::Version) => commands::version::execute(&output),
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level; `--verbose` raises the
/// configured level to `debug`. Logs go to stderr so command output stays
/// parseable.
fn init_tracing(default_level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { default_level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
