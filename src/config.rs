//! Command-line options and logger setup

use crate::app::DEFAULT_ROUND_DURATION;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Word-board puzzles in the terminal.
#[derive(Debug, Clone, Parser)]
#[command(name = "wordboard", version)]
pub struct Cli {
    /// Word list, one word per line
    #[arg(short, long, env = "WORDBOARD_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Seed for a reproducible puzzle
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Write log output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Play a timed Rush round
    Rush {
        /// Round length in seconds
        #[arg(short, long, default_value_t = DEFAULT_ROUND_DURATION,
              value_parser = clap::value_parser!(u32).range(1..))]
        duration: u32,
    },
    /// Print a generated puzzle as JSON
    Puzzle,
}

impl Cli {
    /// The chosen subcommand, Rush when none was given.
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Rush {
            duration: DEFAULT_ROUND_DURATION,
        })
    }

    /// Whether this run takes over the terminal.
    pub fn is_interactive(&self) -> bool {
        matches!(self.command(), Command::Rush { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot open log file {path}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("logger already initialised")]
    Logger(#[from] log::SetLoggerError),
}

/// Filter used when `RUST_LOG` is unset. An interactive run without a log
/// file stays silent.
pub fn default_filter(log_file: Option<&Path>, interactive: bool) -> &'static str {
    if interactive && log_file.is_none() {
        "off"
    } else {
        "warn"
    }
}

/// Install `env_logger`, writing to `log_file` when given.
pub fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<(), ConfigError> {
    let env = env_logger::Env::default().default_filter_or(default_filter(log_file, interactive));
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(path) = log_file {
        let file = File::create(path).map_err(|source| ConfigError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init()?;
    Ok(())
}
