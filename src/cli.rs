// Command line: collect by default, or work on a saved series.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Per-second process and host metric series", long_about = None)]
pub struct Cli {
    /// Without a subcommand, collect per config.toml (CONFIG_FILE), normalize and save
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Normalize a saved series to one row per second
    Normalize {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,

        /// Output CSV path (defaults to rewriting the input)
        #[arg(value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Refuse to fill more than this many missing seconds
        /// (defaults to output.max_backfill_seconds when a config file is present)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_backfill: Option<u64>,
    },
    /// Print the first rows of a saved series as JSON
    Show {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,

        #[arg(default_value_t = 5)]
        limit: usize,
    },
}
