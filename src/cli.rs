use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "soilsense", version, about = "Farm soil monitoring and analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a reading window and print the farm report as JSON
    Analyze {
        /// JSON file with an array of soil readings; falls back to the
        /// demo provider when omitted and demo mode is enabled
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Override the configured crop type
        #[arg(long)]
        crop: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Score a single reading from a JSON file
    Score {
        /// JSON file with one soil reading
        input: PathBuf,
    },
    /// Generate demo readings and print them as JSON
    Demo {
        /// Days of synthetic data (defaults to the configured window)
        #[arg(short, long)]
        days: Option<u32>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Validate config
    Check,
}
