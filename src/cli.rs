use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "rl-stats profile page extractor")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Extract ranks, sessions, activity heatmap and lifetime stats from a saved profile page
    Extract {
        /// Flattened page text, or an .html file to flatten first
        #[arg(short, long)]
        input: PathBuf,
        /// Where to write the JSON snapshot (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Treat the input as HTML regardless of its extension
        #[arg(long)]
        html: bool,
        /// Saved performance page for the auxiliary stats
        #[arg(long)]
        performance: Option<PathBuf>,
        /// Reference day for relative dates such as "3 days ago" (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Print the auxiliary stats found on a saved performance page
    Performance {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}
