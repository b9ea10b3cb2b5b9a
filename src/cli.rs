use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// voicecal - turn spoken phrases into calendar events
#[derive(Debug, Parser)]
#[command(name = "voicecal")]
#[command(about = "Turn spoken phrases into calendar events", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute (if not specified, starts the interactive shell)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interpret a transcript and print the event draft
    Parse {
        /// The transcript, e.g. Add meeting with John tomorrow at 2pm
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,

        /// Resolve relative dates against this day (YYYY-MM-DD)
        #[arg(long)]
        today: Option<chrono::NaiveDate>,

        /// Print the draft as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a month grid
    #[command(alias = "month")]
    Grid {
        /// Year (defaults to the current year)
        #[arg(long, allow_negative_numbers = true)]
        year: Option<i32>,

        /// Month, 1-12 (defaults to the current month)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Highlight this day instead of the current date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<chrono::NaiveDate>,

        /// Print the grid as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a date in long form
    Format {
        /// Date (YYYY-MM-DD)
        #[arg(required = true)]
        date: chrono::NaiveDate,
    },

    /// View or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigActions,
    },

    /// Start the interactive shell
    Shell,
}

#[derive(Debug, Subcommand)]
pub enum ConfigActions {
    /// Show the active configuration
    #[command(aliases = ["list", "get"])]
    Show,

    /// Print the config file location
    Path,

    /// Write the default configuration, replacing any existing file
    Init,
}
