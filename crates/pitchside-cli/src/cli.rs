use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pitchside_core::StoreKind;

#[derive(Parser)]
#[command(name = "pitchside")]
#[command(about = "Keep score of a live match and follow it from anywhere")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to the match store file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Store backend (sqlite or json)
    #[arg(long, global = true, value_name = "KIND")]
    pub store: Option<StoreKind>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new scheduled match
    #[command(alias = "new")]
    Create {
        /// Local (home) team name
        #[arg(long, value_name = "NAME")]
        local: String,
        /// Away team name
        #[arg(long, value_name = "NAME")]
        away: String,
        /// Four-digit admin PIN (generated when omitted)
        #[arg(long, value_name = "PIN")]
        pin: Option<String>,
    },
    /// List all matches in creation order
    #[command(alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the public scoreboard of one match
    Show {
        /// Match ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the public link of a match
    Share {
        /// Match ID
        id: String,
        /// Public origin, e.g. <https://scores.example.com>
        #[arg(long, value_name = "URL")]
        origin: Option<String>,
    },
    /// Follow a match live
    Watch {
        /// Match ID
        id: String,
        /// Seconds between store polls
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
        /// Poll once, print and exit
        #[arg(long)]
        once: bool,
    },
    /// Open the interactive admin console for a match
    Admin {
        /// Match ID
        id: String,
        /// Admin PIN
        #[arg(long, value_name = "PIN")]
        pin: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create or update the config file
    Init {
        /// Default store backend (sqlite or json)
        #[arg(long = "default-store", value_name = "KIND")]
        store: Option<StoreKind>,
        /// Public origin used for share links
        #[arg(long, value_name = "URL")]
        origin: Option<String>,
        /// Seconds between polls when watching
        #[arg(long, value_name = "SECS")]
        poll_interval: Option<u64>,
        /// Default store file location
        #[arg(long = "default-db-path", value_name = "PATH")]
        db_path: Option<PathBuf>,
    },
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
