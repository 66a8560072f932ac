use clap::{Parser, Subcommand, ValueEnum};

use crate::background::CopyMode;

#[derive(Parser, Debug)]
#[command(name = "autocopy")]
#[command(about = "Background host for the auto-copy browser extension", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bridge server content scripts talk to
    Serve {
        /// Port to listen on (overrides config.toml)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Copy text to the clipboard and record it in the history
    Copy {
        text: String,

        /// Tab-based modes need the bridge, so only these two are offered here
        #[arg(short, long, value_enum, default_value_t = CliCopyMode::Plain)]
        mode: CliCopyMode,
    },
    /// Show the copy history, oldest first
    History,
    /// Inspect or change the stored options
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliCopyMode {
    /// Copy and record in the history
    Plain,
    /// Copy without recording
    NoCache,
}

impl From<CliCopyMode> for CopyMode {
    fn from(mode: CliCopyMode) -> Self {
        match mode {
            CliCopyMode::Plain => CopyMode::Plain,
            CliCopyMode::NoCache => CopyMode::NoCache,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Print every option
    Show,
    /// Print a single option
    Get { key: String },
    /// Store an option; the value is parsed as JSON, falling back to a plain string
    Set { key: String, value: String },
    /// Remove every stored option
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
