use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use diary_core::VERSION;

/// Diary - an encrypted, file-per-entry personal journal
#[derive(Parser)]
#[command(name = "diary")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding diary entries
    #[arg(short, long, global = true, env = "DIARY_DIR", value_name = "DIR")]
    pub diary_dir: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true, env = "DIARY_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a new entry
    New(NewArgs),

    /// Decrypt and show an entry
    Read(ReadArgs),

    /// List entries with their offsets
    List(ListArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `new` command
#[derive(Args)]
pub struct NewArgs {
    /// Entry name or day offset (defaults to today's date)
    #[arg(short, long, allow_hyphen_values = true)]
    pub name: Option<String>,

    /// Template to seed the editor with
    #[arg(short, long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Entry body (skips stdin and the editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Disable interactive prompts and the editor
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `read` command
#[derive(Args)]
pub struct ReadArgs {
    /// Entry name, date, or offset as printed by `list` (-1 is today, -2 yesterday)
    #[arg(short, long, allow_hyphen_values = true)]
    pub name: Option<String>,

    /// Print the entry to stdout instead of opening the editor
    #[arg(long)]
    pub print: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
