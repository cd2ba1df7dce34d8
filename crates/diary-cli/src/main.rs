//! Diary CLI - an encrypted, file-per-entry personal journal
//!
//! Thin command-line layer over `diary_core`: it gathers settings, prompts
//! for the password, drives the editor and maps errors to exit codes.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use app::AppContext;
use cli::{Cli, Commands};
use commands::{handle_completions, handle_list, handle_new, handle_read};
use errors::{exit_code_for, with_hints};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let e = with_hints(e);
        eprintln!("Error: {}", e);
        std::process::exit(exit_code_for(&e));
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::New(args) => handle_new(ctx, args),
        Commands::Read(args) => handle_read(ctx, args),
        Commands::List(args) => handle_list(ctx, args),
        Commands::Completions { shell } => handle_completions(*shell),
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
