mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    export, init, render, verify, ExportArgs, InitArgs, RenderArgs, VerifyArgs,
};
use tracing_subscriber::EnvFilter;

/// Signet CLI - Email signatures that survive the trip to the inbox
#[derive(Parser, Debug)]
#[command(name = "signet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config file and a starter signature
    Init(InitArgs),

    /// Render a signature document to HTML (no stamp)
    Render(RenderArgs),

    /// Render and stamp a signature for your mail client
    Export(ExportArgs),

    /// Check an exported signature against its stamp
    Verify(VerifyArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Render(args) => render(args, &cwd),
            Command::Export(args) => export(args, &cwd),
            Command::Verify(args) => verify(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
