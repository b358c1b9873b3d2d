//! bpelearn CLI - Command-line interface for learning BPE merge rules.
//!
//! This is the main entry point for the `bpelearn` command-line tool.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use commands::{InspectCommand, TrainCommand};
use env_logger::Env;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "bpelearn")]
#[command(about = "Learn BPE subword merge rules from a text corpus", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, global = true, action = ArgAction::Count)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn merge rules from a corpus
    Train(TrainCommand),
    /// Show corpus and pair statistics without training
    Inspect(InspectCommand),
}

fn init_logging(verbose: u8, quiet: u8) {
    let level = match (quiet, verbose) {
        (0, 0) => LevelFilter::Info,
        (0, 1) => LevelFilter::Debug,
        (0, _) => LevelFilter::Trace,
        (1, _) => LevelFilter::Warn,
        (2, _) => LevelFilter::Error,
        _ => LevelFilter::Off,
    };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    if verbose > 0 || quiet > 0 {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Train(cmd) => commands::train::run(cmd)?,
        Commands::Inspect(cmd) => commands::inspect::run(cmd)?,
    }

    Ok(())
}
