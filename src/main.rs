//! Slidewatch - drive slide lifecycles from the command line.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use slidewatch::config::SlideConfig;
use slidewatch::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SlideConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Run { args } => cli::run::run_deck(args, config),
        Commands::Inspect { deck } => cli::inspect::inspect_deck(deck, &config),
    }
}
