//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Slide lifecycle driver
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: nearest slidewatch.toml, else built-in defaults)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Drive every slide of a deck through a timeline
    #[command(visible_alias = "r")]
    Run {
        #[command(flatten)]
        args: RunArgs,
    },

    /// List what each slide will do when it first appears
    #[command(visible_alias = "i")]
    Inspect {
        /// Deck HTML file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        deck: PathBuf,
    },
}

/// Run command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Deck HTML file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub deck: PathBuf,

    /// Timeline of show/remove/wait steps (TOML).
    ///
    /// Without one, each slide is shown in turn and then every slide is
    /// removed.
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub timeline: Option<PathBuf>,

    /// Write the resulting document to this file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub emit: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args() {
        let cli = Cli::try_parse_from([
            "slidewatch", "-v", "run", "deck.html", "--timeline", "t.toml", "-e", "out.html",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.config.is_none());
        let Commands::Run { args } = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.deck, PathBuf::from("deck.html"));
        assert_eq!(args.timeline, Some(PathBuf::from("t.toml")));
        assert_eq!(args.emit, Some(PathBuf::from("out.html")));
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["slidewatch", "inspect", "deck.html", "-C", "x.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Commands::Inspect { .. }));
    }
}
