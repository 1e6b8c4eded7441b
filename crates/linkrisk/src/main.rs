use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cli;
mod logging;
mod store;

/// Offline heuristic link safety checker.
#[derive(Debug, Parser)]
#[command(name = "linkrisk", version)]
#[command(about = "Score links for phishing risk without touching the network", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score one or more links (reads one per line from stdin when none are given).
    Check {
        /// Links to score.
        urls: Vec<String>,

        /// Emit one JSON object per link.
        #[arg(long)]
        json: bool,

        /// Scoring config file (defaults to $LINKRISK_CONFIG or the user config dir).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Do not record the result as the last check.
        #[arg(long)]
        no_save: bool,
    },

    /// Show the most recently recorded check.
    Last {
        /// Emit JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate and print the effective scoring configuration.
    Config {
        /// Scoring config file (defaults to $LINKRISK_CONFIG or the user config dir).
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show where linkrisk looks for its config and state.
    Doctor {
        /// Emit JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    logging::init_logging();

    let cli = Cli::parse();
    let code = match cli.command {
        Command::Check {
            urls,
            json,
            config,
            no_save,
        } => cli::check::run(urls, json, config.as_deref(), !no_save),
        Command::Last { json } => cli::last::run(json),
        Command::Config { config } => cli::config::run(config.as_deref()),
        Command::Doctor { json } => cli::doctor::run(json),
    };
    std::process::exit(code);
}
