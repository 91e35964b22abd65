//! Tally CLI - keyword-categorized bank statement summaries
//!
//! Usage:
//!   tally dashboard statement.csv          Summarize the last twelve months
//!   tally dashboard statement.csv --json   Same, as one JSON document
//!   tally rules list                       Show category keywords
//!   tally rules add Dining "coffee shop"   Add keywords to a category

mod cli;
mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use tally_storage::JsonFileStore;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands, RulesCommands};
use commands::AppState;
use config::Config;

fn init_logging(verbose: bool) {
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    // stderr keeps stdout clean for --json
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<String> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(rules) = cli.rules {
        config.rules_path = Some(rules);
    }
    let store = JsonFileStore::new(config.rules_path());
    let mut state = AppState::new(config, store);

    match cli.command {
        Commands::Dashboard { file, today, months, top, json } => {
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            let dash = state.dashboard(&file, today, months)?;
            if json {
                Ok(serde_json::to_string_pretty(&dash)?)
            } else {
                let top = top.unwrap_or(state.config.top_vendors);
                Ok(render::format_dashboard(&dash, top))
            }
        }
        Commands::Rules { command } => match command {
            RulesCommands::List => Ok(state.rules_list()),
            RulesCommands::Add { category, keywords } => state.rules_add(&category, &keywords),
            RulesCommands::Remove { category, keyword } => {
                state.rules_remove(&category, keyword.as_deref())
            }
        },
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
