use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Categorize bank statements and summarize spending")]
pub struct Cli {
    /// Config file (TOML). Defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Category rules file (JSON), overriding the config.
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Categorize a statement CSV and show the trailing-window summary
    Dashboard {
        /// CSV with Date, Description and Amount columns
        file: PathBuf,
        /// Anchor date for the window (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Window length in calendar months
        #[arg(long)]
        months: Option<u32>,
        /// Vendors to list in the text view
        #[arg(long)]
        top: Option<usize>,
        /// Print the full dashboard as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage category keyword rules
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum RulesCommands {
    /// List categories and their keywords in match order
    List,
    /// Add a category, optionally with keywords
    Add {
        category: String,
        keywords: Vec<String>,
    },
    /// Remove a keyword, or the whole category when no keyword is given
    Remove {
        category: String,
        keyword: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dashboard_flags() {
        let cli = Cli::try_parse_from([
            "tally", "dashboard", "stmt.csv", "--today", "2024-01-31", "--months", "6", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Dashboard { file, today, months, top, json } => {
                assert_eq!(file, PathBuf::from("stmt.csv"));
                assert_eq!(today, NaiveDate::from_ymd_opt(2024, 1, 31));
                assert_eq!(months, Some(6));
                assert_eq!(top, None);
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_rules_add_with_keywords() {
        let cli = Cli::try_parse_from(["tally", "rules", "add", "Dining", "cafe", "coffee shop"])
            .unwrap();
        match cli.command {
            Commands::Rules { command: RulesCommands::Add { category, keywords } } => {
                assert_eq!(category, "Dining");
                assert_eq!(keywords, ["cafe", "coffee shop"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tally", "rules", "list", "--rules", "r.json", "-v"]).unwrap();
        assert_eq!(cli.rules, Some(PathBuf::from("r.json")));
        assert!(cli.verbose);
    }

    #[test]
    fn rejects_bad_date() {
        assert!(Cli::try_parse_from(["tally", "dashboard", "x.csv", "--today", "01/31/2024"]).is_err());
    }
}
