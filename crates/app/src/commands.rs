use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tally_core::TransactionTable;
use tally_report::Dashboard;
use tally_storage::{RuleBook, RuleStore};

use crate::config::Config;
use crate::render;

/// Everything a command needs for one invocation. Nothing here is global.
pub struct AppState<S: RuleStore> {
    pub config: Config,
    pub book: RuleBook<S>,
}

impl<S: RuleStore> AppState<S> {
    pub fn new(config: Config, store: S) -> Self {
        Self { config, book: RuleBook::open(store) }
    }

    pub fn load_statement(&self, file: &Path) -> Result<TransactionTable> {
        let reader = File::open(file)
            .map(BufReader::new)
            .with_context(|| format!("Failed to open {}", file.display()))?;
        let table = tally_import::load_transactions(
            reader,
            &self.config.csv_profile(),
            self.book.rules(),
        )
        .with_context(|| format!("Error processing file {}", file.display()))?;
        tracing::info!(rows = table.len(), "Loaded {}", file.display());
        Ok(table)
    }

    pub fn dashboard(&self, file: &Path, today: NaiveDate, months: Option<u32>) -> Result<Dashboard> {
        let table = self.load_statement(file)?;
        let months = months.unwrap_or(self.config.window_months);
        Dashboard::build(&table, today, months).context("Invalid window")
    }

    pub fn rules_list(&self) -> String {
        render::format_rules(self.book.rules())
    }

    pub fn rules_add(&mut self, category: &str, keywords: &[String]) -> Result<String> {
        if keywords.is_empty() {
            let added = self.book.add_category(category)?;
            return Ok(if added {
                format!("Added category '{}'", category.trim())
            } else {
                format!("Category '{}' already exists", category.trim())
            });
        }

        let mut lines = Vec::new();
        for keyword in keywords {
            let line = if self.book.add_keyword(category, keyword)? {
                format!("Added '{}' to {}", keyword.trim(), category.trim())
            } else {
                format!("'{}' already in {}", keyword.trim(), category.trim())
            };
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }

    pub fn rules_remove(&mut self, category: &str, keyword: Option<&str>) -> Result<String> {
        match keyword {
            Some(keyword) => {
                if self.book.remove_keyword(category, keyword)? {
                    Ok(format!("Removed '{keyword}' from {category}"))
                } else {
                    Ok(format!("'{keyword}' not found in {category}"))
                }
            }
            None => {
                self.book.remove_category(category)?;
                Ok(format!("Removed category '{category}'"))
            }
        }
    }
}
