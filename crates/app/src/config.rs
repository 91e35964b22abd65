use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tally_import::CsvProfile;

const RULES_FILE: &str = "category_mappings.json";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where category rules are persisted. Defaults to the platform data dir.
    pub rules_path: Option<PathBuf>,
    pub window_months: u32,
    pub date_format: String,
    pub delimiter: String,
    /// Vendor rows shown in the text view; JSON output always has all of them.
    pub top_vendors: usize,
}

impl Default for Config {
    fn default() -> Self {
        let csv = CsvProfile::default();
        Self {
            rules_path: None,
            window_months: 12,
            date_format: csv.date_format,
            delimiter: csv.delimiter,
            top_vendors: 10,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "tally", "Tally")
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config")
    }

    /// Reads `explicit` if given (it must exist), otherwise the platform config
    /// file when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match project_dirs().map(|d| d.config_dir().join(CONFIG_FILE)) {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("No config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn csv_profile(&self) -> CsvProfile {
        CsvProfile {
            date_format: self.date_format.clone(),
            delimiter: self.delimiter.clone(),
        }
    }

    pub fn rules_path(&self) -> PathBuf {
        if let Some(path) = &self.rules_path {
            return path.clone();
        }
        project_dirs()
            .map(|d| d.data_dir().join(RULES_FILE))
            .unwrap_or_else(|| PathBuf::from(RULES_FILE))
    }
}
