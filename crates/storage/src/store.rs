use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tally_core::RuleSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleStoreError {
    #[error("Failed to access rules at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Corrupt rules document at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode rules: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Persistence port for the category rule set. Reads and writes are always
/// of the whole document.
pub trait RuleStore {
    /// Returns the persisted rules, or the default set if nothing is stored yet.
    fn load(&self) -> Result<RuleSet, RuleStoreError>;

    fn save(&self, rules: &RuleSet) -> Result<(), RuleStoreError>;

    /// Like [`RuleStore::load`], but an unreadable or corrupt document falls
    /// back to the default set.
    fn load_or_default(&self) -> RuleSet {
        match self.load() {
            Ok(rules) => rules,
            Err(e) => {
                tracing::warn!("Using default category rules: {e}");
                RuleSet::default()
            }
        }
    }
}

/// Rules kept as a pretty-printed JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> RuleStoreError {
        RuleStoreError::Io { path: self.path.clone(), source }
    }
}

impl RuleStore for JsonFileStore {
    fn load(&self) -> Result<RuleSet, RuleStoreError> {
        if !self.path.exists() {
            tracing::debug!("No rules at {}, starting from defaults", self.path.display());
            return Ok(RuleSet::default());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let rules: RuleSet = serde_json::from_str(&content).map_err(|source| {
            RuleStoreError::Corrupt { path: self.path.clone(), source }
        })?;
        tracing::debug!(categories = rules.len(), "Loaded rules from {}", self.path.display());
        Ok(rules)
    }

    fn save(&self, rules: &RuleSet) -> Result<(), RuleStoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(rules).map_err(RuleStoreError::Encode)?;
        std::fs::write(&self.path, format!("{json}\n")).map_err(|e| self.io_error(e))?;
        tracing::info!(categories = rules.len(), "Saved rules to {}", self.path.display());
        Ok(())
    }
}

/// In-process store, for tests and one-off sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rules: RefCell<Option<RuleSet>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules: RefCell::new(Some(rules)) }
    }

    /// What was last saved, if anything.
    pub fn saved(&self) -> Option<RuleSet> {
        self.rules.borrow().clone()
    }
}

impl RuleStore for MemoryStore {
    fn load(&self) -> Result<RuleSet, RuleStoreError> {
        Ok(self.rules.borrow().clone().unwrap_or_default())
    }

    fn save(&self, rules: &RuleSet) -> Result<(), RuleStoreError> {
        *self.rules.borrow_mut() = Some(rules.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::UNCATEGORIZED;

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("category_mappings.json"))
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let rules = store_in(&dir).load().unwrap();
        assert_eq!(rules, RuleSet::default());
        assert_eq!(rules.names().collect::<Vec<_>>(), [UNCATEGORIZED]);
    }

    #[test]
    fn save_and_load_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let rules = RuleSet::from_pairs([
            (UNCATEGORIZED, vec![]),
            ("Travel", vec!["airline", "hotel"]),
            ("Dining", vec!["coffee shop"]),
        ]);
        store.save(&rules).unwrap();
        assert_eq!(store.load().unwrap(), rules);
    }

    #[test]
    fn save_overwrites_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&RuleSet::from_pairs([("Old", vec!["x"])])).unwrap();
        store.save(&RuleSet::from_pairs([("New", vec!["y"])])).unwrap();
        let loaded = store.load().unwrap();
        assert!(!loaded.contains("Old"));
        assert!(loaded.contains("New"));
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("deep").join("nested").join("rules.json"));
        store.save(&RuleSet::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn saved_document_is_plain_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&RuleSet::default()).unwrap();
        let content = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, serde_json::json!({ "Uncategorized": [] }));
    }

    #[test]
    fn corrupt_file_is_an_error_but_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load(), Err(RuleStoreError::Corrupt { .. })));
        assert_eq!(store.load_or_default(), RuleSet::default());
    }

    #[test]
    fn wrong_shape_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"Dining": "coffee"}"#).unwrap();
        assert!(matches!(store.load(), Err(RuleStoreError::Corrupt { .. })));
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), RuleSet::default());
        assert!(store.saved().is_none());
        let rules = RuleSet::from_pairs([("Dining", vec!["cafe"])]);
        store.save(&rules).unwrap();
        assert_eq!(store.load().unwrap(), rules);
    }
}
