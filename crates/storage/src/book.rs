use tally_core::{normalize_keyword, RuleSet, UNCATEGORIZED};
use thiserror::Error;

use crate::store::{RuleStore, RuleStoreError};

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Category name must not be blank")]
    BlankCategory,
    #[error("Keyword must not be blank")]
    BlankKeyword,
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("'Uncategorized' is reserved and cannot be edited")]
    Reserved,
    #[error(transparent)]
    Store(#[from] RuleStoreError),
}

/// The session's rule set together with the store it is persisted to.
///
/// Every successful edit writes the whole set back through the store.
pub struct RuleBook<S: RuleStore> {
    rules: RuleSet,
    store: S,
}

impl<S: RuleStore> RuleBook<S> {
    /// Loads rules from `store`, falling back to the defaults when the stored
    /// document cannot be read.
    pub fn open(store: S) -> Self {
        let rules = store.load_or_default();
        Self { rules, store }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns `false` when the category already exists.
    pub fn add_category(&mut self, name: &str) -> Result<bool, EditError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditError::BlankCategory);
        }
        if self.rules.contains(name) {
            return Ok(false);
        }
        let mut next = self.rules.clone();
        next.insert(name, Vec::new());
        self.commit(next)?;
        Ok(true)
    }

    /// Appends `keyword` to `category`, creating the category if needed.
    /// Returns `false` when an equivalent keyword is already present.
    pub fn add_keyword(&mut self, category: &str, keyword: &str) -> Result<bool, EditError> {
        let category = category.trim();
        let keyword = keyword.trim();
        if category.is_empty() {
            return Err(EditError::BlankCategory);
        }
        if category == UNCATEGORIZED {
            return Err(EditError::Reserved);
        }
        if keyword.is_empty() {
            return Err(EditError::BlankKeyword);
        }

        let wanted = normalize_keyword(keyword);
        let mut next = self.rules.clone();
        match next.get_mut(category) {
            Some(keywords) if keywords.iter().any(|k| normalize_keyword(k) == wanted) => {
                return Ok(false)
            }
            Some(keywords) => keywords.push(keyword.to_string()),
            None => {
                next.insert(category, vec![keyword.to_string()]);
            }
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Removes every keyword equivalent to `keyword`. Returns `false` when
    /// none matched.
    pub fn remove_keyword(&mut self, category: &str, keyword: &str) -> Result<bool, EditError> {
        let category = category.trim();
        let mut next = self.rules.clone();
        let keywords = next
            .get_mut(category)
            .ok_or_else(|| EditError::UnknownCategory(category.to_string()))?;
        let wanted = normalize_keyword(keyword);
        let before = keywords.len();
        keywords.retain(|k| normalize_keyword(k) != wanted);
        if keywords.len() == before {
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }

    pub fn remove_category(&mut self, name: &str) -> Result<(), EditError> {
        let name = name.trim();
        if name == UNCATEGORIZED {
            return Err(EditError::Reserved);
        }
        let mut next = self.rules.clone();
        next.remove(name)
            .ok_or_else(|| EditError::UnknownCategory(name.to_string()))?;
        self.commit(next)
    }

    /// Replaces the whole rule set.
    pub fn replace(&mut self, rules: RuleSet) -> Result<(), EditError> {
        self.commit(rules)
    }

    /// Saves `next` and only then makes it the session's rule set, so a
    /// failed save leaves the current rules untouched.
    fn commit(&mut self, next: RuleSet) -> Result<(), EditError> {
        self.store.save(&next)?;
        self.rules = next;
        Ok(())
    }
}
