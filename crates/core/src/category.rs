use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Fallback category. Its keyword list is never consulted.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Keywords and descriptions are compared trimmed and lowercased.
pub fn normalize_keyword(s: &str) -> String {
    s.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Category name to keyword list, in insertion order.
///
/// Order matters: when a description matches keywords from several
/// categories, the category that comes last wins. The persisted form is a
/// JSON object whose key order is kept on both read and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    categories: Vec<CategoryRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            categories: vec![CategoryRule { name: UNCATEGORIZED.to_string(), keywords: Vec::new() }],
        }
    }
}

impl RuleSet {
    /// A rule set with no categories at all, not even the fallback.
    pub fn empty() -> Self {
        RuleSet { categories: Vec::new() }
    }

    pub fn from_pairs<I, N, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, Vec<K>)>,
        N: Into<String>,
        K: Into<String>,
    {
        let mut rules = RuleSet::empty();
        for (name, keywords) in pairs {
            rules.insert(name, keywords.into_iter().map(Into::into).collect());
        }
        rules
    }

    /// Sets the keywords for `name`. An existing category keeps its position
    /// and its previous keywords are returned.
    pub fn insert(&mut self, name: impl Into<String>, keywords: Vec<String>) -> Option<Vec<String>> {
        let name = name.into();
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => Some(std::mem::replace(&mut existing.keywords, keywords)),
            None => {
                self.categories.push(CategoryRule { name, keywords });
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let idx = self.categories.iter().position(|c| c.name == name)?;
        Some(self.categories.remove(idx).keywords)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.keywords.as_slice())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Vec<String>> {
        self.categories
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| &mut c.keywords)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.categories.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.keywords)?;
        }
        map.end()
    }
}

struct RuleSetVisitor;

impl<'de> Visitor<'de> for RuleSetVisitor {
    type Value = RuleSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of category names to keyword lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RuleSet, A::Error> {
        let mut rules = RuleSet::empty();
        while let Some((name, keywords)) = access.next_entry::<String, Vec<String>>()? {
            // A repeated key overwrites the earlier value but keeps its slot.
            rules.insert(name, keywords);
        }
        Ok(rules)
    }
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RuleSetVisitor)
    }
}
