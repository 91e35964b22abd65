use tally_core::{normalize_keyword, RuleSet, TransactionTable, UNCATEGORIZED};

/// A category with its keywords already normalized.
struct CompiledCategory {
    name: String,
    keywords: Vec<String>,
}

impl CompiledCategory {
    fn matches(&self, normalized_description: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized_description.contains(keyword.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategorizeSummary {
    pub categorized: usize,
    pub uncategorized: usize,
}

/// Keyword categorizer built from a [`RuleSet`].
///
/// Categories are applied in rule-set order and each one overwrites the
/// category of every row it matches, so the last matching category wins.
/// The fallback category and categories without keywords never match.
pub struct Categorizer {
    categories: Vec<CompiledCategory>,
}

impl Categorizer {
    pub fn new(rules: &RuleSet) -> Self {
        let categories = rules
            .iter()
            .filter(|rule| rule.name != UNCATEGORIZED && !rule.keywords.is_empty())
            .map(|rule| CompiledCategory {
                name: rule.name.clone(),
                keywords: rule.keywords.iter().map(|k| normalize_keyword(k)).collect(),
            })
            .collect();
        Self { categories }
    }

    /// Category a single description would receive.
    pub fn category_for(&self, description: &str) -> &str {
        let description = normalize_keyword(description);
        self.categories
            .iter()
            .rev()
            .find(|category| category.matches(&description))
            .map_or(UNCATEGORIZED, |category| category.name.as_str())
    }

    /// Overwrites the category of every row in `table`.
    pub fn categorize(&self, table: &mut TransactionTable) -> CategorizeSummary {
        let rows = table.rows_mut();
        let descriptions: Vec<String> = rows
            .iter()
            .map(|tx| normalize_keyword(&tx.description))
            .collect();

        for tx in rows.iter_mut() {
            tx.category = UNCATEGORIZED.to_string();
        }

        // Categories outer, rows inner: a later category replaces an earlier match.
        for category in &self.categories {
            let mut hits = 0usize;
            for (tx, description) in rows.iter_mut().zip(&descriptions) {
                if category.matches(description) {
                    tx.category.clone_from(&category.name);
                    hits += 1;
                }
            }
            tracing::trace!(category = %category.name, hits, "Applied category keywords");
        }

        let uncategorized = rows.iter().filter(|tx| tx.is_uncategorized()).count();
        let summary = CategorizeSummary {
            categorized: rows.len() - uncategorized,
            uncategorized,
        };
        tracing::debug!(
            categorized = summary.categorized,
            uncategorized = summary.uncategorized,
            "Categorized transactions"
        );
        summary
    }
}

pub fn categorize(table: &mut TransactionTable, rules: &RuleSet) -> CategorizeSummary {
    Categorizer::new(rules).categorize(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::{Money, Transaction};

    fn make_tx(desc: &str, cents: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            desc,
            Money::from_cents(cents),
        )
    }

    fn table(descriptions: &[&str]) -> TransactionTable {
        TransactionTable::new(descriptions.iter().map(|d| make_tx(d, -500)).collect())
    }

    fn categories(table: &TransactionTable) -> Vec<&str> {
        table.iter().map(|t| t.category.as_str()).collect()
    }

    #[test]
    fn contains_match_case_insensitive() {
        let rules = RuleSet::from_pairs([("Groceries", vec!["Whole Foods"])]);
        let mut t = table(&["WHOLE FOODS MARKET 123"]);
        categorize(&mut t, &rules);
        assert_eq!(categories(&t), ["Groceries"]);
    }

    #[test]
    fn keywords_and_descriptions_are_trimmed() {
        let rules = RuleSet::from_pairs([("Dining", vec!["  coffee shop  "])]);
        let mut t = table(&["   Coffee Shop   "]);
        categorize(&mut t, &rules);
        assert_eq!(categories(&t), ["Dining"]);
    }

    #[test]
    fn no_match_is_uncategorized() {
        let rules = RuleSet::from_pairs([("Groceries", vec!["whole foods"])]);
        let mut t = table(&["STARBUCKS"]);
        let summary = categorize(&mut t, &rules);
        assert_eq!(categories(&t), [UNCATEGORIZED]);
        assert_eq!(summary, CategorizeSummary { categorized: 0, uncategorized: 1 });
    }

    #[test]
    fn last_matching_category_wins() {
        let rules = RuleSet::from_pairs([
            ("Shopping", vec!["amazon"]),
            ("Groceries", vec!["fresh"]),
            ("Subscriptions", vec!["prime"]),
        ]);
        let mut t = table(&["AMAZON FRESH", "AMAZON PRIME", "AMAZON PRIME FRESH", "AMAZON"]);
        categorize(&mut t, &rules);
        assert_eq!(
            categories(&t),
            ["Groceries", "Subscriptions", "Subscriptions", "Shopping"]
        );
    }

    #[test]
    fn reordering_rules_changes_winner() {
        let mut t = table(&["AMAZON PRIME"]);
        categorize(
            &mut t,
            &RuleSet::from_pairs([("Subscriptions", vec!["prime"]), ("Shopping", vec!["amazon"])]),
        );
        assert_eq!(categories(&t), ["Shopping"]);
    }

    #[test]
    fn fallback_keywords_are_ignored() {
        let rules = RuleSet::from_pairs([
            ("Dining", vec!["cafe"]),
            (UNCATEGORIZED, vec!["cafe", "paycheck"]),
        ]);
        let mut t = table(&["CAFE 12", "PAYCHECK"]);
        categorize(&mut t, &rules);
        assert_eq!(categories(&t), ["Dining", UNCATEGORIZED]);
    }

    #[test]
    fn empty_keyword_list_is_skipped() {
        let rules = RuleSet::from_pairs([("Dining", vec!["cafe"]), ("Empty", Vec::<&str>::new())]);
        let mut t = table(&["CAFE"]);
        categorize(&mut t, &rules);
        assert_eq!(categories(&t), ["Dining"]);
    }

    #[test]
    fn categorize_overwrites_previous_categories() {
        let mut t = table(&["CAFE", "PAYCHECK"]);
        t.rows_mut()[1].category = "Stale".to_string();
        categorize(&mut t, &RuleSet::from_pairs([("Dining", vec!["cafe"])]));
        assert_eq!(categories(&t), ["Dining", UNCATEGORIZED]);
    }

    #[test]
    fn category_for_agrees_with_table_pass() {
        let rules = RuleSet::from_pairs([
            ("Shopping", vec!["amazon"]),
            ("Subscriptions", vec!["prime"]),
        ]);
        let engine = Categorizer::new(&rules);
        assert_eq!(engine.category_for("Amazon Prime"), "Subscriptions");
        assert_eq!(engine.category_for("amazon"), "Shopping");
        assert_eq!(engine.category_for("netflix"), UNCATEGORIZED);
    }

    #[test]
    fn summary_counts_rows() {
        let rules = RuleSet::from_pairs([("Dining", vec!["coffee shop"])]);
        let mut t = table(&["Coffee Shop", "Paycheck", "Coffee Shop"]);
        let summary = categorize(&mut t, &rules);
        assert_eq!(summary, CategorizeSummary { categorized: 2, uncategorized: 1 });
    }
}
