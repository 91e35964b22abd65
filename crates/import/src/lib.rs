pub mod csv;
pub mod rules;

pub use crate::csv::{read_transactions, CsvProfile, LoadError};
pub use crate::rules::{categorize, CategorizeSummary, Categorizer};

use std::io::Read;
use tally_core::{RuleSet, TransactionTable};

/// Parses a statement and categorizes every row against `rules`.
///
/// Fails as a whole: no partial table is returned when any row is bad.
pub fn load_transactions<R: Read>(
    data: R,
    profile: &CsvProfile,
    rules: &RuleSet,
) -> Result<TransactionTable, LoadError> {
    let mut table = read_transactions(data, profile)?;
    categorize(&mut table, rules);
    Ok(table)
}
