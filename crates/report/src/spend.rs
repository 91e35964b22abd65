use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tally_core::{Money, Transaction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub total: Money,
    /// Fraction of all debit spend in the input, to four places.
    pub share: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorSpend {
    pub vendor: String,
    pub total: Money,
}

/// Transactions split the way the statement tabs show them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowSplit {
    pub debits: Vec<Transaction>,
    pub credits: Vec<Transaction>,
}

/// Absolute debit totals grouped by `key`, largest first. Equal totals keep
/// the order in which their key first appeared.
fn debit_totals_by<'a>(
    rows: &'a [Transaction],
    key: impl Fn(&'a Transaction) -> &'a str,
) -> Vec<(&'a str, Money)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, Money)> = Vec::new();

    for tx in rows.iter().filter(|tx| tx.amount.is_negative()) {
        let k = key(tx);
        let slot = *index.entry(k).or_insert_with(|| {
            totals.push((k, Money::zero()));
            totals.len() - 1
        });
        totals[slot].1 += tx.amount.abs();
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// Debit spend per category. Categories without debits are left out.
pub fn category_spend(rows: &[Transaction]) -> Vec<CategorySpend> {
    let totals = debit_totals_by(rows, |tx| tx.category.as_str());
    let overall: Money = totals.iter().map(|(_, total)| *total).sum();

    totals
        .into_iter()
        .map(|(category, total)| CategorySpend {
            category: category.to_string(),
            total,
            share: total
                .amount()
                .checked_div(overall.amount())
                .unwrap_or(Decimal::ZERO)
                .round_dp(4),
        })
        .collect()
}

/// Debit spend per raw description, largest first. Descriptions are not
/// normalized, so spelling variants of one merchant stay separate.
pub fn top_vendors(rows: &[Transaction]) -> Vec<VendorSpend> {
    debit_totals_by(rows, |tx| tx.description.as_str())
        .into_iter()
        .map(|(vendor, total)| VendorSpend { vendor: vendor.to_string(), total })
        .collect()
}

/// Debits are negative amounts; everything else, zero included, is a credit.
pub fn split_by_flow(rows: &[Transaction]) -> FlowSplit {
    let (debits, credits): (Vec<_>, Vec<_>) = rows.iter().cloned().partition(Transaction::is_debit);
    FlowSplit { debits, credits }
}
