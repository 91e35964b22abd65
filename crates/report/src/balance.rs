use chrono::NaiveDate;
use serde::Serialize;
use tally_core::{Money, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: Money,
}

/// Running total of amounts in date order, one point per transaction.
///
/// Same-day transactions keep their table order and each gets its own point.
pub fn cumulative_balance(rows: &[Transaction]) -> Vec<BalancePoint> {
    let mut sorted: Vec<&Transaction> = rows.iter().collect();
    sorted.sort_by_key(|tx| tx.date);

    let mut running = Money::zero();
    sorted
        .into_iter()
        .map(|tx| {
            running += tx.amount;
            BalancePoint { date: tx.date, balance: running }
        })
        .collect()
}
