use serde::Serialize;
use std::collections::BTreeMap;
use tally_core::{Money, Month, Transaction};

/// Sign of a month's net change, for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Positive,
    Negative,
    Flat,
}

impl Trend {
    pub fn of(net: Money) -> Self {
        if net.is_positive() {
            Trend::Positive
        } else if net.is_negative() {
            Trend::Negative
        } else {
            Trend::Flat
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub month: Month,
    pub credits: Money,
    /// Magnitude of money out; never negative.
    pub debits: Money,
    pub net: Money,
    pub trend: Trend,
}

/// Credits, debits and net per calendar month, most recent month first.
///
/// Zero amounts count toward neither side but their month still gets a row.
pub fn monthly_summary(rows: &[Transaction]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<Month, (Money, Money)> = BTreeMap::new();
    for tx in rows {
        let (credits, debits) = months.entry(Month::of(tx.date)).or_default();
        if tx.amount.is_positive() {
            *credits += tx.amount;
        } else if tx.amount.is_negative() {
            *debits += tx.amount;
        }
    }

    months
        .into_iter()
        .rev()
        .map(|(month, (credits, debits))| {
            let debits = debits.abs();
            let net = credits - debits;
            MonthlySummary { month, credits, debits, net, trend: Trend::of(net) }
        })
        .collect()
}
