use chrono::NaiveDate;
use serde::Serialize;
use tally_core::{DateRange, PeriodError, Transaction, TransactionTable};

use crate::balance::{cumulative_balance, BalancePoint};
use crate::monthly::{monthly_summary, MonthlySummary};
use crate::spend::{category_spend, split_by_flow, top_vendors, CategorySpend, FlowSplit, VendorSpend};

/// Every view over one windowed table, computed in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub window: DateRange,
    pub balance: Vec<BalancePoint>,
    pub monthly: Vec<MonthlySummary>,
    pub categories: Vec<CategorySpend>,
    pub vendors: Vec<VendorSpend>,
    pub debits: Vec<Transaction>,
    pub credits: Vec<Transaction>,
}

impl Dashboard {
    /// Builds the views for the trailing `months` calendar months ending `today`.
    pub fn build(table: &TransactionTable, today: NaiveDate, months: u32) -> Result<Self, PeriodError> {
        let window = DateRange::trailing_months(today, months)?;
        Ok(Self::for_window(table, window))
    }

    pub fn for_window(table: &TransactionTable, window: DateRange) -> Self {
        let windowed = table.within(window);
        tracing::debug!(
            %window,
            kept = windowed.len(),
            dropped = table.len() - windowed.len(),
            "Windowed transactions"
        );

        let rows = windowed.rows();
        let FlowSplit { debits, credits } = split_by_flow(rows);
        Dashboard {
            window,
            balance: cumulative_balance(rows),
            monthly: monthly_summary(rows),
            categories: category_spend(rows),
            vendors: top_vendors(rows),
            debits,
            credits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.balance.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, january, tx};
    use tally_core::{Money, Month};

    #[test]
    fn january_example_end_to_end() {
        let table = TransactionTable::new(january());
        let dash = Dashboard::build(&table, date(2024, 1, 31), 12).unwrap();

        assert_eq!(dash.window.start, date(2023, 2, 1));
        let balances: Vec<_> = dash.balance.iter().map(|p| p.balance).collect();
        assert_eq!(
            balances,
            [Money::from_cents(-450), Money::from_cents(99550), Money::from_cents(99225)]
        );
        assert_eq!(dash.monthly.len(), 1);
        assert_eq!(dash.monthly[0].net, Money::from_cents(99225));
        assert_eq!(dash.categories[0].category, "Dining");
        assert_eq!(dash.vendors[0].vendor, "Coffee Shop");
        assert_eq!(dash.debits.len(), 2);
        assert_eq!(dash.credits.len(), 1);
    }

    #[test]
    fn rows_outside_window_are_ignored() {
        let table = TransactionTable::new(vec![
            tx(date(2023, 3, 31), "too old", -10000, "Old"),
            tx(date(2023, 4, 1), "first day", -100, "Kept"),
            tx(date(2024, 3, 15), "today", -200, "Kept"),
            tx(date(2024, 3, 16), "future", -5000, "Future"),
        ]);
        let dash = Dashboard::build(&table, date(2024, 3, 15), 12).unwrap();

        let months: Vec<Month> = dash.monthly.iter().map(|r| r.month).collect();
        assert_eq!(months, [Month::new(2024, 3).unwrap(), Month::new(2023, 4).unwrap()]);
        assert_eq!(dash.categories.len(), 1);
        assert_eq!(dash.categories[0].total, Money::from_cents(300));
        assert_eq!(dash.balance.last().unwrap().balance, Money::from_cents(-300));
    }

    #[test]
    fn rebuilding_gives_identical_output() {
        let table = TransactionTable::new(january());
        let a = Dashboard::build(&table, date(2024, 6, 1), 12).unwrap();
        let b = Dashboard::build(&table, date(2024, 6, 1), 12).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_window() {
        let table = TransactionTable::new(january());
        let dash = Dashboard::build(&table, date(2026, 10, 19), 12).unwrap();
        assert!(dash.is_empty());
        assert!(dash.monthly.is_empty());
    }

    #[test]
    fn zero_months_is_an_error() {
        let table = TransactionTable::new(january());
        assert!(Dashboard::build(&table, date(2024, 1, 31), 0).is_err());
    }

    #[test]
    fn serializes_to_json() {
        let table = TransactionTable::new(january());
        let dash = Dashboard::build(&table, date(2024, 1, 31), 12).unwrap();
        let json = serde_json::to_value(&dash).unwrap();
        assert_eq!(json["monthly"][0]["month"], "2024-01");
        assert_eq!(json["monthly"][0]["trend"], "positive");
        assert_eq!(json["categories"][0]["category"], "Dining");
        assert_eq!(json["window"]["start"], "2023-02-01");
    }
}
