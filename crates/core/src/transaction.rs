use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::UNCATEGORIZED;
use super::money::Money;
use super::period::DateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    Debit,
    Credit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub category: String,
    /// Source columns beyond date/description/amount, in file order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Money) -> Self {
        Transaction {
            date,
            description: description.into(),
            amount,
            category: UNCATEGORIZED.to_string(),
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, extra: Vec<(String, String)>) -> Self {
        self.extra = extra;
        self
    }

    /// Zero counts as a credit.
    pub fn flow(&self) -> Flow {
        if self.amount.is_negative() {
            Flow::Debit
        } else {
            Flow::Credit
        }
    }

    pub fn is_debit(&self) -> bool {
        self.flow() == Flow::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.flow() == Flow::Credit
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category == UNCATEGORIZED
    }
}

/// Transactions in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionTable {
    rows: Vec<Transaction>,
}

impl TransactionTable {
    pub fn new(rows: Vec<Transaction>) -> Self {
        TransactionTable { rows }
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Transaction] {
        &mut self.rows
    }

    pub fn into_rows(self) -> Vec<Transaction> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.rows.iter()
    }

    /// Rows dated inside `range`, source order kept.
    pub fn within(&self, range: DateRange) -> TransactionTable {
        TransactionTable {
            rows: self
                .rows
                .iter()
                .filter(|tx| range.contains(tx.date))
                .cloned()
                .collect(),
        }
    }
}

impl From<Vec<Transaction>> for TransactionTable {
    fn from(rows: Vec<Transaction>) -> Self {
        TransactionTable::new(rows)
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for TransactionTable {
    type Item = Transaction;
    type IntoIter = std::vec::IntoIter<Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
