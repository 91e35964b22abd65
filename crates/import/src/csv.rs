use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::str::FromStr;
use tally_core::{Money, Transaction, TransactionTable};
use thiserror::Error;

pub const DATE_COLUMN: &str = "Date";
pub const DESCRIPTION_COLUMN: &str = "Description";
pub const AMOUNT_COLUMN: &str = "Amount";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvProfile {
    pub date_format: String,
    pub delimiter: String,
}

impl Default for CsvProfile {
    fn default() -> Self {
        Self {
            date_format: "%m/%d/%Y".to_string(),
            delimiter: ",".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
    #[error("Line {line}: invalid date '{value}' (expected {format})")]
    InvalidDate {
        line: u64,
        value: String,
        format: String,
    },
    #[error("Line {line}: invalid amount '{value}'")]
    InvalidAmount { line: u64, value: String },
    #[error("Delimiter must be a single byte, got '{0}'")]
    InvalidDelimiter(String),
}

/// Positions of the required columns plus every other column, by trimmed
/// header name.
struct Columns {
    date: usize,
    description: usize,
    amount: usize,
    extra: Vec<(usize, String)>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let names: Vec<&str> = headers.iter().map(str::trim).collect();
        let find = |column: &'static str| {
            names
                .iter()
                .position(|name| *name == column)
                .ok_or(LoadError::MissingColumn(column))
        };

        let date = find(DATE_COLUMN)?;
        let description = find(DESCRIPTION_COLUMN)?;
        let amount = find(AMOUNT_COLUMN)?;
        let extra = names
            .iter()
            .enumerate()
            .filter(|(idx, _)| ![date, description, amount].contains(idx))
            .map(|(idx, name)| (idx, name.to_string()))
            .collect();

        Ok(Columns { date, description, amount, extra })
    }
}

fn parse_date(s: &str, format: &str, line: u64) -> Result<NaiveDate, LoadError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, format).map_err(|_| LoadError::InvalidDate {
        line,
        value: s.to_string(),
        format: format.to_string(),
    })
}

/// Accepts `$`, thousands separators and accounting parentheses. The value
/// is rounded to cents, half away from zero.
fn parse_amount(s: &str, line: u64) -> Result<Money, LoadError> {
    let invalid = || LoadError::InvalidAmount { line, value: s.trim().to_string() };
    let trimmed = s.trim();
    let (negative, body) = match trimmed.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };
    let cleaned = body.replace([',', '$', ' '], "");
    let mut dec = Decimal::from_str(&cleaned).map_err(|_| invalid())?;
    if negative {
        dec = -dec;
    }
    Ok(Money::from_decimal(dec))
}

/// Parses a statement into an uncategorized table.
///
/// Amounts are stored rounded to cents (half away from zero), so a file with
/// three or more decimal places sums to the rounded values.
pub fn read_transactions<R: Read>(
    data: R,
    profile: &CsvProfile,
) -> Result<TransactionTable, LoadError> {
    let delimiter = match profile.delimiter.as_bytes() {
        [byte] => *byte,
        _ => return Err(LoadError::InvalidDelimiter(profile.delimiter.clone())),
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(data);

    let columns = Columns::locate(reader.headers()?)?;
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let field = |idx: usize| record.get(idx).unwrap_or_default();

        let date = parse_date(field(columns.date), &profile.date_format, line)?;
        let amount = parse_amount(field(columns.amount), line)?;
        let extra = columns
            .extra
            .iter()
            .map(|(idx, name)| (name.clone(), field(*idx).to_string()))
            .collect();

        rows.push(Transaction::new(date, field(columns.description), amount).with_extra(extra));
    }

    tracing::debug!(rows = rows.len(), extra_columns = columns.extra.len(), "Parsed statement");
    Ok(TransactionTable::new(rows))
}
