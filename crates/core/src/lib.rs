pub mod category;
pub mod money;
pub mod period;
pub mod transaction;

pub use category::{normalize_keyword, CategoryRule, RuleSet, UNCATEGORIZED};
pub use money::Money;
pub use period::{DateRange, Month, PeriodError};
pub use transaction::{Flow, Transaction, TransactionTable};
