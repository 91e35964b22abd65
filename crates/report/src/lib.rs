//! Derived views over a categorized transaction table.
//!
//! Every function here is a pure pass over the rows it is given; nothing is
//! cached between calls.

pub mod balance;
pub mod dashboard;
pub mod monthly;
pub mod spend;

pub use balance::{cumulative_balance, BalancePoint};
pub use dashboard::Dashboard;
pub use monthly::{monthly_summary, MonthlySummary, Trend};
pub use spend::{category_spend, split_by_flow, top_vendors, CategorySpend, FlowSplit, VendorSpend};
