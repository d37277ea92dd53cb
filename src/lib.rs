//! Monthly budget ledger.
//!
//! A `FinanceTracker` holds one `Budget` per (month, year) period. Transactions are
//! recorded against a budget, which keeps running income and expense totals. The
//! tracker answers savings, category, overspending and spending forecast queries
//! across all budgets, and `Report` renders a plain text summary of one month.

mod budget;
mod config;
mod report;
mod tracker;
mod transaction;

pub use budget::{Budget, Period};
pub use config::{DuplicatePolicy, LimitPolicy, TrackerConfig};
pub use report::{MonthlySummary, Report};
pub use tracker::{FinanceTracker, Overspending, SpendingForecast, TrackerError};
pub use transaction::{Transaction, TransactionKind};
