use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::{convert::Infallible, fmt, str::FromStr};

/// Whether a transaction brings money in or takes it out.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A single dated income or expense event.
///
/// `Transaction`s are immutable once created. They are attached to exactly one
/// `Budget` through `FinanceTracker::add_transaction`, which is also the only place
/// the budget's running totals are updated.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    id: u32,
    amount: Decimal,
    date: NaiveDate,
    kind: TransactionKind,
    category: String,
    description: String,
}

impl TransactionKind {
    /// Classify a free-form type label.
    ///
    /// Only the exact label "Income" is income. Anything else, including typos and
    /// differently cased labels, is treated as an expense.
    pub fn from_label(label: &str) -> Self {
        if label == "Income" {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }

    pub fn is_income(self) -> bool {
        self == TransactionKind::Income
    }
}

impl FromStr for TransactionKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TransactionKind::from_label(s))
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "Income"),
            TransactionKind::Expense => write!(f, "Expense"),
        }
    }
}

impl Transaction {
    pub fn new<C, D>(
        id: u32,
        amount: Decimal,
        date: NaiveDate,
        kind: TransactionKind,
        category: C,
        description: D,
    ) -> Self
    where
        C: Into<String>,
        D: Into<String>,
    {
        Transaction {
            id,
            amount,
            date,
            kind,
            category: category.into(),
            description: description.into(),
        }
    }

    pub fn income<C: Into<String>>(id: u32, amount: Decimal, date: NaiveDate, category: C) -> Self {
        Transaction::new(id, amount, date, TransactionKind::Income, category, "")
    }

    pub fn expense<C: Into<String>>(id: u32, amount: Decimal, date: NaiveDate, category: C) -> Self {
        Transaction::new(id, amount, date, TransactionKind::Expense, category, "")
    }

    /// Replace the description. Only useful before the transaction is recorded.
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    pub fn is_expense(&self) -> bool {
        !self.kind.is_income()
    }
}
