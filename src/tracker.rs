use crate::{
    budget::{Budget, Period},
    config::{DuplicatePolicy, LimitPolicy, TrackerConfig},
    transaction::Transaction,
};
use log::{debug, trace, warn};
use rust_decimal::Decimal;
use std::{collections::HashMap, fmt};
use thiserror::Error;

/// Owns every `Budget` and answers all queries that span them.
///
/// Budgets are kept in registration order, which is also the order every
/// cross-budget query walks them in. Lookups by period go through an index that
/// always points at the first budget registered for that period.
#[derive(Debug, Default)]
pub struct FinanceTracker {
    config: TrackerConfig,
    budgets: Vec<Budget>,
    index: HashMap<Period, usize>,
}

#[derive(Error, Debug, PartialEq)]
pub enum TrackerError {
    #[error("no budget is registered for {0}")]
    NoMatchingBudget(Period),
    #[error("a budget is already registered for {0}")]
    DuplicateBudget(Period),
}

/// A category whose total exceeded the limit it was measured against.
#[derive(Clone, Debug, PartialEq)]
pub struct Overspending {
    pub category: String,
    pub total: Decimal,
    pub limit: Decimal,
    // Only set when measured against the owning budget's limit
    pub period: Option<Period>,
}

/// The expected spend for a category, averaged over past transactions.
#[derive(Clone, Debug, PartialEq)]
pub struct SpendingForecast {
    pub category: String,
    pub average: Decimal,
}

// Running sum for one category, kept in the order the category was first seen.
struct CategoryTotal<'a> {
    category: &'a str,
    total: Decimal,
    count: u32,
}

impl fmt::Display for Overspending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Overspending in category: {}", self.category)?;
        if let Some(period) = self.period {
            write!(f, " ({})", period)?;
        }
        Ok(())
    }
}

impl FinanceTracker {
    pub fn new() -> Self {
        FinanceTracker::default()
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        FinanceTracker {
            config,
            budgets: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Register a budget for a period, starting with no income or expenses.
    ///
    /// Only fails under `DuplicatePolicy::Reject`.
    pub fn set_budget(
        &mut self,
        month: u32,
        year: i32,
        income_goal: Decimal,
        expense_limit: Decimal,
    ) -> Result<(), TrackerError> {
        let period = Period::new(month, year);
        let budget = Budget::new(period, income_goal, expense_limit);

        match (self.index.get(&period).copied(), self.config.duplicates()) {
            (None, _) => {
                debug!(
                    "registering budget for {} (goal {}, limit {})",
                    period, income_goal, expense_limit
                );
                self.index.insert(period, self.budgets.len());
                self.budgets.push(budget);
            }
            (Some(_), DuplicatePolicy::KeepFirst) => {
                // The index keeps pointing at the first budget, so this one can only
                // be reached by the cross-budget queries.
                warn!(
                    "budget for {} already exists; the new one will not be reachable by period",
                    period
                );
                self.budgets.push(budget);
            }
            (Some(_), DuplicatePolicy::Reject) => {
                warn!("rejecting duplicate budget for {}", period);
                return Err(TrackerError::DuplicateBudget(period));
            }
            (Some(i), DuplicatePolicy::Replace) => {
                debug!("replacing budget for {}", period);
                self.budgets[i] = budget;
            }
        }

        Ok(())
    }

    /// Attach a transaction to the budget for a period and update its totals.
    ///
    /// If no budget is registered for the period the transaction is dropped and
    /// `TrackerError::NoMatchingBudget` is returned. Callers that don't care can
    /// discard the result.
    pub fn add_transaction(
        &mut self,
        month: u32,
        year: i32,
        transaction: Transaction,
    ) -> Result<(), TrackerError> {
        let period = Period::new(month, year);

        match self.index.get(&period) {
            Some(&i) => {
                debug!(
                    "recording {} {} in '{}' against {}",
                    transaction.kind(),
                    transaction.amount(),
                    transaction.category(),
                    period
                );
                self.budgets[i].record(transaction);
                Ok(())
            }
            None => {
                warn!(
                    "dropping transaction {}: no budget for {}",
                    transaction.id(),
                    period
                );
                Err(TrackerError::NoMatchingBudget(period))
            }
        }
    }

    /// Attach a transaction to the budget for the period its date falls in.
    pub fn add_transaction_on_date(&mut self, transaction: Transaction) -> Result<(), TrackerError> {
        let period = Period::of(transaction.date());
        self.add_transaction(period.month, period.year, transaction)
    }

    /// The first budget registered for a period.
    pub fn budget(&self, month: u32, year: i32) -> Option<&Budget> {
        self.index
            .get(&Period::new(month, year))
            .map(|&i| &self.budgets[i])
    }

    /// Every budget, in registration order, including unreachable duplicates.
    pub fn budgets(&self) -> impl Iterator<Item = &Budget> {
        self.budgets.iter()
    }

    pub fn transaction_count(&self) -> usize {
        self.budgets.iter().map(|b| b.transactions().len()).sum()
    }

    /// Transactions recorded for a period, or `None` if no budget is registered.
    pub fn transactions_for(&self, month: u32, year: i32) -> Option<&[Transaction]> {
        self.budget(month, year).map(Budget::transactions)
    }

    /// Transactions recorded for a period in insertion order. An unknown period
    /// yields an empty slice.
    pub fn list_transactions_by_month(&self, month: u32, year: i32) -> &[Transaction] {
        self.transactions_for(month, year).unwrap_or(&[])
    }

    /// Every transaction whose category is exactly `category`, across all budgets.
    pub fn list_transactions_by_category(&self, category: &str) -> Vec<&Transaction> {
        self.all_transactions()
            .filter(|t| t.category() == category)
            .collect()
    }

    /// Savings for a period, or `None` if no budget is registered.
    pub fn savings_for(&self, month: u32, year: i32) -> Option<Decimal> {
        self.budget(month, year).map(Budget::calculate_savings)
    }

    /// Savings for a period. An unknown period has zero savings.
    pub fn calculate_savings(&self, month: u32, year: i32) -> Decimal {
        self.savings_for(month, year).unwrap_or(Decimal::ZERO)
    }

    /// Flag categories that spent more than allowed. See `LimitPolicy` for what
    /// "allowed" means.
    pub fn identify_overspending(&self) -> Vec<Overspending> {
        match self.config.overspending() {
            LimitPolicy::FirstBudget => self.overspending_against_first(),
            LimitPolicy::OwningBudget => self.overspending_per_budget(),
        }
    }

    pub fn overspending_messages(&self) -> Vec<String> {
        self.identify_overspending()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Average expense per category over every budget for `month`, in any year.
    pub fn predict_future_spending(&self, month: u32) -> Vec<SpendingForecast> {
        let expenses = self
            .budgets
            .iter()
            .filter(|b| b.month() == month)
            .flat_map(|b| b.transactions())
            .filter(|t| t.is_expense());

        group_by_category(expenses)
            .into_iter()
            .map(|group| SpendingForecast {
                category: group.category.to_owned(),
                average: group.total / Decimal::from(group.count),
            })
            .collect()
    }

    fn all_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.budgets.iter().flat_map(|b| b.transactions())
    }

    fn overspending_against_first(&self) -> Vec<Overspending> {
        // With no budgets there is no limit to exceed
        let limit = match self.budgets.first() {
            Some(b) => b.expense_limit(),
            None => return Vec::new(),
        };

        trace!("measuring category totals against global limit {}", limit);

        group_by_category(self.all_transactions())
            .into_iter()
            .filter(|group| group.total > limit)
            .map(|group| Overspending {
                category: group.category.to_owned(),
                total: group.total,
                limit,
                period: None,
            })
            .collect()
    }

    fn overspending_per_budget(&self) -> Vec<Overspending> {
        let mut flagged = Vec::new();

        for budget in &self.budgets {
            let limit = budget.expense_limit();
            let expenses = budget.transactions().iter().filter(|t| t.is_expense());

            trace!("measuring category totals for {} against {}", budget.period(), limit);

            flagged.extend(
                group_by_category(expenses)
                    .into_iter()
                    .filter(|group| group.total > limit)
                    .map(|group| Overspending {
                        category: group.category.to_owned(),
                        total: group.total,
                        limit,
                        period: Some(budget.period()),
                    }),
            );
        }

        flagged
    }
}

// Sum amounts per category, preserving first-seen order.
fn group_by_category<'a, I>(transactions: I) -> Vec<CategoryTotal<'a>>
where
    I: Iterator<Item = &'a Transaction>,
{
    let mut groups: Vec<CategoryTotal<'a>> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for t in transactions {
        let i = *positions.entry(t.category()).or_insert_with(|| {
            groups.push(CategoryTotal {
                category: t.category(),
                total: Decimal::ZERO,
                count: 0,
            });
            groups.len() - 1
        });

        groups[i].total += t.amount();
        groups[i].count += 1;
    }

    groups
}
