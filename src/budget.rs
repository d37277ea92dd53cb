use crate::transaction::Transaction;
use chrono::{Datelike, NaiveDate};
use log::trace;
use rust_decimal::Decimal;
use std::fmt;

/// The (month, year) key a budget is registered under.
///
/// Months are not range checked: a period of month 13 is valid, it just never
/// matches a dated transaction.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

/// Goals, limits and recorded transactions for a single period.
#[derive(Clone, Debug, PartialEq)]
pub struct Budget {
    period: Period,
    income_goal: Decimal,
    expense_limit: Decimal,
    // These running totals must always equal the sums of `transactions` split by kind.
    // `record` is the only place that touches either side.
    actual_income: Decimal,
    actual_expenses: Decimal,
    transactions: Vec<Transaction>,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Self {
        Period { month, year }
    }

    /// The period a calendar date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Period::new(date.month(), date.year())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

impl Budget {
    pub fn new(period: Period, income_goal: Decimal, expense_limit: Decimal) -> Self {
        Budget {
            period,
            income_goal,
            expense_limit,
            actual_income: Decimal::ZERO,
            actual_expenses: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }

    /// Append a transaction and bump the matching running total.
    pub(crate) fn record(&mut self, transaction: Transaction) {
        if transaction.is_income() {
            self.actual_income += transaction.amount();
        } else {
            self.actual_expenses += transaction.amount();
        }

        trace!(
            "budget {} now at income {} / expenses {}",
            self.period,
            self.actual_income,
            self.actual_expenses
        );

        self.transactions.push(transaction);
    }

    /// Actual income less actual expenses. Computed on every call.
    pub fn calculate_savings(&self) -> Decimal {
        self.actual_income - self.actual_expenses
    }

    /// How much more can be spent before the expense limit is reached. Negative once
    /// the limit has been exceeded.
    pub fn remaining_allowance(&self) -> Decimal {
        self.expense_limit - self.actual_expenses
    }

    pub fn is_over_limit(&self) -> bool {
        self.actual_expenses > self.expense_limit
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn month(&self) -> u32 {
        self.period.month
    }

    pub fn year(&self) -> i32 {
        self.period.year
    }

    pub fn income_goal(&self) -> Decimal {
        self.income_goal
    }

    pub fn expense_limit(&self) -> Decimal {
        self.expense_limit
    }

    pub fn actual_income(&self) -> Decimal {
        self.actual_income
    }

    pub fn actual_expenses(&self) -> Decimal {
        self.actual_expenses
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionKind;
    use rust_decimal_macros::dec;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn period_of_date() {
        assert_eq!(Period::of(june(15)), Period::new(6, 2024));
        assert_eq!(Period::new(6, 2024).to_string(), "06/2024");
    }

    #[test]
    fn new_budget_is_empty() {
        let budget = Budget::new(Period::new(6, 2024), dec!(3000), dec!(2000));

        assert_eq!(budget.actual_income(), Decimal::ZERO);
        assert_eq!(budget.actual_expenses(), Decimal::ZERO);
        assert_eq!(budget.calculate_savings(), Decimal::ZERO);
        assert!(budget.transactions().is_empty());
    }

    #[test]
    fn record_splits_totals_by_kind() {
        let mut budget = Budget::new(Period::new(6, 2024), dec!(3000), dec!(2000));
        budget.record(Transaction::income(1, dec!(3000), june(1), "Salary"));
        budget.record(Transaction::expense(2, dec!(500), june(2), "Rent"));
        budget.record(Transaction::new(
            3,
            dec!(42.10),
            june(3),
            TransactionKind::from_label("Gift"),
            "Misc",
            "",
        ));

        assert_eq!(budget.actual_income(), dec!(3000));
        assert_eq!(budget.actual_expenses(), dec!(542.10));
        assert_eq!(budget.calculate_savings(), dec!(2457.90));

        let ids: Vec<u32> = budget.transactions().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn totals_match_transaction_sums() {
        let mut budget = Budget::new(Period::new(6, 2024), dec!(0), dec!(0));
        let amounts = [dec!(0.10), dec!(0.20), dec!(1000.01), dec!(-5)];
        for (i, amount) in amounts.iter().enumerate() {
            let t = if i % 2 == 0 {
                Transaction::income(i as u32, *amount, june(1), "A")
            } else {
                Transaction::expense(i as u32, *amount, june(1), "B")
            };
            budget.record(t);
        }

        let income: Decimal = budget
            .transactions()
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount())
            .sum();
        let expenses: Decimal = budget
            .transactions()
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount())
            .sum();

        assert_eq!(budget.actual_income(), income);
        assert_eq!(budget.actual_expenses(), expenses);
        assert_eq!(budget.actual_income(), dec!(1000.11));
    }

    #[test]
    fn remaining_allowance_goes_negative() {
        let mut budget = Budget::new(Period::new(6, 2024), dec!(0), dec!(100));
        budget.record(Transaction::expense(1, dec!(60), june(1), "Food"));
        assert_eq!(budget.remaining_allowance(), dec!(40));
        assert!(!budget.is_over_limit());

        budget.record(Transaction::expense(2, dec!(60), june(2), "Food"));
        assert_eq!(budget.remaining_allowance(), dec!(-20));
        assert!(budget.is_over_limit());
    }
}
