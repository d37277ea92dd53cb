use crate::tracker::FinanceTracker;
use log::debug;
use rust_decimal::Decimal;
use std::fmt;

/// Renders plain text summaries of a single month.
pub struct Report;

/// The figures behind a monthly report.
///
/// The `Display` output is the report text itself: a "Report:" header followed by
/// the income, expenses and savings lines, each newline terminated. Other tools
/// parse this, so the shape must not change.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlySummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub savings: Decimal,
}

impl Report {
    /// Collect the totals for a period. An unknown period sums to zero across the
    /// board.
    pub fn summarize(tracker: &FinanceTracker, month: u32, year: i32) -> MonthlySummary {
        let transactions = tracker.list_transactions_by_month(month, year);

        let total_income = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount())
            .sum();
        let total_expenses = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount())
            .sum();

        MonthlySummary {
            total_income,
            total_expenses,
            savings: tracker.calculate_savings(month, year),
        }
    }

    pub fn generate(tracker: &FinanceTracker, month: u32, year: i32) -> String {
        debug!("generating report for {:02}/{}", month, year);
        Report::summarize(tracker, month, year).to_string()
    }
}

impl fmt::Display for MonthlySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Report:")?;
        writeln!(f, "Total Income: {}", self.total_income)?;
        writeln!(f, "Total Expenses: {}", self.total_expenses)?;
        writeln!(f, "Savings: {}", self.savings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::Transaction;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn generate_report_for_month() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut tracker = FinanceTracker::new();
        tracker.set_budget(6, 2024, dec!(3000), dec!(2000)).unwrap();
        tracker
            .add_transaction(6, 2024, Transaction::income(1, dec!(3000), date, "Salary"))
            .unwrap();
        tracker
            .add_transaction(6, 2024, Transaction::expense(2, dec!(500), date, "Rent"))
            .unwrap();
        tracker
            .add_transaction(6, 2024, Transaction::expense(3, dec!(600), date, "Rent"))
            .unwrap();

        assert_eq!(
            Report::generate(&tracker, 6, 2024),
            "Report:\nTotal Income: 3000\nTotal Expenses: 1100\nSavings: 1900\n"
        );
    }

    #[test]
    fn generate_report_keeps_decimal_scale() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut tracker = FinanceTracker::new();
        tracker.set_budget(6, 2024, dec!(0), dec!(0)).unwrap();
        tracker
            .add_transaction(6, 2024, Transaction::income(1, dec!(10.50), date, "Salary"))
            .unwrap();
        tracker
            .add_transaction(6, 2024, Transaction::expense(2, dec!(0.25), date, "Food"))
            .unwrap();

        let summary = Report::summarize(&tracker, 6, 2024);
        assert_eq!(summary.total_income, dec!(10.50));
        assert_eq!(summary.savings, dec!(10.25));
        assert_eq!(
            summary.to_string(),
            "Report:\nTotal Income: 10.50\nTotal Expenses: 0.25\nSavings: 10.25\n"
        );
    }

    #[test]
    fn generate_report_unknown_month() {
        let tracker = FinanceTracker::new();
        assert_eq!(
            Report::generate(&tracker, 13, 2024),
            "Report:\nTotal Income: 0\nTotal Expenses: 0\nSavings: 0\n"
        );
    }
}
