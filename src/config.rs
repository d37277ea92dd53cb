/// What `FinanceTracker::set_budget` does when a period is already registered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DuplicatePolicy {
    /// Keep every budget. Lookups by period only ever see the first one, but the
    /// later ones still count towards cross-budget aggregates.
    KeepFirst,
    /// Refuse the new budget with `TrackerError::DuplicateBudget`.
    Reject,
    /// Overwrite the existing budget with a fresh, empty one.
    Replace,
}

/// Which expense limit `FinanceTracker::identify_overspending` measures against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LimitPolicy {
    /// Group every transaction in the tracker by category and compare each total
    /// with the limit of the first registered budget.
    FirstBudget,
    /// Group each budget's expenses by category and compare with that budget's own
    /// limit.
    OwningBudget,
}

/// Tracker behaviour switches. The defaults reproduce the legacy ledger.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TrackerConfig {
    duplicates: DuplicatePolicy,
    overspending: LimitPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            duplicates: DuplicatePolicy::KeepFirst,
            overspending: LimitPolicy::FirstBudget,
        }
    }
}

impl TrackerConfig {
    pub fn with_duplicates(&mut self, policy: DuplicatePolicy) -> &mut Self {
        self.duplicates = policy;
        self
    }

    pub fn with_overspending(&mut self, policy: LimitPolicy) -> &mut Self {
        self.overspending = policy;
        self
    }

    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    pub fn overspending(&self) -> LimitPolicy {
        self.overspending
    }
}
