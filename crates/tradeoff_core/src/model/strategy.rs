//! Candidate allocation strategies
//!
//! A strategy is a fixed split of the household's surplus income between
//! debt paydown and savings/investment.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tolerance used when checking that a ratio sums to one
pub const RATIO_EPSILON: f64 = 1e-9;

/// The three allocation strategies the engine compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// 75% of surplus to debt, 25% to savings
    AggressiveDebt,
    /// 50/50 split
    Balanced,
    /// 25% of surplus to debt, 75% to savings
    AggressiveSavings,
}

impl StrategyKind {
    /// Candidates in evaluation order. Score ties resolve to the earlier entry.
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::AggressiveDebt,
        StrategyKind::Balanced,
        StrategyKind::AggressiveSavings,
    ];

    /// Fixed allocation ratio for this strategy
    pub fn ratio(self) -> AllocationRatio {
        match self {
            StrategyKind::AggressiveDebt => AllocationRatio::new(0.75, 0.25),
            StrategyKind::Balanced => AllocationRatio::new(0.50, 0.50),
            StrategyKind::AggressiveSavings => AllocationRatio::new(0.25, 0.75),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::AggressiveDebt => "aggressive_debt",
            StrategyKind::Balanced => "balanced",
            StrategyKind::AggressiveSavings => "aggressive_savings",
        }
    }

    /// Human-readable name used in narrative text
    pub fn display_name(self) -> &'static str {
        match self {
            StrategyKind::AggressiveDebt => "Aggressive debt payoff",
            StrategyKind::Balanced => "Balanced",
            StrategyKind::AggressiveSavings => "Aggressive savings",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fractional split of surplus income. `debt_percent + savings_percent == 1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationRatio {
    pub debt_percent: f64,
    pub savings_percent: f64,
}

impl AllocationRatio {
    pub const fn new(debt_percent: f64, savings_percent: f64) -> Self {
        Self {
            debt_percent,
            savings_percent,
        }
    }

    /// Everything to savings; used when there is no debt
    pub const fn all_savings() -> Self {
        Self::new(0.0, 1.0)
    }

    pub fn is_normalized(&self) -> bool {
        (self.debt_percent + self.savings_percent - 1.0).abs() < RATIO_EPSILON
    }

    /// Split an amount into `(debt, savings)` portions
    pub fn split(&self, amount: f64) -> (f64, f64) {
        (amount * self.debt_percent, amount * self.savings_percent)
    }
}
