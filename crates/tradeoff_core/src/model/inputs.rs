//! Request types
//!
//! Everything the engine needs to know about a household arrives in a single
//! `TradeoffInput`. None of these types are persisted; they are built fresh for
//! every request and treated as immutable by the engine.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;

use super::ids::GoalId;

/// Psychological weight applied when the caller does not provide one
pub const DEFAULT_PSYCHOLOGICAL_WEIGHT: f64 = 0.15;

/// Category of a debt. Informational only; payoff order is driven by rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtKind {
    CreditCard,
    StudentLoan,
    AutoLoan,
    Mortgage,
    PersonalLoan,
    Medical,
    #[default]
    Other,
}

/// A single outstanding debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: DebtKind,
    /// Outstanding balance
    pub balance: f64,
    /// Annual interest rate as a fraction (0.18 = 18% APR)
    pub interest_rate: f64,
    pub minimum_payment: f64,
}

impl DebtInfo {
    pub fn new(balance: f64, interest_rate: f64, minimum_payment: f64) -> Self {
        Self {
            name: String::new(),
            kind: DebtKind::Other,
            balance,
            interest_rate,
            minimum_payment,
        }
    }

    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate / 12.0
    }
}

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalInfo {
    pub id: GoalId,
    #[serde(default)]
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    /// Share (0-1) of the monthly savings contribution directed at this goal.
    /// `None` means the goal receives the full contribution.
    #[serde(default)]
    pub priority: Option<f64>,
}

impl GoalInfo {
    pub fn new(id: impl Into<String>, target_amount: f64, current_amount: f64) -> Self {
        Self {
            id: GoalId::new(id),
            name: String::new(),
            target_amount,
            current_amount,
            priority: None,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Portion of a monthly savings amount that goes to this goal
    pub fn contribution_share(&self, monthly_savings: f64) -> f64 {
        match self.priority {
            Some(priority) => monthly_savings * priority,
            None => monthly_savings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    /// Multiplier applied to a strategy's raw risk score
    pub fn risk_multiplier(self) -> f64 {
        match self {
            RiskTolerance::Conservative => 1.2,
            RiskTolerance::Moderate => 1.0,
            RiskTolerance::Aggressive => 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentProfile {
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,
    /// Expected annual return as a fraction
    pub expected_return: f64,
    #[serde(default)]
    pub time_horizon_years: u32,
    #[serde(default)]
    pub current_balance: f64,
}

impl Default for InvestmentProfile {
    fn default() -> Self {
        Self {
            risk_tolerance: RiskTolerance::Moderate,
            expected_return: 0.07,
            time_horizon_years: 10,
            current_balance: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyFundStatus {
    #[serde(default)]
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    #[serde(default)]
    pub monthly_expenses: f64,
    #[serde(default)]
    pub target_months: f64,
}

impl EmergencyFundStatus {
    pub fn new(current_amount: f64, target_amount: f64) -> Self {
        Self {
            target_amount,
            current_amount,
            ..Default::default()
        }
    }

    /// Explicit target, or expenses times months of coverage when unset
    pub fn effective_target(&self) -> f64 {
        if self.target_amount > 0.0 {
            self.target_amount
        } else {
            (self.monthly_expenses * self.target_months).max(0.0)
        }
    }

    /// Fraction of the target already saved, clamped to [0, 1]
    pub fn progress(&self) -> f64 {
        let target = self.effective_target();
        if target <= 0.0 {
            return 1.0;
        }
        (self.current_amount / target).clamp(0.0, 1.0)
    }

    pub fn gap(&self) -> f64 {
        (self.effective_target() - self.current_amount).max(0.0)
    }
}

/// What the household says it cares about most
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialPriority {
    DebtFree,
    WealthBuilding,
    #[default]
    Balanced,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub priority: FinancialPriority,
    /// Weight of the psychological-preference term in the composite score
    #[serde(default)]
    pub psychological_weight: Option<f64>,
}

impl UserPreferences {
    pub fn psychological_weight(&self) -> f64 {
        self.psychological_weight
            .unwrap_or(DEFAULT_PSYCHOLOGICAL_WEIGHT)
    }
}

/// Complete request for a debt-vs-savings recommendation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeoffInput {
    pub monthly_income: f64,
    #[serde(default)]
    pub essential_expenses: f64,
    #[serde(default)]
    pub debts: Vec<DebtInfo>,
    #[serde(default)]
    pub goals: Vec<GoalInfo>,
    #[serde(default)]
    pub investment_profile: InvestmentProfile,
    #[serde(default)]
    pub emergency_fund: EmergencyFundStatus,
    #[serde(default)]
    pub preferences: UserPreferences,
    /// Per-request simulation settings; the evaluator's defaults apply when absent
    #[serde(default)]
    pub simulation: Option<SimulationConfig>,
    /// Date goal target dates are projected from; today when absent
    #[serde(default)]
    pub as_of: Option<jiff::civil::Date>,
}

impl TradeoffInput {
    pub fn total_debt(&self) -> f64 {
        self.debts.iter().map(|d| d.balance).sum()
    }

    pub fn total_minimum_payments(&self) -> f64 {
        self.debts.iter().map(|d| d.minimum_payment).sum()
    }

    /// Balance-weighted average annual rate, 0 when nothing is owed
    pub fn weighted_interest_rate(&self) -> f64 {
        let total = self.total_debt();
        if total <= 0.0 {
            return 0.0;
        }
        self.debts
            .iter()
            .map(|d| d.balance * d.interest_rate)
            .sum::<f64>()
            / total
    }

    pub fn highest_interest_rate(&self) -> f64 {
        self.debts
            .iter()
            .map(|d| d.interest_rate)
            .fold(0.0, f64::max)
    }

    /// Income left after essentials and minimum payments
    pub fn extra_money(&self) -> f64 {
        self.monthly_income - self.essential_expenses - self.total_minimum_payments()
    }

    pub fn has_debt(&self) -> bool {
        !self.debts.is_empty()
    }
}
