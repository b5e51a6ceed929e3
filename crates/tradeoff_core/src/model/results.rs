//! Engine output types
//!
//! Contains the per-strategy analysis, Monte Carlo summary, net-worth
//! projection and the top-level `TradeoffOutput` returned to callers.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::ids::GoalId;
use super::strategy::{AllocationRatio, StrategyKind};

/// Deterministic analysis of one candidate strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub strategy: StrategyKind,
    pub ratio: AllocationRatio,
    /// Monthly amount going to debt beyond minimums
    pub monthly_debt_payment: f64,
    /// Monthly amount going to savings/investment
    pub monthly_savings: f64,
    /// Interest saved plus present value of the investment balance
    pub npv: f64,
    pub total_interest_paid: f64,
    /// Interest avoided compared to paying only minimums
    pub interest_saved: f64,
    pub investment_future_value: f64,
    pub months_to_debt_free: u32,
    pub goal_months: FxHashMap<GoalId, u32>,
    /// 0 (safe) to 10 (risky)
    pub risk_score: f64,
    pub composite_score: f64,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// Aggregated statistics over all Monte Carlo trials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    pub num_simulations: usize,
    /// Fraction of trials that were debt free within the horizon and hit at
    /// least half of their goals
    pub success_probability: f64,
    pub debt_free_p50: u32,
    pub debt_free_p75: u32,
    pub debt_free_p90: u32,
    pub mean_months_to_debt_free: f64,
    pub npv_mean: f64,
    pub npv_std_dev: f64,
    pub npv_p5: f64,
    pub npv_p95: f64,
    /// 95% confidence interval for the NPV mean
    pub npv_ci_lower: f64,
    pub npv_ci_upper: f64,
    /// Mean fraction of goals reached within the horizon (1.0 with no goals)
    pub goal_achievement_rate: f64,
}

/// One sample of the projected balance sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetWorthPoint {
    pub month: u32,
    pub net_worth: f64,
    pub total_debt: f64,
    pub savings: f64,
}

/// Projected completion of a goal under the recommended strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProjection {
    pub goal_id: GoalId,
    pub name: String,
    pub months_to_complete: u32,
    /// `None` when the goal is unreachable with the current contribution
    pub target_date: Option<jiff::civil::Date>,
}

/// Complete response for a tradeoff request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeoffOutput {
    pub recommended_strategy: StrategyKind,
    pub recommended_ratio: AllocationRatio,
    pub extra_money: f64,
    pub total_debt: f64,
    pub emergency_fund_progress: f64,
    /// Every strategy that was analyzed, in evaluation order
    pub strategies: Vec<StrategyResult>,
    pub monte_carlo: MonteCarloResult,
    pub net_worth_timeline: Vec<NetWorthPoint>,
    pub goal_projections: Vec<GoalProjection>,
    /// First entry explains why the strategy was chosen
    pub key_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

impl TradeoffOutput {
    /// Analysis of the recommended strategy
    pub fn recommended(&self) -> Option<&StrategyResult> {
        self.strategies
            .iter()
            .find(|s| s.strategy == self.recommended_strategy)
    }
}
