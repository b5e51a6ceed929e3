mod ids;
mod inputs;
mod results;
mod strategy;

pub use ids::GoalId;
pub use inputs::{
    DEFAULT_PSYCHOLOGICAL_WEIGHT, DebtInfo, DebtKind, EmergencyFundStatus, FinancialPriority,
    GoalInfo, InvestmentProfile, RiskTolerance, TradeoffInput, UserPreferences,
};
pub use results::{GoalProjection, MonteCarloResult, NetWorthPoint, StrategyResult, TradeoffOutput};
pub use strategy::{AllocationRatio, RATIO_EPSILON, StrategyKind};
