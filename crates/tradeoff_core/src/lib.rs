//! Debt-versus-savings tradeoff engine
//!
//! Given a household's income, expenses, debts, savings goals and emergency
//! fund, this crate decides how to split the monthly surplus between extra
//! debt payments and savings. It supports:
//! - Deterministic amortization, annuity and goal-timeline math
//! - Three fixed allocation strategies scored on NPV, risk and payoff speed
//! - Rule-based selection with a composite-score fallback
//! - Monte Carlo stress testing of the chosen ratio with an injectable RNG
//! - Net-worth timelines, goal target dates and narrative recommendations
//!
//! # Example
//!
//! ```ignore
//! use tradeoff_core::{DebtInfo, SimulationConfig, StrategyEvaluator, TradeoffInput};
//!
//! let input = TradeoffInput {
//!     monthly_income: 6_000.0,
//!     essential_expenses: 3_500.0,
//!     debts: vec![DebtInfo::new(8_000.0, 0.22, 200.0)],
//!     ..Default::default()
//! };
//!
//! let mut evaluator = StrategyEvaluator::with_seed(SimulationConfig::default(), 42);
//! let output = evaluator.execute(&input)?;
//! println!("{}", output.recommended_strategy);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod calculator;
pub mod error;
pub mod evaluator;
pub mod monte_carlo;
pub mod percentiles;
pub mod recommendations;
pub mod scoring;
pub mod selection;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::SimulationConfig;
pub use error::{InvalidInputReason, Result, TradeoffError};
pub use evaluator::{StrategyEvaluator, execute, validate};
pub use model::{
    AllocationRatio, DebtInfo, DebtKind, EmergencyFundStatus, FinancialPriority, GoalId,
    GoalInfo, GoalProjection, InvestmentProfile, MonteCarloResult, NetWorthPoint, RiskTolerance,
    StrategyKind, StrategyResult, TradeoffInput, TradeoffOutput, UserPreferences,
};
pub use monte_carlo::{MonteCarloInput, MonteCarloSimulator};
