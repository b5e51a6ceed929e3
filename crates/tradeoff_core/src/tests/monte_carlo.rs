//! Tests for seeded Monte Carlo runs
//!
//! These tests verify:
//! - Percentiles are ordered and the NPV interval contains the mean
//! - A seed fully determines the result
//! - Zero variance collapses every trial onto the deterministic path

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::calculator::simulate_debt_payoff;
use crate::config::SimulationConfig;
use crate::error::TradeoffError;
use crate::model::{AllocationRatio, DebtInfo, GoalInfo, StrategyKind};
use crate::monte_carlo::{MonteCarloInput, MonteCarloSimulator};

fn debts() -> Vec<DebtInfo> {
    vec![
        DebtInfo::new(6_000.0, 0.21, 150.0),
        DebtInfo::new(12_000.0, 0.055, 250.0),
    ]
}

fn goals() -> Vec<GoalInfo> {
    vec![
        GoalInfo::new("vacation", 3_000.0, 500.0).with_priority(0.3),
        GoalInfo::new("down_payment", 40_000.0, 5_000.0).with_priority(0.7),
    ]
}

fn input<'a>(debts: &'a [DebtInfo], goals: &'a [GoalInfo]) -> MonteCarloInput<'a> {
    MonteCarloInput {
        debts,
        goals,
        monthly_income: 6_500.0,
        monthly_expenses: 4_000.0,
        initial_investment: 2_000.0,
        annual_return: 0.07,
        ratio: StrategyKind::Balanced.ratio(),
    }
}

#[test]
fn test_aggregate_ordering() {
    let debts = debts();
    let goals = goals();
    let mut simulator = MonteCarloSimulator::with_seed(SimulationConfig::default(), 42);
    let result = simulator.run_simulation(&input(&debts, &goals)).unwrap();

    assert_eq!(result.num_simulations, 500);
    assert!(result.debt_free_p50 <= result.debt_free_p75);
    assert!(result.debt_free_p75 <= result.debt_free_p90);
    assert!(result.npv_p5 <= result.npv_mean);
    assert!(result.npv_mean <= result.npv_p95);
    assert!(result.npv_ci_lower <= result.npv_mean);
    assert!(result.npv_mean <= result.npv_ci_upper);
    assert!((0.0..=1.0).contains(&result.success_probability));
    assert!((0.0..=1.0).contains(&result.goal_achievement_rate));
}

#[test]
fn test_same_seed_same_result() {
    let debts = debts();
    let goals = goals();
    let config = SimulationConfig::default().with_simulations(250);

    let first = MonteCarloSimulator::with_seed(config.clone(), 7)
        .run_simulation(&input(&debts, &goals))
        .unwrap();
    let second = MonteCarloSimulator::with_seed(config, 7)
        .run_simulation(&input(&debts, &goals))
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_injected_rng() {
    let debts = debts();
    let config = SimulationConfig::default().with_simulations(120);

    let mut a = MonteCarloSimulator::with_rng(config.clone(), StdRng::seed_from_u64(3));
    let mut b = MonteCarloSimulator::with_rng(config, StdRng::seed_from_u64(3));
    let run_a = a.run_simulation(&input(&debts, &[])).unwrap();
    let run_b = b.run_simulation(&input(&debts, &[])).unwrap();

    assert_eq!(run_a, run_b);
    assert_eq!(run_a.num_simulations, 120);
}

/// Consecutive runs on one simulator draw fresh batch seeds
#[test]
fn test_simulator_advances_its_rng() {
    let debts = debts();
    let mut simulator = MonteCarloSimulator::with_seed(SimulationConfig::default(), 11);
    let first = simulator.run_simulation(&input(&debts, &[])).unwrap();
    let second = simulator.run_simulation(&input(&debts, &[])).unwrap();
    assert_ne!(first.npv_mean, second.npv_mean);
}

#[test]
fn test_zero_variance_is_deterministic() {
    let debts = debts();
    let config = SimulationConfig::default()
        .with_uniform_variance(0.0)
        .with_simulations(101);
    let mut simulator = MonteCarloSimulator::with_seed(config.clone(), 5);
    let result = simulator.run_simulation(&input(&debts, &[])).unwrap();

    // extra = 6500 - 4000 - 400 = 2100, half to debt
    let payoff = simulate_debt_payoff(&debts, 1_050.0, config.max_payoff_months);
    assert_eq!(result.debt_free_p50, payoff.months_to_debt_free);
    assert_eq!(result.debt_free_p90, payoff.months_to_debt_free);
    assert_eq!(result.npv_std_dev, 0.0);
    assert_eq!(result.npv_p5, result.npv_p95);
    assert_eq!(result.success_probability, 1.0);
}

#[test]
fn test_all_savings_never_pays_extra() {
    let debts = vec![DebtInfo::new(20_000.0, 0.30, 100.0)];
    let config = SimulationConfig::default()
        .with_uniform_variance(0.0)
        .with_simulations(10);
    let mut simulator = MonteCarloSimulator::with_seed(config.clone(), 1);
    let mc_input = MonteCarloInput {
        ratio: AllocationRatio::all_savings(),
        ..input(&debts, &[])
    };
    let result = simulator.run_simulation(&mc_input).unwrap();

    // Minimum below monthly interest: never paid off, never successful
    assert_eq!(result.debt_free_p50, config.max_payoff_months);
    assert_eq!(result.success_probability, 0.0);
}

/// A payoff cap shorter than the horizon must not read as "debt free"
#[test]
fn test_payoff_cap_below_horizon_is_not_success() {
    let debts = vec![DebtInfo::new(20_000.0, 0.30, 100.0)];
    let config = SimulationConfig {
        max_payoff_months: 12,
        ..SimulationConfig::default()
            .with_uniform_variance(0.0)
            .with_simulations(20)
    };
    let mut simulator = MonteCarloSimulator::with_seed(config, 4);
    let mc_input = MonteCarloInput {
        ratio: AllocationRatio::all_savings(),
        ..input(&debts, &[])
    };
    let result = simulator.run_simulation(&mc_input).unwrap();

    assert_eq!(result.debt_free_p50, 12);
    assert_eq!(result.success_probability, 0.0);
}

/// A goal still short of its target at the 600 month search cap is not achieved
#[test]
fn test_goal_search_cap_within_horizon_is_not_achieved() {
    let goals = vec![GoalInfo::new("moonshot", 1_000_000_000.0, 0.0)];
    let config = SimulationConfig::default()
        .with_uniform_variance(0.0)
        .with_projection_months(600)
        .with_simulations(20);
    let mut simulator = MonteCarloSimulator::with_seed(config, 8);
    let mc_input = MonteCarloInput {
        ratio: AllocationRatio::all_savings(),
        ..input(&[], &goals)
    };
    let result = simulator.run_simulation(&mc_input).unwrap();

    assert_eq!(result.debt_free_p90, 0);
    assert_eq!(result.goal_achievement_rate, 0.0);
    assert_eq!(result.success_probability, 0.0);
}

/// Reachable goals still count when the horizon is long
#[test]
fn test_long_horizon_counts_reachable_goals() {
    let goals = vec![GoalInfo::new("car", 20_000.0, 0.0)];
    let config = SimulationConfig::default()
        .with_uniform_variance(0.0)
        .with_projection_months(600)
        .with_simulations(20);
    let mut simulator = MonteCarloSimulator::with_seed(config, 8);
    let mc_input = MonteCarloInput {
        ratio: AllocationRatio::all_savings(),
        ..input(&[], &goals)
    };
    let result = simulator.run_simulation(&mc_input).unwrap();

    assert_eq!(result.goal_achievement_rate, 1.0);
    assert_eq!(result.success_probability, 1.0);
}

#[test]
fn test_invalid_config_rejected() {
    let debts = debts();
    let config = SimulationConfig {
        income_variance: 1.5,
        ..Default::default()
    };
    let mut simulator = MonteCarloSimulator::with_seed(config, 1);
    let err = simulator.run_simulation(&input(&debts, &[])).unwrap_err();
    assert!(matches!(err, TradeoffError::Config(_)));
}
