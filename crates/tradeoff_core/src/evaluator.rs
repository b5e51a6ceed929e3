//! Request orchestration
//!
//! [`StrategyEvaluator::execute`] walks a request through validation,
//! deterministic analysis of each candidate ratio, scoring, rule-based
//! selection, a Monte Carlo stress test of the winner, and finally the
//! timeline and narrative output.

use jiff::civil::Date;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

use crate::calculator::{
    GOAL_UNREACHABLE_MONTHS, calculate_goal_months, generate_net_worth_timeline, present_value,
    simulate_debt_payoff, simulate_investment_growth,
};
use crate::config::SimulationConfig;
use crate::error::{InvalidInputReason, Result, TradeoffError};
use crate::model::{
    AllocationRatio, GoalId, GoalInfo, GoalProjection, MonteCarloResult, StrategyKind, StrategyResult,
    TradeoffInput, TradeoffOutput,
};
use crate::monte_carlo::{MonteCarloInput, MonteCarloSimulator, time_seed};
use crate::recommendations::{
    LOW_SUCCESS_PROBABILITY, RecommendationContext, build_recommendations, pros_and_cons,
};
use crate::scoring::{RiskContext, apply_composite_scores, risk_score};
use crate::selection::{Selection, SelectionContext, select_strategy};

/// Composite score given to the only candidate when there is no debt
pub const NO_DEBT_SCORE: f64 = 100.0;

/// Check a request before any computation.
///
/// A request without debts is always accepted. Otherwise income must be
/// positive, every balance non-negative, every rate within `[0, 1]` and some
/// money must be left after essentials and minimum payments. NaN fails every
/// check it reaches.
pub fn validate(input: &TradeoffInput) -> Result<()> {
    if !input.has_debt() {
        return Ok(());
    }

    if !(input.monthly_income > 0.0) {
        return Err(TradeoffError::invalid(
            InvalidInputReason::MissingIncome,
            format!(
                "monthly income must be greater than zero, got {}",
                input.monthly_income
            ),
        ));
    }

    for (i, debt) in input.debts.iter().enumerate() {
        if !(debt.balance >= 0.0) {
            return Err(TradeoffError::invalid(
                InvalidInputReason::NegativeBalance,
                format!("debt {} has balance {}", debt_label(i, &debt.name), debt.balance),
            ));
        }
        if !(0.0..=1.0).contains(&debt.interest_rate) {
            return Err(TradeoffError::invalid(
                InvalidInputReason::InterestRateOutOfRange,
                format!(
                    "debt {} has interest rate {}; expected a fraction between 0 and 1",
                    debt_label(i, &debt.name),
                    debt.interest_rate
                ),
            ));
        }
    }

    let extra = input.extra_money();
    if !(extra > 0.0) {
        return Err(TradeoffError::invalid(
            InvalidInputReason::InsufficientExtraMoney,
            format!(
                "nothing left after essentials and minimum payments (extra money {extra:.2})"
            ),
        ));
    }

    Ok(())
}

/// One-shot evaluation with default settings and a time-seeded RNG
pub fn execute(input: &TradeoffInput) -> Result<TradeoffOutput> {
    StrategyEvaluator::new().execute(input)
}

fn debt_label(index: usize, name: &str) -> String {
    if name.is_empty() {
        format!("#{index}")
    } else {
        format!("'{name}'")
    }
}

/// Deterministic analysis of one allocation of the monthly surplus
pub fn analyze_strategy(
    input: &TradeoffInput,
    kind: StrategyKind,
    ratio: AllocationRatio,
    config: &SimulationConfig,
) -> StrategyResult {
    let extra = input.extra_money().max(0.0);
    let (monthly_debt_payment, monthly_savings) = ratio.split(extra);
    let profile = &input.investment_profile;
    let horizon = config.projection_months;

    let payoff = simulate_debt_payoff(&input.debts, monthly_debt_payment, config.max_payoff_months);
    let investment_future_value = simulate_investment_growth(
        profile.current_balance,
        monthly_savings,
        profile.expected_return,
        horizon,
    );
    let npv = payoff.interest_saved
        + present_value(
            investment_future_value,
            config.monthly_discount_rate(),
            horizon,
        );

    let goal_months: FxHashMap<GoalId, u32> = input
        .goals
        .iter()
        .map(|goal| {
            let months = goal_months_for(goal, monthly_savings, profile.expected_return);
            (goal.id.clone(), months)
        })
        .collect();

    let risk = risk_score(
        ratio,
        &RiskContext {
            emergency_fund_progress: input.emergency_fund.progress(),
            highest_interest_rate: input.highest_interest_rate(),
            risk_tolerance: profile.risk_tolerance,
        },
    );

    let (pros, cons) = pros_and_cons(kind);

    tracing::debug!(
        strategy = %kind,
        debt_payment = monthly_debt_payment,
        savings = monthly_savings,
        months_to_debt_free = payoff.months_to_debt_free,
        npv,
        risk,
        "Analyzed strategy"
    );

    StrategyResult {
        strategy: kind,
        ratio,
        monthly_debt_payment,
        monthly_savings,
        npv,
        total_interest_paid: payoff.total_interest,
        interest_saved: payoff.interest_saved,
        investment_future_value,
        months_to_debt_free: payoff.months_to_debt_free,
        goal_months,
        risk_score: risk,
        composite_score: 0.0,
        pros,
        cons,
    }
}

fn goal_months_for(goal: &GoalInfo, monthly_savings: f64, annual_return: f64) -> u32 {
    calculate_goal_months(
        goal.current_amount,
        goal.target_amount,
        goal.contribution_share(monthly_savings),
        annual_return,
    )
}

/// Produces a recommendation for a [`TradeoffInput`].
///
/// The evaluator owns the random source feeding the Monte Carlo stage and a
/// default [`SimulationConfig`]. Nothing else survives between calls, so one
/// instance can serve any number of requests; for concurrent use give each
/// worker its own evaluator.
#[derive(Debug, Clone)]
pub struct StrategyEvaluator<R = SmallRng> {
    rng: R,
    config: SimulationConfig,
}

impl StrategyEvaluator<SmallRng> {
    /// Evaluator with default settings, seeded from the current time
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(time_seed()))
    }

    pub fn with_seed(config: SimulationConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl Default for StrategyEvaluator<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> StrategyEvaluator<R> {
    pub fn with_rng(config: SimulationConfig, rng: R) -> Self {
        Self { rng, config }
    }

    pub fn validate(&self, input: &TradeoffInput) -> Result<()> {
        validate(input)
    }

    /// Run the full pipeline for one request.
    ///
    /// Fails with [`TradeoffError::Config`] for a malformed simulation block
    /// and with [`TradeoffError::InvalidInput`] when validation rejects the
    /// request. No partial output is produced on error.
    pub fn execute(&mut self, input: &TradeoffInput) -> Result<TradeoffOutput> {
        let config = input.simulation.clone().unwrap_or_else(|| self.config.clone());
        config.validate()?;
        validate(input)?;

        let (strategies, selection) = if input.has_debt() {
            evaluate_strategies(input, &config)
        } else {
            single_savings_strategy(input, &config)
        };

        let selected = strategies
            .iter()
            .find(|s| s.strategy == selection.strategy)
            .cloned()
            .ok_or_else(|| {
                TradeoffError::Config(format!(
                    "selected strategy {} was not analyzed",
                    selection.strategy
                ))
            })?;
        let recommended_ratio = selected.ratio;

        let monte_carlo = MonteCarloSimulator::with_rng(config.clone(), &mut self.rng)
            .run_simulation(&MonteCarloInput::from_request(input, recommended_ratio))?;
        log_monte_carlo(selection.strategy, &monte_carlo);

        let net_worth_timeline = generate_net_worth_timeline(
            &input.debts,
            input.investment_profile.current_balance,
            selected.monthly_debt_payment,
            selected.monthly_savings,
            input.investment_profile.expected_return,
            config.projection_months,
            config.timeline_interval_months,
        );

        let as_of = input.as_of.unwrap_or_else(|| jiff::Zoned::now().date());
        let goal_projections = project_goals(input, &selected, as_of);

        let key_factors = key_factors(input, &selection);
        let recommendations = build_recommendations(&RecommendationContext {
            selected: &selected,
            has_debt: input.has_debt(),
            highest_interest_rate: input.highest_interest_rate(),
            emergency_fund: &input.emergency_fund,
            monte_carlo: &monte_carlo,
        });

        tracing::info!(
            strategy = %selection.strategy,
            rule = selection.rule.unwrap_or("composite_score"),
            debt_percent = recommended_ratio.debt_percent,
            savings_percent = recommended_ratio.savings_percent,
            "Recommended strategy"
        );

        Ok(TradeoffOutput {
            recommended_strategy: selection.strategy,
            recommended_ratio,
            extra_money: input.extra_money(),
            total_debt: input.total_debt(),
            emergency_fund_progress: input.emergency_fund.progress(),
            strategies,
            monte_carlo,
            net_worth_timeline,
            goal_projections,
            key_factors,
            recommendations,
        })
    }
}

/// Analyze, score and select among the three fixed ratios
fn evaluate_strategies(
    input: &TradeoffInput,
    config: &SimulationConfig,
) -> (Vec<StrategyResult>, Selection) {
    let mut strategies: Vec<StrategyResult> = StrategyKind::ALL
        .iter()
        .map(|&kind| analyze_strategy(input, kind, kind.ratio(), config))
        .collect();
    apply_composite_scores(&mut strategies, input.preferences.psychological_weight());

    let ctx = SelectionContext {
        emergency_fund_progress: input.emergency_fund.progress(),
        priority: input.preferences.priority,
        highest_interest_rate: input.highest_interest_rate(),
        weighted_interest_rate: input.weighted_interest_rate(),
    };
    let selection = select_strategy(&ctx, &strategies);
    (strategies, selection)
}

/// Without debt the whole surplus goes to savings; scoring and selection are skipped
fn single_savings_strategy(
    input: &TradeoffInput,
    config: &SimulationConfig,
) -> (Vec<StrategyResult>, Selection) {
    let kind = StrategyKind::AggressiveSavings;
    let mut result = analyze_strategy(input, kind, AllocationRatio::all_savings(), config);
    result.composite_score = NO_DEBT_SCORE;

    let selection = Selection {
        strategy: kind,
        rule: Some("no_debt"),
        key_factor: "No debt to pay down; all surplus goes to savings and investments"
            .to_string(),
    };
    (vec![result], selection)
}

/// One projection per request goal, in request order, so goals sharing an id
/// keep their own month counts
fn project_goals(input: &TradeoffInput, selected: &StrategyResult, as_of: Date) -> Vec<GoalProjection> {
    let annual_return = input.investment_profile.expected_return;
    input
        .goals
        .iter()
        .map(|goal| {
            let months = goal_months_for(goal, selected.monthly_savings, annual_return);
            let target_date = if months >= GOAL_UNREACHABLE_MONTHS {
                None
            } else {
                as_of
                    .checked_add(jiff::Span::new().months(i64::from(months)))
                    .ok()
            };
            GoalProjection {
                goal_id: goal.id.clone(),
                name: goal.name.clone(),
                months_to_complete: months,
                target_date,
            }
        })
        .collect()
}

fn key_factors(input: &TradeoffInput, selection: &Selection) -> Vec<String> {
    let mut factors = vec![selection.key_factor.clone()];
    if input.has_debt() {
        factors.push(format!(
            "Total debt of ${:.0} at a weighted average rate of {:.1}% (highest {:.1}%)",
            input.total_debt(),
            input.weighted_interest_rate() * 100.0,
            input.highest_interest_rate() * 100.0
        ));
    }
    factors.push(format!(
        "Emergency fund is {:.0}% funded",
        input.emergency_fund.progress() * 100.0
    ));
    factors.push(format!(
        "${:.0} per month is available after essentials and minimum payments",
        input.extra_money()
    ));
    factors
}

fn log_monte_carlo(strategy: StrategyKind, result: &MonteCarloResult) {
    tracing::info!(
        strategy = %strategy,
        simulations = result.num_simulations,
        success_probability = result.success_probability,
        debt_free_p50 = result.debt_free_p50,
        debt_free_p90 = result.debt_free_p90,
        "Monte Carlo summary"
    );
    if result.success_probability < LOW_SUCCESS_PROBABILITY {
        tracing::warn!(
            strategy = %strategy,
            success_probability = result.success_probability,
            "Plan succeeds in fewer than 70% of simulated scenarios"
        );
    }
}
