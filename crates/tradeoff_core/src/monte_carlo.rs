//! Monte Carlo stress test for a fixed allocation ratio
//!
//! Each trial perturbs income, expenses and the investment return by
//! independent uniform multipliers, then replays the deterministic payoff and
//! growth math from [`crate::calculator`]. Trials are grouped into batches;
//! every batch gets its own `SmallRng` seeded from the simulator's random
//! source, so a seeded run produces the same result whether batches run
//! sequentially or on the rayon pool.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

use crate::calculator::{
    goal_reached_month, present_value, simulate_debt_payoff, simulate_investment_growth,
};
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::model::{AllocationRatio, DebtInfo, GoalInfo, MonteCarloResult, TradeoffInput};
use crate::percentiles::{confidence_interval_95, mean, sample_std_dev, truncating_percentile};

const MAX_BATCH_SIZE: usize = 100;

/// Everything a trial needs, borrowed from the request
#[derive(Debug, Clone, Copy)]
pub struct MonteCarloInput<'a> {
    pub debts: &'a [DebtInfo],
    pub goals: &'a [GoalInfo],
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub initial_investment: f64,
    pub annual_return: f64,
    pub ratio: AllocationRatio,
}

impl<'a> MonteCarloInput<'a> {
    pub fn from_request(input: &'a TradeoffInput, ratio: AllocationRatio) -> Self {
        Self {
            debts: &input.debts,
            goals: &input.goals,
            monthly_income: input.monthly_income,
            monthly_expenses: input.essential_expenses,
            initial_investment: input.investment_profile.current_balance,
            annual_return: input.investment_profile.expected_return,
            ratio,
        }
    }

    fn minimum_payments(&self) -> f64 {
        self.debts.iter().map(|d| d.minimum_payment).sum()
    }
}

/// Multipliers drawn for one trial, each in `[-variance, +variance]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    pub income: f64,
    pub expenses: f64,
    pub annual_return: f64,
}

impl Perturbation {
    pub const NONE: Perturbation = Perturbation {
        income: 0.0,
        expenses: 0.0,
        annual_return: 0.0,
    };

    pub fn sample<R: Rng + ?Sized>(rng: &mut R, config: &SimulationConfig) -> Self {
        Self {
            income: rng.random_range(-config.income_variance..=config.income_variance),
            expenses: rng.random_range(-config.expense_variance..=config.expense_variance),
            annual_return: rng.random_range(-config.return_variance..=config.return_variance),
        }
    }
}

/// Outcome of a single randomized trial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    pub months_to_debt_free: u32,
    /// False when the payoff run hit its month cap with debt remaining
    pub debt_free: bool,
    pub npv: f64,
    pub goals_achieved: usize,
}

impl TrialOutcome {
    /// Debt free within the horizon and at least half of the goals reached
    pub fn is_success(&self, goal_count: usize, horizon_months: u32) -> bool {
        self.debt_free
            && self.months_to_debt_free <= horizon_months
            && (goal_count == 0 || self.goals_achieved * 2 >= goal_count)
    }
}

/// Replay the deterministic math under one set of perturbations
pub fn run_trial(
    input: &MonteCarloInput<'_>,
    config: &SimulationConfig,
    perturbation: Perturbation,
) -> TrialOutcome {
    let horizon = config.projection_months;
    let income = input.monthly_income * (1.0 + perturbation.income);
    let expenses = input.monthly_expenses * (1.0 + perturbation.expenses);
    let annual_return = (input.annual_return * (1.0 + perturbation.annual_return)).max(0.0);

    let extra = (income - expenses - input.minimum_payments()).max(0.0);
    let (debt_payment, savings) = input.ratio.split(extra);

    let payoff = simulate_debt_payoff(input.debts, debt_payment, config.max_payoff_months);
    let future_value =
        simulate_investment_growth(input.initial_investment, savings, annual_return, horizon);
    let npv = present_value(future_value, config.monthly_discount_rate(), horizon);

    let goals_achieved = input
        .goals
        .iter()
        .filter(|goal| {
            goal_reached_month(
                goal.current_amount,
                goal.target_amount,
                goal.contribution_share(savings),
                annual_return,
            )
            .is_some_and(|months| months <= horizon)
        })
        .count();

    TrialOutcome {
        months_to_debt_free: payoff.months_to_debt_free,
        debt_free: payoff.debt_free,
        npv,
        goals_achieved,
    }
}

/// Reduce trial outcomes to percentile and confidence-interval statistics
pub fn aggregate(
    outcomes: &[TrialOutcome],
    goal_count: usize,
    horizon_months: u32,
) -> MonteCarloResult {
    let n = outcomes.len();
    let successes = outcomes
        .iter()
        .filter(|o| o.is_success(goal_count, horizon_months))
        .count();

    let mut debt_free: Vec<u32> = outcomes.iter().map(|o| o.months_to_debt_free).collect();
    debt_free.sort_unstable();

    let mut npvs: Vec<f64> = outcomes.iter().map(|o| o.npv).collect();
    npvs.sort_by(f64::total_cmp);

    let npv_mean = mean(&npvs);
    let npv_std_dev = sample_std_dev(&npvs, npv_mean);
    let (npv_ci_lower, npv_ci_upper) = confidence_interval_95(npv_mean, npv_std_dev, n);

    let mean_months_to_debt_free = if n == 0 {
        0.0
    } else {
        debt_free.iter().map(|&m| f64::from(m)).sum::<f64>() / n as f64
    };

    let goal_achievement_rate = if goal_count == 0 || n == 0 {
        1.0
    } else {
        outcomes
            .iter()
            .map(|o| o.goals_achieved as f64 / goal_count as f64)
            .sum::<f64>()
            / n as f64
    };

    MonteCarloResult {
        num_simulations: n,
        success_probability: if n == 0 {
            0.0
        } else {
            successes as f64 / n as f64
        },
        debt_free_p50: truncating_percentile(&debt_free, 50).unwrap_or(0),
        debt_free_p75: truncating_percentile(&debt_free, 75).unwrap_or(0),
        debt_free_p90: truncating_percentile(&debt_free, 90).unwrap_or(0),
        mean_months_to_debt_free,
        npv_mean,
        npv_std_dev,
        npv_p5: truncating_percentile(&npvs, 5).unwrap_or(0.0),
        npv_p95: truncating_percentile(&npvs, 95).unwrap_or(0.0),
        npv_ci_lower,
        npv_ci_upper,
        goal_achievement_rate,
    }
}

/// Seed derived from the wall clock, used when no seed is supplied
pub fn time_seed() -> u64 {
    jiff::Timestamp::now().as_nanosecond() as u64
}

/// Runs randomized trials for an allocation ratio.
///
/// The simulator owns its random source. Inject one with [`with_rng`] or
/// [`with_seed`] for reproducible runs.
///
/// [`with_rng`]: MonteCarloSimulator::with_rng
/// [`with_seed`]: MonteCarloSimulator::with_seed
#[derive(Debug, Clone)]
pub struct MonteCarloSimulator<R = SmallRng> {
    rng: R,
    config: SimulationConfig,
}

impl MonteCarloSimulator<SmallRng> {
    /// Simulator seeded from the current time
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_seed(config, time_seed())
    }

    pub fn with_seed(config: SimulationConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MonteCarloSimulator<R> {
    pub fn with_rng(config: SimulationConfig, rng: R) -> Self {
        Self { rng, config }
    }

    /// Run `num_simulations` trials and aggregate them.
    ///
    /// Fails only when the configuration is invalid.
    pub fn run_simulation(&mut self, input: &MonteCarloInput<'_>) -> Result<MonteCarloResult> {
        self.config.validate()?;

        let num_iterations = self.config.num_simulations;
        let num_batches = num_iterations.div_ceil(MAX_BATCH_SIZE);
        let seeds: Vec<u64> = (0..num_batches).map(|_| self.rng.next_u64()).collect();

        let config = &self.config;
        let run_batch = |batch: usize, seed: u64| -> Vec<TrialOutcome> {
            let mut rng = SmallRng::seed_from_u64(seed);
            let batch_size = if batch == num_batches - 1 {
                num_iterations - batch * MAX_BATCH_SIZE
            } else {
                MAX_BATCH_SIZE
            };
            (0..batch_size)
                .map(|_| run_trial(input, config, Perturbation::sample(&mut rng, config)))
                .collect()
        };

        #[cfg(feature = "parallel")]
        let batches: Vec<Vec<TrialOutcome>> = seeds
            .par_iter()
            .enumerate()
            .map(|(i, &seed)| run_batch(i, seed))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let batches: Vec<Vec<TrialOutcome>> = seeds
            .iter()
            .enumerate()
            .map(|(i, &seed)| run_batch(i, seed))
            .collect();

        let outcomes: Vec<TrialOutcome> = batches.into_iter().flatten().collect();
        let result = aggregate(&outcomes, input.goals.len(), config.projection_months);

        tracing::debug!(
            simulations = result.num_simulations,
            success_probability = result.success_probability,
            debt_free_p50 = result.debt_free_p50,
            npv_mean = result.npv_mean,
            "Monte Carlo run complete"
        );

        Ok(result)
    }
}
