//! Simulation configuration
//!
//! `SimulationConfig` controls the Monte Carlo stress test and the projection
//! horizon used by every strategy analysis. Every field has a serde default so
//! a request may carry a partial `simulation` block:
//!
//! ```ignore
//! let config: SimulationConfig = serde_json::from_str(r#"{"num_simulations": 2000}"#)?;
//! assert_eq!(config.projection_months, 60);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, TradeoffError};

fn default_num_simulations() -> usize {
    500
}

fn default_income_variance() -> f64 {
    0.10
}

fn default_expense_variance() -> f64 {
    0.15
}

fn default_return_variance() -> f64 {
    0.20
}

fn default_projection_months() -> u32 {
    60
}

fn default_discount_rate() -> f64 {
    0.05
}

fn default_max_payoff_months() -> u32 {
    360
}

fn default_timeline_interval_months() -> u32 {
    6
}

/// Monte Carlo and projection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of randomized trials per stress test
    #[serde(default = "default_num_simulations")]
    pub num_simulations: usize,

    /// Income is perturbed by a uniform draw in `[-v, +v]`
    #[serde(default = "default_income_variance")]
    pub income_variance: f64,

    #[serde(default = "default_expense_variance")]
    pub expense_variance: f64,

    #[serde(default = "default_return_variance")]
    pub return_variance: f64,

    /// Horizon for investment growth, NPV discounting and success checks
    #[serde(default = "default_projection_months")]
    pub projection_months: u32,

    /// Annual discount rate; divided by 12 for monthly discounting
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,

    /// Cap on every debt payoff simulation
    #[serde(default = "default_max_payoff_months")]
    pub max_payoff_months: u32,

    /// Spacing between net-worth timeline points
    #[serde(default = "default_timeline_interval_months")]
    pub timeline_interval_months: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: default_num_simulations(),
            income_variance: default_income_variance(),
            expense_variance: default_expense_variance(),
            return_variance: default_return_variance(),
            projection_months: default_projection_months(),
            discount_rate: default_discount_rate(),
            max_payoff_months: default_max_payoff_months(),
            timeline_interval_months: default_timeline_interval_months(),
        }
    }
}

impl SimulationConfig {
    /// Create a variant with a different trial count
    #[must_use]
    pub fn with_simulations(&self, num_simulations: usize) -> Self {
        let mut config = self.clone();
        config.num_simulations = num_simulations;
        config
    }

    /// Create a variant with a different projection horizon
    #[must_use]
    pub fn with_projection_months(&self, months: u32) -> Self {
        let mut config = self.clone();
        config.projection_months = months;
        config
    }

    /// Create a variant with every variance set to `variance`
    #[must_use]
    pub fn with_uniform_variance(&self, variance: f64) -> Self {
        let mut config = self.clone();
        config.income_variance = variance;
        config.expense_variance = variance;
        config.return_variance = variance;
        config
    }

    pub fn monthly_discount_rate(&self) -> f64 {
        self.discount_rate / 12.0
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.num_simulations == 0 {
            return Err(TradeoffError::Config(
                "num_simulations must be at least 1".to_string(),
            ));
        }
        if self.projection_months == 0 {
            return Err(TradeoffError::Config(
                "projection_months must be at least 1".to_string(),
            ));
        }
        if self.max_payoff_months == 0 {
            return Err(TradeoffError::Config(
                "max_payoff_months must be at least 1".to_string(),
            ));
        }
        if self.timeline_interval_months == 0 {
            return Err(TradeoffError::Config(
                "timeline_interval_months must be at least 1".to_string(),
            ));
        }

        for (name, value) in [
            ("income_variance", self.income_variance),
            ("expense_variance", self.expense_variance),
            ("return_variance", self.return_variance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TradeoffError::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        if !self.discount_rate.is_finite() || self.discount_rate < 0.0 {
            return Err(TradeoffError::Config(format!(
                "discount_rate must be a non-negative number, got {}",
                self.discount_rate
            )));
        }

        Ok(())
    }
}
