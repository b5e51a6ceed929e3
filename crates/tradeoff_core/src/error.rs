use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable reason a request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidInputReason {
    MissingIncome,
    NegativeBalance,
    InterestRateOutOfRange,
    InsufficientExtraMoney,
}

impl InvalidInputReason {
    pub fn code(self) -> &'static str {
        match self {
            InvalidInputReason::MissingIncome => "missing_income",
            InvalidInputReason::NegativeBalance => "negative_balance",
            InvalidInputReason::InterestRateOutOfRange => "interest_rate_out_of_range",
            InvalidInputReason::InsufficientExtraMoney => "insufficient_extra_money",
        }
    }
}

impl fmt::Display for InvalidInputReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors returned by the tradeoff engine.
///
/// None of these are retryable: the caller has to fix the request or the
/// configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TradeoffError {
    #[error("invalid input ({reason}): {message}")]
    InvalidInput {
        reason: InvalidInputReason,
        message: String,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl TradeoffError {
    pub fn invalid(reason: InvalidInputReason, message: impl Into<String>) -> Self {
        TradeoffError::InvalidInput {
            reason,
            message: message.into(),
        }
    }

    /// Reason code for validation failures, `None` for configuration errors
    pub fn reason(&self) -> Option<InvalidInputReason> {
        match self {
            TradeoffError::InvalidInput { reason, .. } => Some(*reason),
            TradeoffError::Config(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TradeoffError>;
