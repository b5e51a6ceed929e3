//! Integration tests for the tradeoff engine
//!
//! Tests are organized by topic:
//! - `calculator` - Amortization, annuity and goal-timeline math
//! - `monte_carlo` - Seeded simulation runs and aggregate statistics
//! - `selection` - Rule ordering and score fallback on analyzed strategies
//! - `evaluator` - End-to-end requests, including the reference scenarios

mod monte_carlo;
