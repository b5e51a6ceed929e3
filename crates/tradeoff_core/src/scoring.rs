//! Risk and composite scoring of candidate strategies

use crate::model::{AllocationRatio, RiskTolerance, StrategyKind, StrategyResult};

pub const MAX_RISK_SCORE: f64 = 10.0;

/// Weight of the normalized NPV term
pub const NPV_WEIGHT: f64 = 0.35;
/// Weight of the inverted risk term
pub const RISK_WEIGHT: f64 = 0.25;
/// Weight of the payoff-speed term
pub const SPEED_WEIGHT: f64 = 0.25;

/// Everything the risk score looks at besides the ratio itself
#[derive(Debug, Clone, Copy)]
pub struct RiskContext {
    pub emergency_fund_progress: f64,
    pub highest_interest_rate: f64,
    pub risk_tolerance: RiskTolerance,
}

/// Risk of a strategy on a 0-10 scale.
///
/// More money in markets, a thin emergency fund, and leaving expensive debt
/// mostly untouched all push the score up. The user's tolerance scales the
/// result before clamping.
pub fn risk_score(ratio: AllocationRatio, ctx: &RiskContext) -> f64 {
    let mut score = ratio.savings_percent * 3.0;

    if ctx.emergency_fund_progress < 0.5 {
        score += 3.0;
    } else if ctx.emergency_fund_progress < 1.0 {
        score += 1.5;
    }

    if ctx.highest_interest_rate > 0.15 && ratio.debt_percent < 0.5 {
        score += 2.0;
    }

    (score * ctx.risk_tolerance.risk_multiplier()).clamp(0.0, MAX_RISK_SCORE)
}

/// How satisfying a strategy tends to feel, independent of the numbers
pub fn psychological_preference(kind: StrategyKind) -> f64 {
    match kind {
        StrategyKind::AggressiveDebt => 1.0,
        StrategyKind::Balanced => 0.7,
        StrategyKind::AggressiveSavings => 0.5,
    }
}

/// Composite score of one strategy relative to the best NPV and the fastest
/// payoff among all candidates
pub fn composite_score(
    result: &StrategyResult,
    max_npv: f64,
    min_months_to_debt_free: u32,
    psychological_weight: f64,
) -> f64 {
    let normalized_npv = if max_npv > 0.0 {
        result.npv / max_npv
    } else {
        0.0
    };

    let safety = 1.0 - result.risk_score / MAX_RISK_SCORE;

    let speed = if result.months_to_debt_free == 0 {
        1.0
    } else {
        f64::from(min_months_to_debt_free) / f64::from(result.months_to_debt_free)
    };

    normalized_npv * NPV_WEIGHT
        + safety * RISK_WEIGHT
        + speed * SPEED_WEIGHT
        + psychological_preference(result.strategy) * psychological_weight
}

/// Fill in `composite_score` for every result
pub fn apply_composite_scores(results: &mut [StrategyResult], psychological_weight: f64) {
    let max_npv = results
        .iter()
        .map(|r| r.npv)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_months = results
        .iter()
        .map(|r| r.months_to_debt_free)
        .min()
        .unwrap_or(0);

    for result in results.iter_mut() {
        result.composite_score =
            composite_score(result, max_npv, min_months, psychological_weight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn ctx(progress: f64, highest: f64, tolerance: RiskTolerance) -> RiskContext {
        RiskContext {
            emergency_fund_progress: progress,
            highest_interest_rate: highest,
            risk_tolerance: tolerance,
        }
    }

    fn result(kind: StrategyKind, npv: f64, risk: f64, months: u32) -> StrategyResult {
        StrategyResult {
            strategy: kind,
            ratio: kind.ratio(),
            monthly_debt_payment: 0.0,
            monthly_savings: 0.0,
            npv,
            total_interest_paid: 0.0,
            interest_saved: 0.0,
            investment_future_value: 0.0,
            months_to_debt_free: months,
            goal_months: FxHashMap::default(),
            risk_score: risk,
            composite_score: 0.0,
            pros: Vec::new(),
            cons: Vec::new(),
        }
    }

    #[test]
    fn test_risk_score_components() {
        let ratio = StrategyKind::AggressiveSavings.ratio();

        // 0.75 * 3 = 2.25 with a full fund and cheap debt
        let base = risk_score(ratio, &ctx(1.0, 0.05, RiskTolerance::Moderate));
        assert!((base - 2.25).abs() < 1e-12);

        // + 3 for a thin fund, + 2 for leaving 20% debt mostly untouched
        let risky = risk_score(ratio, &ctx(0.2, 0.20, RiskTolerance::Moderate));
        assert!((risky - 7.25).abs() < 1e-12);

        // + 1.5 for a partially funded emergency fund
        let partial = risk_score(ratio, &ctx(0.7, 0.05, RiskTolerance::Moderate));
        assert!((partial - 3.75).abs() < 1e-12);
    }

    #[test]
    fn test_risk_score_tolerance_and_clamp() {
        let ratio = StrategyKind::AggressiveSavings.ratio();
        let conservative = risk_score(ratio, &ctx(0.2, 0.20, RiskTolerance::Conservative));
        assert!((conservative - 8.7).abs() < 1e-9);

        let aggressive = risk_score(ratio, &ctx(0.2, 0.20, RiskTolerance::Aggressive));
        assert!((aggressive - 5.8).abs() < 1e-9);

        let all_in = AllocationRatio::new(0.0, 3.0);
        assert_eq!(
            risk_score(all_in, &ctx(0.0, 0.30, RiskTolerance::Conservative)),
            MAX_RISK_SCORE
        );
    }

    #[test]
    fn test_composite_score_terms() {
        let r = result(StrategyKind::Balanced, 500.0, 4.0, 20);
        // 0.5 * 0.35 + 0.6 * 0.25 + 0.5 * 0.25 + 0.7 * 0.15
        let score = composite_score(&r, 1_000.0, 10, 0.15);
        assert!((score - 0.555).abs() < 1e-12);
    }

    #[test]
    fn test_composite_score_non_positive_npv() {
        let r = result(StrategyKind::AggressiveDebt, -50.0, 0.0, 0);
        let score = composite_score(&r, -10.0, 0, 0.0);
        // NPV term drops out, full safety and speed
        assert!((score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_apply_composite_scores_uses_pool_extremes() {
        let mut results = vec![
            result(StrategyKind::AggressiveDebt, 800.0, 2.0, 10),
            result(StrategyKind::AggressiveSavings, 1_000.0, 5.0, 20),
        ];
        apply_composite_scores(&mut results, 0.15);
        // 0.8*0.35 + 0.8*0.25 + 1.0*0.25 + 1.0*0.15
        assert!((results[0].composite_score - 0.88).abs() < 1e-12);
        // 1.0*0.35 + 0.5*0.25 + 0.5*0.25 + 0.5*0.15
        assert!((results[1].composite_score - 0.675).abs() < 1e-12);
    }
}
