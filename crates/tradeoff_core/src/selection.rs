//! Strategy selection
//!
//! Selection is not a plain score maximum. A fixed, ordered table of rules is
//! checked first and the first rule that applies forces its strategy. Only
//! when no rule applies does the highest composite score win.

use crate::model::{FinancialPriority, StrategyKind, StrategyResult};

/// Facts about the household the selection rules inspect
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext {
    pub emergency_fund_progress: f64,
    pub priority: FinancialPriority,
    pub highest_interest_rate: f64,
    pub weighted_interest_rate: f64,
}

/// A forced choice: when `applies` holds, `strategy` is selected
#[derive(Clone, Copy)]
pub struct SelectionRule {
    pub name: &'static str,
    pub applies: fn(&SelectionContext) -> bool,
    pub strategy: StrategyKind,
    pub explain: fn(&SelectionContext) -> String,
}

impl std::fmt::Debug for SelectionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionRule")
            .field("name", &self.name)
            .field("strategy", &self.strategy)
            .finish()
    }
}

fn pct(value: f64) -> f64 {
    value * 100.0
}

/// Rules in priority order
pub const SELECTION_RULES: &[SelectionRule] = &[
    SelectionRule {
        name: "emergency_fund_critical",
        applies: |ctx| ctx.emergency_fund_progress < 0.30,
        strategy: StrategyKind::AggressiveSavings,
        explain: |ctx| {
            format!(
                "Emergency fund is only {:.0}% funded; building a cash cushion comes before extra debt payments",
                pct(ctx.emergency_fund_progress)
            )
        },
    },
    SelectionRule {
        name: "priority_debt_free",
        applies: |ctx| ctx.priority == FinancialPriority::DebtFree,
        strategy: StrategyKind::AggressiveDebt,
        explain: |_| "You asked to prioritize becoming debt free".to_string(),
    },
    SelectionRule {
        name: "priority_wealth_building",
        applies: |ctx| {
            ctx.priority == FinancialPriority::WealthBuilding && ctx.emergency_fund_progress >= 0.50
        },
        strategy: StrategyKind::AggressiveSavings,
        explain: |ctx| {
            format!(
                "You asked to prioritize building wealth and your emergency fund is {:.0}% funded",
                pct(ctx.emergency_fund_progress)
            )
        },
    },
    SelectionRule {
        name: "high_interest_debt",
        applies: |ctx| ctx.highest_interest_rate > 0.18,
        strategy: StrategyKind::AggressiveDebt,
        explain: |ctx| {
            format!(
                "Your highest interest rate is {:.1}%, above what investments can reliably earn",
                pct(ctx.highest_interest_rate)
            )
        },
    },
    SelectionRule {
        name: "emergency_fund_low",
        applies: |ctx| ctx.emergency_fund_progress < 0.50,
        strategy: StrategyKind::AggressiveSavings,
        explain: |ctx| {
            format!(
                "Emergency fund is {:.0}% funded; reaching at least half of the target reduces the risk of new debt",
                pct(ctx.emergency_fund_progress)
            )
        },
    },
    SelectionRule {
        name: "weighted_rate_high",
        applies: |ctx| ctx.weighted_interest_rate > 0.10,
        strategy: StrategyKind::AggressiveDebt,
        explain: |ctx| {
            format!(
                "Your average interest rate of {:.1}% outweighs typical investment returns",
                pct(ctx.weighted_interest_rate)
            )
        },
    },
    SelectionRule {
        name: "low_rate_funded",
        applies: |ctx| ctx.weighted_interest_rate <= 0.10 && ctx.emergency_fund_progress >= 0.80,
        strategy: StrategyKind::AggressiveSavings,
        explain: |ctx| {
            format!(
                "Your average interest rate is a modest {:.1}% and your emergency fund is {:.0}% funded, so investing has the edge",
                pct(ctx.weighted_interest_rate),
                pct(ctx.emergency_fund_progress)
            )
        },
    },
];

/// Outcome of the selection procedure
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub strategy: StrategyKind,
    /// Name of the rule that forced the choice; `None` for the score fallback
    pub rule: Option<&'static str>,
    pub key_factor: String,
}

/// First rule in `rules` that applies to `ctx`
pub fn first_matching_rule<'a>(
    rules: &'a [SelectionRule],
    ctx: &SelectionContext,
) -> Option<&'a SelectionRule> {
    rules.iter().find(|rule| (rule.applies)(ctx))
}

/// Highest composite score; ties keep the earlier strategy
pub fn best_by_score(results: &[StrategyResult]) -> Option<&StrategyResult> {
    results.iter().fold(None, |best: Option<&StrategyResult>, r| match best {
        Some(b) if r.composite_score <= b.composite_score => Some(b),
        _ => Some(r),
    })
}

/// Pick a strategy using [`SELECTION_RULES`], falling back to the best score
pub fn select_strategy(ctx: &SelectionContext, results: &[StrategyResult]) -> Selection {
    if let Some(rule) = first_matching_rule(SELECTION_RULES, ctx) {
        tracing::debug!(rule = rule.name, strategy = %rule.strategy, "Selection rule matched");
        return Selection {
            strategy: rule.strategy,
            rule: Some(rule.name),
            key_factor: (rule.explain)(ctx),
        };
    }

    match best_by_score(results) {
        Some(best) => Selection {
            strategy: best.strategy,
            rule: None,
            key_factor: format!(
                "{} had the best overall score ({:.2}) across return, risk and payoff speed",
                best.strategy.display_name(),
                best.composite_score
            ),
        },
        None => Selection {
            strategy: StrategyKind::AggressiveSavings,
            rule: None,
            key_factor: "No debt to pay down; all surplus goes to savings".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(progress: f64, priority: FinancialPriority, highest: f64, weighted: f64) -> SelectionContext {
        SelectionContext {
            emergency_fund_progress: progress,
            priority,
            highest_interest_rate: highest,
            weighted_interest_rate: weighted,
        }
    }

    fn matched(ctx: &SelectionContext) -> Option<&'static str> {
        first_matching_rule(SELECTION_RULES, ctx).map(|r| r.name)
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<&str> = SELECTION_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "emergency_fund_critical",
                "priority_debt_free",
                "priority_wealth_building",
                "high_interest_debt",
                "emergency_fund_low",
                "weighted_rate_high",
                "low_rate_funded",
            ]
        );
    }

    #[test]
    fn test_critical_fund_beats_debt_free_priority() {
        let c = ctx(0.1, FinancialPriority::DebtFree, 0.25, 0.2);
        assert_eq!(matched(&c), Some("emergency_fund_critical"));
    }

    #[test]
    fn test_debt_free_priority() {
        let c = ctx(0.4, FinancialPriority::DebtFree, 0.05, 0.05);
        assert_eq!(matched(&c), Some("priority_debt_free"));
    }

    #[test]
    fn test_wealth_building_needs_half_funded() {
        let funded = ctx(0.5, FinancialPriority::WealthBuilding, 0.25, 0.2);
        assert_eq!(matched(&funded), Some("priority_wealth_building"));

        let thin = ctx(0.4, FinancialPriority::WealthBuilding, 0.25, 0.2);
        assert_eq!(matched(&thin), Some("high_interest_debt"));
    }

    #[test]
    fn test_rate_and_fund_rules() {
        let c = ctx(0.45, FinancialPriority::Balanced, 0.15, 0.12);
        assert_eq!(matched(&c), Some("emergency_fund_low"));

        let c = ctx(0.6, FinancialPriority::Balanced, 0.15, 0.12);
        assert_eq!(matched(&c), Some("weighted_rate_high"));

        let c = ctx(0.9, FinancialPriority::Balanced, 0.08, 0.06);
        assert_eq!(matched(&c), Some("low_rate_funded"));
    }

    #[test]
    fn test_no_rule_falls_back_to_score() {
        let c = ctx(0.6, FinancialPriority::Balanced, 0.08, 0.06);
        assert_eq!(matched(&c), None);
    }

    #[test]
    fn test_fallback_without_candidates() {
        let c = ctx(0.6, FinancialPriority::Balanced, 0.08, 0.06);
        let selection = select_strategy(&c, &[]);
        assert_eq!(selection.strategy, StrategyKind::AggressiveSavings);
        assert_eq!(selection.rule, None);
    }
}
