//! Narrative text attached to the engine output

use crate::model::{EmergencyFundStatus, MonteCarloResult, StrategyKind, StrategyResult};

/// Success probability below which the plan is flagged as fragile
pub const LOW_SUCCESS_PROBABILITY: f64 = 0.70;

/// Static pros and cons for a strategy
pub fn pros_and_cons(kind: StrategyKind) -> (Vec<String>, Vec<String>) {
    let (pros, cons): (&[&str], &[&str]) = match kind {
        StrategyKind::AggressiveDebt => (
            &[
                "Fastest path to becoming debt free",
                "Guaranteed return equal to the interest rate avoided",
                "Frees up cash flow sooner once debts are cleared",
            ],
            &[
                "Slower growth of savings and investments",
                "Less cash available for emergencies in the meantime",
            ],
        ),
        StrategyKind::Balanced => (
            &[
                "Makes steady progress on debt and savings at the same time",
                "Keeps investments compounding while interest costs fall",
            ],
            &[
                "Neither goal is reached as quickly as with a focused strategy",
                "Pays more total interest than aggressive payoff",
            ],
        ),
        StrategyKind::AggressiveSavings => (
            &[
                "Builds an emergency cushion and investments quickly",
                "Captures more long-term compounding",
            ],
            &[
                "Debt lingers longer and accrues more interest",
                "Investment returns are not guaranteed",
            ],
        ),
    };
    (
        pros.iter().map(|s| s.to_string()).collect(),
        cons.iter().map(|s| s.to_string()).collect(),
    )
}

/// Inputs the recommendation text is keyed on
#[derive(Debug, Clone, Copy)]
pub struct RecommendationContext<'a> {
    pub selected: &'a StrategyResult,
    pub has_debt: bool,
    pub highest_interest_rate: f64,
    pub emergency_fund: &'a EmergencyFundStatus,
    pub monte_carlo: &'a MonteCarloResult,
}

pub fn build_recommendations(ctx: &RecommendationContext<'_>) -> Vec<String> {
    let mut out = Vec::new();
    let selected = ctx.selected;

    if !ctx.has_debt {
        out.push(format!(
            "You have no debt. Direct the full ${:.0}/month surplus to savings and investments.",
            selected.monthly_savings
        ));
    } else {
        match selected.strategy {
            StrategyKind::AggressiveDebt => out.push(format!(
                "Put ${:.0}/month beyond minimums toward your highest-rate debt first and ${:.0}/month into savings. \
                 You are projected to be debt free in {} months and save ${:.0} in interest.",
                selected.monthly_debt_payment,
                selected.monthly_savings,
                selected.months_to_debt_free,
                selected.interest_saved
            )),
            StrategyKind::Balanced => out.push(format!(
                "Split your surplus evenly: ${:.0}/month to extra debt payments and ${:.0}/month to savings. \
                 Debt is projected to be cleared in {} months.",
                selected.monthly_debt_payment, selected.monthly_savings, selected.months_to_debt_free
            )),
            StrategyKind::AggressiveSavings => out.push(format!(
                "Direct ${:.0}/month to savings and ${:.0}/month beyond minimums to debt. \
                 Keep making every minimum payment on time.",
                selected.monthly_savings, selected.monthly_debt_payment
            )),
        }
    }

    if ctx.highest_interest_rate > 0.20 {
        out.push(format!(
            "Your highest rate is {:.1}%. Look into a balance transfer or consolidation loan to cut that cost.",
            ctx.highest_interest_rate * 100.0
        ));
    } else if ctx.highest_interest_rate > 0.15 {
        out.push(format!(
            "Target the {:.1}% debt first; every extra dollar there earns a guaranteed {:.1}% return.",
            ctx.highest_interest_rate * 100.0,
            ctx.highest_interest_rate * 100.0
        ));
    }

    let progress = ctx.emergency_fund.progress();
    if progress < 1.0 {
        out.push(format!(
            "Your emergency fund is {:.0}% funded. Close the remaining ${:.0} gap before taking on investment risk.",
            progress * 100.0,
            ctx.emergency_fund.gap()
        ));
    } else {
        out.push(
            "Your emergency fund is fully funded; keep it in a high-yield savings account.".to_string(),
        );
    }

    let success = ctx.monte_carlo.success_probability;
    if success < LOW_SUCCESS_PROBABILITY {
        out.push(format!(
            "Only {:.0}% of simulated scenarios stayed on track. Increasing income or trimming expenses would make the plan more resilient.",
            success * 100.0
        ));
    } else {
        out.push(format!(
            "{:.0}% of simulated scenarios stayed on track under varied income, expenses and returns.",
            success * 100.0
        ));
    }

    out
}
