//! Compound interest and amortization math
//!
//! Every function here is pure: no hidden state, no randomness. Rates passed
//! as `monthly_rate` are already divided by 12; rates passed as `annual_*`
//! are converted internally.

use crate::model::{DebtInfo, NetWorthPoint};

/// Balances at or below this amount count as paid off
pub const PAID_OFF_THRESHOLD: f64 = 0.01;

/// Returned by [`calculate_goal_months`] when the goal can never be reached
pub const GOAL_UNREACHABLE_MONTHS: u32 = 9999;

/// Iteration cap for goals that earn a return (50 years)
pub const MAX_GOAL_MONTHS: u32 = 600;

/// Result of a debt payoff simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebtPayoff {
    pub months_to_debt_free: u32,
    /// Every balance was cleared before the month cap. When false,
    /// `months_to_debt_free` is the cap, not a payoff month.
    pub debt_free: bool,
    pub total_interest: f64,
    /// Interest avoided compared to paying only minimums, never negative
    pub interest_saved: f64,
}

/// Working copy of a debt used inside a single simulation run
#[derive(Debug, Clone, Copy)]
struct DebtBalance {
    balance: f64,
    monthly_rate: f64,
    annual_rate: f64,
    minimum_payment: f64,
}

impl DebtBalance {
    fn snapshot(debts: &[DebtInfo]) -> Vec<DebtBalance> {
        debts
            .iter()
            .map(|d| DebtBalance {
                balance: d.balance,
                monthly_rate: d.monthly_rate(),
                annual_rate: d.interest_rate,
                minimum_payment: d.minimum_payment,
            })
            .collect()
    }
}

fn all_paid_off(balances: &[DebtBalance]) -> bool {
    balances.iter().all(|b| b.balance <= PAID_OFF_THRESHOLD)
}

fn total_balance(balances: &[DebtBalance]) -> f64 {
    balances.iter().map(|b| b.balance.max(0.0)).sum()
}

/// Accrue one month of interest and pay minimums.
///
/// Returns `(interest_accrued, minimums_paid)`.
fn accrue_and_pay_minimums(balances: &mut [DebtBalance]) -> (f64, f64) {
    let mut interest = 0.0;
    let mut paid = 0.0;
    for debt in balances.iter_mut().filter(|b| b.balance > 0.0) {
        let accrued = debt.balance * debt.monthly_rate;
        debt.balance += accrued;
        interest += accrued;

        let payment = debt.minimum_payment.min(debt.balance);
        debt.balance -= payment;
        paid += payment;
    }
    (interest, paid)
}

/// Index of the debt with the strictly highest rate among those still owing.
/// Ties go to the earliest debt in input order.
fn highest_rate_debt(balances: &[DebtBalance]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, debt) in balances.iter().enumerate() {
        if debt.balance <= 0.0 {
            continue;
        }
        match best {
            Some(b) if debt.annual_rate <= balances[b].annual_rate => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Spend `extra` on debts using the avalanche method.
///
/// Returns whatever could not be applied because every debt is cleared.
fn apply_avalanche(balances: &mut [DebtBalance], extra: f64) -> f64 {
    let mut remaining = extra;
    while remaining > 0.0 {
        let Some(target) = highest_rate_debt(balances) else {
            break;
        };
        let payment = remaining.min(balances[target].balance);
        balances[target].balance -= payment;
        remaining -= payment;
    }
    remaining.max(0.0)
}

/// Run the payoff loop, returning `(months, total_interest, cleared)`
fn run_payoff(debts: &[DebtInfo], extra_payment: f64, max_months: u32) -> (u32, f64, bool) {
    let mut balances = DebtBalance::snapshot(debts);
    let mut total_interest = 0.0;
    let mut month = 0;

    while month < max_months && !all_paid_off(&balances) {
        month += 1;
        let (interest, _) = accrue_and_pay_minimums(&mut balances);
        total_interest += interest;
        apply_avalanche(&mut balances, extra_payment.max(0.0));
    }

    (month, total_interest, all_paid_off(&balances))
}

/// Future value of a stream of equal monthly payments
pub fn future_value_annuity(payment: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return payment * f64::from(months);
    }
    payment * ((1.0 + monthly_rate).powf(f64::from(months)) - 1.0) / monthly_rate
}

/// Discount a single future amount back `months` periods
pub fn present_value(future_value: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return future_value;
    }
    future_value / (1.0 + monthly_rate).powf(f64::from(months))
}

/// Net present value of monthly cash flows; the first flow is discounted one period
pub fn npv(cash_flows: &[f64], monthly_discount_rate: f64) -> f64 {
    let factor = 1.0 + monthly_discount_rate;
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / factor.powi(t as i32 + 1))
        .sum()
}

/// Simulate paying off `debts` with minimums plus `extra_payment` per month.
///
/// Each month every open debt accrues `balance * rate / 12`, then its minimum
/// is paid, then the extra payment goes to the highest-rate debt (avalanche)
/// and spills over to the next one when a debt is cleared. The loop stops
/// when every balance is at most one cent or `max_months` is reached.
pub fn simulate_debt_payoff(debts: &[DebtInfo], extra_payment: f64, max_months: u32) -> DebtPayoff {
    let (months_to_debt_free, total_interest, debt_free) =
        run_payoff(debts, extra_payment, max_months);
    let (_, baseline_interest, _) = run_payoff(debts, 0.0, max_months);

    DebtPayoff {
        months_to_debt_free,
        debt_free,
        total_interest,
        interest_saved: (baseline_interest - total_interest).max(0.0),
    }
}

/// Grow an investment balance with monthly contributions.
///
/// The contribution lands before that month's growth is applied.
pub fn simulate_investment_growth(
    initial: f64,
    monthly_contribution: f64,
    annual_return: f64,
    months: u32,
) -> f64 {
    let growth = 1.0 + annual_return / 12.0;
    let mut balance = initial;
    for _ in 0..months {
        balance += monthly_contribution;
        balance *= growth;
    }
    balance
}

/// How a goal projection ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GoalOutcome {
    Reached(u32),
    /// Still short of the target after [`MAX_GOAL_MONTHS`]
    Capped,
    /// Nothing is contributed, or the zero-return count overflows the sentinel
    Unreachable,
}

fn project_goal(current: f64, target: f64, monthly_contribution: f64, annual_return: f64) -> GoalOutcome {
    let gap = target - current;
    if gap <= 0.0 {
        return GoalOutcome::Reached(0);
    }
    if monthly_contribution <= 0.0 {
        return GoalOutcome::Unreachable;
    }
    if annual_return == 0.0 {
        let months = (gap / monthly_contribution).ceil();
        return if months >= f64::from(GOAL_UNREACHABLE_MONTHS) {
            GoalOutcome::Unreachable
        } else {
            GoalOutcome::Reached(months as u32)
        };
    }

    let growth = 1.0 + annual_return / 12.0;
    let mut balance = current;
    let mut month = 0;
    while balance < target && month < MAX_GOAL_MONTHS {
        balance += monthly_contribution;
        balance *= growth;
        month += 1;
    }
    if balance >= target {
        GoalOutcome::Reached(month)
    } else {
        GoalOutcome::Capped
    }
}

/// Months until `current` reaches `target` with monthly contributions.
///
/// Returns 0 when the target is already met and [`GOAL_UNREACHABLE_MONTHS`]
/// when nothing is being contributed. With a non-zero return the search stops
/// at [`MAX_GOAL_MONTHS`].
pub fn calculate_goal_months(
    current: f64,
    target: f64,
    monthly_contribution: f64,
    annual_return: f64,
) -> u32 {
    match project_goal(current, target, monthly_contribution, annual_return) {
        GoalOutcome::Reached(months) => months,
        GoalOutcome::Capped => MAX_GOAL_MONTHS,
        GoalOutcome::Unreachable => GOAL_UNREACHABLE_MONTHS,
    }
}

/// Month the goal is actually reached; `None` when it never is, including
/// when the search hits [`MAX_GOAL_MONTHS`] short of the target
pub fn goal_reached_month(
    current: f64,
    target: f64,
    monthly_contribution: f64,
    annual_return: f64,
) -> Option<u32> {
    match project_goal(current, target, monthly_contribution, annual_return) {
        GoalOutcome::Reached(months) => Some(months),
        GoalOutcome::Capped | GoalOutcome::Unreachable => None,
    }
}

/// Project net worth month by month, sampling every `interval_months`.
///
/// `monthly_debt_payment` is paid on top of minimums, avalanche style. Once
/// every debt is cleared the whole debt budget (minimums plus the extra
/// payment) is added to savings. Points are emitted at month 0, at every
/// multiple of the interval, and at `months` if it is not a multiple.
pub fn generate_net_worth_timeline(
    debts: &[DebtInfo],
    initial_savings: f64,
    monthly_debt_payment: f64,
    monthly_savings: f64,
    annual_return: f64,
    months: u32,
    interval_months: u32,
) -> Vec<NetWorthPoint> {
    let interval = interval_months.max(1);
    let growth = 1.0 + annual_return / 12.0;
    let total_minimums: f64 = debts.iter().map(|d| d.minimum_payment).sum();
    let debt_budget = total_minimums + monthly_debt_payment.max(0.0);

    let mut balances = DebtBalance::snapshot(debts);
    let mut savings = initial_savings;
    let mut timeline = Vec::with_capacity((months / interval) as usize + 2);

    let point = |month: u32, balances: &[DebtBalance], savings: f64| {
        let total_debt = total_balance(balances);
        NetWorthPoint {
            month,
            net_worth: savings - total_debt,
            total_debt,
            savings,
        }
    };

    timeline.push(point(0, &balances, savings));

    for month in 1..=months {
        let contribution = if all_paid_off(&balances) {
            monthly_savings + debt_budget
        } else {
            let (_, minimums_paid) = accrue_and_pay_minimums(&mut balances);
            let unused_extra = apply_avalanche(&mut balances, monthly_debt_payment.max(0.0));
            let freed_minimums = (total_minimums - minimums_paid).max(0.0);
            monthly_savings + unused_extra + freed_minimums
        };

        savings += contribution;
        savings *= growth;

        if month % interval == 0 || month == months {
            timeline.push(point(month, &balances, savings));
        }
    }

    timeline
}
