use crate::models::holding::Holding;
use crate::models::metrics::{GoalStatus, GoalSummary, HoldingMetrics, PortfolioMetrics, Ratio};

/// Upper bound of goal progress, in percent.
pub const MAX_GOAL_PROGRESS: f64 = 100.0;

/// Computes projected profit, ROI and goal progress.
///
/// Pure business logic: no I/O, no state.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Value every holding and sum the results.
    ///
    /// Rows come back in input order. A row with nothing invested gets
    /// `Ratio::DivisionByZero` as its ROI; the other rows are unaffected.
    /// An empty slice yields zero totals and an undefined total ROI.
    ///
    /// Every amount returned is finite: values past the `f64` range
    /// saturate at `±f64::MAX` and the affected ROI is `Ratio::Overflow`.
    pub fn compute_metrics(&self, holdings: &[Holding]) -> PortfolioMetrics {
        let rows: Vec<HoldingMetrics> = holdings.iter().map(Self::value_holding).collect();

        let raw_initial: f64 = rows.iter().map(|r| r.initial_investment).sum();
        let raw_target: f64 = rows.iter().map(|r| r.target_value).sum();
        let total_initial = saturate(raw_initial);
        let total_target = saturate(raw_target);
        let raw_profit = total_target - total_initial;
        let total_profit = saturate(raw_profit);

        let overflowed = rows.iter().any(|r| r.roi_pct == Ratio::Overflow)
            || !(raw_initial.is_finite() && raw_target.is_finite() && raw_profit.is_finite());
        let total_roi_pct = if overflowed && total_initial != 0.0 {
            Ratio::Overflow
        } else {
            Ratio::percent(total_profit, total_initial)
        };

        PortfolioMetrics {
            rows,
            total_initial,
            total_target,
            total_profit,
            total_roi_pct,
        }
    }

    /// Percent of `profit_goal` reached by `total_profit`.
    ///
    /// Rounded to two decimals and capped at 100. Not floored: a projected
    /// loss gives a negative percent. A goal of zero, below zero or not
    /// finite yields `0.0`, as does a non-finite `total_profit`.
    pub fn goal_progress(&self, total_profit: f64, profit_goal: f64) -> f64 {
        if !profit_goal.is_finite() || profit_goal <= 0.0 || !total_profit.is_finite() {
            return 0.0;
        }
        let pct = round_to(total_profit / profit_goal * 100.0, 2);
        pct.clamp(f64::MIN, MAX_GOAL_PROGRESS)
    }

    /// Progress plus reached/remaining status for a goal banner.
    pub fn goal_summary(&self, metrics: &PortfolioMetrics, profit_goal: f64) -> GoalSummary {
        let total_profit = metrics.total_profit;
        let status = if total_profit >= profit_goal {
            GoalStatus::Reached {
                surplus: saturate(total_profit - profit_goal),
            }
        } else {
            GoalStatus::Remaining {
                shortfall: saturate(profit_goal - total_profit),
            }
        };

        GoalSummary {
            goal: profit_goal,
            total_profit,
            progress_pct: self.goal_progress(total_profit, profit_goal),
            status,
        }
    }

    fn value_holding(holding: &Holding) -> HoldingMetrics {
        let raw_initial = holding.amount * holding.avg_price;
        let raw_target = holding.amount * holding.target_price;
        let initial_investment = saturate(raw_initial);
        let target_value = saturate(raw_target);
        let raw_profit = target_value - initial_investment;
        let profit = saturate(raw_profit);

        let overflowed =
            !(raw_initial.is_finite() && raw_target.is_finite() && raw_profit.is_finite());
        let roi_pct = if overflowed && initial_investment != 0.0 {
            Ratio::Overflow
        } else {
            Ratio::percent(profit, initial_investment)
        };

        HoldingMetrics {
            symbol: holding.symbol.clone(),
            amount: holding.amount,
            avg_price: holding.avg_price,
            target_price: holding.target_price,
            initial_investment,
            target_value,
            profit,
            roi_pct,
        }
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp to the finite `f64` range. NaN only comes from operands that were
/// already invalid and maps to zero.
fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
