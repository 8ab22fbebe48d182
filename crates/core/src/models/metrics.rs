use serde::{Deserialize, Serialize};

/// Result of a division whose denominator may be zero.
///
/// ROI is undefined when nothing was invested, or when the amounts involved
/// do not fit in an `f64`. Rather than letting NaN or infinity leak into
/// totals and displays, the engine reports those cases explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Ratio {
    Value(f64),
    DivisionByZero,
    /// An operand or the quotient is outside the finite `f64` range.
    Overflow,
}

impl Ratio {
    /// `numerator / denominator * 100`, or `DivisionByZero` when the
    /// denominator is exactly zero, or `Overflow` when an operand or the
    /// result is not finite.
    #[must_use]
    pub fn percent(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            return Ratio::DivisionByZero;
        }
        let pct = numerator / denominator * 100.0;
        if numerator.is_finite() && denominator.is_finite() && pct.is_finite() {
            Ratio::Value(pct)
        } else {
            Ratio::Overflow
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Value(v) => Some(*v),
            Ratio::DivisionByZero | Ratio::Overflow => None,
        }
    }

    #[must_use]
    pub fn is_defined(&self) -> bool {
        matches!(self, Ratio::Value(_))
    }
}

impl std::fmt::Display for Ratio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ratio::Value(v) => write!(f, "{v:.1}%"),
            Ratio::DivisionByZero | Ratio::Overflow => write!(f, "n/a"),
        }
    }
}

/// Valuation of a single holding row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingMetrics {
    pub symbol: String,
    pub amount: f64,
    pub avg_price: f64,
    pub target_price: f64,

    /// amount × avg_price
    pub initial_investment: f64,

    /// amount × target_price
    pub target_value: f64,

    /// target_value − initial_investment
    pub profit: f64,

    /// profit / initial_investment × 100
    pub roi_pct: Ratio,
}

/// Row-by-row and aggregate valuation of a portfolio.
/// Nothing here is rounded; rounding belongs to presentation. Amounts that
/// exceed the `f64` range saturate at `±f64::MAX` and their ratios read
/// `Ratio::Overflow`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// Per-holding rows, in input order
    pub rows: Vec<HoldingMetrics>,

    pub total_initial: f64,
    pub total_target: f64,

    /// total_target − total_initial
    pub total_profit: f64,

    /// total_profit / total_initial × 100
    pub total_roi_pct: Ratio,
}

impl PortfolioMetrics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Where the projected profit stands relative to the goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GoalStatus {
    /// Projected profit meets or exceeds the goal by `surplus`.
    Reached { surplus: f64 },
    /// Projected profit falls short of the goal by `shortfall`.
    Remaining { shortfall: f64 },
}

/// Goal progress for a portfolio, ready for a summary banner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalSummary {
    pub goal: f64,
    pub total_profit: f64,

    /// Percent of the goal achieved, rounded to 2 decimals, capped at 100.
    pub progress_pct: f64,

    pub status: GoalStatus,
}
