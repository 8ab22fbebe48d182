use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::holding::Holding;
use super::portfolio::Portfolio;

/// Session-scoped identity of one holding row.
///
/// Never persisted: ids are minted when a profile is opened or a row is
/// added, so two rows with the same symbol can still be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowId(pub Uuid);

impl RowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A holding as edited in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRow {
    pub id: RowId,
    pub holding: Holding,
}

impl SessionRow {
    pub fn new(holding: Holding) -> Self {
        Self {
            id: RowId::new(),
            holding,
        }
    }
}

/// Field changes for one row. `None` leaves the field as it is.
/// The symbol is fixed once a row exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingPatch {
    pub amount: Option<f64>,
    pub avg_price: Option<f64>,
    pub target_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// One user edit, applied by
/// [`EditService::apply`](crate::services::edit_service::EditService::apply).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditIntent {
    /// Append a new holding. Target price starts at twice the average price.
    Add {
        symbol: String,
        amount: f64,
        avg_price: f64,
        max_price: Option<f64>,
    },
    /// Drop a row.
    Remove(RowId),
    /// Change fields of an existing row.
    Update(RowId, HoldingPatch),
    /// Change the profit goal.
    SetGoal(f64),
    /// Replace every row at once (bulk entry).
    ReplaceHoldings(Vec<Holding>),
}

/// The in-memory state of one user's editing session.
///
/// A value object: edits produce a new session instead of mutating this
/// one, so a rejected edit leaves the previous state untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEditSession {
    pub username: String,
    pub goal: f64,
    pub rows: Vec<SessionRow>,
    /// Record keys this library does not interpret, written back on save.
    pub extra: Map<String, Value>,
}

impl PortfolioEditSession {
    /// Start a session from a stored (or default) record.
    pub fn from_portfolio(username: impl Into<String>, portfolio: Portfolio) -> Self {
        Self {
            username: username.into(),
            goal: portfolio.goal,
            rows: portfolio.holdings.into_iter().map(SessionRow::new).collect(),
            extra: portfolio.extra,
        }
    }

    /// Snapshot the session as a storable record. Row ids are dropped.
    #[must_use]
    pub fn to_portfolio(&self) -> Portfolio {
        Portfolio {
            extra: self.extra.clone(),
            ..Portfolio::new(self.goal, self.holdings())
        }
    }

    /// Holdings in row order.
    #[must_use]
    pub fn holdings(&self) -> Vec<Holding> {
        self.rows.iter().map(|r| r.holding.clone()).collect()
    }

    #[must_use]
    pub fn row(&self, id: RowId) -> Option<&SessionRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn row_ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|r| r.id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
