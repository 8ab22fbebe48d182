use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::holding::Holding;

/// Profit goal used when a profile has none.
pub const DEFAULT_PROFIT_GOAL: f64 = 1_000_000.0;

/// Every stored profile, keyed by username (case-sensitive).
/// A `BTreeMap` keeps the written file in a stable key order.
pub type ProfileMap = BTreeMap<String, Portfolio>;

/// One user's record in the profile store: a profit goal and an ordered
/// list of holdings.
///
/// Missing fields default rather than error, so older files with only
/// `assets`, or only `goal`, still load. Unrecognised keys are kept in
/// `extra` so a load/save cycle leaves them in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Profit goal in the (single, unconverted) display currency
    #[serde(default = "default_goal")]
    pub goal: f64,

    /// Holdings in insertion order. Duplicate symbols stay separate rows.
    #[serde(rename = "assets", default)]
    pub holdings: Vec<Holding>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_goal() -> f64 {
    DEFAULT_PROFIT_GOAL
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            goal: DEFAULT_PROFIT_GOAL,
            holdings: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl Portfolio {
    pub fn new(goal: f64, holdings: Vec<Holding>) -> Self {
        Self {
            goal,
            holdings,
            extra: Map::new(),
        }
    }
}
