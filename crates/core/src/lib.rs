pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use log::{debug, warn};
use models::{
    holding::Holding,
    metrics::{GoalSummary, PortfolioMetrics},
    portfolio::Portfolio,
    session::{EditIntent, HoldingPatch, PortfolioEditSession, RowId},
    settings::Settings,
};
use services::{
    bulk_entry::{parse_bulk_entry, BulkEntry},
    edit_service::EditService,
    valuation_service::ValuationService,
};
use storage::{json_file::JsonFileStore, traits::ProfileStore};

use errors::CoreError;

/// Main entry point for the Profit Goal core library.
///
/// Holds one user's editing session on top of a [`ProfileStore`]. This is the
/// surface a presentation layer drives: load a profile, apply edits, read
/// metrics after every edit, save on request.
#[must_use]
pub struct ProfitTracker<S: ProfileStore> {
    store: S,
    session: PortfolioEditSession,
    edit_service: EditService,
    valuation_service: ValuationService,
    /// Tracks whether any edit has been applied since the last save/load.
    dirty: bool,
}

impl<S: ProfileStore> std::fmt::Debug for ProfitTracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfitTracker")
            .field("store", &self.store.describe())
            .field("username", &self.session.username)
            .field("holdings", &self.session.len())
            .field("goal", &self.session.goal)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl ProfitTracker<JsonFileStore> {
    /// Open the JSON store named by `settings` as `settings.default_username`.
    /// A profile that has never been saved starts with `settings.default_goal`.
    pub fn from_settings(settings: &Settings) -> Result<Self, CoreError> {
        let username = settings.default_username.clone();
        Self::validate_username(&username)?;
        let store = JsonFileStore::from_settings(settings);
        let record = match store.load()?.remove(&username) {
            Some(record) => record,
            None => Portfolio::new(settings.default_goal, Vec::new()),
        };
        Ok(Self::build(store, &username, record))
    }
}

impl<S: ProfileStore> ProfitTracker<S> {
    /// Load `username` from `store`. An unknown username gets a default
    /// record; nothing is written until [`save`](Self::save).
    pub fn open(store: S, username: &str) -> Result<Self, CoreError> {
        Self::validate_username(username)?;
        let record = store.get(username)?;
        Ok(Self::build(store, username, record))
    }

    /// Start a session from `record` without reading the store.
    ///
    /// Lets a caller keep working after [`open`](Self::open) failed: edits
    /// and metrics work, and `save` reports store errors as they happen.
    pub fn with_record(store: S, username: &str, record: Portfolio) -> Result<Self, CoreError> {
        Self::validate_username(username)?;
        Ok(Self::build(store, username, record))
    }

    /// Replace the session with `username`'s stored profile.
    /// Unsaved edits of the current profile are discarded.
    pub fn switch_user(&mut self, username: &str) -> Result<(), CoreError> {
        Self::validate_username(username)?;
        let record = self.store.get(username)?;
        if self.dirty {
            warn!(
                "discarding unsaved edits of '{}' while switching to '{}'",
                self.session.username, username
            );
        }
        self.session = PortfolioEditSession::from_portfolio(username, record);
        self.dirty = false;
        Ok(())
    }

    /// Write the current goal and holdings under the session's username.
    /// Clears the unsaved-changes flag on success. On failure the session is
    /// left as it was and the flag stays set.
    pub fn save(&mut self) -> Result<(), CoreError> {
        let username = self.session.username.clone();
        match self.store.put(&username, self.session.to_portfolio()) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                warn!(
                    "saving profile '{}' to {} failed: {}",
                    username,
                    self.store.describe(),
                    e
                );
                Err(e)
            }
        }
    }

    // ── Editing ─────────────────────────────────────────────────────

    /// Apply one edit. A rejected edit leaves the session unchanged.
    pub fn apply(&mut self, intent: EditIntent) -> Result<(), CoreError> {
        let next = self.edit_service.apply(&self.session, intent)?;
        self.commit(next);
        Ok(())
    }

    /// Apply several edits, all-or-nothing.
    pub fn apply_all(&mut self, intents: Vec<EditIntent>) -> Result<(), CoreError> {
        let next = self.edit_service.apply_all(&self.session, intents)?;
        self.commit(next);
        Ok(())
    }

    /// Add a holding with target price `avg_price * 2`.
    /// Returns the id of the new row.
    pub fn add_holding(
        &mut self,
        symbol: &str,
        amount: f64,
        avg_price: f64,
        max_price: Option<f64>,
    ) -> Result<RowId, CoreError> {
        let next = self.edit_service.apply(
            &self.session,
            EditIntent::Add {
                symbol: symbol.to_string(),
                amount,
                avg_price,
                max_price,
            },
        )?;
        let id = next
            .rows
            .last()
            .map(|r| r.id)
            .ok_or_else(|| CoreError::RowNotFound("newly added row".into()))?;
        self.commit(next);
        Ok(id)
    }

    pub fn remove_holding(&mut self, id: RowId) -> Result<(), CoreError> {
        self.apply(EditIntent::Remove(id))
    }

    pub fn update_holding(&mut self, id: RowId, patch: HoldingPatch) -> Result<(), CoreError> {
        self.apply(EditIntent::Update(id, patch))
    }

    pub fn set_goal(&mut self, goal: f64) -> Result<(), CoreError> {
        self.apply(EditIntent::SetGoal(goal))
    }

    /// Replace all holdings at once. Fresh row ids are assigned.
    pub fn replace_holdings(&mut self, holdings: Vec<Holding>) -> Result<(), CoreError> {
        self.apply(EditIntent::ReplaceHoldings(holdings))
    }

    /// Parse a comma-separated bulk entry and replace all holdings with it.
    /// Returns the number of holdings entered.
    pub fn apply_bulk_entry(&mut self, entry: &BulkEntry) -> Result<usize, CoreError> {
        let holdings = parse_bulk_entry(entry)?;
        let count = holdings.len();
        self.replace_holdings(holdings)?;
        Ok(count)
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Row and total metrics for the current holdings.
    #[must_use]
    pub fn metrics(&self) -> PortfolioMetrics {
        self.valuation_service
            .compute_metrics(&self.session.holdings())
    }

    /// Percent of the profit goal reached, capped at 100.
    #[must_use]
    pub fn goal_progress(&self) -> f64 {
        let metrics = self.metrics();
        self.valuation_service
            .goal_progress(metrics.total_profit, self.session.goal)
    }

    #[must_use]
    pub fn goal_summary(&self) -> GoalSummary {
        let metrics = self.metrics();
        self.valuation_service
            .goal_summary(&metrics, self.session.goal)
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn session(&self) -> &PortfolioEditSession {
        &self.session
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.session.username
    }

    #[must_use]
    pub fn goal(&self) -> f64 {
        self.session.goal
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns `true` if the session has been edited since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export the breakdown table as CSV.
    /// Columns: name, amount, avg_price, target_price, initial_investment,
    /// target_value, profit, roi_pct (empty when undefined)
    #[must_use]
    pub fn export_breakdown_to_csv(&self) -> String {
        let mut csv = String::from(
            "name,amount,avg_price,target_price,initial_investment,target_value,profit,roi_pct\n",
        );
        for row in self.metrics().rows {
            // Symbols are free text: quote fields containing separators or quotes
            let name = if row.symbol.contains([',', '"', '\n', '\r']) {
                format!("\"{}\"", row.symbol.replace('"', "\"\""))
            } else {
                row.symbol.clone()
            };
            let roi = row.roi_pct.value().map(|v| v.to_string()).unwrap_or_default();
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                name,
                row.amount,
                row.avg_price,
                row.target_price,
                row.initial_investment,
                row.target_value,
                row.profit,
                roi,
            ));
        }
        csv
    }

    /// The current record as pretty JSON, in the store's layout.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.session.to_portfolio())
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn validate_username(username: &str) -> Result<(), CoreError> {
        if username.is_empty() {
            return Err(CoreError::ValidationError(
                "Username must not be empty".into(),
            ));
        }
        Ok(())
    }

    fn commit(&mut self, next: PortfolioEditSession) {
        self.session = next;
        self.dirty = true;
    }

    fn build(store: S, username: &str, record: Portfolio) -> Self {
        debug!(
            "opened profile '{}' ({} holding(s)) from {}",
            username,
            record.holdings.len(),
            store.describe()
        );
        Self {
            store,
            session: PortfolioEditSession::from_portfolio(username, record),
            edit_service: EditService::new(),
            valuation_service: ValuationService::new(),
            dirty: false,
        }
    }
}
