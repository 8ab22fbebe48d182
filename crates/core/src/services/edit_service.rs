use log::debug;

use crate::errors::CoreError;
use crate::models::holding::{
    validate_finite, validate_non_negative, validate_position_values, Holding,
};
use crate::models::session::{
    EditIntent, HoldingPatch, PortfolioEditSession, RowId, SessionRow,
};

/// Applies user edits to a [`PortfolioEditSession`].
///
/// Every operation reads the previous session and returns the next one.
/// Nothing is mutated in place, so on error the caller still holds the
/// untouched previous session.
pub struct EditService;

impl EditService {
    pub fn new() -> Self {
        Self
    }

    /// Build the session that results from applying `intent` to `session`.
    pub fn apply(
        &self,
        session: &PortfolioEditSession,
        intent: EditIntent,
    ) -> Result<PortfolioEditSession, CoreError> {
        match intent {
            EditIntent::Add {
                symbol,
                amount,
                avg_price,
                max_price,
            } => self.add_holding(session, &symbol, amount, avg_price, max_price),
            EditIntent::Remove(id) => self.remove_holding(session, id),
            EditIntent::Update(id, patch) => self.update_holding(session, id, &patch),
            EditIntent::SetGoal(goal) => self.set_goal(session, goal),
            EditIntent::ReplaceHoldings(holdings) => self.replace_holdings(session, holdings),
        }
    }

    /// Apply several intents in order. If any is rejected, none take effect.
    pub fn apply_all(
        &self,
        session: &PortfolioEditSession,
        intents: Vec<EditIntent>,
    ) -> Result<PortfolioEditSession, CoreError> {
        let mut next = session.clone();
        for intent in intents {
            next = self.apply(&next, intent)?;
        }
        Ok(next)
    }

    fn add_holding(
        &self,
        session: &PortfolioEditSession,
        symbol: &str,
        amount: f64,
        avg_price: f64,
        max_price: Option<f64>,
    ) -> Result<PortfolioEditSession, CoreError> {
        let holding = Holding::with_max_price(symbol, amount, avg_price, max_price)?;
        debug!("adding {} ({} @ {})", holding.symbol, amount, avg_price);

        let mut next = session.clone();
        next.rows.push(SessionRow::new(holding));
        Ok(next)
    }

    fn remove_holding(
        &self,
        session: &PortfolioEditSession,
        id: RowId,
    ) -> Result<PortfolioEditSession, CoreError> {
        if session.row(id).is_none() {
            return Err(CoreError::RowNotFound(id.to_string()));
        }

        let rows = session
            .rows
            .iter()
            .filter(|r| r.id != id)
            .cloned()
            .collect();

        Ok(PortfolioEditSession {
            rows,
            ..session.clone()
        })
    }

    fn update_holding(
        &self,
        session: &PortfolioEditSession,
        id: RowId,
        patch: &HoldingPatch,
    ) -> Result<PortfolioEditSession, CoreError> {
        let current = session
            .row(id)
            .ok_or_else(|| CoreError::RowNotFound(id.to_string()))?;
        let updated = Self::patched(&current.holding, patch)?;

        let rows = session
            .rows
            .iter()
            .map(|r| {
                if r.id == id {
                    SessionRow {
                        id,
                        holding: updated.clone(),
                    }
                } else {
                    r.clone()
                }
            })
            .collect();

        Ok(PortfolioEditSession {
            rows,
            ..session.clone()
        })
    }

    fn set_goal(
        &self,
        session: &PortfolioEditSession,
        goal: f64,
    ) -> Result<PortfolioEditSession, CoreError> {
        validate_non_negative("profit goal", goal)?;
        Ok(PortfolioEditSession {
            goal,
            ..session.clone()
        })
    }

    fn replace_holdings(
        &self,
        session: &PortfolioEditSession,
        holdings: Vec<Holding>,
    ) -> Result<PortfolioEditSession, CoreError> {
        for holding in &holdings {
            Self::validate_holding(holding)?;
        }
        Ok(PortfolioEditSession {
            rows: holdings.into_iter().map(SessionRow::new).collect(),
            ..session.clone()
        })
    }

    /// Check a holding built outside this service (e.g. deserialized).
    pub fn validate_holding(holding: &Holding) -> Result<(), CoreError> {
        if holding.symbol.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Asset symbol must not be empty".into(),
            ));
        }
        validate_non_negative("amount", holding.amount)?;
        validate_non_negative("average price", holding.avg_price)?;
        validate_finite("target price", holding.target_price)?;
        validate_position_values(holding.amount, holding.avg_price, holding.target_price)?;
        if let Some(max) = holding.max_price {
            validate_non_negative("max price", max)?;
        }
        Ok(())
    }

    fn patched(holding: &Holding, patch: &HoldingPatch) -> Result<Holding, CoreError> {
        let mut next = holding.clone();
        if let Some(amount) = patch.amount {
            next.amount = amount;
        }
        if let Some(avg_price) = patch.avg_price {
            next.avg_price = avg_price;
        }
        if let Some(target_price) = patch.target_price {
            next.target_price = target_price;
        }
        if let Some(max_price) = patch.max_price {
            next.max_price = Some(max_price);
        }
        Self::validate_holding(&next)?;
        Ok(next)
    }
}

impl Default for EditService {
    fn default() -> Self {
        Self::new()
    }
}
