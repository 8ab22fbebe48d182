use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;

/// Multiplier applied to the average price to seed a new holding's target price.
pub const DEFAULT_TARGET_MULTIPLIER: f64 = 2.0;

/// Multiplier applied to the average price when a holding carries no
/// explicit slider ceiling.
pub const DEFAULT_MAX_PRICE_MULTIPLIER: f64 = 5.0;

/// One position in a portfolio.
///
/// Serialized with the field names of the profile file (`name`, `avg_price`,
/// ...). Derived values (initial investment, profit, ROI) are never stored;
/// see [`ValuationService`](crate::services::valuation_service::ValuationService).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol, uppercased on creation (e.g. "TSLA", "BTC")
    #[serde(rename = "name")]
    pub symbol: String,

    /// Quantity held, may be fractional
    pub amount: f64,

    /// Average price paid per unit
    pub avg_price: f64,

    /// Hypothetical future price per unit used for projection
    pub target_price: f64,

    /// Upper bound for a target-price slider. Presentation only; absent in
    /// legacy records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,

    /// Keys written by other tools. Kept as-is and written back on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Holding {
    /// Create a validated holding with the default target (`avg_price * 2`)
    /// and slider ceiling (`avg_price * 5`).
    pub fn new(symbol: impl AsRef<str>, amount: f64, avg_price: f64) -> Result<Self, CoreError> {
        Self::with_max_price(symbol, amount, avg_price, None)
    }

    /// Like [`Holding::new`] but with an explicit slider ceiling.
    /// `None` falls back to `avg_price * 5`.
    pub fn with_max_price(
        symbol: impl AsRef<str>,
        amount: f64,
        avg_price: f64,
        max_price: Option<f64>,
    ) -> Result<Self, CoreError> {
        let symbol = normalize_symbol(symbol.as_ref())?;
        validate_non_negative("amount", amount)?;
        validate_non_negative("average price", avg_price)?;
        let max_price = match max_price {
            Some(m) => {
                validate_non_negative("max price", m)?;
                m
            }
            None => avg_price * DEFAULT_MAX_PRICE_MULTIPLIER,
        };
        let target_price = avg_price * DEFAULT_TARGET_MULTIPLIER;
        validate_finite("max price", max_price)?;
        validate_position_values(amount, avg_price, target_price)?;

        Ok(Self {
            symbol,
            amount,
            avg_price,
            target_price,
            max_price: Some(max_price),
            extra: Map::new(),
        })
    }

    /// Build a holding with an explicit target price and no slider ceiling.
    /// Used by bulk entry, where the target is typed in directly.
    pub fn with_target(
        symbol: impl AsRef<str>,
        amount: f64,
        avg_price: f64,
        target_price: f64,
    ) -> Result<Self, CoreError> {
        let symbol = normalize_symbol(symbol.as_ref())?;
        validate_non_negative("amount", amount)?;
        validate_non_negative("average price", avg_price)?;
        validate_finite("target price", target_price)?;
        validate_position_values(amount, avg_price, target_price)?;

        Ok(Self {
            symbol,
            amount,
            avg_price,
            target_price,
            max_price: None,
            extra: Map::new(),
        })
    }

    /// Slider ceiling, defaulting to `avg_price * 5` for legacy records.
    #[must_use]
    pub fn effective_max_price(&self) -> f64 {
        self.max_price
            .unwrap_or(self.avg_price * DEFAULT_MAX_PRICE_MULTIPLIER)
    }
}

/// Trim and uppercase a symbol; blank symbols are rejected.
pub fn normalize_symbol(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError(
            "Asset symbol must not be empty".into(),
        ));
    }
    Ok(trimmed.to_uppercase())
}

pub(crate) fn validate_finite(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::ValidationError(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_non_negative(field: &str, value: f64) -> Result<(), CoreError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(CoreError::ValidationError(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}

/// Reject positions whose initial investment or target value cannot be
/// represented as a finite `f64`.
pub(crate) fn validate_position_values(
    amount: f64,
    avg_price: f64,
    target_price: f64,
) -> Result<(), CoreError> {
    for (field, price) in [("initial investment", avg_price), ("target value", target_price)] {
        if !(amount * price).is_finite() {
            return Err(CoreError::ValidationError(format!(
                "{field} {amount} × {price} is out of range"
            )));
        }
    }
    Ok(())
}
