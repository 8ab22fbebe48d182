use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::holding::Holding;

/// Four parallel comma-separated lists, as typed into a bulk entry form:
///
/// ```text
/// names:         TSLA, BTC, ALGO
/// amounts:       760, 0.538, 42000
/// avg_prices:    350, 61000, 0.2
/// target_prices: 700, 229000, 3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkEntry {
    pub names: String,
    pub amounts: String,
    pub avg_prices: String,
    pub target_prices: String,
}

impl BulkEntry {
    pub fn new(
        names: impl Into<String>,
        amounts: impl Into<String>,
        avg_prices: impl Into<String>,
        target_prices: impl Into<String>,
    ) -> Self {
        Self {
            names: names.into(),
            amounts: amounts.into(),
            avg_prices: avg_prices.into(),
            target_prices: target_prices.into(),
        }
    }
}

/// Parse a bulk entry into holdings, one per position.
///
/// Rules:
/// - Every sub-field is trimmed; a blank one is rejected (never read as zero)
/// - Names are uppercased
/// - Numbers must parse as finite `f64`
/// - All four lists must have the same number of entries
pub fn parse_bulk_entry(entry: &BulkEntry) -> Result<Vec<Holding>, CoreError> {
    let names = split_fields("names", &entry.names)?;
    let amounts = parse_numbers("amounts", &entry.amounts)?;
    let avg_prices = parse_numbers("average prices", &entry.avg_prices)?;
    let targets = parse_numbers("target prices", &entry.target_prices)?;

    let n = names.len();
    if amounts.len() != n || avg_prices.len() != n || targets.len() != n {
        return Err(CoreError::ValidationError(format!(
            "All fields must have the same number of entries \
             (names: {}, amounts: {}, average prices: {}, target prices: {})",
            n,
            amounts.len(),
            avg_prices.len(),
            targets.len(),
        )));
    }

    names
        .iter()
        .zip(amounts)
        .zip(avg_prices)
        .zip(targets)
        .map(|(((name, amount), avg_price), target)| {
            Holding::with_target(name, amount, avg_price, target)
        })
        .collect()
}

fn split_fields<'a>(field: &str, raw: &'a str) -> Result<Vec<&'a str>, CoreError> {
    raw.split(',')
        .enumerate()
        .map(|(i, part)| {
            let part = part.trim();
            if part.is_empty() {
                Err(CoreError::ValidationError(format!(
                    "{field}: entry {} is blank",
                    i + 1
                )))
            } else {
                Ok(part)
            }
        })
        .collect()
}

fn parse_numbers(field: &str, raw: &str) -> Result<Vec<f64>, CoreError> {
    split_fields(field, raw)?
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            part.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    CoreError::ValidationError(format!(
                        "{field}: entry {} ('{part}') is not a number",
                        i + 1
                    ))
                })
        })
        .collect()
}
