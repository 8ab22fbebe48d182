use crate::errors::CoreError;
use crate::models::portfolio::ProfileMap;

/// Encode the whole store as pretty-printed UTF-8 JSON.
///
/// Layout:
/// ```text
/// {
///   "<username>": {
///     "goal": <number>,
///     "assets": [
///       {"name": "TSLA", "amount": 760.0, "avg_price": 350.0,
///        "target_price": 700.0, "max_price": 1750.0}
///     ]
///   }
/// }
/// ```
///
/// `max_price` is written only when present. Usernames appear in sorted
/// order. Non-finite numbers are rejected: JSON would store them as `null`
/// and the file could no longer be loaded.
pub fn encode_profiles(profiles: &ProfileMap) -> Result<Vec<u8>, CoreError> {
    for (username, portfolio) in profiles {
        let mut numbers = std::iter::once(portfolio.goal).chain(
            portfolio
                .holdings
                .iter()
                .flat_map(|h| [h.amount, h.avg_price, h.target_price, h.max_price.unwrap_or(0.0)]),
        );
        if numbers.any(|v| !v.is_finite()) {
            return Err(CoreError::Serialization(format!(
                "Profile '{username}' contains a non-finite number"
            )));
        }
    }

    let mut bytes = serde_json::to_vec_pretty(profiles)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize profiles: {e}")))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode a store written by [`encode_profiles`] or by older tools.
///
/// Missing `goal` defaults to 1,000,000, missing `assets` to an empty list,
/// missing `max_price` stays absent. Unknown fields are kept and written
/// back by [`encode_profiles`].
pub fn decode_profiles(data: &[u8]) -> Result<ProfileMap, CoreError> {
    serde_json::from_slice(data)
        .map_err(|e| CoreError::Deserialization(format!("Failed to parse profile store: {e}")))
}
