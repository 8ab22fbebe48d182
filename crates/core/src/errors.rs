use thiserror::Error;

/// Unified error type for the entire profit-goal-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
///
/// Zero denominators are not errors: they surface as
/// [`Ratio::DivisionByZero`](crate::models::metrics::Ratio) or a goal
/// progress of `0`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Store ───────────────────────────────────────────────────────
    #[error("Profile store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Holding row not found: {0}")]
    RowNotFound(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::StoreUnavailable(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<tempfile::PersistError> for CoreError {
    fn from(e: tempfile::PersistError) -> Self {
        CoreError::StoreUnavailable(format!("atomic replace failed: {}", e.error))
    }
}
