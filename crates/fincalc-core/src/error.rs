use thiserror::Error;

/// Validation failures reported by the engine.
///
/// Computation cannot fail once input is validated (the zero-rate branch is
/// handled explicitly in both calculators), so these are the only error
/// kinds. Each variant names the offending field so the caller can re-prompt.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid amount in {field}: {reason}")]
    InvalidAmount { field: String, reason: String },

    #[error("Invalid rate in {field}: {reason}")]
    InvalidRate { field: String, reason: String },

    #[error("Invalid tenure in {field}: {reason}")]
    InvalidTenure { field: String, reason: String },
}

impl EngineError {
    /// The request field this error refers to.
    pub fn field(&self) -> &str {
        match self {
            EngineError::InvalidAmount { field, .. } => field,
            EngineError::InvalidRate { field, .. } => field,
            EngineError::InvalidTenure { field, .. } => field,
        }
    }
}
