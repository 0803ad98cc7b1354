//! Engine error taxonomy.

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by the issuance engine and its components.
///
/// Every variant is returned before any state is mutated, so a caller can
/// retry or correct the input without compensating for partial writes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Unknown edition: {0}")]
    UnknownEdition(String),

    #[error("Invalid edition registration: {0}")]
    InvalidEdition(String),

    #[error("Minting is currently paused. The next drop is coming soon!")]
    MintingPaused,

    #[error("Weight table '{0}' has zero total weight")]
    EmptyTable(String),

    #[error("Caller '{0}' is not authorized for this operation")]
    Unauthorized(String),

    #[error("Invalid phase schedule: {0}")]
    InvalidSchedule(String),

    #[error("Unknown pass: {0}")]
    UnknownPass(u64),

    #[error("Pass {id} is not held by '{owner}'")]
    NotOwner { id: u64, owner: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minting_paused_message() {
        let err = EngineError::MintingPaused;
        assert!(err.to_string().contains("paused"));
    }

    #[test]
    fn test_not_owner_message() {
        let err = EngineError::NotOwner {
            id: 7,
            owner: "alice".to_string(),
        };
        assert_eq!(err.to_string(), "Pass 7 is not held by 'alice'");
    }
}
