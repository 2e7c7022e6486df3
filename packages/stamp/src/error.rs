use thiserror::Error;

/// Errors that can occur while stamping or verifying
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StampError {
    #[error("Hash computation failed: {0}")]
    HashComputationFailure(String),

    #[error("Malformed stamp block: {0}")]
    MalformedStamp(String),

    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
