use thiserror::Error;

/// Error type for token issuance and verification.
///
/// Verification failures form a closed set so callers can branch on kind
/// without string matching.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is not yet valid")]
    NotYetValid,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}
