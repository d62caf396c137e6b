use thiserror::Error;

/// Why a token could not be issued or accepted.
///
/// The validation kinds are diagnostics only: every one of them reaches the client as
/// the same 401 response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing or malformed bearer token")]
    MissingOrMalformedToken,
    #[error("token signature does not verify")]
    InvalidSignature,
    #[error("unexpected signing method: {0}")]
    UnexpectedSigningMethod(String),
    #[error("token has expired")]
    Expired,
    #[error("token claims do not have the expected shape")]
    ClaimsTypeMismatch,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl AuthError {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingOrMalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::UnexpectedSigningMethod(_) => "unexpected_signing_method",
            AuthError::Expired => "token_expired",
            AuthError::ClaimsTypeMismatch => "claims_type_mismatch",
            AuthError::Signing(_) => "signing_failed",
        }
    }
}
