use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks `candidate` against a stored bcrypt hash.
///
/// `Ok(false)` is a wrong password; `Err` means the stored hash itself is unusable.
pub fn verify_password(candidate: &str, stored_hash: &str) -> Result<bool, AppError> {
    verify(candidate, stored_hash)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}
