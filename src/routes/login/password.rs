use actix_web::web;
use bcrypt::{hash, verify};
use log::error;

use crate::error::{AppError, AppResult};

#[cfg(not(test))]
const HASH_COST: u32 = bcrypt::DEFAULT_COST;
// Minimum cost keeps the test suite fast.
#[cfg(test)]
const HASH_COST: u32 = 4;

/// Hashes on the blocking pool so a worker thread is not held for the
/// whole bcrypt round.
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_owned();
    web::block(move || hash(password, HASH_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing was interrupted: {e}")))?
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// A stored value that is not a bcrypt hash never matches.
pub async fn verify_password(password: &str, password_hash: &str) -> bool {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    match web::block(move || verify(password, &password_hash)).await {
        Ok(Ok(valid)) => valid,
        Ok(Err(e)) => {
            error!("Error when checking password hash: {}", e);
            false
        }
        Err(e) => {
            error!("Password check was interrupted: {}", e);
            false
        }
    }
}
