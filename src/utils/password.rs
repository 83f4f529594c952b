use pbkdf2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::{Params, Pbkdf2};
use rand::RngCore;

use crate::errors::AppError;

#[cfg(not(test))]
const ROUNDS: u32 = 600_000;
// Verification reads the round count back from the stored hash, so tests can use a cheap one.
#[cfg(test)]
const ROUNDS: u32 = 1_000;
const OUTPUT_LENGTH: usize = 32;
const SALT_LENGTH: usize = 16;

/// Hashes a password into a PHC string: `$pbkdf2-sha256$i=<rounds>,l=32$<salt>$<hash>`.
/// The key derivation runs on the blocking pool.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    run_blocking(move || hash(&password)).await
}

/// `Ok(false)` on a wrong password, `Err` only when the stored hash is unreadable.
pub async fn verify_password(password: String, stored_hash: String) -> Result<bool, AppError> {
    run_blocking(move || verify(&password, &stored_hash)).await
}

fn hash(password: &str) -> Result<String, AppError> {
    let mut bytes = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut bytes);
    let salt = SaltString::encode_b64(&bytes)
        .map_err(|e| AppError::Internal(format!("Salt encoding failed: {}", e)))?;

    let params = Params {
        rounds: ROUNDS,
        output_length: OUTPUT_LENGTH,
    };
    Pbkdf2
        .hash_password_customized(password.as_bytes(), None, None, params, &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

fn verify(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

    match Pbkdf2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(format!("Password verification failed: {}", e))),
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("Password task failed: {}", e)))?
}
