use argon2::{
    password_hash::{
        rand_core::OsRng,
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, Error as Argon2Error
    },
    Argon2, Algorithm, Params, Version
};
use zeroize::Zeroizing;

use crate::errors::{AppError, PasswordError};
use crate::settings::PasswordHashConfig;

const HASHING_FAILED: &str = "Error hashing password";

/// Hashes a credential with argon2id on the blocking pool.
///
/// Failures are logged here; callers only see a generic internal error.
pub async fn hash_password(password: &str, config: PasswordHashConfig) -> Result<String, AppError> {
    let password = Zeroizing::new(password.to_owned());

    let outcome = tokio::task::spawn_blocking(move || hash_blocking(&password, config)).await;

    match outcome {
        Ok(Ok(hash)) => Ok(hash),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Password hashing failed");
            Err(AppError::InternalError(HASHING_FAILED.to_string()))
        }
        Err(e) => {
            tracing::error!(error = %e, "Password hashing task did not complete");
            Err(AppError::InternalError(HASHING_FAILED.to_string()))
        }
    }
}

fn hash_blocking(password: &str, config: PasswordHashConfig) -> Result<String, PasswordError> {
    let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
        .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingError(e.to_string()))
        .map(|hash| hash.to_string())
}

/// Checks a plaintext against a PHC-formatted hash. The work factor is read from the hash.
pub fn verify_password(
    password: &str,
    hashed: &str,
) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hashed)
        .map_err(|e| PasswordError::InvalidHashFormat(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(Argon2Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerificationError(e.to_string())),
    }
}
