use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Duration, Utc};
use password_hash::SaltString;
use rand_core::{OsRng, RngCore};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("could not hash password: {0}")]
pub struct CredentialError(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid OTP.")]
    Invalid,
    #[error("OTP timestamp missing. Please request a new one.")]
    MissingTimestamp,
    #[error("OTP expired. Please request a new one.")]
    Expired,
}

pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| CredentialError(err.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(hash: &str, password: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Six decimal digits, never starting with zero.
pub fn generate_otp() -> String {
    let code = 100_000 + OsRng.next_u32() % 900_000;
    code.to_string()
}

/// Checks a submitted reset code against the stored one.
pub fn verify_otp(
    stored: Option<&str>,
    created_at: Option<DateTime<Utc>>,
    submitted: &str,
    now: DateTime<Utc>,
    ttl: Duration,
) -> Result<(), OtpError> {
    if stored != Some(submitted.trim()) {
        return Err(OtpError::Invalid);
    }
    let created_at = created_at.ok_or(OtpError::MissingTimestamp)?;
    if now > created_at + ttl {
        return Err(OtpError::Expired);
    }
    Ok(())
}
