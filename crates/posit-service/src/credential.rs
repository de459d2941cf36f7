//! Salted password hashes.
//!
//! Stored form: `sha256$<salt>$<digest>`, both parts base64 without padding,
//! where `digest = SHA-256(salt || password)`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use sha2::{Digest, Sha256};

use crate::error::ServiceError;

const SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;

fn digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

/// Hash a password with a fresh random salt.
///
/// # Errors
///
/// Returns `ServiceError::Credential` if the OS cannot provide randomness.
pub fn hash(password: &str) -> Result<String, ServiceError> {
    let mut salt = [0u8; SALT_LEN];
    getrandom::fill(&mut salt)
        .map_err(|e| ServiceError::Credential(format!("failed to generate salt: {e}")))?;
    Ok(format!(
        "{SCHEME}${}${}",
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(digest(&salt, password))
    ))
}

/// Check a password against a stored hash. Malformed hashes never match.
#[must_use]
pub fn verify(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(SCHEME), Some(salt), Some(expected), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        tracing::warn!("stored credential has an unknown format");
        return false;
    };
    let (Ok(salt), Ok(expected)) = (STANDARD_NO_PAD.decode(salt), STANDARD_NO_PAD.decode(expected))
    else {
        tracing::warn!("stored credential is not valid base64");
        return false;
    };
    constant_time_eq(&digest(&salt, password), &expected)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
