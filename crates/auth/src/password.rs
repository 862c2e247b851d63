//! Password hashing and verification (bcrypt).

use thiserror::Error;

/// Work factor for newly stored credentials.
pub const HASH_COST: u32 = 12;

/// Hash backend failure.
///
/// A mismatch during verification is **not** an error; it surfaces as
/// `Ok(false)`. This error means the hashing itself failed (or the stored
/// hash is unparseable) and the calling request should fail as a server
/// error.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Hash a plaintext password with the standard work factor.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    hash_with_cost(plain, HASH_COST)
}

/// Hash with an explicit work factor (tests use the bcrypt minimum).
pub fn hash_with_cost(plain: &str, cost: u32) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(plain, cost)?)
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, PasswordError> {
    Ok(bcrypt::verify(plain, hash)?)
}
