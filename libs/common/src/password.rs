//! Salted password hashing
//!
//! Credentials are hashed with Argon2 and a fresh random salt, and stored as
//! PHC strings so the parameters travel with the hash.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

use crate::error::{DatabaseError, DatabaseResult};

/// Hash a plaintext password with a freshly generated salt
pub fn hash_password(password: &str) -> DatabaseResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DatabaseError::Hashing(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(hash)
}

/// Check a plaintext password against a stored hash
pub fn verify_password(password: &str, hashed_password: &str) -> DatabaseResult<bool> {
    let parsed_hash = PasswordHash::new(hashed_password)
        .map_err(|e| DatabaseError::Hashing(format!("Failed to parse password hash: {}", e)))?;

    let argon2 = Argon2::default();
    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
