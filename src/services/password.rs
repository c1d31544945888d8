// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PBKDF2 password hashing for credential sign-in.
//!
//! Salts and hashes are stored base64-encoded alongside the credentials
//! record. Verification goes through `ring::pbkdf2::verify`, which is
//! constant-time.

use crate::error::AppError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use ring::rand::SecureRandom;
use ring::{digest, pbkdf2, rand};
use std::num::NonZeroU32;

/// OWASP-recommended iteration count for PBKDF2-HMAC-SHA256.
const PBKDF2_ITERATIONS: NonZeroU32 = match NonZeroU32::new(600_000) {
    Some(n) => n,
    None => panic!("iteration count must be non-zero"),
};

const SALT_LEN: usize = 16;
const HASH_LEN: usize = digest::SHA256_OUTPUT_LEN;
const USER_ID_LEN: usize = 16;

static PBKDF2_ALG: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// A freshly derived password hash and its salt, both base64-encoded.
#[derive(Debug, Clone)]
pub struct HashedPassword {
    pub hash: String,
    pub salt: String,
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<HashedPassword, AppError> {
    let rng = rand::SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to generate salt")))?;

    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(
        PBKDF2_ALG,
        PBKDF2_ITERATIONS,
        &salt,
        password.as_bytes(),
        &mut hash,
    );

    Ok(HashedPassword {
        hash: BASE64.encode(hash),
        salt: BASE64.encode(salt),
    })
}

/// Verify a password against a stored base64 salt and hash.
///
/// Returns `false` for a wrong password; decoding failures on the stored
/// fields are surfaced as errors since they indicate corrupt data.
pub fn verify_password(password: &str, salt_b64: &str, hash_b64: &str) -> Result<bool, AppError> {
    let salt = BASE64
        .decode(salt_b64)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored salt is not base64: {}", e)))?;
    let hash = BASE64
        .decode(hash_b64)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored hash is not base64: {}", e)))?;

    Ok(pbkdf2::verify(
        PBKDF2_ALG,
        PBKDF2_ITERATIONS,
        &salt,
        password.as_bytes(),
        &hash,
    )
    .is_ok())
}

/// Random URL-safe identifier for new accounts and activity documents.
pub fn generate_id() -> Result<String, AppError> {
    let rng = rand::SystemRandom::new();
    let mut bytes = [0u8; USER_ID_LEN];
    rng.fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to generate identifier")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}
