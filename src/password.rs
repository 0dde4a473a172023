// ABOUTME: Password hashing and verification built on bcrypt
// ABOUTME: Verification never errors on mismatch - it returns false
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

//! # Password Hashing
//!
//! One-way salted hashing with a configurable cost factor. The default cost
//! of 10 balances brute-force resistance against login latency. Hashing the
//! same password twice produces different outputs because bcrypt salts each
//! hash internally.

use crate::errors::{AppError, AppResult};

/// Default bcrypt cost factor
pub const DEFAULT_COST: u32 = 10;

/// Password hasher with a fixed cost factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    /// Create a hasher with an explicit cost factor
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password
    ///
    /// # Errors
    ///
    /// Returns an internal error if bcrypt fails (invalid cost, RNG failure).
    pub fn hash(&self, password: &str) -> AppResult<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::internal(format!("hash password: {e}")))
    }

    /// Verify a plaintext candidate against a stored hash
    ///
    /// A mismatch or a malformed stored hash both report `false`; this never
    /// errors on bad input.
    #[must_use]
    pub fn verify(&self, hash: &str, candidate: &str) -> bool {
        bcrypt::verify(candidate, hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cost 4 is the bcrypt minimum; tests use it to stay fast
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let h = hasher();
        let hash = h.hash("password1").unwrap();
        assert!(h.verify(&hash, "password1"));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let h = hasher();
        let hash = h.hash("password1").unwrap();
        assert!(!h.verify(&hash, "password2"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let h = hasher();
        let first = h.hash("password1").unwrap();
        let second = h.hash("password1").unwrap();
        assert_ne!(first, second);
        assert!(h.verify(&first, "password1"));
        assert!(h.verify(&second, "password1"));
    }

    #[test]
    fn test_verify_malformed_hash_is_false_not_error() {
        let h = hasher();
        assert!(!h.verify("not-a-bcrypt-hash", "password1"));
        assert!(!h.verify("", "password1"));
    }
}
