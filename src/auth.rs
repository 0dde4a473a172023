// ABOUTME: HS256 JWT issuance and validation for access and refresh tokens
// ABOUTME: Stateless codec over a shared secret; storage never interprets tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

//! # Token Management
//!
//! Issues and validates signed, time-boxed tokens. Access tokens carry the
//! admin's identity and role; refresh tokens carry only the admin id. Both
//! use the same HS256 signing mechanism, and the refresh-token string doubles
//! as the storage lookup key for its session row.
//!
//! Validation pins the algorithm to HS256 so a token re-signed under another
//! algorithm never verifies, and distinguishes an expired token (a normal,
//! expected condition) from a malformed or tampered one.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access and refresh tokens
///
/// Refresh tokens omit `email` and `role`; only the subject matters for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin ID
    pub sub: String,
    /// Admin email (access tokens only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Admin role (access tokens only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Issued-at timestamp (seconds since epoch)
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into an admin ID
    ///
    /// # Errors
    ///
    /// Returns `InvalidToken` if the subject is not a valid UUID.
    pub fn admin_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::invalid_token())
    }
}

/// Token manager for issuing and validating signed tokens
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenManager {
    /// Create a new token manager over a shared secret
    #[must_use]
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Refresh-token time-to-live, used by callers to compute row expiry
    #[must_use]
    pub const fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Generate an access token carrying identity and role
    ///
    /// # Errors
    ///
    /// Returns an internal error if signing fails; this is treated as fatal.
    pub fn generate_access_token(
        &self,
        admin_id: Uuid,
        email: &str,
        role: &str,
    ) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: admin_id.to_string(),
            email: Some(email.to_string()),
            role: Some(role.to_string()),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };
        self.sign(&claims)
    }

    /// Generate a refresh token carrying only the admin id
    ///
    /// The returned string is persisted verbatim as the session lookup key.
    ///
    /// # Errors
    ///
    /// Returns an internal error if signing fails.
    pub fn generate_refresh_token(&self, admin_id: Uuid) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: admin_id.to_string(),
            email: None,
            role: None,
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("sign token: {e}")))
    }

    /// Validate a token's signature and expiry and return its claims
    ///
    /// # Errors
    ///
    /// - `InvalidToken` for a bad signature, wrong algorithm, or malformed
    ///   structure
    /// - `ExpiredToken` when the signature is good but the expiry has passed
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        // Expiry is checked manually below so the two failure modes stay
        // distinguishable
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::warn!("token validation failed: {e}");
                AppError::invalid_token()
            })?;

        if Utc::now().timestamp() > claims.exp {
            return Err(AppError::expired_token());
        }

        Ok(claims)
    }

    /// Expiry instant of a refresh token issued now
    #[must_use]
    pub fn refresh_expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.refresh_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn manager() -> TokenManager {
        TokenManager::new(
            "test-secret-for-unit-tests",
            Duration::minutes(15),
            Duration::days(7),
        )
    }

    #[test]
    fn test_access_token_roundtrip() {
        let tm = manager();
        let admin_id = Uuid::new_v4();
        let token = tm
            .generate_access_token(admin_id, "a@example.com", "admin")
            .unwrap();

        let claims = tm.validate_token(&token).unwrap();
        assert_eq!(claims.admin_id().unwrap(), admin_id);
        assert_eq!(claims.email.as_deref(), Some("a@example.com"));
        assert_eq!(claims.role.as_deref(), Some("admin"));
        assert_eq!(claims.exp, claims.iat + 15 * 60);
    }

    #[test]
    fn test_refresh_token_carries_only_subject() {
        let tm = manager();
        let admin_id = Uuid::new_v4();
        let token = tm.generate_refresh_token(admin_id).unwrap();

        let claims = tm.validate_token(&token).unwrap();
        assert_eq!(claims.admin_id().unwrap(), admin_id);
        assert!(claims.email.is_none());
        assert!(claims.role.is_none());
        assert_eq!(claims.exp, claims.iat + 7 * 24 * 3600);
    }

    #[test]
    fn test_expired_token_is_distinguished_from_invalid() {
        let tm = TokenManager::new(
            "test-secret-for-unit-tests",
            Duration::seconds(-1),
            Duration::seconds(-1),
        );
        let token = tm
            .generate_access_token(Uuid::new_v4(), "a@example.com", "admin")
            .unwrap();

        let err = manager().validate_token(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExpiredToken);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let err = manager().validate_token("not.a.jwt").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidToken);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let tm = manager();
        let other = TokenManager::new("another-secret", Duration::minutes(15), Duration::days(7));
        let token = tm
            .generate_access_token(Uuid::new_v4(), "a@example.com", "admin")
            .unwrap();

        let err = other.validate_token(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidToken);
    }

    #[test]
    fn test_non_hmac_algorithm_rejected() {
        // A token whose header claims a non-HMAC algorithm must never verify,
        // even if the payload is well-formed
        let tm = manager();
        let token = tm
            .generate_access_token(Uuid::new_v4(), "a@example.com", "admin")
            .unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        use base64::Engine as _;
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        parts[0] = engine.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let forged = parts.join(".");

        let err = tm.validate_token(&forged).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidToken);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let tm = manager();
        let token = tm
            .generate_access_token(Uuid::new_v4(), "a@example.com", "admin")
            .unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        use base64::Engine as _;
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let mut payload = engine.decode(&parts[1]).unwrap();
        payload[0] ^= 0x01;
        parts[1] = engine.encode(payload);
        let forged = parts.join(".");

        let err = tm.validate_token(&forged).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidToken);
    }
}
