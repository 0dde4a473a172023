// ABOUTME: Environment-based configuration for the backoffice server
// ABOUTME: Reads and validates settings from env vars with safe defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

//! Server configuration
//!
//! Every setting comes from an environment variable with a development
//! default. The one exception is `JWT_SECRET`, which is required and refused
//! when it still carries the placeholder value.

use crate::password;
use anyhow::{bail, Context, Result};
use std::env;

/// Placeholder secret shipped in .env.example, never accepted at runtime
const PLACEHOLDER_JWT_SECRET: &str = "change-me-in-production";

/// Default access token lifetime: 15 minutes
pub const DEFAULT_ACCESS_TTL_SECS: i64 = 900;
/// Default refresh token lifetime: 7 days
pub const DEFAULT_REFRESH_TTL_SECS: i64 = 604_800;

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub http_host: String,
    /// Port the HTTP listener binds to
    pub http_port: u16,
    /// Database connection string (SQLite path or PostgreSQL URL)
    pub database_url: String,
    /// Token signing and lifetime settings
    pub auth: AuthConfig,
    /// Allowed CORS origins, `*` meaning any
    pub cors_origins: Vec<String>,
    /// Log level applied when RUST_LOG is unset
    pub log_level: LogLevel,
}

/// Authentication settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing JWTs
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub access_ttl_secs: i64,
    /// Refresh token lifetime in seconds
    pub refresh_ttl_secs: i64,
    /// Bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
}

/// Log verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => bail!("invalid log level: {other}"),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("invalid value for {name}")),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when `JWT_SECRET` is missing, empty or still the
    /// placeholder, or when a numeric variable fails to parse or is out of
    /// range.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET")
            .context("JWT_SECRET environment variable is required")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }
        if jwt_secret == PLACEHOLDER_JWT_SECRET {
            bail!("JWT_SECRET still has the placeholder value, set a real secret");
        }

        let access_ttl_secs = parse_env("JWT_ACCESS_TTL_SECS", DEFAULT_ACCESS_TTL_SECS)?;
        if access_ttl_secs <= 0 {
            bail!("JWT_ACCESS_TTL_SECS must be positive");
        }
        let refresh_ttl_secs = parse_env("JWT_REFRESH_TTL_SECS", DEFAULT_REFRESH_TTL_SECS)?;
        if refresh_ttl_secs <= 0 {
            bail!("JWT_REFRESH_TTL_SECS must be positive");
        }

        let bcrypt_cost: u32 = parse_env("BCRYPT_COST", password::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31");
        }

        let cors_origins = env_or("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_level = env_or("LOG_LEVEL", "info").parse()?;

        Ok(Self {
            http_host: env_or("HTTP_HOST", "127.0.0.1"),
            http_port: parse_env("HTTP_PORT", 8081)?,
            database_url: env_or("DATABASE_URL", "sqlite:./data/backoffice.db"),
            auth: AuthConfig {
                jwt_secret,
                access_ttl_secs,
                refresh_ttl_secs,
                bcrypt_cost,
            },
            cors_origins,
            log_level,
        })
    }

    /// Summary of the active configuration with the secret redacted
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "listen={}:{} database={} access_ttl={}s refresh_ttl={}s log={}",
            self.http_host,
            self.http_port,
            self.database_url,
            self.auth.access_ttl_secs,
            self.auth.refresh_ttl_secs,
            self.log_level.as_str()
        )
    }
}
