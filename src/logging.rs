// ABOUTME: Structured logging setup built on the tracing ecosystem
// ABOUTME: Supports JSON output for production and pretty output for development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

//! Logging initialization
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and `info` to everything else.

use crate::config::environment::LogLevel;
use anyhow::Result;
use std::env;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Machine-readable JSON, one object per line
    Json,
    /// Human-readable multi-line output
    Pretty,
    /// Single-line human-readable output
    #[default]
    Compact,
}

impl LogFormat {
    /// Parse from the LOG_FORMAT environment variable, defaulting to compact
    #[must_use]
    pub fn from_env() -> Self {
        match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => Self::Json,
            Ok("pretty") => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns an error when a subscriber is already installed.
pub fn init_logging(level: LogLevel, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("info,backoffice={}", level.as_str()))
    });

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
