// ABOUTME: Configuration module for server settings loaded from the environment
// ABOUTME: Re-exports the environment-backed ServerConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

pub mod environment;

pub use environment::ServerConfig;
