// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven server configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! Configuration module for the Dapur server
//!
//! All settings come from environment variables; see [`environment::ServerConfig::from_env`].

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AuthConfig, DatabaseConfig, DatabaseUrl, Environment, LlmConfig, RecipeConfig,
    SecurityConfig, ServerConfig,
};
