// ABOUTME: Main library entry point for the Dapur recipe generator API
// ABOUTME: Wires configuration, persistence, auth, the LLM client and the HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

#![deny(unsafe_code)]

//! # Dapur Server
//!
//! Backend for an AI-assisted recipe generator. Users register, save dietary
//! preferences and ask for recipes built from the ingredients they have. The
//! request is turned into a prompt, sent to an OpenAI-compatible completion
//! service and the answer is kept in the user's history.
//!
//! ## Architecture
//!
//! - **dapur-core**: errors, constants, categories, preference merge, prompt text
//! - **config**: environment-driven configuration
//! - **database**: `SQLite` persistence and repository traits
//! - **llm**: completion service client
//! - **services**: the recipe generation sequence
//! - **routes** / **server**: the axum HTTP surface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use dapur_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Dapur configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Access tokens and password hashing
pub mod auth;

/// Environment configuration
pub mod config;

/// Application constants, re-exported from `dapur-core`
pub mod constants;

/// `SQLite` persistence
pub mod database;

/// Unified error types, re-exported from `dapur-core`
pub mod errors;

/// Completion service clients
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Authentication and CORS middleware
pub mod middleware;

/// Database rows and API projections
pub mod models;

/// Shared handler state
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Business services
pub mod services;

pub use dapur_core::{build_prompt, resolve, MergePolicy, PreferenceSet, RecipeCategory};
