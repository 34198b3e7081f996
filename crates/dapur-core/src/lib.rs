// ABOUTME: Core types and pure recipe logic for the Dapur recipe generator
// ABOUTME: Foundation crate with error handling, constants, preference resolution and prompt building
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

#![deny(unsafe_code)]

//! # Dapur Core
//!
//! Foundation crate providing shared types and the pure recipe logic of the
//! Dapur recipe generator. Nothing in here performs I/O, which keeps the
//! prompt a deterministic function of its inputs.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Application-wide constants organized by domain
//! - **category**: Recipe categories and their label parsing
//! - **preferences**: Dietary preference sets and the request/stored merge
//! - **prompt**: Natural-language prompt construction for the completion service

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and configuration values organized by domain
pub mod constants;

/// Recipe categories accepted by the generation endpoint
pub mod category;

/// Dietary preference sets and resolution between request and storage
pub mod preferences;

/// Prompt construction for recipe generation
pub mod prompt;

pub use category::RecipeCategory;
pub use preferences::{resolve, MergePolicy, PreferenceSet};
pub use prompt::build_prompt;
