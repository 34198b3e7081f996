// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Hosts the recipe generation orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! Domain service layer
//!
//! Services hold the business sequence behind an endpoint and receive their
//! collaborators as trait objects, so they run the same against `SQLite` or
//! in-memory fakes.

/// Preference lookup, prompt construction, completion and history recording
pub mod recipe_generation;

pub use recipe_generation::{
    GeneratedRecipe, GenerationError, GenerationRequest, Ingredients, RecipeGenerator,
};
