// ABOUTME: Repository traits for the persistence collaborators of recipe generation
// ABOUTME: Lets the generation service run against SQLite or in-memory fakes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! # Repositories
//!
//! The recipe generation service never touches [`Database`](super::Database)
//! directly. It receives these traits as `Arc<dyn ...>` so tests can inject
//! in-memory implementations.

mod history_repository;
mod preference_repository;

pub use history_repository::HistoryRepositoryImpl;
pub use preference_repository::PreferenceRepositoryImpl;

use async_trait::async_trait;
use dapur_core::PreferenceSet;

use super::DatabaseError;
use crate::models::{NewHistoryEntry, RecipeHistoryEntry, StoredPreferences};

/// Stored dietary preferences
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Preferences saved by the user, `None` when never saved
    async fn find_preferences(
        &self,
        user_id: i64,
    ) -> Result<Option<StoredPreferences>, DatabaseError>;

    /// Insert or overwrite the user's preferences
    async fn upsert_preferences(
        &self,
        user_id: i64,
        preferences: &PreferenceSet,
    ) -> Result<StoredPreferences, DatabaseError>;
}

/// Append-only generation history
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Record one generation
    async fn append_history(
        &self,
        entry: &NewHistoryEntry,
    ) -> Result<RecipeHistoryEntry, DatabaseError>;

    /// Latest entries for a user, newest first
    async fn list_history(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<RecipeHistoryEntry>, DatabaseError>;
}
