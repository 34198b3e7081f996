// ABOUTME: Preference repository implementation
// ABOUTME: Delegates stored preference reads and overwrites to the SQLite database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

use super::PreferenceRepository;
use crate::database::{Database, DatabaseError};
use crate::models::StoredPreferences;
use async_trait::async_trait;
use dapur_core::PreferenceSet;

/// `SQLite` implementation of `PreferenceRepository`
pub struct PreferenceRepositoryImpl {
    db: Database,
}

impl PreferenceRepositoryImpl {
    /// Create a new `PreferenceRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PreferenceRepository for PreferenceRepositoryImpl {
    async fn find_preferences(
        &self,
        user_id: i64,
    ) -> Result<Option<StoredPreferences>, DatabaseError> {
        self.db.get_preferences(user_id).await
    }

    async fn upsert_preferences(
        &self,
        user_id: i64,
        preferences: &PreferenceSet,
    ) -> Result<StoredPreferences, DatabaseError> {
        self.db.upsert_preferences(user_id, preferences).await
    }
}
