// ABOUTME: History repository implementation
// ABOUTME: Delegates recipe history appends and listings to the SQLite database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

use super::HistoryRepository;
use crate::database::{Database, DatabaseError};
use crate::models::{NewHistoryEntry, RecipeHistoryEntry};
use async_trait::async_trait;

/// `SQLite` implementation of `HistoryRepository`
pub struct HistoryRepositoryImpl {
    db: Database,
}

impl HistoryRepositoryImpl {
    /// Create a new `HistoryRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HistoryRepository for HistoryRepositoryImpl {
    async fn append_history(
        &self,
        entry: &NewHistoryEntry,
    ) -> Result<RecipeHistoryEntry, DatabaseError> {
        self.db.append_history(entry).await
    }

    async fn list_history(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<RecipeHistoryEntry>, DatabaseError> {
        self.db.list_history(user_id, limit).await
    }
}
