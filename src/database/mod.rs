// ABOUTME: Database management for users, preferences, recipe history and reviews
// ABOUTME: Owns the SQLite pool and runs in-code schema migrations on startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! # Database Management
//!
//! A thin layer over a `sqlx` `SQLite` pool. Tables are created with
//! `CREATE TABLE IF NOT EXISTS` when the pool is opened, so a fresh file or
//! an in-memory database is usable immediately.

mod history;
mod preferences;
/// Repository traits injected into the recipe generation service
pub mod repositories;
mod reviews;
mod users;

pub use repositories::{
    HistoryRepository, HistoryRepositoryImpl, PreferenceRepository, PreferenceRepositoryImpl,
};

pub use crate::errors::DatabaseError;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::{debug, info};

/// Database manager shared by all handlers
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open a connection pool and run migrations
    ///
    /// In-memory URLs get a single connection that is never recycled,
    /// because every `SQLite` memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the database cannot be
    /// opened, or a migration fails
    pub async fn new(database_url: &str) -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| DatabaseError::ConnectionError {
                context: format!("Invalid database URL '{database_url}': {e}"),
            })?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionError {
                context: format!("Failed to open '{database_url}': {e}"),
            })?;

        let db = Self { pool };
        db.migrate().await?;
        info!(in_memory, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index cannot be created
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        self.migrate_users().await?;
        self.migrate_preferences().await?;
        self.migrate_history().await?;
        self.migrate_reviews().await?;
        debug!("Database migrations applied");
        Ok(())
    }

    /// Verify the pool can serve a trivial query
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Run one migration statement, tagging failures with the step name
    async fn execute_migration(&self, step: &str, sql: &str) -> Result<(), DatabaseError> {
        sqlx::query(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::MigrationError {
                context: format!("{step}: {e}"),
            })?;
        Ok(())
    }
}
