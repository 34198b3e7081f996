// ABOUTME: Structured error types for database operations
// ABOUTME: Provides domain-specific errors with context for repository callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

use thiserror::Error;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Could not obtain or open a connection
    #[error("Database connection failed: {context}")]
    ConnectionError {
        /// What was being attempted
        context: String,
    },

    /// A query failed to execute or decode
    #[error("Database query failed: {context}")]
    QueryError {
        /// Failing statement or decode context
        context: String,
    },

    /// A referenced row does not exist
    #[error("{entity} with id '{id}' not found")]
    NotFound {
        /// Entity kind (e.g. "User")
        entity: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// A uniqueness or foreign-key constraint rejected the write
    #[error("Constraint violation: {context}")]
    ConstraintViolation {
        /// Constraint description
        context: String,
    },

    /// Schema migration failed at startup
    #[error("Database migration failed: {context}")]
    MigrationError {
        /// Failing migration step
        context: String,
    },
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                Self::ConstraintViolation {
                    context: db_error.message().to_owned(),
                }
            }
            other @ (sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)) => {
                Self::ConnectionError {
                    context: other.to_string(),
                }
            }
            other => Self::QueryError {
                context: other.to_string(),
            },
        }
    }
}
