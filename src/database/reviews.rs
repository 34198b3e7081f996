// ABOUTME: Public review database operations
// ABOUTME: Insert and list the most recent reviews

use super::{Database, DatabaseError};
use crate::models::{NewReview, Review};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

impl Database {
    /// Create the reviews table
    pub(super) async fn migrate_reviews(&self) -> Result<(), DatabaseError> {
        self.execute_migration(
            "reviews",
            r"
            CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT,
                rating INTEGER NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .await
    }

    /// Store a review
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_review(&self, review: &NewReview) -> Result<Review, DatabaseError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO reviews (name, email, rating, message, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&review.name)
        .bind(review.email.as_deref())
        .bind(review.rating)
        .bind(&review.message)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Review {
            id: result.last_insert_rowid(),
            name: review.name.clone(),
            email: review.email.clone(),
            rating: review.rating,
            message: review.message.clone(),
            created_at,
        })
    }

    /// Latest reviews, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_recent_reviews(&self, limit: i64) -> Result<Vec<Review>, DatabaseError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, email, rating, message, created_at
            FROM reviews
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_review).collect()
    }
}

fn row_to_review(row: &SqliteRow) -> Result<Review, DatabaseError> {
    Ok(Review {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        rating: row.try_get("rating")?,
        message: row.try_get("message")?,
        created_at: row.try_get("created_at")?,
    })
}
