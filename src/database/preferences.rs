// ABOUTME: Stored dietary preference database operations
// ABOUTME: One row per user, overwritten on every save

use super::{Database, DatabaseError};
use crate::models::StoredPreferences;
use chrono::Utc;
use dapur_core::PreferenceSet;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

impl Database {
    /// Create the `user_preferences` table
    pub(super) async fn migrate_preferences(&self) -> Result<(), DatabaseError> {
        self.execute_migration(
            "user_preferences",
            r"
            CREATE TABLE IF NOT EXISTS user_preferences (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
                calorie_limit INTEGER,
                spicy_level INTEGER,
                avoid_foods TEXT,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .await
    }

    /// Stored preferences for a user, `None` if never saved
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_preferences(
        &self,
        user_id: i64,
    ) -> Result<Option<StoredPreferences>, DatabaseError> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, calorie_limit, spicy_level, avoid_foods, updated_at
            FROM user_preferences WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_preferences).transpose()
    }

    /// Insert or fully overwrite a user's preferences
    ///
    /// Fields absent from `preferences` are stored as NULL. Concurrent saves
    /// are last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the write fails
    pub async fn upsert_preferences(
        &self,
        user_id: i64,
        preferences: &PreferenceSet,
    ) -> Result<StoredPreferences, DatabaseError> {
        let row = sqlx::query(
            r"
            INSERT INTO user_preferences (user_id, calorie_limit, spicy_level, avoid_foods, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(user_id) DO UPDATE SET
                calorie_limit = excluded.calorie_limit,
                spicy_level = excluded.spicy_level,
                avoid_foods = excluded.avoid_foods,
                updated_at = excluded.updated_at
            RETURNING id, user_id, calorie_limit, spicy_level, avoid_foods, updated_at
            ",
        )
        .bind(user_id)
        .bind(preferences.calorie_limit)
        .bind(preferences.spicy_level)
        .bind(preferences.avoid_foods.as_deref())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        row_to_preferences(&row)
    }
}

fn row_to_preferences(row: &SqliteRow) -> Result<StoredPreferences, DatabaseError> {
    Ok(StoredPreferences {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        calorie_limit: row.try_get("calorie_limit")?,
        spicy_level: row.try_get("spicy_level")?,
        avoid_foods: row.try_get("avoid_foods")?,
        updated_at: row.try_get("updated_at")?,
    })
}
