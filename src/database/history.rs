// ABOUTME: Recipe history database operations
// ABOUTME: Append-only log of generated recipes per user

use super::{Database, DatabaseError};
use crate::models::{NewHistoryEntry, RecipeHistoryEntry};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

impl Database {
    /// Create the `recipe_history` table
    pub(super) async fn migrate_history(&self) -> Result<(), DatabaseError> {
        self.execute_migration(
            "recipe_history",
            r"
            CREATE TABLE IF NOT EXISTS recipe_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                ingredients TEXT NOT NULL,
                category TEXT NOT NULL,
                adjustment TEXT NOT NULL DEFAULT '',
                result TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_migration(
            "recipe_history user index",
            "CREATE INDEX IF NOT EXISTS idx_recipe_history_user ON recipe_history(user_id, created_at)",
        )
        .await
    }

    /// Append one generation to a user's history
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the insert fails
    pub async fn append_history(
        &self,
        entry: &NewHistoryEntry,
    ) -> Result<RecipeHistoryEntry, DatabaseError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO recipe_history (user_id, ingredients, category, adjustment, result, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(entry.user_id)
        .bind(&entry.ingredients)
        .bind(&entry.category)
        .bind(&entry.adjustment)
        .bind(&entry.result)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(RecipeHistoryEntry {
            id: result.last_insert_rowid(),
            user_id: entry.user_id,
            ingredients: entry.ingredients.clone(),
            category: entry.category.clone(),
            adjustment: entry.adjustment.clone(),
            result: entry.result.clone(),
            created_at,
        })
    }

    /// Most recent history entries for a user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_history(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<RecipeHistoryEntry>, DatabaseError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, ingredients, category, adjustment, result, created_at
            FROM recipe_history
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_history).collect()
    }
}

fn row_to_history(row: &SqliteRow) -> Result<RecipeHistoryEntry, DatabaseError> {
    Ok(RecipeHistoryEntry {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        ingredients: row.try_get("ingredients")?,
        category: row.try_get("category")?,
        adjustment: row.try_get("adjustment")?,
        result: row.try_get("result")?,
        created_at: row.try_get("created_at")?,
    })
}
