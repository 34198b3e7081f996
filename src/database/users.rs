// ABOUTME: User management database operations
// ABOUTME: Handles registration, lookup by email or id, and password resets

use super::{Database, DatabaseError};
use crate::models::User;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

impl Database {
    /// Create the users table
    pub(super) async fn migrate_users(&self) -> Result<(), DatabaseError> {
        self.execute_migration(
            "users",
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_migration(
            "users email index",
            "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)",
        )
        .await
    }

    /// Insert a new user
    ///
    /// # Errors
    ///
    /// Returns `ConstraintViolation` when the email is already registered
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, DatabaseError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (name, email, password_hash, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            name: name.to_owned(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at,
        })
    }

    /// Look up a user by login email
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Look up a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Replace a user's password hash
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no user has this id
    pub async fn update_password(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound {
                entity: "User",
                id: user_id.to_string(),
            });
        }
        Ok(())
    }
}

fn row_to_user(row: &SqliteRow) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
    })
}
