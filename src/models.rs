// ABOUTME: Core data models for users, stored preferences, recipe history and reviews
// ABOUTME: Row types returned by the database layer and their public API projections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! # Data Models
//!
//! Rows use `i64` identifiers assigned by `SQLite`. JSON field names are
//! camelCase to match the deployed API contract.

use chrono::{DateTime, Utc};
use dapur_core::PreferenceSet;
use serde::{Deserialize, Serialize};

/// Registered account, including the password hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Row identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Unique login email
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Projection without the password hash
    #[must_use]
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// User as exposed by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    /// Row identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
}

/// Preference record stored for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPreferences {
    /// Row identifier
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Upper bound in kcal
    pub calorie_limit: Option<i64>,
    /// Spice level 0-10
    pub spicy_level: Option<i64>,
    /// Foods to avoid
    pub avoid_foods: Option<String>,
    /// Last overwrite
    pub updated_at: DateTime<Utc>,
}

impl StoredPreferences {
    /// The three preference fields without row metadata
    #[must_use]
    pub fn preference_set(&self) -> PreferenceSet {
        PreferenceSet {
            calorie_limit: self.calorie_limit,
            spicy_level: self.spicy_level,
            avoid_foods: self.avoid_foods.clone(),
        }
    }
}

/// One recorded generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeHistoryEntry {
    /// Row identifier
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Ingredients joined with `", "`
    pub ingredients: String,
    /// Category label exactly as requested
    pub category: String,
    /// Adjustment text, `""` when none was given
    pub adjustment: String,
    /// Generated recipe text
    pub result: String,
    /// Generation time
    pub created_at: DateTime<Utc>,
}

/// History entry to append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryEntry {
    /// Owning user
    pub user_id: i64,
    /// Ingredients joined with `", "`
    pub ingredients: String,
    /// Category label exactly as requested
    pub category: String,
    /// Adjustment text, `""` when none was given
    pub adjustment: String,
    /// Generated recipe text
    pub result: String,
}

/// Public review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Row identifier
    pub id: i64,
    /// Reviewer name
    pub name: String,
    /// Optional contact email
    pub email: Option<String>,
    /// Rating as submitted
    pub rating: i64,
    /// Review text
    pub message: String,
    /// Submission time
    pub created_at: DateTime<Utc>,
}

/// Review to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    /// Reviewer name
    pub name: String,
    /// Optional contact email
    pub email: Option<String>,
    /// Rating as submitted
    pub rating: i64,
    /// Review text
    pub message: String,
}
