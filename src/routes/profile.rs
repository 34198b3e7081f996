// ABOUTME: Profile route handlers for the authenticated user and their dietary preferences
// ABOUTME: Preferences are stored as one record per user and overwritten on every save
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use dapur_core::PreferenceSet;
use http::{HeaderMap, StatusCode};
use serde::Deserialize;
use tracing::info;

use super::extract::{lenient_i64, non_empty_string};
use super::{ApiResponse, JsonOrForm};
use crate::constants::{limits, messages};
use crate::errors::{AppError, AppResult};
use crate::middleware::AuthenticatedUser;
use crate::resources::ServerResources;

/// Preference update body
///
/// Omitted fields are cleared: a save replaces the whole record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesRequest {
    /// Calorie ceiling per serving, must be positive
    #[serde(default, deserialize_with = "lenient_i64")]
    pub calorie_limit: Option<i64>,
    /// Spice level from 0 to 10
    #[serde(default, deserialize_with = "lenient_i64")]
    pub spicy_level: Option<i64>,
    /// Foods to avoid, comma separated
    #[serde(default, deserialize_with = "non_empty_string")]
    pub avoid_foods: Option<String>,
}

impl PreferencesRequest {
    /// Check ranges and convert to a preference set
    ///
    /// # Errors
    ///
    /// Returns a validation error listing every out-of-range field
    pub fn validate(self) -> AppResult<PreferenceSet> {
        let mut errors = Vec::new();
        if self.calorie_limit.is_some_and(|limit| limit <= 0) {
            errors.push("calorieLimit: must be greater than 0".to_owned());
        }
        if self
            .spicy_level
            .is_some_and(|level| !(0..=limits::MAX_SPICY_LEVEL).contains(&level))
        {
            errors.push(format!(
                "spicyLevel: must be between 0 and {}",
                limits::MAX_SPICY_LEVEL
            ));
        }
        if !errors.is_empty() {
            return Err(AppError::validation(&errors));
        }

        Ok(PreferenceSet {
            calorie_limit: self.calorie_limit,
            spicy_level: self.spicy_level,
            avoid_foods: self.avoid_foods.map(|foods| foods.trim().to_owned()),
        })
    }
}

/// Profile routes implementation
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/profile", get(Self::handle_profile))
            .route(
                "/profile/preferences",
                get(Self::handle_get_preferences).post(Self::handle_update_preferences),
            )
            .with_state(resources)
    }

    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> AppResult<AuthenticatedUser> {
        resources.authenticator.authenticate(headers)
    }

    async fn handle_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let user = resources
            .database
            .get_user(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(messages::USER_NOT_FOUND))?;

        Ok(ApiResponse::with_data(
            format!("Get profile id: {} successfully", auth.user_id),
            user.to_public(),
        )
        .into_response_with(StatusCode::OK))
    }

    async fn handle_get_preferences(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let stored = resources.preferences.find_preferences(auth.user_id).await?;

        Ok(ApiResponse {
            success: true,
            message: Some(messages::PREFERENCES_FETCHED.to_owned()),
            data: Some(stored),
        }
        .into_response_with(StatusCode::OK))
    }

    async fn handle_update_preferences(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        JsonOrForm(request): JsonOrForm<PreferencesRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        let preferences = request.validate()?;

        let stored = resources
            .preferences
            .upsert_preferences(auth.user_id, &preferences)
            .await?;
        info!(user_id = auth.user_id, "Preferences saved");

        Ok(ApiResponse::with_data(messages::PREFERENCES_UPDATED, stored)
            .into_response_with(StatusCode::OK))
    }
}
