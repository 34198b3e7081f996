// ABOUTME: Recipe route handlers for AI generation and the caller's generation history
// ABOUTME: Converts request bodies into generation requests and returns the raw completion text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use dapur_core::PreferenceSet;
use http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::extract::{lenient_i64, non_empty_string};
use super::{ApiResponse, JsonOrForm};
use crate::constants::{limits, messages};
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::{GenerationRequest, Ingredients};

/// Generation body, as JSON or urlencoded form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipeRequest {
    /// Category label, sent to the model verbatim
    #[serde(default)]
    pub category: String,
    /// One ingredient or a list
    #[serde(default)]
    pub ingredients: Option<Ingredients>,
    /// Free-text adjustment
    #[serde(default, deserialize_with = "non_empty_string")]
    pub adjustment: Option<String>,
    /// Calorie ceiling override
    #[serde(default, deserialize_with = "lenient_i64")]
    pub calorie_limit: Option<i64>,
    /// Spice level override
    #[serde(default, deserialize_with = "lenient_i64")]
    pub spicy_level: Option<i64>,
    /// Foods-to-avoid override
    #[serde(default)]
    pub avoid_foods: Option<String>,
}

impl GenerateRecipeRequest {
    /// Build the service request for an authenticated caller
    #[must_use]
    pub fn into_generation(self, user_id: i64) -> GenerationRequest {
        GenerationRequest {
            user_id,
            category: self.category,
            ingredients: self.ingredients,
            adjustment: self.adjustment,
            preferences: PreferenceSet {
                calorie_limit: self.calorie_limit,
                spicy_level: self.spicy_level,
                avoid_foods: self.avoid_foods,
            },
        }
    }
}

/// History listing query
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct HistoryQuery {
    /// Number of entries, clamped to 1..=50
    pub limit: Option<i64>,
}

impl HistoryQuery {
    /// Effective limit after defaulting and clamping
    #[must_use]
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(limits::DEFAULT_HISTORY_LIMIT)
            .clamp(1, limits::MAX_HISTORY_LIMIT)
    }
}

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/recipe/generate", post(Self::handle_generate))
            .route("/recipe/history", get(Self::handle_history))
            .with_state(resources)
    }

    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        JsonOrForm(request): JsonOrForm<GenerateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticator.authenticate(&headers)?;

        let generated = resources
            .recipe_generator
            .generate(request.into_generation(auth.user_id))
            .await?;

        Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "data": generated.text })),
        )
            .into_response())
    }

    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<HistoryQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticator.authenticate(&headers)?;

        let entries = resources
            .history
            .list_history(auth.user_id, query.effective_limit())
            .await?;

        Ok(ApiResponse::with_data(messages::HISTORY_FETCHED, entries)
            .into_response_with(StatusCode::OK))
    }
}
