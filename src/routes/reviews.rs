// ABOUTME: Public review route handlers
// ABOUTME: Anyone can post a review; the listing returns the most recent ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use super::extract::non_empty_string;
use super::{ApiResponse, JsonOrForm};
use crate::constants::{limits, messages};
use crate::errors::AppError;
use crate::models::NewReview;
use crate::resources::ServerResources;

/// Review submission body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReviewRequest {
    /// Reviewer name
    #[serde(default, deserialize_with = "non_empty_string")]
    pub name: Option<String>,
    /// Optional contact email
    #[serde(default, deserialize_with = "non_empty_string")]
    pub email: Option<String>,
    /// Rating as a number or numeric string
    #[serde(default)]
    pub rating: Option<Value>,
    /// Review text
    #[serde(default, deserialize_with = "non_empty_string")]
    pub message: Option<String>,
}

impl CreateReviewRequest {
    /// Convert to an insertable review
    ///
    /// # Errors
    ///
    /// Returns 400 when name, message or a numeric rating is missing
    pub fn into_new_review(self) -> Result<NewReview, AppError> {
        let rating = self.rating.as_ref().and_then(parse_rating);
        match (self.name, rating, self.message) {
            (Some(name), Some(rating), Some(message)) => Ok(NewReview {
                name,
                email: self.email,
                rating,
                message,
            }),
            _ => Err(AppError::invalid_input(messages::REVIEW_FIELDS_REQUIRED)),
        }
    }
}

/// Read a rating the way a leading-integer parse would
///
/// `4`, `4.8`, `"4"` and `"4 stars"` all give 4. Strings without leading
/// digits give `None`.
#[must_use]
pub fn parse_rating(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(text) => {
            let text = text.trim_start();
            let (sign, digits) = match text.strip_prefix('-') {
                Some(rest) => (-1, rest),
                None => (1, text.strip_prefix('+').unwrap_or(text)),
            };
            let end = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            digits[..end].parse::<i64>().ok().map(|n| sign * n)
        }
        _ => None,
    }
}

/// Review routes implementation
pub struct ReviewRoutes;

impl ReviewRoutes {
    /// Create all review routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/reviews",
                get(Self::handle_list).post(Self::handle_create),
            )
            .with_state(resources)
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        JsonOrForm(request): JsonOrForm<CreateReviewRequest>,
    ) -> Result<Response, AppError> {
        let review = request.into_new_review()?;

        let created = resources
            .database
            .create_review(&review)
            .await
            .map_err(|e| {
                error!(error = %e, "Create review error");
                AppError::database(messages::REVIEW_CREATE_FAILED).with_error(e.to_string())
            })?;

        Ok(ApiResponse::with_data(messages::REVIEW_CREATED, created)
            .into_response_with(StatusCode::CREATED))
    }

    async fn handle_list(State(resources): State<Arc<ServerResources>>) -> Result<Response, AppError> {
        let reviews = resources
            .database
            .list_recent_reviews(limits::RECENT_REVIEWS)
            .await
            .map_err(|e| {
                error!(error = %e, "Get reviews error");
                AppError::database(messages::REVIEWS_FETCH_FAILED).with_error(e.to_string())
            })?;

        Ok(ApiResponse::data(reviews).into_response_with(StatusCode::OK))
    }
}
