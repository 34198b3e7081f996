// ABOUTME: Route module organization for the Dapur HTTP API
// ABOUTME: Domain route groups plus the shared success envelope and body extractors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! Route module for the Dapur API
//!
//! Each domain module exposes `XRoutes::routes(resources) -> Router` with
//! thin handlers. Errors are returned as [`AppError`](crate::errors::AppError)
//! and rendered by its `IntoResponse` implementation.

/// Registration, login and password reset
pub mod auth;
/// Body extractors shared by the handlers
pub mod extract;
/// Greeting, health and readiness endpoints
pub mod health;
/// Profile and stored preference endpoints
pub mod profile;
/// Recipe generation and history
pub mod recipes;
/// Public review board
pub mod reviews;

pub use auth::{AuthRoutes, ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest};
pub use extract::JsonOrForm;
pub use health::HealthRoutes;
pub use profile::{PreferencesRequest, ProfileRoutes};
pub use recipes::{GenerateRecipeRequest, HistoryQuery, RecipeRoutes};
pub use reviews::{CreateReviewRequest, ReviewRoutes};

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Success envelope shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true` for this envelope
    pub success: bool,
    /// Human-readable outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Envelope with a message and a payload
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Envelope with only a payload
    pub const fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Render with the given status code
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl ApiResponse<()> {
    /// Envelope with only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}
