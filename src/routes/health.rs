// ABOUTME: Greeting, health and readiness route handlers
// ABOUTME: Readiness checks the database so load balancers can route around a broken instance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use serde_json::json;

use super::ApiResponse;
use crate::constants::{messages, service_names};
use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the greeting and health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_root))
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_root() -> Json<ApiResponse<()>> {
        Json(ApiResponse::message(messages::GREETING))
    }

    async fn handle_health() -> Json<serde_json::Value> {
        Json(json!({
            "status": "healthy",
            "service": service_names::DAPUR_SERVER,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn handle_ready(State(resources): State<Arc<ServerResources>>) -> Response {
        let timestamp = chrono::Utc::now().to_rfc3339();
        match resources.database.health_check().await {
            Ok(()) => (
                StatusCode::OK,
                Json(json!({ "status": "ready", "timestamp": timestamp })),
            )
                .into_response(),
            Err(e) => {
                tracing::warn!(error = %e, "Readiness check failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "status": "not_ready",
                        "error": e.to_string(),
                        "timestamp": timestamp
                    })),
                )
                    .into_response()
            }
        }
    }
}
