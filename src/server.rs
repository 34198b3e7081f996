// ABOUTME: HTTP server assembly: router composition, middleware layers and graceful shutdown
// ABOUTME: Merges the domain routers and wraps them with request-id, tracing, CORS and timeout layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{MatchedPath, Request};
use axum::Router;
use http::{Response, StatusCode};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Span};
use uuid::Uuid;

use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use crate::routes::{AuthRoutes, HealthRoutes, ProfileRoutes, RecipeRoutes, ReviewRoutes};

/// Request ids of the form `req_<uuid-simple>`, kept when the client sends one
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeDapurRequestId;

impl MakeRequestId for MakeDapurRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        format!("req_{}", Uuid::new_v4().simple())
            .parse()
            .ok()
            .map(RequestId::new)
    }
}

/// Build the complete application router
#[must_use]
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let request_timeout = Duration::from_secs(resources.config.security.request_timeout_secs);
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(ProfileRoutes::routes(Arc::clone(&resources)))
        .merge(RecipeRoutes::routes(Arc::clone(&resources)))
        .merge(ReviewRoutes::routes(resources))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeDapurRequestId))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &Request| {
                            let path = request
                                .extensions()
                                .get::<MatchedPath>()
                                .map_or_else(|| request.uri().path(), MatchedPath::as_str);
                            let request_id = request
                                .headers()
                                .get("x-request-id")
                                .and_then(|value| value.to_str().ok())
                                .unwrap_or("");
                            tracing::info_span!(
                                "http_request",
                                method = %request.method(),
                                path = %path,
                                request_id = %request_id,
                            )
                        })
                        .on_request(|_request: &Request, _span: &Span| {})
                        .on_response(|response: &Response<_>, latency: Duration, _span: &Span| {
                            let status = response.status().as_u16();
                            if status >= 500 {
                                tracing::error!(
                                    status = %status,
                                    latency_ms = %latency.as_millis(),
                                    "request failed with server error"
                                );
                            } else {
                                tracing::info!(
                                    status = %status,
                                    latency_ms = %latency.as_millis(),
                                    "request completed"
                                );
                            }
                        }),
                )
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors)
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                )),
        )
}

/// Bind the HTTP port and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn serve(resources: Arc<ServerResources>) -> Result<()> {
    let port = resources.config.http_port;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = build_router(resources);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP port {port}"))?;
    info!("HTTP server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
