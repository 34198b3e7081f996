// ABOUTME: Bearer token authentication for protected HTTP endpoints
// ABOUTME: Parses the Authorization header and validates the JWT into an authenticated user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

use http::header::AUTHORIZATION;
use http::HeaderMap;
use tracing::{debug, warn};

use crate::auth::AuthManager;
use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;

/// Identity extracted from a valid access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User id from the token subject
    pub user_id: i64,
    /// Email claim
    pub email: String,
}

/// Authenticates requests carrying `Authorization: Bearer <token>`
#[derive(Clone)]
pub struct RequestAuthenticator {
    auth_manager: AuthManager,
}

impl RequestAuthenticator {
    /// Create an authenticator backed by the given token manager
    #[must_use]
    pub const fn new(auth_manager: AuthManager) -> Self {
        Self { auth_manager }
    }

    /// Extract the raw token from an Authorization header value
    ///
    /// The value must be exactly two space-separated parts, the first being
    /// `Bearer`.
    ///
    /// # Errors
    ///
    /// Returns `AUTH_INVALID` with "Invalid authorization format" otherwise
    pub fn parse_bearer(header_value: &str) -> AppResult<&str> {
        let mut parts = header_value.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("Bearer"), Some(token), None) => Ok(token),
            _ => Err(AppError::auth_invalid(messages::INVALID_AUTH_FORMAT)),
        }
    }

    /// Authenticate a request from its headers
    ///
    /// # Errors
    ///
    /// Returns 401 errors for a missing header, a malformed header, or a
    /// token that fails validation
    pub fn authenticate(&self, headers: &HeaderMap) -> AppResult<AuthenticatedUser> {
        let Some(header) = headers.get(AUTHORIZATION) else {
            debug!("Request without Authorization header");
            return Err(AppError::auth_required(messages::MISSING_AUTH_HEADER));
        };

        let header_value = header
            .to_str()
            .map_err(|_| AppError::auth_invalid(messages::INVALID_AUTH_FORMAT))?;
        let token = Self::parse_bearer(header_value)?;

        let claims = self.auth_manager.validate_token(token).map_err(|e| {
            AppLogger::log_security_event("token_rejected", "low", &e.to_string(), None);
            AppError::auth_invalid(messages::INVALID_OR_EXPIRED_TOKEN).with_error(e.to_string())
        })?;

        let user_id = claims.user_id().map_err(|e| {
            warn!("Token subject is not a user id: {}", claims.sub);
            AppError::auth_invalid(messages::INVALID_OR_EXPIRED_TOKEN).with_error(e.to_string())
        })?;

        Ok(AuthenticatedUser {
            user_id,
            email: claims.email,
        })
    }
}
