// ABOUTME: Authentication route handlers for registration, login and password reset
// ABOUTME: Validates credentials, hashes passwords with bcrypt and issues JWT access tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! Authentication routes
//!
//! Bodies may be JSON or urlencoded forms. Field validation failures answer
//! 422 with every failed rule listed in `error`.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ApiResponse, JsonOrForm};
use crate::auth::{hash_password, verify_password};
use crate::constants::{limits, messages};
use crate::database::DatabaseError;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::PublicUser;
use crate::resources::ServerResources;

/// Registration body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Login email
    #[serde(default)]
    pub email: String,
    /// Plain-text password
    #[serde(default)]
    pub password: String,
}

/// Login body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// Login email
    #[serde(default)]
    pub email: String,
    /// Plain-text password
    #[serde(default)]
    pub password: String,
}

/// Direct password reset body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForgotPasswordRequest {
    /// Account email
    #[serde(default)]
    pub email: String,
    /// New plain-text password
    #[serde(default)]
    pub password: String,
}

/// Successful login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Logged-in user
    pub user: PublicUser,
    /// Bearer access token
    pub token: String,
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register", post(Self::handle_register))
            .route("/auth/login", post(Self::handle_login))
            .route("/auth/forgot-password", post(Self::handle_forgot_password))
            .with_state(resources)
    }

    /// Basic shape check: something before `@`, a dot in the domain
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 || email.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        !local.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    }

    /// Minimum length check
    #[must_use]
    pub fn is_valid_password(password: &str) -> bool {
        password.chars().count() >= limits::MIN_PASSWORD_LENGTH
    }

    fn check_email(email: &str, errors: &mut Vec<String>) {
        if email.trim().is_empty() {
            errors.push("email: Email is required".to_owned());
        } else if !Self::is_valid_email(email.trim()) {
            errors.push("email: Email is invalid".to_owned());
        }
    }

    fn check_new_password(password: &str, errors: &mut Vec<String>) {
        if !Self::is_valid_password(password) {
            errors.push(format!(
                "password: Password must be at least {} characters",
                limits::MIN_PASSWORD_LENGTH
            ));
        }
    }

    fn ensure_valid(errors: &[String]) -> AppResult<()> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(errors))
        }
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        JsonOrForm(request): JsonOrForm<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let mut errors = Vec::new();
        if request.name.trim().is_empty() {
            errors.push("name: Name is required".to_owned());
        }
        Self::check_email(&request.email, &mut errors);
        Self::check_new_password(&request.password, &mut errors);
        Self::ensure_valid(&errors)?;

        let email = request.email.trim();
        let password_hash = hash_password(request.password).await?;
        let user = resources
            .database
            .create_user(request.name.trim(), email, &password_hash)
            .await
            .map_err(|e| match e {
                DatabaseError::ConstraintViolation { .. } => {
                    AppError::already_exists(messages::EMAIL_TAKEN)
                }
                other => AppError::from(other),
            })?;

        info!(user_id = user.id, "User registered");
        AppLogger::log_auth_event(&user.id.to_string(), "register", true, None);

        Ok(ApiResponse::with_data(messages::REGISTER_SUCCESS, user.to_public())
            .into_response_with(StatusCode::CREATED))
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        JsonOrForm(request): JsonOrForm<LoginRequest>,
    ) -> Result<Response, AppError> {
        let mut errors = Vec::new();
        Self::check_email(&request.email, &mut errors);
        if request.password.is_empty() {
            errors.push("password: Password is required".to_owned());
        }
        Self::ensure_valid(&errors)?;

        let Some(user) = resources
            .database
            .get_user_by_email(request.email.trim())
            .await?
        else {
            AppLogger::log_auth_event("unknown", "login", false, Some("unknown email"));
            return Err(AppError::not_found(messages::WRONG_EMAIL));
        };

        if !verify_password(request.password, user.password_hash.clone()).await? {
            AppLogger::log_auth_event(&user.id.to_string(), "login", false, Some("bad password"));
            return Err(AppError::auth_invalid(messages::INVALID_PASSWORD));
        }

        let token = resources.auth_manager.generate_token(&user)?;
        AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);

        let payload = LoginResponse {
            user: user.to_public(),
            token,
        };
        Ok(ApiResponse::with_data(messages::LOGIN_SUCCESS, payload)
            .into_response_with(StatusCode::OK))
    }

    async fn handle_forgot_password(
        State(resources): State<Arc<ServerResources>>,
        JsonOrForm(request): JsonOrForm<ForgotPasswordRequest>,
    ) -> Result<Response, AppError> {
        let mut errors = Vec::new();
        Self::check_email(&request.email, &mut errors);
        Self::check_new_password(&request.password, &mut errors);
        Self::ensure_valid(&errors)?;

        let Some(user) = resources
            .database
            .get_user_by_email(request.email.trim())
            .await?
        else {
            return Err(AppError::not_found(messages::USER_NOT_FOUND_BY_EMAIL));
        };

        let password_hash = hash_password(request.password).await?;
        resources
            .database
            .update_password(user.id, &password_hash)
            .await?;

        AppLogger::log_auth_event(&user.id.to_string(), "password_reset", true, None);
        Ok(ApiResponse::message(messages::PASSWORD_RESET).into_response_with(StatusCode::OK))
    }
}
