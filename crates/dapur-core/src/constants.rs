// ABOUTME: System-wide constants for the Dapur recipe generator
// ABOUTME: Service names, defaults, limits and user-facing messages grouped by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! # Constants Module
//!
//! Hardcoded defaults and messages. Environment lookups live in the server's
//! `config` module; the values here are what it falls back to.

/// Service identification
pub mod service_names {
    /// Service name used in logs and health responses
    pub const DAPUR_SERVER: &str = "dapur-server";
}

/// Default values for configuration
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 3000;

    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/dapur.db";

    /// Access tokens expire after one hour
    pub const JWT_EXPIRY_HOURS: i64 = 1;

    /// OpenAI-compatible endpoint of the Groq API
    pub const LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";

    /// Model used for recipe generation
    pub const LLM_MODEL: &str = "openai/gpt-oss-20b";

    /// Timeout for a single completion request
    pub const LLM_TIMEOUT_SECS: u64 = 60;

    /// Timeout for a whole HTTP request, must exceed the completion timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 90;

    /// Allow any CORS origin unless configured
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
}

/// Limits applied to user input and listings
pub mod limits {
    /// Number of reviews returned by the public listing
    pub const RECENT_REVIEWS: i64 = 10;

    /// Default number of history entries returned
    pub const DEFAULT_HISTORY_LIMIT: i64 = 20;

    /// Upper bound on history entries per request
    pub const MAX_HISTORY_LIMIT: i64 = 50;

    /// Highest accepted spice level
    pub const MAX_SPICY_LEVEL: i64 = 10;

    /// Minimum password length
    pub const MIN_PASSWORD_LENGTH: usize = 8;

    /// Characters of an upstream error body echoed back in diagnostics
    pub const ERROR_BODY_PREVIEW_CHARS: usize = 200;
}

/// User-facing messages kept identical to the deployed API contract
#[allow(missing_docs)]
pub mod messages {
    pub const MISSING_AUTH_HEADER: &str = "Authorization header is missing!";
    pub const INVALID_AUTH_FORMAT: &str = "Invalid authorization format";
    pub const INVALID_OR_EXPIRED_TOKEN: &str = "Invalid or expired token";
    pub const WRONG_EMAIL: &str = "Wrong email, try again!";
    pub const INVALID_PASSWORD: &str = "Invalid password";
    pub const LOGIN_SUCCESS: &str = "Login successfully";
    pub const REGISTER_SUCCESS: &str = "Register successfully";
    pub const EMAIL_TAKEN: &str = "Email already registered";
    pub const USER_NOT_FOUND: &str = "User not found";
    pub const USER_NOT_FOUND_BY_EMAIL: &str = "User not found with this email";
    pub const PASSWORD_RESET: &str = "Password reset successfully";
    pub const PREFERENCES_UPDATED: &str = "Preferences updated successfully";
    pub const REVIEW_FIELDS_REQUIRED: &str = "Name, rating, and message are required.";
    pub const PREFERENCES_FETCHED: &str = "Get preferences successfully";
    pub const HISTORY_FETCHED: &str = "Get recipe history successfully";
    pub const REVIEW_CREATED: &str = "Review created successfully";
    pub const REVIEW_CREATE_FAILED: &str = "Failed to create review";
    pub const REVIEWS_FETCH_FAILED: &str = "Failed to fetch reviews";
    pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
    pub const GREETING: &str = "Hallo Guys";
}
