// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! Environment-based configuration management for production deployment

use crate::constants::defaults;
use anyhow::{anyhow, Context, Result};
use dapur_core::MergePolicy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Secret used when `JWT_SECRET` is unset outside production
const DEVELOPMENT_JWT_SECRET: &str = "dapur-development-secret-do-not-deploy";

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed service
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for anything other than a `sqlite:` URL
    pub fn parse_url(s: &str) -> Result<Self> {
        let path_str = s
            .strip_prefix("sqlite://")
            .or_else(|| s.strip_prefix("sqlite:"))
            .ok_or_else(|| anyhow!("Unsupported database URL '{s}': only sqlite: is supported"))?;

        if path_str == ":memory:" {
            Ok(Self::Memory)
        } else if path_str.is_empty() {
            Err(anyhow!("Database URL '{s}' has no path"))
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            })
        }
    }

    /// Connection string understood by sqlx
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Whether this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/dapur.db"),
        }
    }
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Completion service configuration
    pub llm: LlmConfig,
    /// Recipe generation behavior
    pub recipes: RecipeConfig,
    /// HTTP security settings
    pub security: SecurityConfig,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
}

/// JWT configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .finish()
    }
}

/// OpenAI-compatible completion service configuration
#[derive(Clone)]
pub struct LlmConfig {
    /// API key; requests fail with an upstream auth error when absent
    pub api_key: Option<String>,
    /// Base URL up to and including the API version segment
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Recipe generation behavior
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeConfig {
    /// How request preferences override stored ones
    pub merge_policy: MergePolicy,
}

/// HTTP security settings
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Allowed CORS origins (`*` allows any)
    pub cors_origins: Vec<String>,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is present but malformed, or when
    /// `JWT_SECRET` is missing in production
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &defaults::HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            environment,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", defaults::DATABASE_URL))
                    .context("Invalid DATABASE_URL value")?,
            },
            auth: AuthConfig {
                jwt_secret: load_jwt_secret(environment)?,
                jwt_expiry_hours: env_var_or(
                    "JWT_EXPIRY_HOURS",
                    &defaults::JWT_EXPIRY_HOURS.to_string(),
                )
                .parse()
                .context("Invalid JWT_EXPIRY_HOURS value")?,
            },
            llm: LlmConfig {
                api_key: env::var("GROQ_API_KEY").ok().filter(|key| !key.is_empty()),
                base_url: env_var_or("LLM_BASE_URL", defaults::LLM_BASE_URL),
                model: env_var_or("LLM_MODEL", defaults::LLM_MODEL),
                timeout_secs: env_var_or(
                    "LLM_TIMEOUT_SECS",
                    &defaults::LLM_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid LLM_TIMEOUT_SECS value")?,
            },
            recipes: RecipeConfig {
                merge_policy: MergePolicy::from_str_or_default(&env_var_or(
                    "PREFERENCE_MERGE_POLICY",
                    "truthy",
                )),
            },
            security: SecurityConfig {
                cors_origins: parse_origins(&env_var_or(
                    "CORS_ALLOWED_ORIGINS",
                    defaults::CORS_ALLOWED_ORIGINS,
                )),
                request_timeout_secs: env_var_or(
                    "REQUEST_TIMEOUT_SECS",
                    &defaults::REQUEST_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid REQUEST_TIMEOUT_SECS value")?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error when values are inconsistent
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_expiry_hours <= 0 {
            return Err(anyhow!("JWT_EXPIRY_HOURS must be positive"));
        }
        if self.llm.timeout_secs == 0 || self.security.request_timeout_secs == 0 {
            return Err(anyhow!("Timeouts must be greater than zero"));
        }
        if self.security.request_timeout_secs <= self.llm.timeout_secs {
            warn!(
                "REQUEST_TIMEOUT_SECS ({}) does not exceed LLM_TIMEOUT_SECS ({}); slow completions will be cut off by the HTTP layer",
                self.security.request_timeout_secs, self.llm.timeout_secs
            );
        }
        if self.llm.api_key.is_none() {
            warn!("GROQ_API_KEY is not set; recipe generation will fail until it is configured");
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Dapur Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - JWT Expiry: {}h\n\
             - LLM: {} ({})\n\
             - LLM API Key: {}\n\
             - Preference Merge: {}\n\
             - CORS Origins: {}\n\
             - Request Timeout: {}s",
            self.http_port,
            self.environment,
            if self.database.url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            self.auth.jwt_expiry_hours,
            self.llm.model,
            self.llm.base_url,
            if self.llm.api_key.is_some() {
                "Configured"
            } else {
                "Missing"
            },
            self.recipes.merge_policy.as_str(),
            self.security.cors_origins.join(", "),
            self.security.request_timeout_secs,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn load_jwt_secret(environment: Environment) -> Result<String> {
    match env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => Ok(secret),
        _ if environment.is_production() => {
            Err(anyhow!("JWT_SECRET must be set when ENVIRONMENT=production"))
        }
        _ => {
            warn!("JWT_SECRET is not set; using an insecure development secret");
            Ok(DEVELOPMENT_JWT_SECRET.to_owned())
        }
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
