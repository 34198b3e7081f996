// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds in-memory databases, server resources and authenticated users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `dapur_server`

use std::path::PathBuf;
use std::sync::{Arc, Once};

use dapur_server::auth::hash_password;
use dapur_server::config::{
    AuthConfig, DatabaseConfig, DatabaseUrl, Environment, LlmConfig, RecipeConfig,
    SecurityConfig, ServerConfig,
};
use dapur_server::database::Database;
use dapur_server::llm::LlmProvider;
use dapur_server::models::User;
use dapur_server::resources::ServerResources;
use dapur_server::MergePolicy;

static INIT_LOGGER: Once = Once::new();

/// Secret shared by test configs
pub const TEST_JWT_SECRET: &str = "test-secret-for-dapur-integration-tests";

/// Password used for every test user
pub const TEST_PASSWORD: &str = "rahasia123";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Fresh in-memory database with migrations applied
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database")
}

/// Configuration suitable for tests
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
        },
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_owned(),
            jwt_expiry_hours: 1,
        },
        llm: LlmConfig {
            api_key: Some("test-key".to_owned()),
            base_url: "http://127.0.0.1:9".to_owned(),
            model: "test-model".to_owned(),
            timeout_secs: 5,
        },
        recipes: RecipeConfig {
            merge_policy: MergePolicy::Truthy,
        },
        security: SecurityConfig {
            cors_origins: vec!["*".to_owned()],
            request_timeout_secs: 30,
        },
    }
}

/// Resources over an in-memory database and the given completion service
pub async fn create_test_resources(llm: Arc<dyn LlmProvider>) -> Arc<ServerResources> {
    create_test_resources_with(llm, test_config()).await
}

/// Resources with a custom configuration
pub async fn create_test_resources_with(
    llm: Arc<dyn LlmProvider>,
    config: ServerConfig,
) -> Arc<ServerResources> {
    let database = create_test_database().await;
    Arc::new(ServerResources::new(database, llm, config))
}

/// Register a user directly in the database
pub async fn create_test_user(database: &Database, name: &str, email: &str) -> User {
    let hash = hash_password(TEST_PASSWORD.to_owned())
        .await
        .expect("Failed to hash password");
    database
        .create_user(name, email, &hash)
        .await
        .expect("Failed to create user")
}

/// Register a user and return it with a valid access token
pub async fn create_authenticated_user(resources: &ServerResources, email: &str) -> (User, String) {
    let user = create_test_user(&resources.database, "Siti", email).await;
    let token = resources
        .auth_manager
        .generate_token(&user)
        .expect("Failed to sign token");
    (user, token)
}

/// Temporary file-backed database URL, kept alive by the returned guard
pub fn temp_database_url() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path: PathBuf = dir.path().join("dapur-test.db");
    let url = format!("sqlite:{}", path.display());
    (dir, url)
}
