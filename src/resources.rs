// ABOUTME: Centralized resource container shared by all HTTP handlers
// ABOUTME: Holds the database, token manager, completion client and generation service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! # Server Resources
//!
//! Built once at startup and handed to every router as `Arc<ServerResources>`.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::{
    Database, HistoryRepository, HistoryRepositoryImpl, PreferenceRepository,
    PreferenceRepositoryImpl,
};
use crate::llm::LlmProvider;
use crate::middleware::RequestAuthenticator;
use crate::services::RecipeGenerator;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Database handle for users and reviews
    pub database: Database,
    /// Access token issuer and validator
    pub auth_manager: AuthManager,
    /// Authorization header authenticator
    pub authenticator: RequestAuthenticator,
    /// Stored preference access
    pub preferences: Arc<dyn PreferenceRepository>,
    /// Generation history access
    pub history: Arc<dyn HistoryRepository>,
    /// Completion service client
    pub llm: Arc<dyn LlmProvider>,
    /// Recipe generation orchestrator
    pub recipe_generator: Arc<RecipeGenerator>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire the resources around an opened database and a completion client
    #[must_use]
    pub fn new(database: Database, llm: Arc<dyn LlmProvider>, config: ServerConfig) -> Self {
        let auth_manager = AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.jwt_expiry_hours,
        );
        let preferences: Arc<dyn PreferenceRepository> =
            Arc::new(PreferenceRepositoryImpl::new(database.clone()));
        let history: Arc<dyn HistoryRepository> =
            Arc::new(HistoryRepositoryImpl::new(database.clone()));

        let recipe_generator = Arc::new(RecipeGenerator::new(
            Arc::clone(&preferences),
            Arc::clone(&history),
            Arc::clone(&llm),
            config.recipes.merge_policy,
        ));

        Self {
            database,
            authenticator: RequestAuthenticator::new(auth_manager.clone()),
            auth_manager,
            preferences,
            history,
            llm,
            recipe_generator,
            config: Arc::new(config),
        }
    }
}
