// ABOUTME: Server binary for the Dapur recipe generator API
// ABOUTME: Loads configuration, opens the database, builds the Groq client and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! # Dapur Server Binary
//!
//! Starts the HTTP API. All settings come from the environment; see
//! `dapur_server::config::ServerConfig::from_env`.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use dapur_server::config::{DatabaseUrl, ServerConfig};
use dapur_server::database::Database;
use dapur_server::llm::{GroqProvider, LlmProvider};
use dapur_server::logging;
use dapur_server::resources::ServerResources;
use dapur_server::server;
use tracing::info;

#[derive(Parser)]
#[command(name = "dapur-server")]
#[command(about = "Dapur - AI recipe generator API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("Starting Dapur recipe server");
    info!("{}", config.summary());

    if let DatabaseUrl::SQLite { path } = &config.database.url {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
        }
    }

    let database = Database::new(&config.database.url.to_connection_string())
        .await
        .context("Failed to initialize database")?;
    info!("Database initialized: {}", config.database.url.to_connection_string());

    let groq = GroqProvider::from_config(&config.llm).context("Failed to build LLM client")?;
    let llm: Arc<dyn LlmProvider> = Arc::new(groq);

    let resources = Arc::new(ServerResources::new(database, llm, config));
    server::serve(resources).await
}
