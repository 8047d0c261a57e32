// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Application wiring

use alloy_provider::Provider;
use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::serve_api;
use crate::command::CommandHandler;
use crate::config::AppConfig;
use crate::history::HistoryLog;
use crate::metrics::MetricsEngine;
use crate::price::{CachedEthPrice, CoinGeckoPriceSource};
use crate::provider::create_http_provider;

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = AppConfig::from_env()?;

    // Create the blockchain provider and verify the node is reachable
    let provider = create_http_provider(&config.rpc_url)?;
    let block_number = provider
        .get_block_number()
        .await
        .context("Failed to connect to Ethereum node")?;
    info!(block_number, "Connected to Ethereum node");

    // Initialize the history log (header written once on first run)
    let history = HistoryLog::new(&config.history_path);
    history.init()?;
    info!(path = %config.history_path.display(), "History logging enabled");

    // Wire the cached price feed over the CoinGecko source
    let price_source =
        CoinGeckoPriceSource::new(config.price_api_url.clone(), config.price_api_key.clone())?;
    let price_feed = CachedEthPrice::new(Box::new(price_source));

    // Initialize the metrics engine and its command loop
    let engine = MetricsEngine::new(provider, price_feed, history);
    let handle = CommandHandler::init(engine);

    // Start the API server
    let listener = TcpListener::bind(&format!("0.0.0.0:{}", config.api_port)).await?;
    serve_api(listener, handle).await?;

    Ok(())
}
