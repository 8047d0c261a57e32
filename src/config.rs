// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for blobwatch
//!
//! Runtime settings come from environment variables (with `.env` support
//! via dotenvy); tuning constants that are part of the system's contract
//! live here as consts.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use url::Url;

/// Default public CoinGecko API base URL
pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com";

/// Default history log file, created in the working directory
pub const DEFAULT_HISTORY_FILE: &str = "blob_data.csv";

/// Default port for the HTTP interface
pub const DEFAULT_API_PORT: u16 = 5000;

/// How long a fetched ETH/USD price stays fresh before a refresh is
/// attempted
pub const PRICE_REFRESH_INTERVAL_SECS: i64 = 300;

/// Timeout for a single price fetch. The price oracle is the only
/// upstream call with an explicit timeout.
pub const PRICE_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Placeholder ETH/USD price served before the first successful fetch
pub const DEFAULT_ETH_PRICE_USD: f64 = 4000.0;

/// Minimum number of history rows before the annualized revenue
/// projection is considered meaningful (one hour at one sample per
/// minute)
pub const MIN_PROJECTION_SAMPLES: usize = 60;

/// Assumed sampling cadence for the projection
pub const SAMPLES_PER_HOUR: f64 = 60.0;

/// Hours in a (non-leap) year
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Runtime configuration, read from the environment
///
/// `RPC_URL` is required; everything else has a default. An optional
/// `PRICE_API_KEY` switches the CoinGecko client to authenticated
/// requests.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Ethereum JSON-RPC endpoint
    pub rpc_url: String,
    /// Port the HTTP interface binds to
    pub api_port: u16,
    /// Base URL of the price API
    pub price_api_url: Url,
    /// Optional price API key
    pub price_api_key: Option<String>,
    /// Path of the CSV history log
    pub history_path: PathBuf,
}

impl AppConfig {
    /// Read configuration from the environment
    pub fn from_env() -> anyhow::Result<Self> {
        let rpc_url = dotenvy::var("RPC_URL").context("RPC_URL must be set")?;

        let api_port = dotenvy::var("API_PORT")
            .map(|port| port.parse::<u16>())
            .unwrap_or(Ok(DEFAULT_API_PORT))
            .context("API_PORT must be a valid port number")?;

        let price_api_url = dotenvy::var("PRICE_API_URL")
            .unwrap_or_else(|_| DEFAULT_PRICE_API_URL.to_string())
            .parse::<Url>()
            .context("PRICE_API_URL must be a valid URL")?;

        let price_api_key = dotenvy::var("PRICE_API_KEY").ok();

        let history_path = PathBuf::from(
            dotenvy::var("HISTORY_FILE").unwrap_or_else(|_| DEFAULT_HISTORY_FILE.to_string()),
        );

        Ok(Self {
            rpc_url,
            api_port,
            price_api_url,
            price_api_key,
            history_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_price_api_url_parses() {
        assert!(DEFAULT_PRICE_API_URL.parse::<Url>().is_ok());
    }

    #[test]
    fn test_projection_constants() {
        // One hour of one-per-minute samples gates the projection
        assert_eq!(MIN_PROJECTION_SAMPLES, 60);
        assert_eq!(SAMPLES_PER_HOUR * HOURS_PER_YEAR, 525_600.0);
    }
}
