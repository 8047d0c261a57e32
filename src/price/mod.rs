// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! ETH/USD price feed
//!
//! This module provides a trait-based architecture for fetching the
//! native asset price. The [`EthPriceSource`] trait abstracts the
//! upstream quote provider; [`CoinGeckoPriceSource`] is the production
//! implementation, and tests inject mocks.
//!
//! Consumers should not call a source directly: [`cache::CachedEthPrice`]
//! wraps a source with time-bounded memoization and stale-price fallback
//! so that a flaky upstream never fails a metrics request.

pub mod cache;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::config::PRICE_FETCH_TIMEOUT;
use crate::errors::PriceFeedError;
use crate::types::usd::UsdValue;

pub use cache::{CachedEthPrice, Clock, SystemClock};

/// Authentication header for the CoinGecko pro API
const CG_AUTH_HEADER: &str = "x-cg-pro-api-key";

/// Asset identifier used by the simple-price endpoint
const ETH_ASSET_ID: &str = "ethereum";

/// Quote currency used by the simple-price endpoint
const QUOTE_CURRENCY: &str = "usd";

/// Trait for fetching the current ETH/USD price
///
/// Implementations must collapse every failure mode (timeout, transport
/// error, unexpected status, malformed body) into a [`PriceFeedError`]
/// with no partial data.
#[async_trait]
pub trait EthPriceSource: Send + Sync {
    /// Fetch the current ETH price in USD
    async fn fetch_eth_price(&self) -> Result<UsdValue, PriceFeedError>;
}

/// ETH price source backed by the CoinGecko simple-price API
///
/// Queries `GET /api/v3/simple/price?ids=ethereum&vs_currencies=usd`,
/// expecting a response of the shape `{"ethereum": {"usd": 4000.0}}`.
/// Requests carry a bounded timeout so a hung upstream cannot stall the
/// metrics pipeline.
#[derive(Debug)]
pub struct CoinGeckoPriceSource {
    endpoint: Url,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl CoinGeckoPriceSource {
    /// Create a new CoinGecko price source
    ///
    /// `base_url` is the API host (defaults come from configuration);
    /// an API key switches requests to the authenticated pro header.
    pub fn new(base_url: Url, api_key: Option<String>) -> Result<Self, PriceFeedError> {
        let endpoint = base_url
            .join(&format!(
                "/api/v3/simple/price?ids={ETH_ASSET_ID}&vs_currencies={QUOTE_CURRENCY}"
            ))
            .map_err(|e| PriceFeedError::InvalidEndpoint(format!("{e}")))?;

        let client = reqwest::Client::builder()
            .timeout(PRICE_FETCH_TIMEOUT)
            .build()?;

        Ok(Self {
            endpoint,
            api_key,
            client,
        })
    }
}

#[async_trait]
impl EthPriceSource for CoinGeckoPriceSource {
    async fn fetch_eth_price(&self) -> Result<UsdValue, PriceFeedError> {
        let mut request = self.client.get(self.endpoint.clone());

        if let Some(key) = &self.api_key {
            request = request.header(CG_AUTH_HEADER, key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(PriceFeedError::UnexpectedStatus {
                status: response.status(),
            });
        }

        let body = response.json::<SimplePriceResponse>().await?;

        body.quote(ETH_ASSET_ID, QUOTE_CURRENCY)
            .map(UsdValue::new)
            .ok_or(PriceFeedError::PriceNotFound)
    }
}

/// Response shape of the simple-price endpoint: asset id to currency to quote
#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    #[serde(flatten)]
    prices: HashMap<String, HashMap<String, f64>>,
}

impl SimplePriceResponse {
    fn quote(&self, asset: &str, currency: &str) -> Option<f64> {
        self.prices
            .get(asset)
            .and_then(|quotes| quotes.get(currency))
            .copied()
    }
}
