// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Time-bounded ETH price cache
//!
//! Wraps an [`EthPriceSource`](super::EthPriceSource) with memoization:
//! a fetched price stays fresh for a fixed window, and a failed refresh
//! falls back to the previously cached price instead of surfacing an
//! error. The cache never empties once constructed; before the first
//! successful fetch it holds a configured placeholder price with a
//! last-update time at the Unix epoch, which guarantees the first call
//! attempts a live fetch.
//!
//! The clock and the price source are both injected, so the freshness
//! window and every fetch outcome are fully controllable in tests.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_ETH_PRICE_USD, PRICE_REFRESH_INTERVAL_SECS};
use crate::types::usd::UsdValue;

use super::EthPriceSource;

/// Source of "now" for cache freshness decisions
///
/// Injected so tests can control time deterministically.
pub trait Clock: Send + Sync {
    /// The current wall-clock time
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Memoizing wrapper around an ETH price source
///
/// [`CachedEthPrice::get`] never fails: within the freshness window it
/// returns the cached price with no external call; outside the window it
/// attempts one refresh and, on any failure, keeps serving the stale
/// price.
pub struct CachedEthPrice {
    source: Box<dyn EthPriceSource>,
    clock: Box<dyn Clock>,
    refresh_interval: TimeDelta,
    price: UsdValue,
    last_update: DateTime<Utc>,
}

impl CachedEthPrice {
    /// Create a cache over the given source, using the system clock and
    /// the configured freshness window
    pub fn new(source: Box<dyn EthPriceSource>) -> Self {
        Self::with_clock(source, Box::new(SystemClock))
    }

    /// Create a cache with an injected clock
    pub fn with_clock(source: Box<dyn EthPriceSource>, clock: Box<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            refresh_interval: TimeDelta::seconds(PRICE_REFRESH_INTERVAL_SECS),
            price: UsdValue::new(DEFAULT_ETH_PRICE_USD),
            // Epoch start makes the very first call stale by construction
            last_update: DateTime::UNIX_EPOCH,
        }
    }

    /// Override the freshness window
    #[must_use]
    pub fn with_refresh_interval(mut self, interval: TimeDelta) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Get the current ETH/USD price
    ///
    /// Returns the cached price on a hit; otherwise attempts a refresh.
    /// A failed refresh is logged and swallowed, and the previous price
    /// is returned unchanged, so this call cannot fail.
    pub async fn get(&mut self) -> UsdValue {
        let now = self.clock.now();

        if now.signed_duration_since(self.last_update) < self.refresh_interval {
            debug!(price = %self.price, "Serving cached ETH price");
            return self.price;
        }

        match self.source.fetch_eth_price().await {
            Ok(price) => {
                info!(price = %price, "Refreshed ETH price");
                self.price = price;
                self.last_update = now;
            }
            Err(e) => {
                warn!(error = %e, stale_price = %self.price, "ETH price refresh failed, serving stale price");
            }
        }

        self.price
    }

    /// The most recently cached price, without triggering a refresh
    pub fn current(&self) -> UsdValue {
        self.price
    }

    /// When the cached price was last successfully refreshed
    ///
    /// The Unix epoch means no successful fetch has happened yet.
    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }
}

impl std::fmt::Debug for CachedEthPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedEthPrice")
            .field("price", &self.price)
            .field("last_update", &self.last_update)
            .field("refresh_interval", &self.refresh_interval)
            .finish_non_exhaustive()
    }
}
