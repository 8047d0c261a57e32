// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for blobwatch integration tests
//!
//! Provides mock implementations of the price-feed traits to enable
//! testing without real network calls or real time.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use blobwatch::{Clock, EthPriceSource, PriceFeedError, UsdValue};
use chrono::{DateTime, Utc};

/// Mock EthPriceSource with scripted outcomes
///
/// Each fetch pops the next scripted outcome; an exhausted script
/// fails the fetch. The fetch counter lets tests assert exactly how
/// many external calls the cache made.
///
/// # Example
///
/// ```rust,ignore
/// let source = MockEthPriceSource::new()
///     .with_price(3000.0)
///     .with_failure();
///
/// let mut cache = CachedEthPrice::with_clock(Box::new(source.clone()), Box::new(clock));
/// ```
#[derive(Clone, Default)]
pub struct MockEthPriceSource {
    outcomes: Arc<Mutex<VecDeque<Result<f64, ()>>>>,
    fetch_calls: Arc<AtomicUsize>,
}

impl MockEthPriceSource {
    /// Create a mock with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful fetch returning the given price
    pub fn with_price(self, price: f64) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(price));
        self
    }

    /// Script a failed fetch
    pub fn with_failure(self) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(()));
        self
    }

    /// Number of fetches attempted so far
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EthPriceSource for MockEthPriceSource {
    async fn fetch_eth_price(&self) -> Result<UsdValue, PriceFeedError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        match self.outcomes.lock().unwrap().pop_front() {
            Some(Ok(price)) => Ok(UsdValue::new(price)),
            _ => Err(PriceFeedError::PriceNotFound),
        }
    }
}

/// Manually advanced clock for deterministic freshness tests
#[derive(Clone)]
pub struct ManualClock {
    unix_seconds: Arc<AtomicI64>,
}

impl ManualClock {
    /// Create a clock at the given Unix timestamp
    pub fn new(start_unix: i64) -> Self {
        Self {
            unix_seconds: Arc::new(AtomicI64::new(start_unix)),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, seconds: i64) {
        self.unix_seconds.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.unix_seconds.load(Ordering::SeqCst), 0)
            .expect("timestamp in range")
    }
}
