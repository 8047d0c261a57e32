// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Blob fee metrics derivation
//!
//! The metrics engine turns raw chain values into normalized economic
//! figures: blob fee in ETH, cost per full blob, per-block blob revenue,
//! base-fee burn, and their USD counterparts at the current cached
//! price. Every sample is appended to the history log (reading current
//! metrics always creates a new historical data point), and the log in
//! turn feeds a rolling annualized-revenue estimate.
//!
//! Derivation ([`Observation::derive`]) is a pure function of the chain
//! sample, the price, and the capture time; the engine supplies the RPC
//! fetch and the log-append effects around it.

use std::collections::HashMap;

use alloy_network::AnyNetwork;
use alloy_provider::Provider;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::chain::{fetch_chain_sample, ChainSample};
use crate::config::{HOURS_PER_YEAR, MIN_PROJECTION_SAMPLES, SAMPLES_PER_HOUR};
use crate::errors::BlobwatchError;
use crate::history::{HistoryLog, BLOCK_REVENUE_USD_COLUMN, TIMESTAMP_FORMAT};
use crate::price::CachedEthPrice;
use crate::types::gas::{BlobGasAmount, BlobGasPrice, GasAmount, GasPrice};
use crate::types::usd::UsdValue;

/// One complete metrics observation
///
/// Immutable once created. Raw chain values are kept next to every
/// derived figure, so each derived field is a deterministic function of
/// fields on the same observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    /// Wall-clock capture time (second precision in persisted form)
    pub timestamp: DateTime<Utc>,
    /// Latest block number at capture time
    pub block_number: u64,
    /// Blob base fee in wei
    pub blob_base_fee: BlobGasPrice,
    /// Blob gas consumed by the block
    pub blob_gas_used: BlobGasAmount,
    /// Execution base fee per gas in wei
    pub base_fee_per_gas: GasPrice,
    /// Execution gas consumed by the block
    pub gas_used: GasAmount,
    /// ETH/USD price at capture time
    pub eth_price: UsdValue,
    /// Blob base fee expressed in ETH
    pub blob_fee_eth: f64,
    /// Cost of one full blob (131,072 blob gas) in ETH
    pub cost_per_blob_eth: f64,
    /// Cost of one full blob in USD
    pub cost_per_blob_usd: UsdValue,
    /// Blob revenue of the block in ETH
    pub block_revenue_eth: f64,
    /// Blob revenue of the block in USD
    pub block_revenue_usd: UsdValue,
    /// Execution base fee burned by the block in ETH
    pub base_fee_burned_eth: f64,
    /// Execution base fee burned by the block in USD
    pub base_fee_burned_usd: UsdValue,
}

impl Observation {
    /// Derive a full observation from raw chain values
    ///
    /// Pure function: fee products are carried in U256 and only the
    /// final wei-to-ETH conversion is lossy.
    pub fn derive(sample: &ChainSample, eth_price: UsdValue, timestamp: DateTime<Utc>) -> Self {
        let blob_fee_eth = sample.blob_base_fee.to_wei_amount().to_ether();
        let cost_per_blob_eth = sample.blob_base_fee.cost_per_blob().to_ether();
        let block_revenue_eth = sample
            .blob_base_fee
            .revenue_for(sample.blob_gas_used)
            .to_ether();
        let base_fee_burned_eth = sample.base_fee_per_gas.burn_for(sample.gas_used).to_ether();

        Self {
            timestamp,
            block_number: sample.block_number,
            blob_base_fee: sample.blob_base_fee,
            blob_gas_used: sample.blob_gas_used,
            base_fee_per_gas: sample.base_fee_per_gas,
            gas_used: sample.gas_used,
            eth_price,
            blob_fee_eth,
            cost_per_blob_eth,
            cost_per_blob_usd: eth_price.for_eth(cost_per_blob_eth),
            block_revenue_eth,
            block_revenue_usd: eth_price.for_eth(block_revenue_eth),
            base_fee_burned_eth,
            base_fee_burned_usd: eth_price.for_eth(base_fee_burned_eth),
        }
    }

    /// Whether the blob base fee is zero (no blob demand)
    pub fn fee_is_zero(&self) -> bool {
        self.blob_base_fee.is_zero()
    }
}

/// A metrics sample together with the rolling annualized projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsReport {
    /// The observation captured for this sample
    pub observation: Observation,
    /// Annualized blob revenue estimate; `None` while the history is
    /// too short to extrapolate from
    pub annual_revenue_projection: Option<UsdValue>,
}

/// Display-oriented projection of a metrics report
///
/// Carries formatted strings for the web surface next to the raw values
/// they were formatted from, mirroring what the history log persists.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsView {
    /// Capture time, second precision
    pub timestamp: String,
    /// Latest block number
    pub block_number: u64,
    /// Blob base fee in wei, grouped for display
    pub blob_fee_wei: String,
    /// Blob base fee in ETH
    pub blob_fee_eth: String,
    /// Cost per full blob in ETH
    pub cost_per_blob_eth: String,
    /// Cost per full blob in USD
    pub cost_per_blob_usd: String,
    /// Blob gas used, grouped for display
    pub blob_gas_used: String,
    /// Block blob revenue in ETH
    pub block_revenue_eth: String,
    /// Block blob revenue in USD
    pub block_revenue_usd: String,
    /// Base fee burned in ETH
    pub base_fee_burned_eth: String,
    /// Base fee burned in USD
    pub base_fee_burned_usd: String,
    /// ETH/USD price used for the USD figures
    pub eth_price_usd: String,
    /// True when the blob base fee is zero
    pub fee_is_zero: bool,
    /// Annualized revenue estimate, absent while history is too short
    pub annual_revenue_usd: Option<String>,
    /// Raw blob base fee in wei
    pub blob_fee_wei_raw: u128,
    /// Raw blob base fee in ETH
    pub blob_fee_eth_raw: f64,
    /// Raw cost per blob in ETH
    pub cost_per_blob_eth_raw: f64,
    /// Raw blob gas used
    pub blob_gas_used_raw: u64,
    /// Raw block revenue in ETH
    pub block_revenue_eth_raw: f64,
    /// Raw block revenue in USD
    pub block_revenue_usd_raw: f64,
    /// Raw base fee per gas in wei
    pub base_fee_wei_raw: u64,
    /// Raw execution gas used
    pub gas_used_raw: u64,
    /// Raw base fee burned in ETH
    pub base_fee_burned_eth_raw: f64,
    /// Raw ETH/USD price
    pub eth_price_raw: f64,
}

impl From<&MetricsReport> for MetricsView {
    fn from(report: &MetricsReport) -> Self {
        let o = &report.observation;
        Self {
            timestamp: o.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            block_number: o.block_number,
            blob_fee_wei: group_digits(o.blob_base_fee.as_u128()),
            blob_fee_eth: format!("{:.10}", o.blob_fee_eth),
            cost_per_blob_eth: format!("{:.6}", o.cost_per_blob_eth),
            cost_per_blob_usd: o.cost_per_blob_usd.format(2),
            blob_gas_used: group_digits(o.blob_gas_used.as_u64() as u128),
            block_revenue_eth: format!("{:.6}", o.block_revenue_eth),
            block_revenue_usd: o.block_revenue_usd.format(2),
            base_fee_burned_eth: format!("{:.6}", o.base_fee_burned_eth),
            base_fee_burned_usd: o.base_fee_burned_usd.format(2),
            eth_price_usd: o.eth_price.format(2),
            fee_is_zero: o.fee_is_zero(),
            annual_revenue_usd: report
                .annual_revenue_projection
                .map(|estimate| estimate.format(0)),
            blob_fee_wei_raw: o.blob_base_fee.as_u128(),
            blob_fee_eth_raw: o.blob_fee_eth,
            cost_per_blob_eth_raw: o.cost_per_blob_eth,
            blob_gas_used_raw: o.blob_gas_used.as_u64(),
            block_revenue_eth_raw: o.block_revenue_eth,
            block_revenue_usd_raw: o.block_revenue_usd.as_f64(),
            base_fee_wei_raw: o.base_fee_per_gas.as_u64(),
            gas_used_raw: o.gas_used.as_u64(),
            base_fee_burned_eth_raw: o.base_fee_burned_eth,
            eth_price_raw: o.eth_price.as_f64(),
        }
    }
}

/// Group a decimal number with comma separators ("1,000,000")
fn group_digits(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Estimate annualized blob revenue from the full history
///
/// Assumes a uniform one-sample-per-minute cadence: the mean per-sample
/// revenue is scaled to an hour and then to a year. This is a simple
/// extrapolation, not a time-weighted average.
///
/// Returns `None` when the history holds fewer than
/// [`MIN_PROJECTION_SAMPLES`] rows, or when no row yields a parseable
/// revenue value. Rows with a malformed or missing revenue column are
/// skipped, not treated as errors.
pub fn estimate_annual_revenue(rows: &[HashMap<String, String>]) -> Option<UsdValue> {
    if rows.len() < MIN_PROJECTION_SAMPLES {
        debug!(
            rows = rows.len(),
            required = MIN_PROJECTION_SAMPLES,
            "Insufficient history for revenue projection"
        );
        return None;
    }

    let revenues: Vec<f64> = rows
        .iter()
        .filter_map(|row| row.get(BLOCK_REVENUE_USD_COLUMN))
        .filter_map(|value| value.parse::<f64>().ok())
        .collect();

    if revenues.is_empty() {
        return None;
    }

    let avg_per_sample = revenues.iter().sum::<f64>() / revenues.len() as f64;
    Some(UsdValue::new(
        avg_per_sample * SAMPLES_PER_HOUR * HOURS_PER_YEAR,
    ))
}

/// Combines the chain client, the cached price feed, and the history
/// log into metrics samples
///
/// The engine is single-owner: callers serialize access through the
/// command loop, and the price cache's read-modify-write and the log
/// append carry no internal locking.
pub struct MetricsEngine<P> {
    provider: P,
    price_feed: CachedEthPrice,
    history: HistoryLog,
}

impl<P> MetricsEngine<P>
where
    P: Provider<AnyNetwork>,
{
    /// Create an engine over a provider, price feed, and history log
    pub fn new(provider: P, price_feed: CachedEthPrice, history: HistoryLog) -> Self {
        Self {
            provider,
            price_feed,
            history,
        }
    }

    /// Capture one metrics sample
    ///
    /// Fetches raw fee data from the chain (a failure here fails the
    /// whole sample, with no partial record), gets the cached price
    /// (which cannot fail), derives the observation, appends it to the
    /// history log, and computes the annualized projection over the
    /// grown history.
    pub async fn sample(&mut self) -> Result<MetricsReport, BlobwatchError> {
        let chain_sample = fetch_chain_sample(&self.provider).await?;
        let eth_price = self.price_feed.get().await;

        let observation = Observation::derive(&chain_sample, eth_price, Utc::now());
        self.history.append(&observation)?;

        let rows = self.history.read_all()?;
        let annual_revenue_projection = estimate_annual_revenue(&rows);

        info!(
            block_number = observation.block_number,
            blob_base_fee = %observation.blob_base_fee,
            block_revenue_usd = %observation.block_revenue_usd,
            history_rows = rows.len(),
            "Captured metrics sample"
        );

        Ok(MetricsReport {
            observation,
            annual_revenue_projection,
        })
    }

    /// The underlying history log
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_with(blob_base_fee: BlobGasPrice, blob_gas_used: BlobGasAmount) -> ChainSample {
        ChainSample {
            block_number: 21_000_000,
            blob_base_fee,
            blob_gas_used,
            base_fee_per_gas: GasPrice::from_gwei(20),
            gas_used: GasAmount::new(15_000_000),
            block_timestamp: 1_700_000_000,
        }
    }

    fn history_rows(revenues: &[&str]) -> Vec<HashMap<String, String>> {
        revenues
            .iter()
            .map(|revenue| {
                let mut row = HashMap::new();
                row.insert(BLOCK_REVENUE_USD_COLUMN.to_string(), revenue.to_string());
                row
            })
            .collect()
    }

    #[test]
    fn test_derive_one_gwei_one_blob() {
        let sample = sample_with(BlobGasPrice::from_gwei(1), BlobGasAmount::new(131_072));
        let observation = Observation::derive(&sample, UsdValue::new(4000.0), Utc::now());

        assert!((observation.blob_fee_eth - 0.000000001).abs() < 1e-18);
        assert!((observation.cost_per_blob_eth - 0.000131072).abs() < 1e-12);
        assert!((observation.block_revenue_eth - 0.000131072).abs() < 1e-12);
        assert!((observation.block_revenue_usd.as_f64() - 0.524288).abs() < 1e-9);
    }

    #[test]
    fn test_derive_base_fee_burn() {
        let sample = sample_with(BlobGasPrice::from_gwei(1), BlobGasAmount::ZERO);
        let observation = Observation::derive(&sample, UsdValue::new(4000.0), Utc::now());

        // 20 gwei × 15M gas = 0.3 ETH burned
        assert!((observation.base_fee_burned_eth - 0.3).abs() < 1e-12);
        assert!((observation.base_fee_burned_usd.as_f64() - 1200.0).abs() < 1e-6);
    }

    #[test]
    fn test_fee_is_zero() {
        let zero = sample_with(BlobGasPrice::ZERO, BlobGasAmount::new(131_072));
        let observation = Observation::derive(&zero, UsdValue::new(4000.0), Utc::now());
        assert!(observation.fee_is_zero());
        assert_eq!(observation.block_revenue_eth, 0.0);

        let nonzero = sample_with(BlobGasPrice::new(1), BlobGasAmount::ZERO);
        let observation = Observation::derive(&nonzero, UsdValue::new(4000.0), Utc::now());
        assert!(!observation.fee_is_zero());

        let large = sample_with(BlobGasPrice::new(u128::MAX), BlobGasAmount::ZERO);
        let observation = Observation::derive(&large, UsdValue::new(4000.0), Utc::now());
        assert!(!observation.fee_is_zero());
    }

    #[test]
    fn test_estimate_unavailable_below_minimum() {
        let rows = history_rows(&vec!["10"; 59]);
        assert!(estimate_annual_revenue(&rows).is_none());
    }

    #[test]
    fn test_estimate_at_minimum() {
        let rows = history_rows(&vec!["10"; 60]);
        let estimate = estimate_annual_revenue(&rows).unwrap();

        // 10 USD per sample × 60 per hour × 8760 hours
        assert!((estimate.as_f64() - 5_256_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_estimate_skips_malformed_rows() {
        let mut revenues = vec!["not-a-number"; 10];
        revenues.extend(vec!["20"; 50]);
        let rows = history_rows(&revenues);

        // Average over the 50 valid rows only
        let estimate = estimate_annual_revenue(&rows).unwrap();
        assert!((estimate.as_f64() - 10_512_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_estimate_skips_missing_column() {
        let mut rows = history_rows(&vec!["30"; 60]);
        for row in rows.iter_mut().take(20) {
            row.clear();
        }

        let estimate = estimate_annual_revenue(&rows).unwrap();
        assert!((estimate.as_f64() - 30.0 * 60.0 * 8760.0).abs() < 1e-6);
    }

    #[test]
    fn test_estimate_unavailable_when_nothing_parses() {
        let rows = history_rows(&vec!["bogus"; 60]);
        assert!(estimate_annual_revenue(&rows).is_none());
    }

    #[test]
    fn test_view_formatting() {
        let sample = sample_with(BlobGasPrice::from_gwei(1), BlobGasAmount::new(131_072));
        let report = MetricsReport {
            observation: Observation::derive(&sample, UsdValue::new(4000.0), Utc::now()),
            annual_revenue_projection: Some(UsdValue::new(5_256_000.0)),
        };
        let view = MetricsView::from(&report);

        assert_eq!(view.blob_fee_wei, "1,000,000,000");
        assert_eq!(view.blob_fee_eth, "0.0000000010");
        assert_eq!(view.cost_per_blob_eth, "0.000131");
        assert_eq!(view.block_revenue_usd, "$0.52");
        assert_eq!(view.blob_gas_used, "131,072");
        assert_eq!(view.annual_revenue_usd.as_deref(), Some("$5256000"));
        assert!(!view.fee_is_zero);
        assert_eq!(view.blob_fee_wei_raw, 1_000_000_000);
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(131_072), "131,072");
        assert_eq!(group_digits(1_234_567_890), "1,234,567,890");
    }

    proptest! {
        /// block_revenue_eth equals fee × gas / 1e18 for arbitrary inputs
        #[test]
        fn prop_block_revenue_matches_product(
            fee in 0u128..u64::MAX as u128,
            gas in 0u64..u64::MAX,
        ) {
            let sample = sample_with(BlobGasPrice::new(fee), BlobGasAmount::new(gas));
            let observation = Observation::derive(&sample, UsdValue::new(4000.0), Utc::now());

            let expected = (fee as f64) * (gas as f64) / 1e18;
            if expected == 0.0 {
                prop_assert_eq!(observation.block_revenue_eth, 0.0);
            } else {
                let relative = ((observation.block_revenue_eth - expected) / expected).abs();
                prop_assert!(relative < 1e-12, "relative error {relative}");
            }
        }

        /// cost_per_blob_eth is always blob_fee_eth × 131072
        #[test]
        fn prop_cost_per_blob_scales_fee(fee in 0u128..u64::MAX as u128) {
            let sample = sample_with(BlobGasPrice::new(fee), BlobGasAmount::ZERO);
            let observation = Observation::derive(&sample, UsdValue::new(4000.0), Utc::now());

            let expected = observation.blob_fee_eth * 131_072.0;
            if expected == 0.0 {
                prop_assert_eq!(observation.cost_per_blob_eth, 0.0);
            } else {
                let relative = ((observation.cost_per_blob_eth - expected) / expected).abs();
                prop_assert!(relative < 1e-12, "relative error {relative}");
            }
        }

        /// fee_is_zero is true exactly when the blob base fee is zero
        #[test]
        fn prop_fee_is_zero_iff_zero(fee in 0u128..u128::MAX) {
            let sample = sample_with(BlobGasPrice::new(fee), BlobGasAmount::ZERO);
            let observation = Observation::derive(&sample, UsdValue::new(4000.0), Utc::now());
            prop_assert_eq!(observation.fee_is_zero(), fee == 0);
        }
    }
}
