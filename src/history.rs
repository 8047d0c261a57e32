// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Append-only CSV history log
//!
//! Every metrics sample is appended as one row; rows are never rewritten
//! or compacted. Raw chain values are persisted alongside the derived
//! figures so any derived field can be recomputed from its row. Reads
//! return untyped string maps; numeric parsing is the caller's concern
//! (the revenue projection, for instance, skips rows that fail to
//! parse).

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::HistoryError;
use crate::metrics::Observation;

/// Column order of the history log
///
/// The schema is additive: later revisions append columns, never rename
/// them.
pub const HISTORY_HEADERS: [&str; 14] = [
    "timestamp",
    "block_number",
    "blob_fee_wei",
    "blob_fee_eth",
    "cost_per_blob_eth",
    "cost_per_blob_usd",
    "blob_gas_used",
    "block_revenue_eth",
    "block_revenue_usd",
    "base_fee_wei",
    "gas_used",
    "base_fee_burned_eth",
    "base_fee_burned_usd",
    "eth_price",
];

/// Column holding per-block blob revenue in USD, consumed by the
/// annualized revenue projection
pub const BLOCK_REVENUE_USD_COLUMN: &str = "block_revenue_usd";

/// Timestamp format used in history rows (second precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// File-backed append-only history of observations
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    /// Create a handle for the log at the given path
    ///
    /// No file access happens until [`HistoryLog::init`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the log file with its header row if it doesn't exist yet
    ///
    /// An existing file is left untouched, so the header is written
    /// exactly once over the log's lifetime.
    pub fn init(&self) -> Result<(), HistoryError> {
        if self.path.exists() {
            return Ok(());
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(HISTORY_HEADERS)?;
        writer.flush().map_err(|e| HistoryError::io(&self.path, e))?;

        info!(path = %self.path.display(), "Created history log");
        Ok(())
    }

    /// Append one observation as a row matching the current schema
    pub fn append(&self, observation: &Observation) -> Result<(), HistoryError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| HistoryError::io(&self.path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(record_for(observation))?;
        writer.flush().map_err(|e| HistoryError::io(&self.path, e))?;

        Ok(())
    }

    /// Read every row as a mapping from column name to string value
    ///
    /// A missing file reads as an empty history.
    pub fn read_all(&self) -> Result<Vec<HashMap<String, String>>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut rows = Vec::new();
        for record in reader.deserialize() {
            rows.push(record?);
        }

        Ok(rows)
    }
}

/// Build the CSV record for an observation, in [`HISTORY_HEADERS`] order
///
/// Numeric fields are stored raw (full-precision `to_string`), not in
/// their display formatting.
fn record_for(observation: &Observation) -> Vec<String> {
    vec![
        observation.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        observation.block_number.to_string(),
        observation.blob_base_fee.as_u128().to_string(),
        observation.blob_fee_eth.to_string(),
        observation.cost_per_blob_eth.to_string(),
        observation.cost_per_blob_usd.as_f64().to_string(),
        observation.blob_gas_used.as_u64().to_string(),
        observation.block_revenue_eth.to_string(),
        observation.block_revenue_usd.as_f64().to_string(),
        observation.base_fee_per_gas.as_u64().to_string(),
        observation.gas_used.as_u64().to_string(),
        observation.base_fee_burned_eth.to_string(),
        observation.base_fee_burned_usd.as_f64().to_string(),
        observation.eth_price.as_f64().to_string(),
    ]
}
