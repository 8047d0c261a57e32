// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the blobwatch crate.
//!
//! This module provides strongly-typed errors for all public APIs.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling ([`RpcError`],
//!   [`PriceFeedError`], [`HistoryError`])
//! - **Unified error type** ([`BlobwatchError`]) for convenience when you
//!   don't need to distinguish between error sources
//!
//! Only chain RPC failures are fatal to a metrics request. Price feed
//! failures are recovered by the price cache (stale-price fallback) and
//! malformed history rows are skipped during the revenue projection, so
//! those conditions never surface through [`BlobwatchError`] in normal
//! operation.

mod history;
mod price;
mod rpc;

pub use history::HistoryError;
pub use price::PriceFeedError;
pub use rpc::RpcError;

/// Unified error type for all blobwatch operations.
///
/// All module-specific error types automatically convert to
/// `BlobwatchError` via `From` implementations, so `?` propagates
/// errors naturally across module boundaries.
#[derive(Debug, thiserror::Error)]
pub enum BlobwatchError {
    /// Error from chain RPC operations.
    #[error("Chain RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Error from the external price feed.
    #[error("Price feed error: {0}")]
    Price(#[from] PriceFeedError),

    /// Error from the history log.
    #[error("History log error: {0}")]
    History(#[from] HistoryError),
}
