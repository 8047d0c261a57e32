// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the external price feed.

/// Errors that can occur when fetching the ETH/USD price.
///
/// All variants collapse to a single failure signal at the cache layer:
/// the cache keeps serving its previous price and only logs the failure.
/// No partial price data ever escapes a failed fetch.
#[derive(Debug, thiserror::Error)]
pub enum PriceFeedError {
    /// The price endpoint URL could not be constructed.
    #[error("Invalid price endpoint: {0}")]
    InvalidEndpoint(String),

    /// The HTTP request failed (connection error, timeout, or a body
    /// that could not be decoded as JSON).
    #[error("Price request failed")]
    Transport(#[from] reqwest::Error),

    /// The price endpoint answered with a non-success status.
    #[error("Price endpoint returned status {status}")]
    UnexpectedStatus {
        /// The HTTP status code returned
        status: reqwest::StatusCode,
    },

    /// The response parsed but did not contain the expected quote.
    #[error("ETH price missing from response")]
    PriceNotFound,
}
