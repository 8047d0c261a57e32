// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! RPC error types for blockchain provider operations.

/// Errors that can occur during blockchain RPC operations.
///
/// This error type captures the failure modes of the two upstream calls
/// blobwatch makes per sample (blob base fee and latest block). Any of
/// these is fatal to the current metrics request: there is no retry and
/// no partial observation.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The provider URL could not be parsed.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),

    /// Failed to fetch the current blob base fee.
    ///
    /// This can occur due to network connectivity issues, provider
    /// downtime, or nodes that predate EIP-4844 support.
    #[error("Failed to fetch current blob base fee")]
    BlobBaseFeeFailed {
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to fetch the latest block.
    ///
    /// This indicates the RPC call itself failed, not that the block
    /// doesn't exist.
    #[error("Failed to fetch latest block")]
    GetLatestBlockFailed {
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The provider answered but returned no latest block.
    ///
    /// This can happen on nodes that are still syncing.
    #[error("Latest block not available from provider")]
    LatestBlockUnavailable,
}

impl RpcError {
    /// Helper to create a `BlobBaseFeeFailed` error from any error type.
    pub fn blob_base_fee_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        RpcError::BlobBaseFeeFailed {
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetLatestBlockFailed` error from any error type.
    pub fn get_latest_block_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        RpcError::GetLatestBlockFailed {
            source: Box::new(source),
        }
    }
}
