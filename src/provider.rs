// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP provider construction
//!
//! Blobwatch talks to a single Ethereum endpoint, so providers are
//! type-erased over `AnyNetwork`: all the fee fields we read are common
//! block-header data, and runtime URL selection matters more than
//! network-specific typing here.

use alloy_network::AnyNetwork;
use alloy_provider::ProviderBuilder;
use alloy_rpc_client::ClientBuilder;

use crate::errors::RpcError;

/// Type alias for an HTTP provider using AnyNetwork
pub type AnyHttpProvider = alloy_provider::RootProvider<AnyNetwork>;

/// Create an HTTP provider for the given RPC endpoint
///
/// Recommended fillers are disabled so the result is a bare
/// `RootProvider`; blobwatch only reads chain data and never builds
/// transactions.
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed.
pub fn create_http_provider(rpc_url: &str) -> Result<AnyHttpProvider, RpcError> {
    let url: url::Url = rpc_url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{e}")))?;

    let client = ClientBuilder::default().http(url);

    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .network::<AnyNetwork>()
        .connect_client(client))
}
