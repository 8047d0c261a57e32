// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain client for blob fee data
//!
//! Wraps the two RPC reads a metrics sample needs: the current blob base
//! fee (`eth_blobBaseFee`) and the latest block's fee fields. Both are
//! free functions generic over any Alloy provider.
//!
//! # Example
//!
//! ```rust,ignore
//! use blobwatch::{create_http_provider, fetch_chain_sample};
//!
//! let provider = create_http_provider("https://eth.llamarpc.com")?;
//! let sample = fetch_chain_sample(&provider).await?;
//! println!("block {}: {} blob gas", sample.block_number, sample.blob_gas_used);
//! ```

use alloy_consensus::BlockHeader;
use alloy_network::{BlockResponse, Network};
use alloy_provider::Provider;
use alloy_rpc_types::BlockNumberOrTag;
use tracing::debug;

use crate::errors::RpcError;
use crate::types::gas::{BlobGasAmount, BlobGasPrice, GasAmount, GasPrice};

/// Raw fee values captured from the chain for one observation
///
/// Every field defaults to zero when absent from the underlying block
/// representation (pre-4844 blocks have no blob gas, pre-1559 blocks no
/// base fee).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainSample {
    /// Latest block number
    pub block_number: u64,
    /// Current blob base fee in wei
    pub blob_base_fee: BlobGasPrice,
    /// Blob gas consumed by the latest block
    pub blob_gas_used: BlobGasAmount,
    /// Execution base fee per gas of the latest block, in wei
    pub base_fee_per_gas: GasPrice,
    /// Execution gas consumed by the latest block
    pub gas_used: GasAmount,
    /// Timestamp of the latest block (seconds)
    pub block_timestamp: u64,
}

/// Fetch the current blob base fee from the node
///
/// Uses the `eth_blobBaseFee` RPC method, which reflects the fee a blob
/// transaction would pay right now.
pub async fn fetch_blob_base_fee<N, P>(provider: &P) -> Result<BlobGasPrice, RpcError>
where
    N: Network,
    P: Provider<N>,
{
    let fee = provider
        .get_blob_base_fee()
        .await
        .map_err(RpcError::blob_base_fee_failed)?;

    Ok(BlobGasPrice::new(fee))
}

/// Fetch the fee fields of the latest block
///
/// Returns the block number together with blob gas used, base fee per
/// gas, execution gas used, and the block timestamp; fields the block
/// representation lacks come back as zero.
pub async fn fetch_latest_block_fees<N, P>(provider: &P) -> Result<LatestBlockFees, RpcError>
where
    N: Network,
    P: Provider<N>,
{
    let block = provider
        .get_block_by_number(BlockNumberOrTag::Latest)
        .await
        .map_err(RpcError::get_latest_block_failed)?
        .ok_or(RpcError::LatestBlockUnavailable)?;

    let header = block.header();

    Ok(LatestBlockFees {
        number: header.number(),
        blob_gas_used: BlobGasAmount::new(header.blob_gas_used().unwrap_or_default()),
        base_fee_per_gas: GasPrice::new(header.base_fee_per_gas().unwrap_or_default()),
        gas_used: GasAmount::new(header.gas_used()),
        timestamp: header.timestamp(),
    })
}

/// Fee fields extracted from the latest block header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestBlockFees {
    /// Block number
    pub number: u64,
    /// Blob gas consumed by the block
    pub blob_gas_used: BlobGasAmount,
    /// Base fee per gas, in wei
    pub base_fee_per_gas: GasPrice,
    /// Execution gas consumed by the block
    pub gas_used: GasAmount,
    /// Block timestamp (seconds)
    pub timestamp: u64,
}

/// Capture a full chain sample: blob base fee plus latest block fees
///
/// Either RPC call failing fails the whole sample; there is no partial
/// record and no retry.
pub async fn fetch_chain_sample<N, P>(provider: &P) -> Result<ChainSample, RpcError>
where
    N: Network,
    P: Provider<N>,
{
    let blob_base_fee = fetch_blob_base_fee(provider).await?;
    let block = fetch_latest_block_fees(provider).await?;

    debug!(
        block_number = block.number,
        blob_base_fee = %blob_base_fee,
        blob_gas_used = %block.blob_gas_used,
        "Captured chain sample"
    );

    Ok(ChainSample {
        block_number: block.number,
        blob_base_fee,
        blob_gas_used: block.blob_gas_used,
        base_fee_per_gas: block.base_fee_per_gas,
        gas_used: block.gas_used,
        block_timestamp: block.timestamp,
    })
}
