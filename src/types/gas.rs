// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for gas-related values
//!
//! This module provides newtype wrappers to add type safety for fee
//! calculations and prevent mixing incompatible units. Execution gas and
//! blob gas are distinct resource dimensions with independent pricing, so
//! they get distinct types.

use alloy_eips::eip4844::DATA_GAS_PER_BLOB;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::ops::Add;

use super::wei::WeiAmount;

/// Amount of execution gas consumed by a block
///
/// This represents gas units, not cost. To calculate the fee burned,
/// multiply by [`GasPrice`] via [`GasPrice::burn_for`].
///
/// # Example
/// ```
/// use blobwatch::GasAmount;
///
/// let gas = GasAmount::new(21000);
/// assert_eq!(gas.as_u64(), 21000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct GasAmount(u64);

impl GasAmount {
    /// Zero gas
    pub const ZERO: Self = Self(0);

    /// Create a new gas amount
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the inner u64 value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for GasAmount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Add for GasAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::fmt::Display for GasAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Execution gas price in wei per unit of gas
///
/// This is the protocol base fee per gas for a block. Multiplying it by
/// the block's [`GasAmount`] gives the wei burned by that block.
///
/// # Example
/// ```
/// use blobwatch::{GasAmount, GasPrice};
///
/// let price = GasPrice::from_gwei(50);
/// let burned = price.burn_for(GasAmount::new(21000));
/// assert_eq!(burned.as_u256().to::<u64>(), 1_050_000_000_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct GasPrice(u64);

impl GasPrice {
    /// Zero gas price
    pub const ZERO: Self = Self(0);

    /// Create a new gas price from wei
    pub const fn new(price_wei: u64) -> Self {
        Self(price_wei)
    }

    /// Create from gwei (convenience constructor)
    pub const fn from_gwei(gwei: u64) -> Self {
        Self(gwei.saturating_mul(1_000_000_000))
    }

    /// Get the inner u64 value (in wei)
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Multiply by gas consumed to get the wei burned
    ///
    /// The product is carried in U256, so it cannot overflow.
    pub fn burn_for(&self, gas: GasAmount) -> WeiAmount {
        WeiAmount::new(U256::from(self.0).saturating_mul(U256::from(gas.as_u64())))
    }

    /// Convert to gwei as f64 (lossy, for display purposes)
    pub fn as_gwei_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }
}

impl From<u64> for GasPrice {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for GasPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let gwei = self.as_gwei_f64();
        if gwei >= 1.0 {
            write!(f, "{:.2} gwei", gwei)
        } else {
            write!(f, "{} wei", self.0)
        }
    }
}

/// Amount of blob gas consumed by EIP-4844 transactions in a block
///
/// Blob gas is separate from execution gas and has its own pricing
/// mechanism. Each blob consumes a fixed `DATA_GAS_PER_BLOB` (131,072)
/// gas units, so a block's blob gas used is always a multiple of that
/// constant (zero when the block carries no blobs).
///
/// # Example
/// ```
/// use blobwatch::BlobGasAmount;
///
/// let blob_gas = BlobGasAmount::new(262_144);
/// assert_eq!(blob_gas.full_blobs(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct BlobGasAmount(u64);

impl BlobGasAmount {
    /// Zero blob gas
    pub const ZERO: Self = Self(0);

    /// Create a new blob gas amount
    pub const fn new(gas: u64) -> Self {
        Self(gas)
    }

    /// Get the inner u64 value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Number of whole blobs this gas amount corresponds to
    pub const fn full_blobs(&self) -> u64 {
        self.0 / DATA_GAS_PER_BLOB
    }
}

impl From<u64> for BlobGasAmount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Add for BlobGasAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::fmt::Display for BlobGasAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} blob gas", self.0)
    }
}

/// Blob gas price in wei per unit of blob gas
///
/// The blob base fee follows a mechanism similar to the EIP-1559 base
/// fee, adjusting with blob space utilization. It is priced independently
/// from execution gas.
///
/// # Example
/// ```
/// use blobwatch::{BlobGasAmount, BlobGasPrice};
///
/// let fee = BlobGasPrice::from_gwei(1);
/// // One full blob at 1 gwei per blob gas unit
/// let cost = fee.cost_per_blob();
/// assert_eq!(cost.as_u256().to::<u64>(), 131_072_000_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct BlobGasPrice(u128);

impl BlobGasPrice {
    /// Zero blob gas price
    pub const ZERO: Self = Self(0);

    /// Create a new blob gas price from wei
    pub const fn new(price_wei: u128) -> Self {
        Self(price_wei)
    }

    /// Create from gwei (convenience constructor)
    pub const fn from_gwei(gwei: u64) -> Self {
        Self(gwei as u128 * 1_000_000_000)
    }

    /// Get the inner u128 value (in wei)
    pub const fn as_u128(&self) -> u128 {
        self.0
    }

    /// Check if the price is zero
    ///
    /// A zero blob base fee means there is no blob demand on the chain,
    /// which consumers may want to distinguish from normal pricing.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The price expressed as a wei amount
    pub fn to_wei_amount(&self) -> WeiAmount {
        WeiAmount::new(U256::from(self.0))
    }

    /// Cost of one full blob at this price
    ///
    /// Each blob requires `DATA_GAS_PER_BLOB` (131,072) blob gas units.
    pub fn cost_per_blob(&self) -> WeiAmount {
        WeiAmount::new(U256::from(self.0).saturating_mul(U256::from(DATA_GAS_PER_BLOB)))
    }

    /// Total wei paid for the given blob gas consumption at this price
    pub fn revenue_for(&self, blob_gas: BlobGasAmount) -> WeiAmount {
        WeiAmount::new(U256::from(self.0).saturating_mul(U256::from(blob_gas.as_u64())))
    }
}

impl From<u128> for BlobGasPrice {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<u64> for BlobGasPrice {
    fn from(value: u64) -> Self {
        Self(value as u128)
    }
}

impl std::fmt::Display for BlobGasPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let gwei = self.0 as f64 / 1_000_000_000.0;
        if gwei >= 1.0 {
            write!(f, "{:.2} gwei", gwei)
        } else {
            write!(f, "{} wei", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_amount_creation() {
        let gas = GasAmount::new(21000);
        assert_eq!(gas.as_u64(), 21000);
    }

    #[test]
    fn test_gas_amount_addition_saturates() {
        let total = GasAmount::new(u64::MAX) + GasAmount::new(1);
        assert_eq!(total.as_u64(), u64::MAX);
    }

    #[test]
    fn test_gas_price_from_gwei() {
        let price = GasPrice::from_gwei(50);
        assert_eq!(price.as_u64(), 50_000_000_000);
    }

    #[test]
    fn test_burn_calculation() {
        let price = GasPrice::from_gwei(50);
        let burned = price.burn_for(GasAmount::new(21000));

        // 21000 gas × 50 gwei = 1,050,000 gwei = 1,050,000,000,000,000 wei
        assert_eq!(burned.as_u256(), U256::from(1_050_000_000_000_000u64));
    }

    #[test]
    fn test_burn_cannot_overflow() {
        let price = GasPrice::new(u64::MAX);
        let burned = price.burn_for(GasAmount::new(u64::MAX));
        let expected = U256::from(u64::MAX).saturating_mul(U256::from(u64::MAX));
        assert_eq!(burned.as_u256(), expected);
    }

    #[test]
    fn test_blob_gas_amount_full_blobs() {
        assert_eq!(BlobGasAmount::new(0).full_blobs(), 0);
        assert_eq!(BlobGasAmount::new(131_072).full_blobs(), 1);
        assert_eq!(BlobGasAmount::new(786_432).full_blobs(), 6);
    }

    #[test]
    fn test_blob_gas_price_is_zero() {
        assert!(BlobGasPrice::ZERO.is_zero());
        assert!(!BlobGasPrice::new(1).is_zero());
        assert!(!BlobGasPrice::new(u128::MAX).is_zero());
    }

    #[test]
    fn test_cost_per_blob() {
        let fee = BlobGasPrice::from_gwei(1);
        let cost = fee.cost_per_blob();

        // 131,072 blob gas × 1 gwei = 131,072 gwei
        assert_eq!(cost.as_u256(), U256::from(131_072_000_000_000u64));
    }

    #[test]
    fn test_revenue_for_blob_gas() {
        let fee = BlobGasPrice::from_gwei(1);
        let revenue = fee.revenue_for(BlobGasAmount::new(262_144));
        assert_eq!(revenue.as_u256(), U256::from(262_144_000_000_000u64));
    }

    #[test]
    fn test_revenue_zero_blob_gas() {
        let fee = BlobGasPrice::from_gwei(30);
        let revenue = fee.revenue_for(BlobGasAmount::ZERO);
        assert!(revenue.is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", GasAmount::new(21000)), "21000");
        assert_eq!(format!("{}", GasPrice::from_gwei(50)), "50.00 gwei");
        assert_eq!(format!("{}", GasPrice::new(100)), "100 wei");
        assert_eq!(format!("{}", BlobGasAmount::new(131_072)), "131072 blob gas");
        assert_eq!(format!("{}", BlobGasPrice::new(5)), "5 wei");
    }

    #[test]
    fn test_serialization() {
        let fee = BlobGasPrice::from_gwei(1);
        let json = serde_json::to_string(&fee).unwrap();
        let deserialized: BlobGasPrice = serde_json::from_str(&json).unwrap();
        assert_eq!(fee, deserialized);
    }

    #[test]
    fn test_eip4844_constant() {
        // Verify we're using the EIP-4844 Dencun constant
        assert_eq!(DATA_GAS_PER_BLOB, 131_072);
    }
}
