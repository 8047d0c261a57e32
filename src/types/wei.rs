// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for native currency amounts
//!
//! This module provides a newtype wrapper for native currency (ETH) in
//! wei, used for fee products that can exceed the range of primitive
//! integers.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Wei per ETH (10^18), exactly representable in f64
const WEI_PER_ETH: f64 = 1e18;

/// Represents an amount of native currency (ETH) in wei
///
/// Fee products (price × gas) are carried as U256 so the exact integer
/// value survives until the final lossy conversion for display or
/// persistence.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use blobwatch::WeiAmount;
///
/// let fee = WeiAmount::new(U256::from(1_000_000_000_000_000u64)); // 0.001 ETH
/// let eth = fee.to_ether();
/// assert!((eth - 0.001).abs() < 0.0000001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WeiAmount(U256);

impl WeiAmount {
    /// Zero wei amount
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a new wei amount
    pub const fn new(wei: U256) -> Self {
        Self(wei)
    }

    /// Get the inner U256 value (in wei)
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Convert to ether (1 ETH = 10^18 wei)
    ///
    /// Returns f64 for display and metrics purposes. This is a lossy
    /// conversion.
    ///
    /// # Examples
    ///
    /// ```
    /// use alloy_primitives::U256;
    /// use blobwatch::WeiAmount;
    ///
    /// let amount = WeiAmount::new(U256::from(1_500_000_000_000_000_000u128)); // 1.5 ETH
    /// let eth = amount.to_ether();
    /// assert!((eth - 1.5).abs() < 0.0001);
    /// ```
    pub fn to_ether(&self) -> f64 {
        self.0.to_string().parse::<f64>().unwrap_or(0.0) / WEI_PER_ETH
    }
}

impl From<u64> for WeiAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for WeiAmount {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for WeiAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl Add for WeiAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::fmt::Display for WeiAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let eth = self.to_ether();
        if eth < 0.000001 {
            write!(f, "{} wei", self.0)
        } else {
            write!(f, "{:.6} ETH", eth)
        }
    }
}
