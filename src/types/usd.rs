// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! USD value type for financial calculations

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Represents a USD-denominated value
///
/// This type provides type safety for financial calculations involving
/// USD values, preventing confusion with other f64 values like ETH
/// amounts or raw gas quantities. It doubles as the asset price type:
/// an ETH/USD quote is itself a USD value per whole ETH.
///
/// # Examples
///
/// ```
/// use blobwatch::UsdValue;
///
/// let price = UsdValue::new(4000.0);
/// let revenue = price.for_eth(0.000131072);
/// assert_eq!(revenue.format(6), "$0.524288");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct UsdValue(f64);

impl UsdValue {
    /// Zero USD value
    pub const ZERO: Self = Self(0.0);

    /// Create a new USD value
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the inner f64 value
    pub const fn as_f64(&self) -> f64 {
        self.0
    }

    /// Check if the value is zero
    pub fn is_zero(&self) -> bool {
        self.0.abs() < f64::EPSILON
    }

    /// Interpret this value as an ETH/USD price and convert an ETH
    /// amount into USD
    ///
    /// # Examples
    ///
    /// ```
    /// use blobwatch::UsdValue;
    ///
    /// let price = UsdValue::new(3000.0);
    /// assert_eq!(price.for_eth(2.0).as_f64(), 6000.0);
    /// ```
    pub fn for_eth(&self, eth_amount: f64) -> UsdValue {
        Self(eth_amount * self.0)
    }

    /// Format as USD string with specified precision
    ///
    /// # Examples
    ///
    /// ```
    /// use blobwatch::UsdValue;
    ///
    /// let value = UsdValue::new(1234.567);
    /// assert_eq!(value.format(2), "$1234.57");
    /// ```
    pub fn format(&self, precision: usize) -> String {
        format!("${:.precision$}", self.0, precision = precision)
    }
}

impl From<f64> for UsdValue {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Add for UsdValue {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::fmt::Display for UsdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
