// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across blobwatch.
//!
//! This module provides newtype wrappers for the domain concepts the
//! metrics pipeline moves around:
//! - Gas quantities and gas prices (execution and blob dimensions)
//! - Wei amounts for fee products
//! - USD values for priced metrics

pub mod gas;
pub mod usd;
pub mod wei;

// Note: Public types are re-exported from lib.rs, not here
