// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the history log.

use std::path::Path;

/// Errors that can occur reading or writing the history log file.
///
/// Note that a row which fails *numeric parsing* during the revenue
/// projection is not an error: such rows are silently skipped. These
/// variants cover I/O and encoding failures on the file itself.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Failed to open or flush the log file.
    #[error("Failed to access history log at {path}")]
    Io {
        /// The log file path
        path: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode or decode a CSV record.
    #[error("Failed to read or write history records")]
    Csv(#[from] csv::Error),
}

impl HistoryError {
    /// Helper to create an `Io` error with path context.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        HistoryError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
