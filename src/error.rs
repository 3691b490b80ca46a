// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Mistakes in what the user typed. The shell reports these and goes back to
/// the menu; anything else reaching the shell is treated as fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid amount '{0}'! Please enter a number.")]
    InvalidAmount(String),

    #[error("Invalid ID '{0}'! Please enter a valid ID number.")]
    InvalidId(String),

    #[error("Invalid year '{0}', expected a number between 1 and 9999")]
    InvalidYear(String),

    #[error("Invalid month '{0}', expected 01-12")]
    InvalidMonth(String),

    #[error("Category cannot be empty")]
    EmptyCategory,

    #[error("Unknown format: {0} (use csv|json)")]
    UnknownFormat(String),
}

/// Returns the user-facing error carried by `err`, if it is one.
pub fn as_user_error(err: &anyhow::Error) -> Option<&LedgerError> {
    err.downcast_ref::<LedgerError>()
}
