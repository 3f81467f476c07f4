// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid transaction: {0}")]
    Validation(String),

    #[error("Transaction {0} not found")]
    NotFound(i64),

    #[error("{}", import_message(.0))]
    Import(Vec<RowError>),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// A rejected import row. `line` is 1-based and counts the header.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

fn import_message(errors: &[RowError]) -> String {
    match errors.first() {
        Some(first) => format!(
            "Import failed: {} invalid row(s), first at line {}: {}",
            errors.len(),
            first.line,
            first.message
        ),
        None => "Import failed".to_string(),
    }
}
