// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "receita" | "entrada" => Ok(TransactionType::Income),
            "expense" | "despesa" | "saida" | "saída" => Ok(TransactionType::Expense),
            other => Err(LedgerError::Validation(format!(
                "Unknown transaction type '{}', expected income|expense",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recurrence {
    #[default]
    OneTime,
    Recurring,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::OneTime => "one-time",
            Recurrence::Recurring => "recurring",
        }
    }
}

impl FromStr for Recurrence {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "one-time" | "onetime" | "unica" | "única" => Ok(Recurrence::OneTime),
            "recurring" | "recorrente" | "fixa" => Ok(Recurrence::Recurring),
            other => Err(LedgerError::Validation(format!(
                "Unknown recurrence '{}', expected one-time|recurring",
                other
            ))),
        }
    }
}

/// A stored income or expense record. Identity is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub description: String,
    pub tag: Option<String>,
    pub amount: Decimal,
    pub person: String,
    pub date: NaiveDate,
    pub recurrence: Recurrence,
    pub include_in_split: bool,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Expenses flagged for the shared pool. Always false for income.
    pub fn is_shared(&self) -> bool {
        self.is_expense() && self.include_in_split
    }

    pub fn from_new(id: i64, new: NewTransaction) -> Self {
        Transaction {
            id,
            kind: new.kind,
            category: new.category,
            description: new.description,
            tag: new.tag,
            amount: new.amount,
            person: new.person,
            date: new.date,
            recurrence: new.recurrence,
            include_in_split: new.include_in_split,
        }
    }

    pub fn to_new(&self) -> NewTransaction {
        NewTransaction {
            kind: self.kind,
            category: self.category.clone(),
            description: self.description.clone(),
            tag: self.tag.clone(),
            amount: self.amount,
            person: self.person.clone(),
            date: self.date,
            recurrence: self.recurrence,
            include_in_split: self.include_in_split,
        }
    }
}

/// A transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub description: String,
    pub tag: Option<String>,
    pub amount: Decimal,
    pub person: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub include_in_split: bool,
}

/// Largest accepted amount, one trillion.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

impl NewTransaction {
    /// Checks the record invariants and returns the normalized record.
    ///
    /// Text fields are trimmed, category keys are lowercased, empty tags
    /// become `None`, and income records never carry a tag or the shared flag.
    pub fn validate(mut self) -> Result<Self, LedgerError> {
        self.description = self.description.trim().to_string();
        self.category = self.category.trim().to_lowercase();
        self.person = self.person.trim().to_string();
        self.tag = self
            .tag
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        if self.description.is_empty() {
            return Err(LedgerError::Validation("description must not be empty".into()));
        }
        if self.category.is_empty() {
            return Err(LedgerError::Validation("category must not be empty".into()));
        }
        if self.person.is_empty() {
            return Err(LedgerError::Validation("person must not be empty".into()));
        }
        if self.amount < Decimal::ZERO {
            return Err(LedgerError::Validation(format!(
                "amount must not be negative (got {})",
                self.amount
            )));
        }
        if self.amount > MAX_AMOUNT {
            return Err(LedgerError::Validation(format!(
                "amount must not exceed {} (got {})",
                MAX_AMOUNT, self.amount
            )));
        }
        if self.kind == TransactionType::Income {
            self.include_in_split = false;
            self.tag = None;
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    Low,
    Medium,
    High,
}

impl CategoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryStatus::Low => "low",
            CategoryStatus::Medium => "medium",
            CategoryStatus::High => "high",
        }
    }
}
