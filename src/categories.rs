// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Category labels and spending thresholds.
//!
//! A [`CategoryConfig`] starts from the built-in household categories and is
//! extended with the user's own categories loaded from the database. The
//! engine never reads global state; callers pass the config in.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{CategoryStatus, TransactionType};

/// Percentage-of-income cutoffs for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Threshold {
    pub medium: Decimal,
    pub high: Decimal,
}

impl Threshold {
    pub fn new(medium: Decimal, high: Decimal) -> Self {
        Threshold { medium, high }
    }

    pub fn status(&self, percentage: Decimal) -> CategoryStatus {
        if percentage >= self.high {
            CategoryStatus::High
        } else if percentage >= self.medium {
            CategoryStatus::Medium
        } else {
            CategoryStatus::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDef {
    pub kind: TransactionType,
    pub key: String,
    pub label: String,
    pub threshold: Option<Threshold>,
    pub builtin: bool,
}

pub const DEFAULT_MEDIUM: Decimal = Decimal::TEN;
pub const DEFAULT_HIGH: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

static BUILTIN: Lazy<Vec<CategoryDef>> = Lazy::new(|| {
    let expense = |key: &str, label: &str, medium: i64, high: i64| CategoryDef {
        kind: TransactionType::Expense,
        key: key.to_string(),
        label: label.to_string(),
        threshold: Some(Threshold::new(Decimal::from(medium), Decimal::from(high))),
        builtin: true,
    };
    let income = |key: &str, label: &str| CategoryDef {
        kind: TransactionType::Income,
        key: key.to_string(),
        label: label.to_string(),
        threshold: None,
        builtin: true,
    };
    vec![
        expense("moradia", "Moradia", 30, 40),
        expense("alimentacao", "Alimentação", 15, 25),
        expense("transporte", "Transporte", 10, 15),
        expense("saude", "Saúde", 8, 12),
        expense("educacao", "Educação", 10, 15),
        expense("lazer", "Lazer", 5, 10),
        expense("vestuario", "Vestuário", 5, 8),
        expense("contas", "Contas", 10, 15),
        expense("outros", "Outros", 5, 10),
        income("salario", "Salário"),
        income("freelance", "Freelance"),
        income("investimentos", "Investimentos"),
        income("outros", "Outros"),
    ]
});

/// Label and threshold lookup keyed by `(type, key)`.
#[derive(Debug, Clone)]
pub struct CategoryConfig {
    defs: HashMap<(TransactionType, String), CategoryDef>,
    default_threshold: Threshold,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CategoryConfig {
    pub fn builtin() -> Self {
        let defs = BUILTIN
            .iter()
            .map(|d| ((d.kind, d.key.clone()), d.clone()))
            .collect();
        CategoryConfig {
            defs,
            default_threshold: Threshold::new(DEFAULT_MEDIUM, DEFAULT_HIGH),
        }
    }

    /// Adds or replaces a category. A custom definition without thresholds
    /// keeps the built-in thresholds of the same key, if any.
    pub fn merge(&mut self, mut def: CategoryDef) {
        let id = (def.kind, def.key.clone());
        if def.threshold.is_none() {
            def.threshold = self.defs.get(&id).and_then(|d| d.threshold);
        }
        self.defs.insert(id, def);
    }

    pub fn with_default_threshold(mut self, threshold: Threshold) -> Self {
        self.default_threshold = threshold;
        self
    }

    pub fn default_threshold(&self) -> Threshold {
        self.default_threshold
    }

    pub fn label(&self, kind: TransactionType, key: &str) -> String {
        self.defs
            .get(&(kind, key.to_string()))
            .map(|d| d.label.clone())
            .unwrap_or_else(|| key.to_string())
    }

    /// Expense threshold for `key`, or the global default.
    pub fn threshold(&self, key: &str) -> Threshold {
        self.defs
            .get(&(TransactionType::Expense, key.to_string()))
            .and_then(|d| d.threshold)
            .unwrap_or(self.default_threshold)
    }

    pub fn status(&self, key: &str, percentage: Decimal) -> CategoryStatus {
        self.threshold(key).status(percentage)
    }

    pub fn contains(&self, kind: TransactionType, key: &str) -> bool {
        self.defs.contains_key(&(kind, key.to_string()))
    }

    /// All definitions of `kind`, or every definition, sorted by type then key.
    pub fn list(&self, kind: Option<TransactionType>) -> Vec<&CategoryDef> {
        let mut out: Vec<&CategoryDef> = self
            .defs
            .values()
            .filter(|d| kind.is_none_or(|k| d.kind == k))
            .collect();
        out.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.key.cmp(&b.key)));
        out
    }
}
