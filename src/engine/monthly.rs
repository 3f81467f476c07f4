// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::categories::CategoryConfig;
use crate::engine::percent_of;
use crate::models::{Transaction, TransactionType};
use crate::period::{group_by_month, month_label, trailing};

pub const MONTHS_IN_COMPARISON: usize = 6;

/// Percent change reported when a category goes from nothing to something.
pub const NEW_SPENDING_PERCENT: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyComparison {
    pub month: String,
    pub label: String,
    pub categories: BTreeMap<String, Decimal>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBalanceSummary {
    pub month: String,
    pub label: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryIncrease {
    pub category: String,
    pub label: String,
    pub previous: Decimal,
    pub current: Decimal,
    pub change: Decimal,
    pub percent_change: Decimal,
}

/// Expense totals per category for the last six months that have expenses.
pub fn monthly_comparison(transactions: &[&Transaction]) -> Vec<MonthlyComparison> {
    let months = group_by_month(transactions.iter().copied().filter(|t| t.is_expense()));
    trailing(months, MONTHS_IN_COMPARISON)
        .into_iter()
        .map(|(month, items)| {
            let mut categories: BTreeMap<String, Decimal> = BTreeMap::new();
            let mut total = Decimal::ZERO;
            for t in items {
                let sum = categories.entry(t.category.clone()).or_insert(Decimal::ZERO);
                *sum = sum.saturating_add(t.amount);
                total = total.saturating_add(t.amount);
            }
            MonthlyComparison {
                label: month_label(&month),
                month,
                categories,
                total,
            }
        })
        .collect()
}

/// Income, expenses and balance for the last six months with any activity.
pub fn monthly_balance(transactions: &[&Transaction]) -> Vec<MonthlyBalanceSummary> {
    let months = group_by_month(transactions.iter().copied());
    trailing(months, MONTHS_IN_COMPARISON)
        .into_iter()
        .map(|(month, items)| {
            let mut income = Decimal::ZERO;
            let mut expenses = Decimal::ZERO;
            for t in items {
                match t.kind {
                    TransactionType::Income => income = income.saturating_add(t.amount),
                    TransactionType::Expense => expenses = expenses.saturating_add(t.amount),
                }
            }
            MonthlyBalanceSummary {
                label: month_label(&month),
                month,
                income,
                expenses,
                balance: income - expenses,
            }
        })
        .collect()
}

/// The category whose spending grew the most between the two latest months.
///
/// Only strictly positive changes qualify; `None` means there is nothing to
/// alert on, including when fewer than two months are present.
pub fn biggest_category_increase(
    comparison: &[MonthlyComparison],
    config: &CategoryConfig,
) -> Option<CategoryIncrease> {
    let [.., previous, current] = comparison else {
        return None;
    };

    let keys: BTreeSet<&String> = previous
        .categories
        .keys()
        .chain(current.categories.keys())
        .collect();

    let mut best: Option<CategoryIncrease> = None;
    for key in keys {
        let prev = previous.categories.get(key).copied().unwrap_or(Decimal::ZERO);
        let curr = current.categories.get(key).copied().unwrap_or(Decimal::ZERO);
        let change = curr - prev;
        if change <= Decimal::ZERO {
            continue;
        }
        if best.as_ref().is_some_and(|b| change <= b.change) {
            continue;
        }
        let percent_change = if prev.is_zero() {
            NEW_SPENDING_PERCENT
        } else {
            percent_of(change, prev)
        };
        best = Some(CategoryIncrease {
            category: key.clone(),
            label: config.label(TransactionType::Expense, key),
            previous: prev,
            current: curr,
            change,
            percent_change,
        });
    }
    best
}
