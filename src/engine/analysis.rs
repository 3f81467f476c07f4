// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::percent_of;
use crate::categories::CategoryConfig;
use crate::models::{CategoryStatus, Transaction, TransactionType};

pub const TOP_EXPENSES_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub shared_expenses: Decimal,
}

pub fn totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    let mut shared_expenses = Decimal::ZERO;
    for t in transactions {
        match t.kind {
            TransactionType::Income => income = income.saturating_add(t.amount),
            TransactionType::Expense => {
                expenses = expenses.saturating_add(t.amount);
                if t.include_in_split {
                    shared_expenses = shared_expenses.saturating_add(t.amount);
                }
            }
        }
    }
    Totals {
        income,
        expenses,
        balance: income - expenses,
        shared_expenses,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAnalysis {
    pub category: String,
    pub label: String,
    pub total: Decimal,
    pub percentage: Decimal,
    pub status: CategoryStatus,
}

/// Expense burden per category, measured against total income.
///
/// With no income every category reports 0% and `low`: burden can't be
/// assessed without income, so nothing is flagged.
pub fn category_analysis(
    transactions: &[&Transaction],
    config: &CategoryConfig,
) -> Vec<CategoryAnalysis> {
    let total_income: Decimal = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add);

    let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        let sum = by_category.entry(t.category.as_str()).or_insert(Decimal::ZERO);
        *sum = sum.saturating_add(t.amount);
    }

    let mut out: Vec<CategoryAnalysis> = by_category
        .into_iter()
        .map(|(category, total)| {
            let percentage = if total_income > Decimal::ZERO {
                percent_of(total, total_income)
            } else {
                Decimal::ZERO
            };
            CategoryAnalysis {
                category: category.to_string(),
                label: config.label(TransactionType::Expense, category),
                total,
                percentage,
                status: config.status(category, percentage),
            }
        })
        .collect();

    // BTreeMap order already breaks the remaining ties by key.
    out.sort_by(|a, b| {
        b.percentage
            .cmp(&a.percentage)
            .then_with(|| b.total.cmp(&a.total))
    });
    out
}

/// The largest expenses, biggest first. Equal amounts keep input order.
pub fn top_expenses<'a>(transactions: &[&'a Transaction], limit: usize) -> Vec<&'a Transaction> {
    let mut expenses: Vec<&Transaction> = transactions
        .iter()
        .copied()
        .filter(|t| t.is_expense())
        .collect();
    expenses.sort_by(|a, b| b.amount.cmp(&a.amount));
    expenses.truncate(limit);
    expenses
}
