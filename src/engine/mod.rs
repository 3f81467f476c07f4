// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over a transaction list.
//!
//! Everything in here is a pure function of its inputs. Callers recompute on
//! every change instead of patching earlier results.

pub mod analysis;
pub mod monthly;
pub mod split;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::categories::CategoryConfig;
use crate::models::Transaction;
use crate::period::PeriodFilter;

pub use analysis::{CategoryAnalysis, TOP_EXPENSES_LIMIT, Totals};
pub use monthly::{CategoryIncrease, MonthlyBalanceSummary, MonthlyComparison};
pub use split::{PersonShare, Settlement, SplitCalculation};

/// Every derived view for one period, computed in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub totals: Totals,
    pub categories: Vec<CategoryAnalysis>,
    pub top_expenses: Vec<Transaction>,
    pub monthly_comparison: Vec<MonthlyComparison>,
    pub monthly_balance: Vec<MonthlyBalanceSummary>,
    pub biggest_increase: Option<CategoryIncrease>,
    pub split: Option<SplitCalculation>,
}

impl Overview {
    pub fn compute(
        transactions: &[Transaction],
        filter: &PeriodFilter,
        config: &CategoryConfig,
    ) -> Self {
        let filtered = filter.apply(transactions);
        tracing::debug!(
            total = transactions.len(),
            in_period = filtered.len(),
            "recomputing overview"
        );

        let monthly_comparison = monthly::monthly_comparison(&filtered);
        let biggest_increase = monthly::biggest_category_increase(&monthly_comparison, config);

        Overview {
            totals: analysis::totals(filtered.iter().copied()),
            categories: analysis::category_analysis(&filtered, config),
            top_expenses: analysis::top_expenses(&filtered, TOP_EXPENSES_LIMIT)
                .into_iter()
                .cloned()
                .collect(),
            monthly_balance: monthly::monthly_balance(&filtered),
            monthly_comparison,
            biggest_increase,
            split: split::split_calculation(&filtered),
        }
    }
}

/// `part` as a percentage of `whole`, saturating at `Decimal::MAX` when the
/// ratio does not fit. `whole` must be non-zero.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

/// `percent` percent of `amount`.
pub(crate) fn share_of(amount: Decimal, percent: Decimal) -> Decimal {
    match amount.checked_mul(percent) {
        Some(scaled) => scaled / Decimal::ONE_HUNDRED,
        None => amount.saturating_mul(percent / Decimal::ONE_HUNDRED),
    }
}
