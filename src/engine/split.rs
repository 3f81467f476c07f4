// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Proportional expense splitting between two people.
//!
//! Each person is expected to carry a share of the shared pool proportional
//! to their share of the couple's combined income. The settlement is the
//! single transfer that closes the gap between what person1 actually paid
//! and their ideal share; person2's gap is always its exact negative.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use super::{percent_of, share_of};
use crate::models::Transaction;

/// Differences at or below one cent settle to nothing.
pub const SETTLEMENT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Income share assumed for each person when neither has income.
pub const EQUAL_SPLIT_PERCENT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonShare {
    pub person: String,
    pub income: Decimal,
    pub income_percentage: Decimal,
    pub ideal_share: Decimal,
    pub actual_paid: Decimal,
    pub expense_to_income_ratio: Decimal,
}

impl PersonShare {
    /// Positive when this person paid more than their share.
    pub fn difference(&self) -> Decimal {
        self.actual_paid - self.ideal_share
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub from_person: Option<String>,
    pub to_person: Option<String>,
    pub amount: Decimal,
}

impl Settlement {
    pub fn balanced() -> Self {
        Settlement {
            from_person: None,
            to_person: None,
            amount: Decimal::ZERO,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.from_person.is_none() && self.to_person.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitCalculation {
    pub person1: PersonShare,
    pub person2: PersonShare,
    pub total_income: Decimal,
    pub shared_pool: Decimal,
    pub settlement: Settlement,
}

/// Distinct people in lexicographic order.
pub fn participants<'a>(transactions: &[&'a Transaction]) -> Vec<&'a str> {
    transactions
        .iter()
        .copied()
        .map(|t| t.person.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Computes the split for the first two participants in lexicographic order.
///
/// Returns `None` with fewer than two participants. Anyone beyond the first
/// two is ignored, but shared expenses they paid still count in the pool.
pub fn split_calculation(transactions: &[&Transaction]) -> Option<SplitCalculation> {
    let people = participants(transactions);
    let &[name1, name2, ..] = people.as_slice() else {
        return None;
    };

    let income_of = |person: &str| -> Decimal {
        transactions
            .iter()
            .filter(|t| t.is_income() && t.person == person)
            .map(|t| t.amount)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    };
    let paid_by = |person: &str| -> Decimal {
        transactions
            .iter()
            .filter(|t| t.is_shared() && t.person == person)
            .map(|t| t.amount)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    };

    let income1 = income_of(name1);
    let income2 = income_of(name2);
    let total_income = income1.saturating_add(income2);

    let (pct1, pct2) = if total_income.is_zero() {
        (EQUAL_SPLIT_PERCENT, EQUAL_SPLIT_PERCENT)
    } else {
        (
            percent_of(income1, total_income),
            percent_of(income2, total_income),
        )
    };

    let shared_pool: Decimal = transactions
        .iter()
        .filter(|t| t.is_shared())
        .map(|t| t.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add);

    let share = |person: &str, income: Decimal, pct: Decimal| {
        let actual_paid = paid_by(person);
        PersonShare {
            person: person.to_string(),
            income,
            income_percentage: pct,
            ideal_share: share_of(shared_pool, pct),
            actual_paid,
            expense_to_income_ratio: if income.is_zero() {
                Decimal::ZERO
            } else {
                percent_of(actual_paid, income)
            },
        }
    };

    let person1 = share(name1, income1, pct1);
    let person2 = share(name2, income2, pct2);
    let settlement = settle(&person1, &person2);

    Some(SplitCalculation {
        person1,
        person2,
        total_income,
        shared_pool,
        settlement,
    })
}

fn settle(person1: &PersonShare, person2: &PersonShare) -> Settlement {
    let difference = person1.difference();
    if difference.abs() <= SETTLEMENT_TOLERANCE {
        Settlement::balanced()
    } else if difference > Decimal::ZERO {
        Settlement {
            from_person: Some(person2.person.clone()),
            to_person: Some(person1.person.clone()),
            amount: difference,
        }
    } else {
        Settlement {
            from_person: Some(person1.person.clone()),
            to_person: Some(person2.person.clone()),
            amount: -difference,
        }
    }
}
