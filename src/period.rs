// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period filters and calendar bucketing.
//!
//! Every comparison here works on civil dates (`NaiveDate`). Nothing is ever
//! converted through UTC, so a record dated 2024-07-10 always lands in the
//! `2024-07` bucket.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Transaction;
use crate::utils::{month_end, parse_month};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodFilter {
    #[default]
    All,
    /// Inclusive bounds. An open bound matches everything on that side.
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    /// Calendar month (1-12) regardless of year.
    MonthOfYear(u32),
}

impl PeriodFilter {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        PeriodFilter::Range {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Covers one calendar month given as `YYYY-MM`.
    pub fn month(month: &str) -> Result<Self> {
        let month = parse_month(month)?;
        let start = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")?;
        Ok(Self::between(start, month_end(&month)?))
    }

    pub fn month_of_year(month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Invalid month number {}, expected 1-12", month));
        }
        Ok(PeriodFilter::MonthOfYear(month))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            PeriodFilter::All => true,
            PeriodFilter::Range { start, end } => {
                start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
            }
            PeriodFilter::MonthOfYear(m) => date.month() == m,
        }
    }

    /// Keeps the transactions inside the period, preserving input order.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|t| self.contains(t.date))
            .collect()
    }
}

pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// `2024-07` -> `Jul 2024`. Keys that don't parse are returned unchanged.
pub fn month_label(key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}-01", key), "%Y-%m-%d")
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|_| key.to_string())
}

/// Groups items by month key, oldest first.
pub fn group_by_month<'a, I>(transactions: I) -> BTreeMap<String, Vec<&'a Transaction>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut out: BTreeMap<String, Vec<&'a Transaction>> = BTreeMap::new();
    for t in transactions {
        out.entry(month_key(t.date)).or_default().push(t);
    }
    out
}

/// Keeps the `n` most recent keys of a chronologically ordered map.
pub fn trailing<V>(mut buckets: BTreeMap<String, V>, n: usize) -> BTreeMap<String, V> {
    while buckets.len() > n {
        buckets.pop_first();
    }
    buckets
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expenses: Decimal,
}

/// Income and expense totals per day, oldest first.
pub fn group_by_day<'a, I>(transactions: I) -> Vec<DailyTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut days: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let entry = days.entry(t.date).or_insert((Decimal::ZERO, Decimal::ZERO));
        if t.is_income() {
            entry.0 = entry.0.saturating_add(t.amount);
        } else {
            entry.1 = entry.1.saturating_add(t.amount);
        }
    }
    days.into_iter()
        .map(|(date, (income, expenses))| DailyTotal {
            date,
            income,
            expenses,
        })
        .collect()
}
