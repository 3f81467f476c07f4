// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod categories;
pub mod reports;
pub mod importer;
pub mod exporter;

use crate::period::PeriodFilter;
use crate::utils::parse_date;
use anyhow::Result;

/// Reads `--from/--to`, `--month` or `--month-of-year`. No flags means all
/// transactions.
pub fn period_from_args(sub: &clap::ArgMatches) -> Result<PeriodFilter> {
    if let Some(month) = sub.get_one::<String>("month") {
        return PeriodFilter::month(month.trim());
    }
    if let Some(m) = sub.get_one::<u32>("month_of_year") {
        return PeriodFilter::month_of_year(*m);
    }
    let start = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s.trim()))
        .transpose()?;
    let end = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s.trim()))
        .transpose()?;
    if start.is_none() && end.is_none() {
        return Ok(PeriodFilter::All);
    }
    Ok(PeriodFilter::Range { start, end })
}
