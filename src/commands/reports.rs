// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::CategoryConfig;
use crate::commands::period_from_args;
use crate::db::load_category_config;
use crate::engine::split::participants;
use crate::engine::{
    CategoryIncrease, MonthlyBalanceSummary, MonthlyComparison, Overview, SplitCalculation,
    analysis, monthly, split,
};
use crate::models::Transaction;
use crate::period::{PeriodFilter, group_by_day};
use crate::store::TransactionStore;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use std::collections::BTreeSet;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let Some((name, sub)) = m.subcommand() else {
        return Ok(());
    };
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ctx = ReportContext::load(conn, sub)?;
    let filtered = ctx.filter.apply(&ctx.transactions);

    match name {
        "summary" => {
            let totals = analysis::totals(filtered.iter().copied());
            if !maybe_print_json(json_flag, jsonl_flag, &totals)? {
                let rows = vec![
                    vec!["Income".into(), fmt_money(&totals.income)],
                    vec!["Expenses".into(), fmt_money(&totals.expenses)],
                    vec!["Balance".into(), fmt_money(&totals.balance)],
                    vec!["Shared expenses".into(), fmt_money(&totals.shared_expenses)],
                ];
                println!("{}", pretty_table(&["", "Amount"], rows));
            }
        }
        "categories" => {
            let data = analysis::category_analysis(&filtered, &ctx.config);
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                let rows = data
                    .iter()
                    .map(|c| {
                        vec![
                            c.label.clone(),
                            fmt_money(&c.total),
                            fmt_percent(&c.percentage),
                            c.status.as_str().to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Category", "Spent", "% of income", "Status"], rows)
                );
            }
        }
        "top" => {
            let limit = sub
                .get_one::<usize>("limit")
                .copied()
                .unwrap_or(analysis::TOP_EXPENSES_LIMIT);
            let data = analysis::top_expenses(&filtered, limit);
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                println!("{}", transactions_table(&data, &ctx.config));
            }
        }
        "monthly" => {
            let data = monthly::monthly_comparison(&filtered);
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                print_monthly_comparison(&data, &ctx.config);
            }
        }
        "balance" => {
            let data = monthly::monthly_balance(&filtered);
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                print_monthly_balance(&data);
            }
        }
        "increase" => {
            let comparison = monthly::monthly_comparison(&filtered);
            let data = monthly::biggest_category_increase(&comparison, &ctx.config);
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                print_increase(data.as_ref());
            }
        }
        "split" => {
            let data = split::split_calculation(&filtered);
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                print_split(data.as_ref(), &filtered);
            }
        }
        "daily" => {
            let data = group_by_day(filtered.iter().copied());
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                let rows = data
                    .iter()
                    .map(|d| {
                        vec![
                            d.date.to_string(),
                            fmt_money(&d.income),
                            fmt_money(&d.expenses),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Date", "Income", "Expenses"], rows));
            }
        }
        "overview" => {
            let overview = ctx.overview();
            if !maybe_print_json(json_flag, jsonl_flag, &overview)? {
                print_overview(&overview, &filtered, &ctx.config);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Everything a report needs: the full list, the period and the categories.
pub struct ReportContext {
    pub transactions: Vec<Transaction>,
    pub filter: PeriodFilter,
    pub config: CategoryConfig,
}

impl ReportContext {
    pub fn load(conn: &Connection, sub: &clap::ArgMatches) -> Result<Self> {
        Ok(ReportContext {
            transactions: conn.list()?,
            filter: period_from_args(sub)?,
            config: load_category_config(conn)?,
        })
    }

    pub fn overview(&self) -> Overview {
        Overview::compute(&self.transactions, &self.filter, &self.config)
    }
}

fn transactions_table(data: &[&Transaction], config: &CategoryConfig) -> comfy_table::Table {
    let rows = data
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.description.clone(),
                config.label(t.kind, &t.category),
                fmt_money(&t.amount),
                t.person.clone(),
            ]
        })
        .collect();
    pretty_table(&["Date", "Description", "Category", "Amount", "Person"], rows)
}

fn print_monthly_comparison(data: &[MonthlyComparison], config: &CategoryConfig) {
    let keys: BTreeSet<&String> = data.iter().flat_map(|m| m.categories.keys()).collect();
    let mut headers = vec!["Category".to_string()];
    headers.extend(data.iter().map(|m| m.label.clone()));
    let mut rows: Vec<Vec<String>> = keys
        .iter()
        .map(|k| {
            let mut row = vec![config.label(crate::models::TransactionType::Expense, k)];
            row.extend(data.iter().map(|m| {
                m.categories
                    .get(*k)
                    .map(fmt_money)
                    .unwrap_or_else(|| "-".into())
            }));
            row
        })
        .collect();
    let mut total = vec!["Total".to_string()];
    total.extend(data.iter().map(|m| fmt_money(&m.total)));
    rows.push(total);
    let headers: Vec<&str> = headers.iter().map(|s| s.as_str()).collect();
    println!("{}", pretty_table(&headers, rows));
}

fn print_monthly_balance(data: &[MonthlyBalanceSummary]) {
    let rows = data
        .iter()
        .map(|m| {
            vec![
                m.label.clone(),
                fmt_money(&m.income),
                fmt_money(&m.expenses),
                fmt_money(&m.balance),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Balance"], rows)
    );
}

fn print_increase(data: Option<&CategoryIncrease>) {
    match data {
        Some(inc) => println!(
            "Biggest increase: {} went from {} to {} (+{}, {})",
            inc.label,
            fmt_money(&inc.previous),
            fmt_money(&inc.current),
            fmt_money(&inc.change),
            fmt_percent(&inc.percent_change)
        ),
        None => println!("No category increased month over month"),
    }
}

fn print_split(data: Option<&SplitCalculation>, filtered: &[&Transaction]) {
    let Some(split) = data else {
        println!("Split needs transactions from at least two people");
        return;
    };
    let people = participants(filtered);
    if people.len() > 2 {
        tracing::warn!(
            ignored = ?&people[2..],
            "only the first two people take part in the split"
        );
    }
    let row = |p: &crate::engine::PersonShare| {
        vec![
            p.person.clone(),
            fmt_money(&p.income),
            fmt_percent(&p.income_percentage),
            fmt_money(&p.ideal_share),
            fmt_money(&p.actual_paid),
            fmt_percent(&p.expense_to_income_ratio),
        ]
    };
    println!(
        "{}",
        pretty_table(
            &[
                "Person",
                "Income",
                "% of income",
                "Ideal share",
                "Paid",
                "Paid / income"
            ],
            vec![row(&split.person1), row(&split.person2)],
        )
    );
    println!("Shared pool: {}", fmt_money(&split.shared_pool));
    match (&split.settlement.from_person, &split.settlement.to_person) {
        (Some(from), Some(to)) => println!(
            "Settlement: {} pays {} {}",
            from,
            to,
            fmt_money(&split.settlement.amount)
        ),
        _ => println!("Settlement: balanced, nothing to transfer"),
    }
}

fn print_overview(overview: &Overview, filtered: &[&Transaction], config: &CategoryConfig) {
    let t = &overview.totals;
    println!(
        "Income {}  Expenses {}  Balance {}",
        fmt_money(&t.income),
        fmt_money(&t.expenses),
        fmt_money(&t.balance)
    );
    let rows = overview
        .categories
        .iter()
        .map(|c| {
            vec![
                c.label.clone(),
                fmt_money(&c.total),
                fmt_percent(&c.percentage),
                c.status.as_str().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Spent", "% of income", "Status"], rows)
    );
    let top: Vec<&Transaction> = overview.top_expenses.iter().collect();
    println!("{}", transactions_table(&top, config));
    print_monthly_balance(&overview.monthly_balance);
    print_increase(overview.biggest_increase.as_ref());
    print_split(overview.split.as_ref(), filtered);
}
