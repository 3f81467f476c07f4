// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::period_from_args;
use crate::db::load_category_config;
use crate::models::{NewTransaction, Recurrence, TransactionType};
use crate::store::TransactionStore;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, parse_local_date, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_type(sub: &clap::ArgMatches) -> Result<Option<TransactionType>> {
    Ok(sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()?)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_local_date(sub.get_one::<String>("date").unwrap())?;
    let kind = parse_type(sub)?.unwrap_or(TransactionType::Expense);
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;

    let new = NewTransaction {
        kind,
        category: sub.get_one::<String>("category").unwrap().to_string(),
        description: sub.get_one::<String>("description").unwrap().to_string(),
        tag: sub.get_one::<String>("tag").map(|s| s.to_string()),
        amount,
        person: sub.get_one::<String>("person").unwrap().to_string(),
        date,
        recurrence: if sub.get_flag("recurring") {
            Recurrence::Recurring
        } else {
            Recurrence::OneTime
        },
        include_in_split: sub.get_flag("shared"),
    };
    let config = load_category_config(conn)?;
    if !config.contains(new.kind, &new.category.trim().to_lowercase()) {
        tracing::info!(category = %new.category, "recording with a category outside the configured set");
    }
    let tx = conn.create(&new)?;
    println!(
        "Recorded {} #{} of {} on {} for {} ({})",
        tx.kind,
        tx.id,
        fmt_money(&tx.amount),
        tx.date,
        tx.person,
        config.label(tx.kind, &tx.category)
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut tx = conn.get(id)?;

    if let Some(d) = sub.get_one::<String>("date") {
        tx.date = parse_local_date(d)?;
    }
    if let Some(kind) = parse_type(sub)? {
        tx.kind = kind;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        tx.category = c.to_string();
    }
    if let Some(d) = sub.get_one::<String>("description") {
        tx.description = d.to_string();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        tx.amount = parse_decimal(a.trim())?;
    }
    if let Some(p) = sub.get_one::<String>("person") {
        tx.person = p.to_string();
    }
    if let Some(t) = sub.get_one::<String>("tag") {
        // an empty --tag clears it
        tx.tag = Some(t.trim().to_string()).filter(|t| !t.is_empty());
    }
    if let Some(r) = sub.get_one::<String>("recurrence") {
        tx.recurrence = r.parse()?;
    }
    if let Some(s) = sub.get_one::<bool>("shared") {
        tx.include_in_split = *s;
    }

    conn.update(&tx)
        .with_context(|| format!("Update transaction {}", id))?;
    println!("Updated transaction #{}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    conn.delete(id)?;
    println!("Removed transaction #{}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.person.clone(),
                    r.tag.clone(),
                    if r.shared { "yes".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Date",
                    "Type",
                    "Category",
                    "Description",
                    "Amount",
                    "Person",
                    "Tag",
                    "Shared"
                ],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub person: String,
    pub tag: String,
    pub recurrence: String,
    pub shared: bool,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let period = period_from_args(sub)?;
    let kind = parse_type(sub)?;
    let person = sub.get_one::<String>("person").map(|s| s.trim());
    let config = load_category_config(conn)?;

    let all = conn.list()?;
    let mut data: Vec<TransactionRow> = period
        .apply(&all)
        .into_iter()
        .rev()
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| person.is_none_or(|p| t.person == p))
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            category: config.label(t.kind, &t.category),
            description: t.description.clone(),
            amount: fmt_money(&t.amount),
            person: t.person.clone(),
            tag: t.tag.clone().unwrap_or_default(),
            recurrence: t.recurrence.as_str().to_string(),
            shared: t.include_in_split,
        })
        .collect();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
