// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::Threshold;
use crate::db::{load_category_config, set_default_threshold};
use crate::models::TransactionType;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let kind = sub.get_one::<String>("type").unwrap();
            let key = sub.get_one::<String>("key").unwrap().trim();
            let removed = conn.execute(
                "DELETE FROM categories WHERE type=?1 AND key=?2",
                params![kind, key],
            )?;
            if removed == 0 {
                return Err(anyhow!("No custom {} category '{}'", kind, key));
            }
            println!("Removed category '{}'", key);
        }
        Some(("default", sub)) => {
            let threshold = parse_threshold(
                sub.get_one::<String>("medium").unwrap(),
                sub.get_one::<String>("high").unwrap(),
            )?;
            set_default_threshold(conn, threshold)?;
            println!(
                "Default threshold set to medium {}% / high {}%",
                threshold.medium, threshold.high
            );
        }
        _ => {}
    }
    Ok(())
}

fn parse_threshold(medium: &str, high: &str) -> Result<Threshold> {
    let medium = parse_decimal(medium.trim())?;
    let high = parse_decimal(high.trim())?;
    if medium < Decimal::ZERO || high < medium {
        return Err(anyhow!(
            "Invalid threshold: expected 0 <= medium <= high, got {} / {}",
            medium,
            high
        ));
    }
    Ok(Threshold::new(medium, high))
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;
    let key = sub.get_one::<String>("key").unwrap().trim().to_lowercase();
    let label = sub.get_one::<String>("label").unwrap().trim().to_string();
    if key.is_empty() || label.is_empty() {
        return Err(anyhow!("Category key and label must not be empty"));
    }
    let threshold = match (
        sub.get_one::<String>("medium"),
        sub.get_one::<String>("high"),
    ) {
        (Some(m), Some(h)) => Some(parse_threshold(m, h)?),
        _ => None,
    };
    if threshold.is_some() && kind == TransactionType::Income {
        return Err(anyhow!("Thresholds only apply to expense categories"));
    }

    conn.execute(
        "INSERT INTO categories(type, key, label, medium, high) VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(type, key) DO UPDATE SET label=excluded.label, medium=excluded.medium, high=excluded.high",
        params![
            kind.as_str(),
            key,
            label,
            threshold.map(|t| t.medium.to_string()),
            threshold.map(|t| t.high.to_string()),
        ],
    )?;
    println!("Saved {} category '{}' ({})", kind, key, label);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()?;
    let config = load_category_config(conn)?;
    let defs = config.list(kind);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &defs)? {
        let fallback = config.default_threshold();
        let rows = defs
            .iter()
            .map(|d| {
                let (medium, high) = match (d.kind, d.threshold) {
                    (TransactionType::Income, _) => (String::new(), String::new()),
                    (_, Some(t)) => (format!("{}%", t.medium), format!("{}%", t.high)),
                    (_, None) => (
                        format!("{}% (default)", fallback.medium),
                        format!("{}% (default)", fallback.high),
                    ),
                };
                vec![
                    d.kind.to_string(),
                    d.key.clone(),
                    d.label.clone(),
                    medium,
                    high,
                    if d.builtin { "built-in".into() } else { "custom".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Type", "Key", "Label", "Medium", "High", "Source"], rows)
        );
    }
    Ok(())
}
