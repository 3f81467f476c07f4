// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

use crate::categories::{CategoryConfig, CategoryDef, Threshold};
use crate::models::TransactionType;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.twofold", "Twofold", "twofold"));

pub const DB_ENV: &str = "TWOFOLD_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("twofold.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- user-defined categories, merged over the built-in table
    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        key TEXT NOT NULL,
        label TEXT NOT NULL,
        medium TEXT,
        high TEXT,
        UNIQUE(type, key)
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        category TEXT NOT NULL,
        description TEXT NOT NULL,
        tag TEXT,
        amount TEXT NOT NULL,
        person TEXT NOT NULL,
        date TEXT NOT NULL,
        recurrence TEXT NOT NULL DEFAULT 'one-time',
        include_in_split INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    "#,
    )?;
    Ok(())
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn set_default_threshold(conn: &Connection, threshold: Threshold) -> Result<()> {
    set_setting(conn, "default_threshold_medium", &threshold.medium.to_string())?;
    set_setting(conn, "default_threshold_high", &threshold.high.to_string())?;
    Ok(())
}

fn parse_stored_decimal(s: &str, what: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid stored {} '{}'", what, s))
}

/// Built-in categories merged with the user's categories and default
/// threshold from the database.
pub fn load_category_config(conn: &Connection) -> Result<CategoryConfig> {
    let mut config = CategoryConfig::builtin();

    let medium = get_setting(conn, "default_threshold_medium")?;
    let high = get_setting(conn, "default_threshold_high")?;
    if let (Some(m), Some(h)) = (medium, high) {
        config = config.with_default_threshold(Threshold::new(
            parse_stored_decimal(&m, "threshold")?,
            parse_stored_decimal(&h, "threshold")?,
        ));
    }

    let mut stmt =
        conn.prepare("SELECT type, key, label, medium, high FROM categories ORDER BY id")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, Option<String>>(4)?,
        ))
    })?;
    for row in rows {
        let (kind, key, label, medium, high) = row?;
        let kind: TransactionType = kind.parse()?;
        let threshold = match (medium, high) {
            (Some(m), Some(h)) => Some(Threshold::new(
                parse_stored_decimal(&m, "threshold")?,
                parse_stored_decimal(&h, "threshold")?,
            )),
            _ => None,
        };
        config.merge(CategoryDef {
            kind,
            key,
            label,
            threshold,
            builtin: false,
        });
    }
    Ok(config)
}
