// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence of transaction records.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::error::LedgerError;
use crate::models::{NewTransaction, Transaction};

/// Storage for transaction records. The store owns identity: ids are assigned
/// on `create` and never change.
pub trait TransactionStore {
    fn list(&self) -> Result<Vec<Transaction>, LedgerError>;
    fn get(&self, id: i64) -> Result<Transaction, LedgerError>;
    fn create(&self, tx: &NewTransaction) -> Result<Transaction, LedgerError>;
    fn update(&self, tx: &Transaction) -> Result<(), LedgerError>;
    fn delete(&self, id: i64) -> Result<(), LedgerError>;
}

const SELECT_COLUMNS: &str = "SELECT id, type, category, description, tag, amount, person, date, recurrence, include_in_split FROM transactions";

fn bad_column(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, msg.into())
}

fn from_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    let kind: String = r.get(1)?;
    let amount: String = r.get(5)?;
    let date: String = r.get(7)?;
    let recurrence: String = r.get(8)?;
    Ok(Transaction {
        id: r.get(0)?,
        kind: kind.parse().map_err(|e| bad_column(1, format!("{}", e)))?,
        category: r.get(2)?,
        description: r.get(3)?,
        tag: r.get(4)?,
        amount: amount
            .parse::<Decimal>()
            .map_err(|e| bad_column(5, format!("Invalid amount '{}': {}", amount, e)))?,
        person: r.get(6)?,
        date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| bad_column(7, format!("Invalid date '{}': {}", date, e)))?,
        recurrence: recurrence
            .parse()
            .map_err(|e| bad_column(8, format!("{}", e)))?,
        include_in_split: r.get::<_, i64>(9)? != 0,
    })
}

/// Inserts an already validated record.
pub(crate) fn insert(conn: &Connection, tx: &NewTransaction) -> Result<i64, LedgerError> {
    conn.execute(
        "INSERT INTO transactions(type, category, description, tag, amount, person, date, recurrence, include_in_split)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            tx.kind.as_str(),
            tx.category,
            tx.description,
            tx.tag,
            tx.amount.to_string(),
            tx.person,
            tx.date.to_string(),
            tx.recurrence.as_str(),
            tx.include_in_split as i64,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl TransactionStore for Connection {
    fn list(&self) -> Result<Vec<Transaction>, LedgerError> {
        let mut stmt = self.prepare(&format!("{} ORDER BY date, id", SELECT_COLUMNS))?;
        let rows = stmt.query_map([], from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn get(&self, id: i64) -> Result<Transaction, LedgerError> {
        self.query_row(
            &format!("{} WHERE id=?1", SELECT_COLUMNS),
            params![id],
            from_row,
        )
        .optional()?
        .ok_or(LedgerError::NotFound(id))
    }

    fn create(&self, tx: &NewTransaction) -> Result<Transaction, LedgerError> {
        let tx = tx.clone().validate()?;
        let id = insert(self, &tx)?;
        tracing::debug!(id, kind = %tx.kind, amount = %tx.amount, "transaction created");
        Ok(Transaction::from_new(id, tx))
    }

    fn update(&self, tx: &Transaction) -> Result<(), LedgerError> {
        let fields = tx.to_new().validate()?;
        let changed = self.execute(
            "UPDATE transactions SET type=?1, category=?2, description=?3, tag=?4, amount=?5,
             person=?6, date=?7, recurrence=?8, include_in_split=?9 WHERE id=?10",
            params![
                fields.kind.as_str(),
                fields.category,
                fields.description,
                fields.tag,
                fields.amount.to_string(),
                fields.person,
                fields.date.to_string(),
                fields.recurrence.as_str(),
                fields.include_in_split as i64,
                tx.id,
            ],
        )?;
        if changed == 0 {
            return Err(LedgerError::NotFound(tx.id));
        }
        tracing::debug!(id = tx.id, "transaction updated");
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), LedgerError> {
        let changed = self.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if changed == 0 {
            return Err(LedgerError::NotFound(id));
        }
        tracing::debug!(id, "transaction deleted");
        Ok(())
    }
}
