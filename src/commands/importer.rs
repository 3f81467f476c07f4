// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, RowError};
use crate::models::{NewTransaction, Recurrence, TransactionType};
use crate::store;
use crate::utils::{parse_amount, parse_local_date, pretty_table};
use anyhow::{Context, Result, anyhow};
use csv::{ReaderBuilder, StringRecord, Trim};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let default_person = sub.get_one::<String>("person").map(|s| s.trim());
    let skip_invalid = sub.get_flag("skip_invalid");

    let text = std::fs::read_to_string(path).with_context(|| format!("Open CSV {}", path))?;
    let parsed = parse_csv(&text, default_person)?;

    if !parsed.errors.is_empty() {
        let rows = parsed
            .errors
            .iter()
            .map(|e| vec![e.line.to_string(), e.message.clone()])
            .collect();
        eprintln!("{}", pretty_table(&["Line", "Error"], rows));
        if !skip_invalid {
            return Err(LedgerError::Import(parsed.errors).into());
        }
    }

    let tx = conn.transaction()?;
    for record in &parsed.records {
        store::insert(&tx, record)?;
    }
    tx.commit()?;
    tracing::info!(
        path,
        imported = parsed.records.len(),
        skipped = parsed.errors.len(),
        "import finished"
    );
    println!(
        "Imported {} transaction(s) from {} ({} skipped)",
        parsed.records.len(),
        path,
        parsed.errors.len()
    );
    Ok(())
}

#[derive(Debug, Default)]
pub struct ParsedImport {
    pub records: Vec<NewTransaction>,
    pub errors: Vec<RowError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Date,
    Type,
    Category,
    Description,
    Amount,
    Person,
    Tag,
    Recurrence,
    Shared,
}

fn column_for(header: &str) -> Option<Column> {
    let h: String = header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            ' ' | '-' => '_',
            c => c,
        })
        .collect();
    match h.as_str() {
        "date" | "data" => Some(Column::Date),
        "type" | "tipo" => Some(Column::Type),
        "category" | "categoria" => Some(Column::Category),
        "description" | "descricao" => Some(Column::Description),
        "amount" | "valor" => Some(Column::Amount),
        "person" | "pessoa" | "responsavel" => Some(Column::Person),
        "tag" | "etiqueta" => Some(Column::Tag),
        "recurrence" | "recorrencia" => Some(Column::Recurrence),
        "shared" | "include_in_split" | "dividir" | "compartilhada" => Some(Column::Shared),
        _ => None,
    }
}

/// Picks the delimiter that occurs most in the header line.
pub fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or_default();
    [b';', b',', b'\t']
        .into_iter()
        .max_by_key(|d| header.bytes().filter(|b| b == d).count())
        .filter(|d| header.as_bytes().contains(d))
        .unwrap_or(b',')
}

fn parse_flag(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "" | "false" | "0" | "no" | "n" | "nao" | "não" => Ok(false),
        "true" | "1" | "yes" | "y" | "sim" | "s" => Ok(true),
        other => Err(anyhow!("Invalid shared flag '{}'", other)),
    }
}

/// Parses CSV text into validated records. Rows that fail validation are
/// collected with their line number instead of aborting the parse.
pub fn parse_csv(text: &str, default_person: Option<&str>) -> Result<ParsedImport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(sniff_delimiter(text))
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr.headers().context("Read CSV header")?.clone();
    let columns: Vec<Option<Column>> = headers.iter().map(column_for).collect();
    for required in [Column::Date, Column::Description, Column::Amount] {
        if !columns.contains(&Some(required)) {
            return Err(anyhow!("CSV header is missing the {:?} column", required));
        }
    }
    if default_person.is_none() && !columns.contains(&Some(Column::Person)) {
        return Err(anyhow!(
            "CSV has no person column; pass --person to assign one"
        ));
    }

    let mut out = ParsedImport::default();
    for (idx, result) in rdr.records().enumerate() {
        let line = idx + 2;
        let outcome = result
            .map_err(anyhow::Error::from)
            .and_then(|rec| parse_record(&rec, &columns, default_person));
        match outcome {
            Ok(tx) => out.records.push(tx),
            Err(e) => out.errors.push(RowError {
                line,
                message: format!("{:#}", e),
            }),
        }
    }
    Ok(out)
}

fn field<'r>(rec: &'r StringRecord, columns: &[Option<Column>], col: Column) -> Option<&'r str> {
    columns
        .iter()
        .position(|c| *c == Some(col))
        .and_then(|i| rec.get(i))
        .filter(|s| !s.is_empty())
}

fn parse_record(
    rec: &StringRecord,
    columns: &[Option<Column>],
    default_person: Option<&str>,
) -> Result<NewTransaction> {
    let get = |col: Column| field(rec, columns, col);

    let date_raw = get(Column::Date).context("date missing")?;
    let amount_raw = get(Column::Amount).context("amount missing")?;
    let date = parse_local_date(date_raw)?;
    let amount = parse_amount(amount_raw)?;
    let kind = get(Column::Type)
        .map(|s| s.parse::<TransactionType>())
        .transpose()?
        .unwrap_or(TransactionType::Expense);
    let person = get(Column::Person)
        .or(default_person)
        .context("person missing")?;

    let tx = NewTransaction {
        kind,
        category: get(Column::Category).unwrap_or("outros").to_string(),
        description: get(Column::Description).unwrap_or_default().to_string(),
        tag: get(Column::Tag).map(|s| s.to_string()),
        amount,
        person: person.to_string(),
        date,
        recurrence: get(Column::Recurrence)
            .map(|s| s.parse::<Recurrence>())
            .transpose()?
            .unwrap_or_default(),
        include_in_split: get(Column::Shared).map(parse_flag).transpose()?.unwrap_or(false),
    };
    Ok(tx.validate()?)
}
