// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use rusqlite::Connection;
use std::io::Write;
use tempfile::NamedTempFile;
use twofold::commands::importer::{self, parse_csv, sniff_delimiter};
use twofold::models::{Recurrence, TransactionType};
use twofold::store::TransactionStore;
use twofold::{cli, db};

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

fn run_import(conn: &mut Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["twofold", "import", "transactions"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m)
    } else {
        panic!("no import subcommand");
    }
}

#[test]
fn importer_trims_cli_path_argument() {
    let mut conn = base_conn();
    let file = csv_file(
        "date,type,category,description,amount,person\n2025-02-03,expense,lazer,Cinema,45.00,Ana\n",
    );
    let padded = format!("  {}  ", file.path().to_str().unwrap());
    run_import(&mut conn, &["--path", &padded]).unwrap();
    assert_eq!(conn.list().unwrap().len(), 1);
}

#[test]
fn importer_reads_local_semicolon_format() {
    let mut conn = base_conn();
    let file = csv_file(
        "Data;Tipo;Categoria;Descrição;Valor;Pessoa;Dividir;Recorrência\n\
         10/07/2024;despesa;Moradia;Aluguel;R$ 2.500,00;Ana;sim;recorrente\n\
         05/07/2024;receita;salario;Salário;5.000,00;Ana;sim;\n",
    );
    let path = file.path().to_str().unwrap().to_string();
    run_import(&mut conn, &["--path", &path]).unwrap();

    let all = conn.list().unwrap();
    assert_eq!(all.len(), 2);
    let salary = &all[0];
    assert_eq!(salary.kind, TransactionType::Income);
    assert_eq!(salary.amount, Decimal::from(5000));
    assert!(!salary.include_in_split);

    let rent = &all[1];
    assert_eq!(rent.kind, TransactionType::Expense);
    assert_eq!(rent.category, "moradia");
    assert_eq!(rent.description, "Aluguel");
    assert_eq!(rent.amount, Decimal::from(2500));
    assert_eq!(rent.date.to_string(), "2024-07-10");
    assert_eq!(rent.recurrence, Recurrence::Recurring);
    assert!(rent.include_in_split);
}

#[test]
fn invalid_rows_abort_without_writing() {
    let mut conn = base_conn();
    let file = csv_file(
        "date,description,amount,person\n\
         2024-07-01,Rent,1000,Ana\n\
         2024-07-02,,20,Ana\n\
         2024-07-03,Refund,-5,Ana\n\
         not-a-date,Bus,4.40,Bruno\n",
    );
    let path = file.path().to_str().unwrap().to_string();
    let err = run_import(&mut conn, &["--path", &path]).unwrap_err();
    assert!(err.to_string().contains("3 invalid row(s)"), "{}", err);
    assert!(err.to_string().contains("line 3"), "{}", err);
    assert!(conn.list().unwrap().is_empty());
}

#[test]
fn skip_invalid_imports_the_rest() {
    let mut conn = base_conn();
    let file = csv_file(
        "date,description,amount,person\n\
         2024-07-01,Rent,1000,Ana\n\
         2024-07-03,Refund,-5,Ana\n\
         2024-07-04,Bus,4.40,Bruno\n",
    );
    let path = file.path().to_str().unwrap().to_string();
    run_import(&mut conn, &["--path", &path, "--skip-invalid"]).unwrap();
    let all = conn.list().unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|t| t.category == "outros"));
}

#[test]
fn default_person_fills_missing_column() {
    let parsed = parse_csv(
        "date,description,amount\n2024-07-01,Market,88.10\n",
        Some("Bruno"),
    )
    .unwrap();
    assert!(parsed.errors.is_empty());
    assert_eq!(parsed.records[0].person, "Bruno");

    let err = parse_csv("date,description,amount\n2024-07-01,Market,88.10\n", None).unwrap_err();
    assert!(err.to_string().contains("--person"));
}

#[test]
fn header_without_amount_is_rejected() {
    let err = parse_csv("date,description,person\n2024-07-01,Market,Ana\n", None).unwrap_err();
    assert!(err.to_string().contains("Amount"));
}

#[test]
fn delimiter_is_sniffed_from_header() {
    assert_eq!(sniff_delimiter("a;b;c\n1,5;2;3"), b';');
    assert_eq!(sniff_delimiter("a,b,c\n"), b',');
    assert_eq!(sniff_delimiter("a\tb\tc\n"), b'\t');
    assert_eq!(sniff_delimiter("single\n"), b',');
}

#[test]
fn byte_order_mark_on_first_header_is_ignored() {
    let parsed = parse_csv(
        "\u{feff}Data;Descrição;Valor;Pessoa\n01/07/2024;Feira;88,10;Ana\n",
        None,
    )
    .unwrap();
    assert!(parsed.errors.is_empty());
    assert_eq!(parsed.records.len(), 1);
    assert_eq!(parsed.records[0].amount, "88.10".parse::<Decimal>().unwrap());
}
