// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use twofold::categories::CategoryConfig;
use twofold::engine::monthly::{
    MONTHS_IN_COMPARISON, biggest_category_increase, monthly_balance, monthly_comparison,
};
use twofold::models::{Recurrence, Transaction, TransactionType};

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn expense(id: i64, category: &str, amount: &str, date: &str) -> Transaction {
    Transaction {
        id,
        kind: TransactionType::Expense,
        category: category.into(),
        description: format!("{} #{}", category, id),
        tag: None,
        amount: d(amount),
        person: "Ana".into(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        recurrence: Recurrence::OneTime,
        include_in_split: false,
    }
}

fn income(id: i64, amount: &str, date: &str) -> Transaction {
    Transaction {
        kind: TransactionType::Income,
        category: "salario".into(),
        ..expense(id, "salario", amount, date)
    }
}

#[test]
fn comparison_keeps_last_six_months_in_order() {
    let items: Vec<Transaction> = (1..=8)
        .map(|m| expense(m, "alimentacao", "100", &format!("2024-{:02}-15", m)))
        .rev()
        .collect();
    let filtered: Vec<&Transaction> = items.iter().collect();
    let comparison = monthly_comparison(&filtered);

    assert_eq!(comparison.len(), MONTHS_IN_COMPARISON);
    let months: Vec<&str> = comparison.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(
        months,
        vec!["2024-03", "2024-04", "2024-05", "2024-06", "2024-07", "2024-08"]
    );
    assert_eq!(comparison[0].label, "Mar 2024");
}

#[test]
fn comparison_sums_categories_per_month() {
    let items = vec![
        expense(1, "alimentacao", "100", "2024-06-01"),
        expense(2, "alimentacao", "50.25", "2024-06-20"),
        expense(3, "lazer", "80", "2024-06-30"),
        income(4, "5000", "2024-06-05"),
        expense(5, "lazer", "10", "2024-07-01"),
    ];
    let filtered: Vec<&Transaction> = items.iter().collect();
    let comparison = monthly_comparison(&filtered);
    assert_eq!(comparison.len(), 2);
    assert_eq!(comparison[0].categories["alimentacao"], d("150.25"));
    assert_eq!(comparison[0].categories["lazer"], d("80"));
    assert_eq!(comparison[0].total, d("230.25"));
    assert!(!comparison[0].categories.contains_key("salario"));
    assert_eq!(comparison[1].total, d("10"));
}

#[test]
fn civil_dates_bucket_into_their_own_month() {
    let items = vec![
        expense(1, "lazer", "10", "2024-07-01"),
        expense(2, "lazer", "20", "2024-07-10"),
        expense(3, "lazer", "30", "2024-07-31"),
        expense(4, "lazer", "40", "2024-08-01"),
    ];
    let filtered: Vec<&Transaction> = items.iter().collect();
    let comparison = monthly_comparison(&filtered);
    assert_eq!(comparison[0].month, "2024-07");
    assert_eq!(comparison[0].total, d("60"));
    assert_eq!(comparison[1].month, "2024-08");
    assert_eq!(
        twofold::period::month_key(NaiveDate::from_ymd_opt(2024, 7, 10).unwrap()),
        "2024-07"
    );
}

#[test]
fn decrease_is_not_an_increase() {
    let items = vec![
        expense(1, "alimentacao", "100", "2024-06-10"),
        expense(2, "alimentacao", "80", "2024-07-10"),
    ];
    let filtered: Vec<&Transaction> = items.iter().collect();
    let comparison = monthly_comparison(&filtered);
    assert_ne!(
        comparison[0].categories["alimentacao"],
        comparison[1].categories["alimentacao"]
    );
    assert!(biggest_category_increase(&comparison, &CategoryConfig::builtin()).is_none());
}

#[test]
fn single_month_has_no_increase() {
    let items = vec![expense(1, "alimentacao", "100", "2024-06-10")];
    let filtered: Vec<&Transaction> = items.iter().collect();
    let comparison = monthly_comparison(&filtered);
    assert!(biggest_category_increase(&comparison, &CategoryConfig::builtin()).is_none());
}

#[test]
fn largest_positive_change_wins() {
    let items = vec![
        expense(1, "alimentacao", "400", "2024-06-10"),
        expense(2, "lazer", "100", "2024-06-11"),
        expense(3, "moradia", "1000", "2024-06-12"),
        expense(4, "alimentacao", "500", "2024-07-10"),
        expense(5, "lazer", "250", "2024-07-11"),
        expense(6, "moradia", "200", "2024-07-12"),
    ];
    let filtered: Vec<&Transaction> = items.iter().collect();
    let comparison = monthly_comparison(&filtered);
    let inc = biggest_category_increase(&comparison, &CategoryConfig::builtin()).unwrap();
    assert_eq!(inc.category, "lazer");
    assert_eq!(inc.label, "Lazer");
    assert_eq!(inc.previous, d("100"));
    assert_eq!(inc.current, d("250"));
    assert_eq!(inc.change, d("150"));
    assert_eq!(inc.percent_change, d("150"));
}

#[test]
fn new_category_reports_fixed_hundred_percent() {
    let items = vec![
        expense(1, "alimentacao", "400", "2024-06-10"),
        expense(2, "alimentacao", "390", "2024-07-10"),
        expense(3, "saude", "900", "2024-07-12"),
    ];
    let filtered: Vec<&Transaction> = items.iter().collect();
    let comparison = monthly_comparison(&filtered);
    let inc = biggest_category_increase(&comparison, &CategoryConfig::builtin()).unwrap();
    assert_eq!(inc.category, "saude");
    assert_eq!(inc.previous, Decimal::ZERO);
    assert_eq!(inc.percent_change, d("100"));
}

#[test]
fn only_the_two_latest_months_are_compared() {
    let items = vec![
        expense(1, "lazer", "10", "2024-05-10"),
        expense(2, "lazer", "900", "2024-06-10"),
        expense(3, "lazer", "900", "2024-07-10"),
    ];
    let filtered: Vec<&Transaction> = items.iter().collect();
    let comparison = monthly_comparison(&filtered);
    assert!(biggest_category_increase(&comparison, &CategoryConfig::builtin()).is_none());
}

#[test]
fn balance_summary_tracks_income_and_expenses() {
    let items = vec![
        income(1, "5000", "2024-06-05"),
        expense(2, "moradia", "2000", "2024-06-06"),
        income(3, "4800", "2024-07-05"),
        expense(4, "moradia", "5200", "2024-07-06"),
    ];
    let filtered: Vec<&Transaction> = items.iter().collect();
    let summary = monthly_balance(&filtered);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].month, "2024-06");
    assert_eq!(summary[0].balance, d("3000"));
    assert_eq!(summary[1].income, d("4800"));
    assert_eq!(summary[1].expenses, d("5200"));
    assert_eq!(summary[1].balance, d("-400"));
}
