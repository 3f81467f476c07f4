// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use twofold::categories::{CategoryConfig, CategoryDef, Threshold};
use twofold::engine::analysis::{category_analysis, top_expenses, totals};
use twofold::engine::{Overview, TOP_EXPENSES_LIMIT};
use twofold::models::{CategoryStatus, Recurrence, Transaction, TransactionType};
use twofold::period::PeriodFilter;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(id: i64, kind: TransactionType, category: &str, amount: &str, date: &str) -> Transaction {
    Transaction {
        id,
        kind,
        category: category.into(),
        description: format!("item {}", id),
        tag: None,
        amount: d(amount),
        person: if id % 2 == 0 { "Ana".into() } else { "Bruno".into() },
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        recurrence: Recurrence::OneTime,
        include_in_split: kind == TransactionType::Expense && id % 3 == 0,
    }
}

#[test]
fn totals_sum_by_type() {
    let items = vec![
        tx(1, TransactionType::Income, "salario", "4000", "2024-07-01"),
        tx(2, TransactionType::Expense, "moradia", "1500", "2024-07-02"),
        tx(3, TransactionType::Expense, "lazer", "250.50", "2024-07-03"),
    ];
    let t = totals(&items);
    assert_eq!(t.income, d("4000"));
    assert_eq!(t.expenses, d("1750.50"));
    assert_eq!(t.balance, d("2249.50"));
    assert_eq!(t.shared_expenses, d("250.50"));
}

#[test]
fn category_percentages_and_status() {
    let items = vec![
        tx(1, TransactionType::Income, "salario", "10000", "2024-07-01"),
        tx(2, TransactionType::Expense, "moradia", "3500", "2024-07-02"),
        tx(4, TransactionType::Expense, "alimentacao", "1000", "2024-07-03"),
        tx(5, TransactionType::Expense, "alimentacao", "600", "2024-07-04"),
        tx(7, TransactionType::Expense, "pets", "2500", "2024-07-05"),
    ];
    let filtered: Vec<&Transaction> = items.iter().collect();
    let config = CategoryConfig::builtin();
    let analysis = category_analysis(&filtered, &config);

    let keys: Vec<&str> = analysis.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(keys, vec!["moradia", "pets", "alimentacao"]);

    assert_eq!(analysis[0].percentage, d("35"));
    assert_eq!(analysis[0].label, "Moradia");
    assert_eq!(analysis[0].status, CategoryStatus::Medium);

    // unknown category: raw key as label, default 10/20 threshold
    assert_eq!(analysis[1].label, "pets");
    assert_eq!(analysis[1].percentage, d("25"));
    assert_eq!(analysis[1].status, CategoryStatus::High);

    assert_eq!(analysis[2].total, d("1600"));
    assert_eq!(analysis[2].percentage, d("16"));
    assert_eq!(analysis[2].status, CategoryStatus::Medium);
}

#[test]
fn zero_income_reports_everything_low() {
    let items = vec![
        tx(2, TransactionType::Expense, "moradia", "3500", "2024-07-02"),
        tx(4, TransactionType::Expense, "lazer", "9000", "2024-07-03"),
    ];
    let filtered: Vec<&Transaction> = items.iter().collect();
    let analysis = category_analysis(&filtered, &CategoryConfig::builtin());
    assert_eq!(analysis.len(), 2);
    for c in &analysis {
        assert_eq!(c.percentage, Decimal::ZERO);
        assert_eq!(c.status, CategoryStatus::Low);
    }
    // equal percentages fall back to the larger total first
    assert_eq!(analysis[0].category, "lazer");
}

#[test]
fn status_never_moves_backwards_as_percentage_grows() {
    let mut config = CategoryConfig::builtin();
    config.merge(CategoryDef {
        kind: TransactionType::Expense,
        key: "pets".into(),
        label: "Pets".into(),
        threshold: Some(Threshold::new(d("7.5"), d("12"))),
        builtin: false,
    });
    for key in ["moradia", "pets", "unknown"] {
        let mut last = CategoryStatus::Low;
        for step in 0..=200 {
            let pct = Decimal::new(step, 1) * Decimal::from(3);
            let status = config.status(key, pct);
            assert!(status >= last, "{} regressed at {}%", key, pct);
            last = status;
        }
        assert_eq!(last, CategoryStatus::High);
    }
    assert_eq!(config.status("pets", d("7.5")), CategoryStatus::Medium);
    assert_eq!(config.status("pets", d("7.49")), CategoryStatus::Low);
    assert_eq!(config.status("pets", d("12")), CategoryStatus::High);
}

#[test]
fn top_expenses_keeps_ten_largest() {
    let mut items: Vec<Transaction> = (1..=10)
        .map(|i| {
            tx(
                i,
                TransactionType::Expense,
                "outros",
                &(i * 10).to_string(),
                "2024-07-10",
            )
        })
        .collect();
    items.push(tx(99, TransactionType::Income, "salario", "99999", "2024-07-10"));

    let filtered: Vec<&Transaction> = items.iter().collect();
    let top = top_expenses(&filtered, TOP_EXPENSES_LIMIT);
    assert_eq!(top.len(), 10);
    let amounts: Vec<Decimal> = top.iter().map(|t| t.amount).collect();
    let expected: Vec<Decimal> = (1..=10).rev().map(|i| Decimal::from(i * 10)).collect();
    assert_eq!(amounts, expected);

    items.push(tx(11, TransactionType::Expense, "outros", "5", "2024-07-11"));
    let filtered: Vec<&Transaction> = items.iter().collect();
    let top = top_expenses(&filtered, TOP_EXPENSES_LIMIT);
    assert_eq!(top.len(), 10);
    assert!(top.iter().all(|t| t.id != 11));
    assert!(top.iter().all(|t| t.is_expense()));
}

#[test]
fn top_expenses_keeps_input_order_on_ties() {
    let items = vec![
        tx(1, TransactionType::Expense, "outros", "50", "2024-07-01"),
        tx(2, TransactionType::Expense, "outros", "80", "2024-07-02"),
        tx(3, TransactionType::Expense, "outros", "50", "2024-07-03"),
    ];
    let filtered: Vec<&Transaction> = items.iter().collect();
    let ids: Vec<i64> = top_expenses(&filtered, 10).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 1, 3]);
}

#[test]
fn overview_is_idempotent() {
    let items = vec![
        tx(1, TransactionType::Income, "salario", "5000", "2024-05-01"),
        tx(2, TransactionType::Income, "salario", "4500", "2024-06-01"),
        tx(3, TransactionType::Expense, "moradia", "2500", "2024-06-05"),
        tx(4, TransactionType::Expense, "alimentacao", "700", "2024-07-09"),
        tx(6, TransactionType::Expense, "lazer", "120", "2024-07-20"),
    ];
    let config = CategoryConfig::builtin();
    let first = Overview::compute(&items, &PeriodFilter::All, &config);
    let second = Overview::compute(&items, &PeriodFilter::All, &config);
    assert_eq!(first, second);
    assert!(first.split.is_some());
    assert_eq!(first.monthly_balance.len(), 3);
}

#[test]
fn overview_applies_period_before_aggregating() {
    let items = vec![
        tx(1, TransactionType::Income, "salario", "5000", "2024-06-01"),
        tx(2, TransactionType::Expense, "moradia", "2500", "2024-06-05"),
        tx(4, TransactionType::Expense, "alimentacao", "700", "2024-07-09"),
    ];
    let filter = PeriodFilter::month("2024-07").unwrap();
    let overview = Overview::compute(&items, &filter, &CategoryConfig::builtin());
    assert_eq!(overview.totals.income, Decimal::ZERO);
    assert_eq!(overview.totals.expenses, d("700"));
    assert_eq!(overview.top_expenses.len(), 1);
    assert_eq!(overview.categories[0].percentage, Decimal::ZERO);
    // only Ana remains in July
    assert!(overview.split.is_none());
}

#[test]
fn huge_amounts_saturate_instead_of_overflowing() {
    let items = vec![
        tx(1, TransactionType::Income, "salario", "0.01", "2024-07-01"),
        tx(2, TransactionType::Expense, "moradia", "1000000000000000000000000000", "2024-07-02"),
        tx(4, TransactionType::Expense, "moradia", "79000000000000000000000000000", "2024-07-03"),
    ];
    let refs: Vec<&Transaction> = items.iter().collect();
    let rows = category_analysis(&refs, &CategoryConfig::builtin());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total, Decimal::MAX);
    assert_eq!(rows[0].percentage, Decimal::MAX);
    assert_eq!(rows[0].status, CategoryStatus::High);

    let overview = Overview::compute(&items, &PeriodFilter::All, &CategoryConfig::builtin());
    assert_eq!(overview.totals.expenses, Decimal::MAX);
}
