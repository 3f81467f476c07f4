// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON document per line"),
    ]
}

fn period_args() -> [Arg; 4] {
    [
        Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .help("First day of the period (inclusive)"),
        Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .help("Last day of the period (inclusive)"),
        Arg::new("month")
            .long("month")
            .value_name("YYYY-MM")
            .conflicts_with_all(["from", "to", "month_of_year"])
            .help("A single calendar month"),
        Arg::new("month_of_year")
            .long("month-of-year")
            .value_name("1-12")
            .value_parser(value_parser!(u32))
            .conflicts_with_all(["from", "to"])
            .help("A calendar month in any year"),
    ]
}

fn transaction_field_args(required: bool) -> Vec<Arg> {
    vec![
        Arg::new("date")
            .long("date")
            .value_name("YYYY-MM-DD")
            .required(required),
        Arg::new("type")
            .long("type")
            .value_parser(["income", "expense"]),
        Arg::new("category").long("category").required(required),
        Arg::new("description")
            .long("description")
            .required(required),
        Arg::new("amount").long("amount").required(required),
        Arg::new("person").long("person").required(required),
        Arg::new("tag").long("tag"),
    ]
}

fn report(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .args(period_args())
        .args(json_args())
}

pub fn build_cli() -> Command {
    Command::new("twofold")
        .about("Shared household finances for two: tracking, analytics and fair expense splitting")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record an income or expense")
                        .args(transaction_field_args(true))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(
                            Arg::new("shared")
                                .long("shared")
                                .action(ArgAction::SetTrue)
                                .help("Include this expense in the split"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .args(period_args())
                        .arg(Arg::new("person").long("person"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Replace fields of an existing transaction")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .args(transaction_field_args(false))
                        .arg(
                            Arg::new("recurrence")
                                .long("recurrence")
                                .value_parser(["one-time", "recurring"]),
                        )
                        .arg(
                            Arg::new("shared")
                                .long("shared")
                                .value_parser(value_parser!(bool)),
                        ),
                )
                .subcommand(
                    Command::new("rm").about("Delete a transaction").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories and spending thresholds")
                .subcommand(
                    Command::new("add")
                        .about("Add or override a category")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("label").long("label").required(true))
                        .arg(Arg::new("medium").long("medium").requires("high"))
                        .arg(Arg::new("high").long("high").requires("medium")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List built-in and custom categories")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a custom category")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("key").long("key").required(true)),
                )
                .subcommand(
                    Command::new("default")
                        .about("Set the threshold used by categories without their own")
                        .arg(Arg::new("medium").long("medium").required(true))
                        .arg(Arg::new("high").long("high").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Analytics over the selected period")
                .subcommand(report("summary", "Income, expenses and balance"))
                .subcommand(report(
                    "categories",
                    "Spending per category as a share of income",
                ))
                .subcommand(report("top", "Largest expenses").arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ))
                .subcommand(report(
                    "monthly",
                    "Expenses per category for the last six months",
                ))
                .subcommand(report(
                    "balance",
                    "Income and expenses for the last six months",
                ))
                .subcommand(report(
                    "increase",
                    "Category with the biggest month-over-month increase",
                ))
                .subcommand(report("split", "Proportional split of shared expenses"))
                .subcommand(report("daily", "Income and expenses per day"))
                .subcommand(report("overview", "Every report at once")),
        )
        .subcommand(
            Command::new("import")
                .about("Bulk import")
                .subcommand(
                    Command::new("transactions")
                        .about("Import transactions from a CSV file")
                        .arg(Arg::new("path").long("path").required(true))
                        .arg(
                            Arg::new("person")
                                .long("person")
                                .help("Person for rows without a person column"),
                        )
                        .arg(
                            Arg::new("skip_invalid")
                                .long("skip-invalid")
                                .action(ArgAction::SetTrue)
                                .help("Import valid rows and report the rest"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Export transactions as CSV or JSON")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .args(period_args()),
                ),
        )
}
