// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(clap::value_parser!(i64))
        .help("Row id")
}

pub fn build_cli() -> Command {
    Command::new("ledgerclip")
        .about("Personal finance ledger: transactions, category budgets, savings goals, analytics")
        .version(crate_version!())
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .help("Act as this user id (defaults to the configured active user)"),
        )
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Manage the active user")
                .subcommand(
                    Command::new("use")
                        .about("Set the active user")
                        .arg(Arg::new("id").required(true).help("User id")),
                )
                .subcommand(Command::new("show").about("Show the active user")),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category (idempotent by name)")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(Arg::new("icon").long("icon").help("Display hint")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List categories")
                        .arg(Arg::new("kind").long("kind").help("income or expense")),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove an unreferenced category")
                        .arg(id_arg()),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("amount").long("amount").required(true).help("Positive amount"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("income, expense, transfer, savings, savings-withdrawal, investment"),
                        )
                        .arg(Arg::new("category").long("category").help("Category name"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("kind").long("kind"))
                        .arg(Arg::new("category").long("category").help("Category name"))
                        .arg(
                            Arg::new("uncategorized")
                                .long("uncategorized")
                                .action(ArgAction::SetTrue)
                                .help("Only transactions without a category"),
                        )
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD inclusive"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD inclusive")),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Correct a transaction's description or category")
                        .arg(id_arg())
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("clear-description")
                                .long("clear-description")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(Arg::new("category").long("category").help("Category name"))
                        .arg(
                            Arg::new("clear-category")
                                .long("clear-category")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(id_arg()),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage spending budgets")
                .subcommand(
                    Command::new("add")
                        .about("Create a budget")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("limit").long("limit").required(true).help("Positive cap"))
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .required(true)
                                .help("weekly, monthly, or yearly"),
                        )
                        .arg(Arg::new("start").long("start").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("end").long("end").help("YYYY-MM-DD; omit for open-ended"))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Category name; omit to cap all expense spending"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List budgets with live spent/remaining"),
                ))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show one budget with live spent/remaining")
                        .arg(id_arg()),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Update a budget")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("limit").long("limit"))
                        .arg(Arg::new("period").long("period"))
                        .arg(Arg::new("start").long("start"))
                        .arg(Arg::new("end").long("end"))
                        .arg(
                            Arg::new("clear-end")
                                .long("clear-end")
                                .action(ArgAction::SetTrue)
                                .help("Make the budget open-ended"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("clear-category")
                                .long("clear-category")
                                .action(ArgAction::SetTrue)
                                .help("Make the budget cap all expense spending"),
                        ),
                )
                .subcommand(Command::new("rm").about("Delete a budget").arg(id_arg())),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Create a savings goal")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true).help("Positive target"))
                        .arg(Arg::new("target-date").long("target-date").help("YYYY-MM-DD")),
                )
                .subcommand(json_flags(Command::new("list").about("List savings goals")))
                .subcommand(
                    Command::new("contribute")
                        .about("Move money into a goal (records a savings transaction)")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("withdraw")
                        .about("Move money back out of a goal")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Update a goal")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("target-date").long("target-date"))
                        .arg(
                            Arg::new("clear-target-date")
                                .long("clear-target-date")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a goal, keeping its ledger history")
                        .arg(id_arg()),
                ),
        )
        .subcommand(
            Command::new("recurring")
                .about("Manage recurring payment definitions")
                .subcommand(
                    Command::new("add")
                        .about("Define a recurring payment")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .required(true)
                                .help("daily, weekly, monthly, or yearly"),
                        )
                        .arg(Arg::new("start").long("start").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("end").long("end").help("YYYY-MM-DD"))
                        .arg(Arg::new("category").long("category").help("Category name")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List definitions, soonest due first"),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Update a definition")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("frequency").long("frequency"))
                        .arg(Arg::new("end").long("end"))
                        .arg(
                            Arg::new("clear-end")
                                .long("clear-end")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("clear-category")
                                .long("clear-category")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a definition")
                        .arg(id_arg()),
                )
                .subcommand(
                    Command::new("process")
                        .about("Record all occurrences due on or before a date")
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Analytics over the ledger")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Income and expense totals for a month")
                        .arg(Arg::new("month").long("month").required(true).help("YYYY-MM")),
                ))
                .subcommand(json_flags(
                    Command::new("year")
                        .about("Month-by-month totals for a year")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .required(true)
                                .value_parser(clap::value_parser!(i32)),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("by-category")
                        .about("Expense spend grouped by category")
                        .arg(Arg::new("from").long("from").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").required(true).help("YYYY-MM-DD")),
                ))
                .subcommand(json_flags(
                    Command::new("balance").about("Current main balance over all history"),
                ))
                .subcommand(json_flags(
                    Command::new("savings").about("Savings goal progress"),
                )),
        )
        .subcommand(Command::new("doctor").about("Check ledger consistency"))
}
