// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::balance;
use crate::utils::{fmt_amount, maybe_print_json, parse_date, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, user_id: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, user_id, sub)?,
        Some(("year", sub)) => year(conn, user_id, sub)?,
        Some(("by-category", sub)) => by_category(conn, user_id, sub)?,
        Some(("balance", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let bal = balance::current_balance(conn, user_id)?;
            if !maybe_print_json(json_flag, jsonl_flag, &bal)? {
                println!("{}", fmt_amount(&bal));
            }
        }
        Some(("savings", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let data = balance::savings_progress(conn, user_id)?;
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                let rows = data
                    .iter()
                    .map(|p| {
                        vec![
                            p.name.clone(),
                            fmt_amount(&p.current),
                            fmt_amount(&p.target),
                            fmt_amount(&p.remaining),
                            format!("{:.1}%", p.percent_complete.round_dp(1)),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Goal", "Saved", "Target", "Remaining", "Progress"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

fn summary(conn: &Connection, user_id: &str, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (year, month) = parse_month(sub.get_one::<String>("month").unwrap().trim())?;
    let s = balance::monthly_summary(conn, user_id, year, month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        println!(
            "{}",
            pretty_table(
                &["Month", "Income", "Expense"],
                vec![vec![
                    format!("{}-{:02}", s.year, s.month),
                    fmt_amount(&s.income_total),
                    fmt_amount(&s.expense_total),
                ]]
            )
        );
    }
    Ok(())
}

fn year(conn: &Connection, user_id: &str, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let y = *sub.get_one::<i32>("year").unwrap();
    let months = balance::monthly_totals(conn, user_id, y)?;
    if !maybe_print_json(json_flag, jsonl_flag, &months)? {
        let rows = months
            .iter()
            .map(|s| {
                vec![
                    format!("{}-{:02}", s.year, s.month),
                    fmt_amount(&s.income_total),
                    fmt_amount(&s.expense_total),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense"], rows));
    }
    Ok(())
}

fn by_category(conn: &Connection, user_id: &str, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let from = parse_date(sub.get_one::<String>("from").unwrap().trim())?;
    let to = parse_date(sub.get_one::<String>("to").unwrap().trim())?;
    let data = balance::expenses_by_category(conn, user_id, from, to)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|c| vec![c.category.clone(), fmt_amount(&c.amount)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}
