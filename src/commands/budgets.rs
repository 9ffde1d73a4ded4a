// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::budgets;
use crate::models::{BudgetPatch, BudgetPeriod, NewBudget};
use crate::utils::{
    fmt_amount, id_for_category, maybe_print_json, parse_date, parse_decimal, pretty_table,
};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, user_id: &str, m: &clap::ArgMatches) -> Result<()> {
    let today = chrono::Utc::now().date_naive();
    match m.subcommand() {
        Some(("add", sub)) => add(conn, user_id, sub, today)?,
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let data = budgets::list(conn, user_id, today)?;
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                println!("{}", pretty_table(HEADERS, data.iter().map(row).collect()));
            }
        }
        Some(("show", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let id = *sub.get_one::<i64>("id").unwrap();
            let b = budgets::get(conn, user_id, id, today)?;
            if !maybe_print_json(json_flag, jsonl_flag, &b)? {
                println!("{}", pretty_table(HEADERS, vec![row(&b)]));
            }
        }
        Some(("edit", sub)) => edit(conn, user_id, sub, today)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            budgets::remove(conn, user_id, id)?;
            println!("Deleted budget {}", id);
        }
        _ => {}
    }
    Ok(())
}

const HEADERS: &[&str] = &[
    "Id", "Name", "Category", "Period", "Limit", "Spent", "Remaining", "Over?",
];

fn row(b: &crate::models::Budget) -> Vec<String> {
    vec![
        b.id.to_string(),
        b.name.clone(),
        b.category_id
            .map(|c| c.to_string())
            .unwrap_or_else(|| "(all)".into()),
        b.period.as_str().to_string(),
        fmt_amount(&b.limit_amount),
        fmt_amount(&b.spent),
        fmt_amount(&b.remaining),
        if b.is_over_budget { "yes" } else { "" }.to_string(),
    ]
}

fn add(conn: &Connection, user_id: &str, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let limit_amount = parse_decimal(sub.get_one::<String>("limit").unwrap().trim())?;
    let period = BudgetPeriod::parse(sub.get_one::<String>("period").unwrap())?;
    let start_date = parse_date(sub.get_one::<String>("start").unwrap().trim())?;
    let end_date = match sub.get_one::<String>("end") {
        Some(s) => Some(parse_date(s.trim())?),
        None => None,
    };
    let category_id = match sub.get_one::<String>("category") {
        Some(n) => Some(id_for_category(conn, user_id, n.trim())?),
        None => None,
    };
    let b = budgets::create(
        conn,
        user_id,
        &NewBudget {
            name,
            category_id,
            limit_amount,
            period,
            start_date,
            end_date,
        },
        today,
    )?;
    println!(
        "Created budget '{}' ({} {}) id {}",
        b.name,
        fmt_amount(&b.limit_amount),
        b.period.as_str(),
        b.id
    );
    Ok(())
}

fn edit(conn: &Connection, user_id: &str, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut patch = BudgetPatch {
        name: sub.get_one::<String>("name").map(|s| s.to_string()),
        ..Default::default()
    };
    if let Some(l) = sub.get_one::<String>("limit") {
        patch.limit_amount = Some(parse_decimal(l.trim())?);
    }
    if let Some(p) = sub.get_one::<String>("period") {
        patch.period = Some(BudgetPeriod::parse(p)?);
    }
    if let Some(s) = sub.get_one::<String>("start") {
        patch.start_date = Some(parse_date(s.trim())?);
    }
    if sub.get_flag("clear-end") {
        patch.end_date = Some(None);
    } else if let Some(e) = sub.get_one::<String>("end") {
        patch.end_date = Some(Some(parse_date(e.trim())?));
    }
    if sub.get_flag("clear-category") {
        patch.category_id = Some(None);
    } else if let Some(n) = sub.get_one::<String>("category") {
        patch.category_id = Some(Some(id_for_category(conn, user_id, n.trim())?));
    }
    let b = budgets::update(conn, user_id, id, &patch, today)?;
    println!("Updated budget {}", b.id);
    Ok(())
}
