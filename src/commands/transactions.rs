// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::transactions;
use crate::models::{CategoryFilter, NewTransaction, TxnFilter, TxnKind};
use crate::utils::{
    fmt_amount, id_for_category, maybe_print_json, parse_date, parse_decimal, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, user_id: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, user_id, sub)?,
        Some(("list", sub)) => list(conn, user_id, sub)?,
        Some(("edit", sub)) => edit(conn, user_id, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            transactions::remove(conn, user_id, id)?;
            println!("Deleted transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, user_id: &str, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let kind = TxnKind::parse(sub.get_one::<String>("kind").unwrap())?;
    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(id_for_category(conn, user_id, name.trim())?),
        None => None,
    };
    let description = sub.get_one::<String>("description").map(|s| s.to_string());

    let txn = transactions::record(
        conn,
        user_id,
        &NewTransaction {
            category_id,
            amount,
            kind,
            description,
            date,
        },
    )?;
    println!(
        "Recorded {} {} on {} (id {})",
        txn.kind.as_str(),
        fmt_amount(&txn.amount),
        txn.date,
        txn.id
    );
    Ok(())
}

fn list(conn: &Connection, user_id: &str, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut filter = TxnFilter::default();
    if sub.get_flag("uncategorized") {
        filter.category = CategoryFilter::Uncategorized;
    } else if let Some(name) = sub.get_one::<String>("category") {
        filter.category = CategoryFilter::Id(id_for_category(conn, user_id, name.trim())?);
    }
    if let Some(kind) = sub.get_one::<String>("kind") {
        filter.kind = Some(TxnKind::parse(kind)?);
    }
    if let Some(from) = sub.get_one::<String>("from") {
        filter.from = Some(parse_date(from.trim())?);
    }
    if let Some(to) = sub.get_one::<String>("to") {
        filter.to = Some(parse_date(to.trim())?);
    }

    let data = transactions::list(conn, user_id, &filter)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.kind.as_str().to_string(),
                    fmt_amount(&t.amount),
                    t.category_id.map(|c| c.to_string()).unwrap_or_default(),
                    t.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Kind", "Amount", "Category", "Description"], rows)
        );
    }
    Ok(())
}

fn edit(conn: &Connection, user_id: &str, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let description = if sub.get_flag("clear-description") {
        Some(None)
    } else {
        sub.get_one::<String>("description")
            .map(|s| Some(s.to_string()))
    };
    let category_id = if sub.get_flag("clear-category") {
        Some(None)
    } else {
        match sub.get_one::<String>("category") {
            Some(name) => Some(Some(id_for_category(conn, user_id, name.trim())?)),
            None => None,
        }
    };
    let txn = transactions::amend(conn, user_id, id, description, category_id)?;
    println!("Updated transaction {}", txn.id);
    Ok(())
}
