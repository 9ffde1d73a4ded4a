// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::savings;
use crate::models::GoalPatch;
use crate::utils::{fmt_amount, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, user_id: &str, m: &clap::ArgMatches) -> Result<()> {
    let today = chrono::Utc::now().date_naive();
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let target = parse_decimal(sub.get_one::<String>("target").unwrap().trim())?;
            let target_date = match sub.get_one::<String>("target-date") {
                Some(s) => Some(parse_date(s.trim())?),
                None => None,
            };
            let goal = savings::create(conn, user_id, name, target, target_date, today)?;
            println!(
                "Created goal '{}' targeting {} (id {})",
                goal.name,
                fmt_amount(&goal.target_amount),
                goal.id
            );
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let goals = savings::list(conn, user_id, today)?;
            if !maybe_print_json(json_flag, jsonl_flag, &goals)? {
                let rows = goals
                    .iter()
                    .map(|g| {
                        vec![
                            g.id.to_string(),
                            g.name.clone(),
                            fmt_amount(&g.current_amount),
                            fmt_amount(&g.target_amount),
                            format!("{:.1}%", g.percent_complete.round_dp(1)),
                            g.target_date.map(|d| d.to_string()).unwrap_or_default(),
                            g.months_remaining.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Name", "Saved", "Target", "Progress", "Target date", "Months left"],
                        rows
                    )
                );
            }
        }
        Some(("contribute", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
            let goal = savings::contribute(conn, user_id, id, amount, today)?;
            println!(
                "Contributed {} to '{}' (now {} of {})",
                fmt_amount(&amount),
                goal.name,
                fmt_amount(&goal.current_amount),
                fmt_amount(&goal.target_amount)
            );
        }
        Some(("withdraw", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
            let goal = savings::withdraw(conn, user_id, id, amount, today)?;
            println!(
                "Withdrew {} from '{}' (now {})",
                fmt_amount(&amount),
                goal.name,
                fmt_amount(&goal.current_amount)
            );
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let mut patch = GoalPatch {
                name: sub.get_one::<String>("name").map(|s| s.to_string()),
                ..Default::default()
            };
            if let Some(t) = sub.get_one::<String>("target") {
                patch.target_amount = Some(parse_decimal(t.trim())?);
            }
            if sub.get_flag("clear-target-date") {
                patch.target_date = Some(None);
            } else if let Some(d) = sub.get_one::<String>("target-date") {
                patch.target_date = Some(Some(parse_date(d.trim())?));
            }
            let goal = savings::update(conn, user_id, id, &patch, today)?;
            println!("Updated goal {}", goal.id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            savings::remove(conn, user_id, id)?;
            println!("Deleted goal {} (ledger history kept)", id);
        }
        _ => {}
    }
    Ok(())
}
