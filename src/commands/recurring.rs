// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::recurring;
use crate::models::{Frequency, NewRecurringPayment, RecurringPatch};
use crate::utils::{
    fmt_amount, id_for_category, maybe_print_json, parse_date, parse_decimal, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, user_id: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
            let frequency = Frequency::parse(sub.get_one::<String>("frequency").unwrap())?;
            let start_date = parse_date(sub.get_one::<String>("start").unwrap().trim())?;
            let end_date = match sub.get_one::<String>("end") {
                Some(s) => Some(parse_date(s.trim())?),
                None => None,
            };
            let category_id = match sub.get_one::<String>("category") {
                Some(n) => Some(id_for_category(conn, user_id, n.trim())?),
                None => None,
            };
            let p = recurring::create(
                conn,
                user_id,
                &NewRecurringPayment {
                    name,
                    amount,
                    category_id,
                    frequency,
                    start_date,
                    end_date,
                },
            )?;
            println!(
                "Recurring '{}' {} {} from {} (id {})",
                p.name,
                fmt_amount(&p.amount),
                p.frequency.as_str(),
                p.start_date,
                p.id
            );
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let data = recurring::list(conn, user_id)?;
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                let rows = data
                    .iter()
                    .map(|p| {
                        vec![
                            p.id.to_string(),
                            p.name.clone(),
                            fmt_amount(&p.amount),
                            p.frequency.as_str().to_string(),
                            p.next_payment.to_string(),
                            p.end_date.map(|d| d.to_string()).unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Name", "Amount", "Frequency", "Next due", "Ends"], rows)
                );
            }
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let mut patch = RecurringPatch {
                name: sub.get_one::<String>("name").map(|s| s.to_string()),
                ..Default::default()
            };
            if let Some(a) = sub.get_one::<String>("amount") {
                patch.amount = Some(parse_decimal(a.trim())?);
            }
            if let Some(f) = sub.get_one::<String>("frequency") {
                patch.frequency = Some(Frequency::parse(f)?);
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
            let p = recurring::update(conn, user_id, id, &patch)?;
            println!("Updated recurring payment {}", p.id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            recurring::remove(conn, user_id, id)?;
            println!("Deleted recurring payment {}", id);
        }
        Some(("process", sub)) => {
            let today = match sub.get_one::<String>("date") {
                Some(s) => parse_date(s.trim())?,
                None => chrono::Utc::now().date_naive(),
            };
            let recorded = recurring::process_due(conn, user_id, today)?;
            if recorded.is_empty() {
                println!("Nothing due on or before {}", today);
            } else {
                for t in &recorded {
                    println!(
                        "Recorded {} on {} ({})",
                        fmt_amount(&t.amount),
                        t.date,
                        t.description.clone().unwrap_or_default()
                    );
                }
                println!("{} payment(s) recorded", recorded.len());
            }
        }
        _ => {}
    }
    Ok(())
}
