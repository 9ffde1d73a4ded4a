// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::categories;
use crate::models::CategoryKind;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, user_id: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind = CategoryKind::parse(sub.get_one::<String>("kind").unwrap())?;
            let icon = sub.get_one::<String>("icon").map(|s| s.as_str());
            let cat = categories::ensure(conn, user_id, name, kind, icon)?;
            println!("Category '{}' ({}) id {}", cat.name, cat.kind.as_str(), cat.id);
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let kind = match sub.get_one::<String>("kind") {
                Some(k) => Some(CategoryKind::parse(k)?),
                None => None,
            };
            let cats = categories::list(conn, user_id, kind)?;
            if !maybe_print_json(json_flag, jsonl_flag, &cats)? {
                let rows = cats
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.name.clone(),
                            c.kind.as_str().to_string(),
                            c.icon.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Id", "Name", "Kind", "Icon"], rows));
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            categories::remove(conn, user_id, id)?;
            println!("Removed category {}", id);
        }
        _ => {}
    }
    Ok(())
}
