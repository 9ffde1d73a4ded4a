// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, user_id: &str) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Goal balances that disagree with their linked ledger entries
    let mut stmt = conn.prepare(
        "SELECT id, name, current_amount FROM savings_goals WHERE user_id=?1",
    )?;
    let mut cur = stmt.query(params![user_id])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let stored: String = r.get(2)?;
        let stored = stored
            .parse::<Decimal>()
            .with_context(|| format!("Invalid current amount '{}' for goal {}", stored, id))?;

        let mut tstmt = conn.prepare(
            "SELECT amount, kind FROM transactions WHERE user_id=?1 AND goal_id=?2",
        )?;
        let mut trs = tstmt.query(params![user_id, id])?;
        let mut from_ledger = Decimal::ZERO;
        while let Some(t) = trs.next()? {
            let amt_s: String = t.get(0)?;
            let kind: String = t.get(1)?;
            let amt = amt_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' in transactions", amt_s))?;
            match kind.as_str() {
                "savings" => from_ledger += amt,
                "savings-withdrawal" => from_ledger -= amt,
                _ => {}
            }
        }
        if from_ledger != stored {
            rows.push(vec![
                "goal_balance_drift".into(),
                format!("'{}': stored {} vs ledger {}", name, stored, from_ledger),
            ]);
        }
    }

    // 2) Savings entries with no goal link (history of a deleted goal is
    // expected here; anything recent is suspicious)
    let orphans: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions
         WHERE user_id=?1 AND kind IN ('savings','savings-withdrawal') AND goal_id IS NULL",
        params![user_id],
        |r| r.get(0),
    )?;
    if orphans > 0 {
        rows.push(vec![
            "savings_entry_no_goal".into(),
            format!("{} entr(ies)", orphans),
        ]);
    }

    // 3) Uncategorized expense volume
    let uncategorized: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions
         WHERE user_id=?1 AND kind='expense' AND category_id IS NULL",
        params![user_id],
        |r| r.get(0),
    )?;
    if uncategorized > 0 {
        rows.push(vec![
            "uncategorized_expenses".into(),
            format!("{} transaction(s)", uncategorized),
        ]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
