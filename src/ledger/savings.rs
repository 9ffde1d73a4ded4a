// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use super::{parse_stored_date, parse_stored_decimal, transactions};
use crate::error::{LedgerError, Result};
use crate::models::{GoalPatch, NewTransaction, SavingsGoal, TxnKind};
use crate::utils::months_remaining;

pub fn create(
    conn: &Connection,
    user_id: &str,
    name: &str,
    target_amount: Decimal,
    target_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<SavingsGoal> {
    if target_amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "target amount must be positive, got {}",
            target_amount
        )));
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::validation("goal name must not be empty"));
    }
    conn.execute(
        "INSERT INTO savings_goals(user_id, name, target_amount, current_amount, target_date)
         VALUES (?1, ?2, ?3, '0', ?4)",
        params![
            user_id,
            name,
            target_amount.to_string(),
            target_date.map(|d| d.to_string())
        ],
    )?;
    get(conn, user_id, conn.last_insert_rowid(), today)
}

pub fn get(conn: &Connection, user_id: &str, id: i64, today: NaiveDate) -> Result<SavingsGoal> {
    let raw = fetch_row(conn, user_id, id)?;
    Ok(derive(raw, today))
}

pub fn list(conn: &Connection, user_id: &str, today: NaiveDate) -> Result<Vec<SavingsGoal>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, target_amount, current_amount, target_date
         FROM savings_goals WHERE user_id=?1 ORDER BY name",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(derive(raw_from_row(r)?, today));
    }
    Ok(out)
}

/// Move money into a goal. The goal balance update and the matching
/// `savings` ledger entry commit in one SQLite transaction; a failure in
/// either leaves both untouched.
pub fn contribute(
    conn: &mut Connection,
    user_id: &str,
    goal_id: i64,
    amount: Decimal,
    today: NaiveDate,
) -> Result<SavingsGoal> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "contribution amount must be positive, got {}",
            amount
        )));
    }
    let tx = conn.transaction()?;
    {
        let goal = fetch_row(&tx, user_id, goal_id)?;
        let new_amount = goal.current_amount + amount;
        tx.execute(
            "UPDATE savings_goals SET current_amount=?1 WHERE id=?2",
            params![new_amount.to_string(), goal_id],
        )?;
        transactions::insert_raw(
            &tx,
            user_id,
            &NewTransaction {
                category_id: None,
                amount,
                kind: TxnKind::Savings,
                description: Some(format!("Contribution to {}", goal.name)),
                date: today,
            },
            Some(goal_id),
        )?;
    }
    tx.commit()?;
    get(conn, user_id, goal_id, today)
}

/// Move money back out of a goal, restoring spendable balance. Atomic the
/// same way `contribute` is.
pub fn withdraw(
    conn: &mut Connection,
    user_id: &str,
    goal_id: i64,
    amount: Decimal,
    today: NaiveDate,
) -> Result<SavingsGoal> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "withdrawal amount must be positive, got {}",
            amount
        )));
    }
    let tx = conn.transaction()?;
    {
        let goal = fetch_row(&tx, user_id, goal_id)?;
        if amount > goal.current_amount {
            return Err(LedgerError::validation(format!(
                "cannot withdraw {} from '{}' holding {}",
                amount, goal.name, goal.current_amount
            )));
        }
        let new_amount = goal.current_amount - amount;
        tx.execute(
            "UPDATE savings_goals SET current_amount=?1 WHERE id=?2",
            params![new_amount.to_string(), goal_id],
        )?;
        transactions::insert_raw(
            &tx,
            user_id,
            &NewTransaction {
                category_id: None,
                amount,
                kind: TxnKind::SavingsWithdrawal,
                description: Some(format!("Withdrawal from {}", goal.name)),
                date: today,
            },
            Some(goal_id),
        )?;
    }
    tx.commit()?;
    get(conn, user_id, goal_id, today)
}

pub fn update(
    conn: &Connection,
    user_id: &str,
    id: i64,
    patch: &GoalPatch,
    today: NaiveDate,
) -> Result<SavingsGoal> {
    let current = fetch_row(conn, user_id, id)?;
    let name = match &patch.name {
        Some(n) => {
            if n.trim().is_empty() {
                return Err(LedgerError::validation("goal name must not be empty"));
            }
            n.trim().to_string()
        }
        None => current.name,
    };
    let target = match patch.target_amount {
        Some(t) => {
            if t <= Decimal::ZERO {
                return Err(LedgerError::validation(format!(
                    "target amount must be positive, got {}",
                    t
                )));
            }
            t
        }
        None => current.target_amount,
    };
    let target_date = match patch.target_date {
        Some(d) => d,
        None => current.target_date,
    };
    conn.execute(
        "UPDATE savings_goals SET name=?1, target_amount=?2, target_date=?3 WHERE id=?4",
        params![
            name,
            target.to_string(),
            target_date.map(|d| d.to_string()),
            id
        ],
    )?;
    get(conn, user_id, id, today)
}

/// Delete a goal. Past contribution and withdrawal transactions stay in the
/// ledger as history (their goal link is nulled by the schema), so the main
/// balance does not move.
pub fn remove(conn: &Connection, user_id: &str, id: i64) -> Result<()> {
    fetch_row(conn, user_id, id)?;
    conn.execute("DELETE FROM savings_goals WHERE id=?1", params![id])?;
    Ok(())
}

struct RawGoal {
    id: i64,
    user_id: String,
    name: String,
    target_amount: Decimal,
    current_amount: Decimal,
    target_date: Option<NaiveDate>,
}

fn raw_from_row(r: &rusqlite::Row) -> Result<RawGoal> {
    let target: String = r.get(3)?;
    let current: String = r.get(4)?;
    let target_date: Option<String> = r.get(5)?;
    Ok(RawGoal {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        target_amount: parse_stored_decimal(&target, "target amount")?,
        current_amount: parse_stored_decimal(&current, "current amount")?,
        target_date: match target_date {
            Some(s) => Some(parse_stored_date(&s, "target date")?),
            None => None,
        },
    })
}

fn fetch_row(conn: &Connection, user_id: &str, id: i64) -> Result<RawGoal> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, target_amount, current_amount, target_date
         FROM savings_goals WHERE id=?1",
    )?;
    let mut rows = stmt.query(params![id])?;
    let Some(r) = rows.next()? else {
        return Err(LedgerError::not_found("goal", id));
    };
    let raw = raw_from_row(r)?;
    if raw.user_id != user_id {
        return Err(LedgerError::Authorization { what: "goal", id });
    }
    Ok(raw)
}

fn derive(raw: RawGoal, today: NaiveDate) -> SavingsGoal {
    let percent_complete = raw.current_amount / raw.target_amount * Decimal::from(100);
    SavingsGoal {
        id: raw.id,
        user_id: raw.user_id,
        name: raw.name,
        target_amount: raw.target_amount,
        current_amount: raw.current_amount,
        target_date: raw.target_date,
        percent_complete,
        months_remaining: months_remaining(raw.target_date, today),
    }
}
