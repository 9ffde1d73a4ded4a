// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use super::{parse_stored_date, parse_stored_decimal};
use crate::error::{LedgerError, Result};
use crate::models::{CategoryFilter, NewTransaction, Transaction, TxnFilter, TxnKind};

/// Append a transaction to the ledger. Amounts must be positive; direction
/// is carried by the kind.
pub fn record(conn: &Connection, user_id: &str, new: &NewTransaction) -> Result<Transaction> {
    if new.amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "amount must be positive, got {}",
            new.amount
        )));
    }
    if let Some(cat_id) = new.category_id {
        super::categories::get(conn, user_id, cat_id)?;
    }
    let id = insert_raw(conn, user_id, new, None)?;
    get(conn, user_id, id)
}

/// Insert without the public-contract checks; the savings and recurring
/// engines use this inside their own transactions to attach a goal link.
pub(crate) fn insert_raw(
    conn: &Connection,
    user_id: &str,
    new: &NewTransaction,
    goal_id: Option<i64>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(user_id, category_id, goal_id, amount, kind, description, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user_id,
            new.category_id,
            goal_id,
            new.amount.to_string(),
            new.kind.as_str(),
            new.description,
            new.date.to_string()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get(conn: &Connection, user_id: &str, id: i64) -> Result<Transaction> {
    let row: Option<(String, Option<i64>, Option<i64>, String, String, Option<String>, String)> =
        conn.query_row(
            "SELECT user_id, category_id, goal_id, amount, kind, description, date
             FROM transactions WHERE id=?1",
            params![id],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                    r.get(6)?,
                ))
            },
        )
        .optional()?;
    let (owner, category_id, goal_id, amount, kind, description, date) =
        row.ok_or(LedgerError::not_found("transaction", id))?;
    if owner != user_id {
        return Err(LedgerError::Authorization {
            what: "transaction",
            id,
        });
    }
    Ok(Transaction {
        id,
        user_id: owner,
        category_id,
        goal_id,
        amount: parse_stored_decimal(&amount, "amount")?,
        kind: TxnKind::parse(&kind)?,
        description,
        date: parse_stored_date(&date, "date")?,
    })
}

/// Transactions matching the filter, newest first; ties on the same date
/// come back in insertion order.
pub fn list(conn: &Connection, user_id: &str, filter: &TxnFilter) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, user_id, category_id, goal_id, amount, kind, description, date
         FROM transactions WHERE user_id=?",
    );
    let mut params_vec: Vec<String> = vec![user_id.to_string()];
    push_filter(filter, &mut sql, &mut params_vec);
    sql.push_str(" ORDER BY date DESC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let bind: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(bind))?;

    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let amount: String = r.get(4)?;
        let kind: String = r.get(5)?;
        let date: String = r.get(7)?;
        out.push(Transaction {
            id: r.get(0)?,
            user_id: r.get(1)?,
            category_id: r.get(2)?,
            goal_id: r.get(3)?,
            amount: parse_stored_decimal(&amount, "amount")?,
            kind: TxnKind::parse(&kind)?,
            description: r.get(6)?,
            date: parse_stored_date(&date, "date")?,
        });
    }
    Ok(out)
}

/// The aggregation primitive every projection builds on: the exact decimal
/// sum of matching amounts.
pub fn sum(conn: &Connection, user_id: &str, filter: &TxnFilter) -> Result<Decimal> {
    let mut sql = String::from("SELECT amount FROM transactions WHERE user_id=?");
    let mut params_vec: Vec<String> = vec![user_id.to_string()];
    push_filter(filter, &mut sql, &mut params_vec);

    let mut stmt = conn.prepare(&sql)?;
    let bind: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(bind))?;

    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let amount: String = r.get(0)?;
        total += parse_stored_decimal(&amount, "amount")?;
    }
    Ok(total)
}

/// Correct a transaction's description or category; everything else is
/// immutable once recorded.
pub fn amend(
    conn: &Connection,
    user_id: &str,
    id: i64,
    description: Option<Option<String>>,
    category_id: Option<Option<i64>>,
) -> Result<Transaction> {
    get(conn, user_id, id)?;
    if let Some(desc) = description {
        conn.execute(
            "UPDATE transactions SET description=?1 WHERE id=?2",
            params![desc, id],
        )?;
    }
    if let Some(cat) = category_id {
        if let Some(cat_id) = cat {
            super::categories::get(conn, user_id, cat_id)?;
        }
        conn.execute(
            "UPDATE transactions SET category_id=?1 WHERE id=?2",
            params![cat, id],
        )?;
    }
    get(conn, user_id, id)
}

/// Hard delete. Budgets and goals are projections over the log, so nothing
/// cascades; they simply recompute.
pub fn remove(conn: &Connection, user_id: &str, id: i64) -> Result<()> {
    get(conn, user_id, id)?;
    conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(())
}

fn push_filter(filter: &TxnFilter, sql: &mut String, params_vec: &mut Vec<String>) {
    match filter.category {
        CategoryFilter::Any => {}
        CategoryFilter::Uncategorized => sql.push_str(" AND category_id IS NULL"),
        CategoryFilter::Id(id) => {
            sql.push_str(" AND category_id=?");
            params_vec.push(id.to_string());
        }
    }
    if let Some(kind) = filter.kind {
        sql.push_str(" AND kind=?");
        params_vec.push(kind.as_str().to_string());
    }
    if let Some(from) = filter.from {
        sql.push_str(" AND date>=?");
        params_vec.push(from.to_string());
    }
    if let Some(to) = filter.to {
        sql.push_str(" AND date<=?");
        params_vec.push(to.to_string());
    }
}

/// Filter for one category's expense spend inside a window; `category_id`
/// None means an aggregate (all-categories) window.
pub(crate) fn expense_window_filter(
    category_id: Option<i64>,
    from: NaiveDate,
    to: NaiveDate,
) -> TxnFilter {
    TxnFilter {
        category: match category_id {
            Some(id) => CategoryFilter::Id(id),
            None => CategoryFilter::Any,
        },
        kind: Some(TxnKind::Expense),
        from: Some(from),
        to: Some(to),
    }
}
