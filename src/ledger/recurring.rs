// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Days, Months, NaiveDate};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use super::{parse_stored_date, parse_stored_decimal, transactions};
use crate::error::{LedgerError, Result};
use crate::models::{
    Frequency, NewRecurringPayment, NewTransaction, RecurringPatch, RecurringPayment, Transaction,
    TxnKind,
};

pub fn create(
    conn: &Connection,
    user_id: &str,
    new: &NewRecurringPayment,
) -> Result<RecurringPayment> {
    if new.amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "amount must be positive, got {}",
            new.amount
        )));
    }
    if new.name.trim().is_empty() {
        return Err(LedgerError::validation("payment name must not be empty"));
    }
    if let Some(end) = new.end_date {
        if end < new.start_date {
            return Err(LedgerError::validation(format!(
                "end date {} is before start date {}",
                end, new.start_date
            )));
        }
    }
    if let Some(cat_id) = new.category_id {
        super::categories::get(conn, user_id, cat_id)?;
    }
    // The first occurrence is due on the start date itself.
    conn.execute(
        "INSERT INTO recurring_payments(user_id, name, amount, category_id, frequency,
         start_date, end_date, next_payment)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?6)",
        params![
            user_id,
            new.name.trim(),
            new.amount.to_string(),
            new.category_id,
            new.frequency.as_str(),
            new.start_date.to_string(),
            new.end_date.map(|d| d.to_string())
        ],
    )?;
    get(conn, user_id, conn.last_insert_rowid())
}

pub fn get(conn: &Connection, user_id: &str, id: i64) -> Result<RecurringPayment> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, amount, category_id, frequency, start_date, end_date, next_payment
         FROM recurring_payments WHERE id=?1",
    )?;
    let mut rows = stmt.query(params![id])?;
    let Some(r) = rows.next()? else {
        return Err(LedgerError::not_found("recurring payment", id));
    };
    let payment = from_row(r)?;
    if payment.user_id != user_id {
        return Err(LedgerError::Authorization {
            what: "recurring payment",
            id,
        });
    }
    Ok(payment)
}

/// Definitions ordered by due date, soonest first.
pub fn list(conn: &Connection, user_id: &str) -> Result<Vec<RecurringPayment>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, amount, category_id, frequency, start_date, end_date, next_payment
         FROM recurring_payments WHERE user_id=?1 ORDER BY next_payment, id",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(from_row(r)?);
    }
    Ok(out)
}

pub fn update(
    conn: &Connection,
    user_id: &str,
    id: i64,
    patch: &RecurringPatch,
) -> Result<RecurringPayment> {
    let current = get(conn, user_id, id)?;
    let name = match &patch.name {
        Some(n) => {
            if n.trim().is_empty() {
                return Err(LedgerError::validation("payment name must not be empty"));
            }
            n.trim().to_string()
        }
        None => current.name,
    };
    let amount = match patch.amount {
        Some(a) => {
            if a <= Decimal::ZERO {
                return Err(LedgerError::validation(format!(
                    "amount must be positive, got {}",
                    a
                )));
            }
            a
        }
        None => current.amount,
    };
    let category_id = match patch.category_id {
        Some(cat) => {
            if let Some(cat_id) = cat {
                super::categories::get(conn, user_id, cat_id)?;
            }
            cat
        }
        None => current.category_id,
    };
    let frequency = patch.frequency.unwrap_or(current.frequency);
    let end_date = match patch.end_date {
        Some(e) => e,
        None => current.end_date,
    };
    if let Some(end) = end_date {
        if end < current.start_date {
            return Err(LedgerError::validation(format!(
                "end date {} is before start date {}",
                end, current.start_date
            )));
        }
    }
    conn.execute(
        "UPDATE recurring_payments SET name=?1, amount=?2, category_id=?3, frequency=?4,
         end_date=?5 WHERE id=?6",
        params![
            name,
            amount.to_string(),
            category_id,
            frequency.as_str(),
            end_date.map(|d| d.to_string()),
            id
        ],
    )?;
    get(conn, user_id, id)
}

pub fn remove(conn: &Connection, user_id: &str, id: i64) -> Result<()> {
    get(conn, user_id, id)?;
    conn.execute("DELETE FROM recurring_payments WHERE id=?1", params![id])?;
    Ok(())
}

/// Materialize every occurrence due on or before `today` as an expense
/// transaction and advance each definition's due date past `today`. The
/// caller (an external scheduler, or the CLI) decides when to invoke this;
/// one invocation is one SQLite transaction.
pub fn process_due(
    conn: &mut Connection,
    user_id: &str,
    today: NaiveDate,
) -> Result<Vec<Transaction>> {
    let due = {
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, amount, category_id, frequency, start_date, end_date, next_payment
             FROM recurring_payments WHERE user_id=?1 AND next_payment<=?2 ORDER BY next_payment, id",
        )?;
        let mut rows = stmt.query(params![user_id, today.to_string()])?;
        let mut v = Vec::new();
        while let Some(r) = rows.next()? {
            v.push(from_row(r)?);
        }
        v
    };

    let tx = conn.transaction()?;
    let mut recorded_ids = Vec::new();
    for payment in &due {
        let mut next = payment.next_payment;
        while next <= today {
            if let Some(end) = payment.end_date {
                if next > end {
                    break;
                }
            }
            let id = transactions::insert_raw(
                &tx,
                user_id,
                &NewTransaction {
                    category_id: payment.category_id,
                    amount: payment.amount,
                    kind: TxnKind::Expense,
                    description: Some(payment.name.clone()),
                    date: next,
                },
                None,
            )?;
            recorded_ids.push(id);
            next = advance(next, payment.frequency)?;
        }
        tx.execute(
            "UPDATE recurring_payments SET next_payment=?1 WHERE id=?2",
            params![next.to_string(), payment.id],
        )?;
    }
    tx.commit()?;

    let mut recorded = Vec::new();
    for id in recorded_ids {
        recorded.push(transactions::get(conn, user_id, id)?);
    }
    Ok(recorded)
}

fn advance(date: NaiveDate, frequency: Frequency) -> Result<NaiveDate> {
    let next = match frequency {
        Frequency::Daily => date.checked_add_days(Days::new(1)),
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::Monthly => date.checked_add_months(Months::new(1)),
        Frequency::Yearly => date.checked_add_months(Months::new(12)),
    };
    next.ok_or_else(|| LedgerError::validation(format!("date {} out of range", date)))
}

fn from_row(r: &rusqlite::Row) -> Result<RecurringPayment> {
    let amount: String = r.get(3)?;
    let frequency: String = r.get(5)?;
    let start: String = r.get(6)?;
    let end: Option<String> = r.get(7)?;
    let next: String = r.get(8)?;
    Ok(RecurringPayment {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        amount: parse_stored_decimal(&amount, "amount")?,
        category_id: r.get(4)?,
        frequency: Frequency::parse(&frequency)?,
        start_date: parse_stored_date(&start, "start date")?,
        end_date: match end {
            Some(s) => Some(parse_stored_date(&s, "end date")?),
            None => None,
        },
        next_payment: parse_stored_date(&next, "next payment")?,
    })
}
