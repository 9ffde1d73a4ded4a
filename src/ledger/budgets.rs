// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate, Weekday};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use super::{month_span, parse_stored_date, parse_stored_decimal, transactions};
use crate::error::{LedgerError, Result};
use crate::models::{Budget, BudgetPatch, BudgetPeriod, NewBudget};

pub fn create(conn: &Connection, user_id: &str, new: &NewBudget, today: NaiveDate) -> Result<Budget> {
    if new.limit_amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "limit amount must be positive, got {}",
            new.limit_amount
        )));
    }
    if new.name.trim().is_empty() {
        return Err(LedgerError::validation("budget name must not be empty"));
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
    conn.execute(
        "INSERT INTO budgets(user_id, category_id, name, limit_amount, period, start_date, end_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user_id,
            new.category_id,
            new.name.trim(),
            new.limit_amount.to_string(),
            new.period.as_str(),
            new.start_date.to_string(),
            new.end_date.map(|d| d.to_string())
        ],
    )?;
    get(conn, user_id, conn.last_insert_rowid(), today)
}

/// Load a budget with `spent`/`remaining` recomputed from the transaction
/// log for the period window containing `today`. Nothing here is cached
/// across writes; every read replays the log.
pub fn get(conn: &Connection, user_id: &str, id: i64, today: NaiveDate) -> Result<Budget> {
    let row = fetch_row(conn, user_id, id)?;
    derive(conn, row, today)
}

pub fn list(conn: &Connection, user_id: &str, today: NaiveDate) -> Result<Vec<Budget>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, category_id, name, limit_amount, period, start_date, end_date
         FROM budgets WHERE user_id=?1 ORDER BY name",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let raw = raw_from_row(r)?;
        out.push(derive(conn, raw, today)?);
    }
    Ok(out)
}

pub fn update(
    conn: &Connection,
    user_id: &str,
    id: i64,
    patch: &BudgetPatch,
    today: NaiveDate,
) -> Result<Budget> {
    let current = fetch_row(conn, user_id, id)?;
    let name = match &patch.name {
        Some(n) => {
            if n.trim().is_empty() {
                return Err(LedgerError::validation("budget name must not be empty"));
            }
            n.trim().to_string()
        }
        None => current.name,
    };
    let limit = match patch.limit_amount {
        Some(l) => {
            if l <= Decimal::ZERO {
                return Err(LedgerError::validation(format!(
                    "limit amount must be positive, got {}",
                    l
                )));
            }
            l
        }
        None => current.limit_amount,
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
    let period = patch.period.unwrap_or(current.period);
    let start_date = patch.start_date.unwrap_or(current.start_date);
    let end_date = match patch.end_date {
        Some(e) => e,
        None => current.end_date,
    };
    if let Some(end) = end_date {
        if end < start_date {
            return Err(LedgerError::validation(format!(
                "end date {} is before start date {}",
                end, start_date
            )));
        }
    }
    conn.execute(
        "UPDATE budgets SET category_id=?1, name=?2, limit_amount=?3, period=?4,
         start_date=?5, end_date=?6 WHERE id=?7",
        params![
            category_id,
            name,
            limit.to_string(),
            period.as_str(),
            start_date.to_string(),
            end_date.map(|d| d.to_string()),
            id
        ],
    )?;
    get(conn, user_id, id, today)
}

pub fn remove(conn: &Connection, user_id: &str, id: i64) -> Result<()> {
    fetch_row(conn, user_id, id)?;
    conn.execute("DELETE FROM budgets WHERE id=?1", params![id])?;
    Ok(())
}

/// The active window of a budget: the calendar period instance (ISO week,
/// calendar month, calendar year) containing `today`, intersected with
/// `[start_date, end_date]`. `today` is clamped into that range first, so a
/// budget viewed before it starts reports its first window and a lapsed
/// budget reports its last. Windows advance automatically; spent resets at
/// each period boundary with no renew action.
pub fn period_window(
    period: BudgetPeriod,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate)> {
    let mut anchor = today;
    if anchor < start_date {
        anchor = start_date;
    }
    if let Some(end) = end_date {
        if anchor > end {
            anchor = end;
        }
    }
    let (inst_start, inst_end) = match period {
        BudgetPeriod::Weekly => {
            let week = anchor.week(Weekday::Mon);
            (week.first_day(), week.last_day())
        }
        BudgetPeriod::Monthly => month_span(anchor.year(), anchor.month())?,
        BudgetPeriod::Yearly => {
            let first = NaiveDate::from_ymd_opt(anchor.year(), 1, 1);
            let last = NaiveDate::from_ymd_opt(anchor.year(), 12, 31);
            match (first, last) {
                (Some(f), Some(l)) => (f, l),
                _ => {
                    return Err(LedgerError::validation(format!(
                        "year {} out of range",
                        anchor.year()
                    )))
                }
            }
        }
    };
    let from = inst_start.max(start_date);
    let to = match end_date {
        Some(end) => inst_end.min(end),
        None => inst_end,
    };
    Ok((from, to))
}

struct RawBudget {
    id: i64,
    user_id: String,
    category_id: Option<i64>,
    name: String,
    limit_amount: Decimal,
    period: BudgetPeriod,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}

fn raw_from_row(r: &rusqlite::Row) -> Result<RawBudget> {
    let limit: String = r.get(4)?;
    let period: String = r.get(5)?;
    let start: String = r.get(6)?;
    let end: Option<String> = r.get(7)?;
    Ok(RawBudget {
        id: r.get(0)?,
        user_id: r.get(1)?,
        category_id: r.get(2)?,
        name: r.get(3)?,
        limit_amount: parse_stored_decimal(&limit, "limit amount")?,
        period: BudgetPeriod::parse(&period)?,
        start_date: parse_stored_date(&start, "start date")?,
        end_date: match end {
            Some(s) => Some(parse_stored_date(&s, "end date")?),
            None => None,
        },
    })
}

fn fetch_row(conn: &Connection, user_id: &str, id: i64) -> Result<RawBudget> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, category_id, name, limit_amount, period, start_date, end_date
         FROM budgets WHERE id=?1",
    )?;
    let mut rows = stmt.query(params![id])?;
    let Some(r) = rows.next()? else {
        return Err(LedgerError::not_found("budget", id));
    };
    let raw = raw_from_row(r)?;
    if raw.user_id != user_id {
        return Err(LedgerError::Authorization { what: "budget", id });
    }
    Ok(raw)
}

fn derive(conn: &Connection, raw: RawBudget, today: NaiveDate) -> Result<Budget> {
    let (from, to) = period_window(raw.period, raw.start_date, raw.end_date, today)?;
    // A null category means the budget caps all expense spending.
    let filter = transactions::expense_window_filter(raw.category_id, from, to);
    let spent = transactions::sum(conn, &raw.user_id, &filter)?;
    let remaining = raw.limit_amount - spent;
    Ok(Budget {
        id: raw.id,
        user_id: raw.user_id,
        category_id: raw.category_id,
        name: raw.name,
        limit_amount: raw.limit_amount,
        period: raw.period,
        start_date: raw.start_date,
        end_date: raw.end_date,
        spent,
        remaining,
        is_over_budget: spent > raw.limit_amount,
    })
}
