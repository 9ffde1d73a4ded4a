// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use super::{month_span, parse_stored_date, parse_stored_decimal};
use crate::error::Result;
use crate::models::{CategorySpend, MonthlySummary, SavingsProgress, TxnKind};

/// Income and expense totals for one calendar month. Only `income` and
/// `expense` kinds count; savings movements and transfers are excluded from
/// the monthly figures, matching the dashboard charts.
pub fn monthly_summary(
    conn: &Connection,
    user_id: &str,
    year: i32,
    month: u32,
) -> Result<MonthlySummary> {
    let (first, last) = month_span(year, month)?;
    let mut summary = MonthlySummary {
        year,
        month,
        income_total: Decimal::ZERO,
        expense_total: Decimal::ZERO,
    };
    let mut stmt = conn.prepare(
        "SELECT amount, kind FROM transactions
         WHERE user_id=?1 AND kind IN ('income','expense') AND date>=?2 AND date<=?3",
    )?;
    let mut rows = stmt.query(params![user_id, first.to_string(), last.to_string()])?;
    while let Some(r) = rows.next()? {
        let amount: String = r.get(0)?;
        let kind: String = r.get(1)?;
        let amount = parse_stored_decimal(&amount, "amount")?;
        match TxnKind::parse(&kind)? {
            TxnKind::Income => summary.income_total += amount,
            TxnKind::Expense => summary.expense_total += amount,
            _ => {}
        }
    }
    Ok(summary)
}

/// Twelve month-by-month summaries for a year, in one pass over the log.
pub fn monthly_totals(conn: &Connection, user_id: &str, year: i32) -> Result<Vec<MonthlySummary>> {
    let mut months: Vec<MonthlySummary> = (1..=12)
        .map(|m| MonthlySummary {
            year,
            month: m,
            income_total: Decimal::ZERO,
            expense_total: Decimal::ZERO,
        })
        .collect();
    let mut stmt = conn.prepare(
        "SELECT amount, kind, date FROM transactions
         WHERE user_id=?1 AND kind IN ('income','expense')
           AND date>=?2 AND date<=?3",
    )?;
    let mut rows = stmt.query(params![
        user_id,
        format!("{}-01-01", year),
        format!("{}-12-31", year)
    ])?;
    while let Some(r) = rows.next()? {
        let amount: String = r.get(0)?;
        let kind: String = r.get(1)?;
        let date: String = r.get(2)?;
        let amount = parse_stored_decimal(&amount, "amount")?;
        let date = parse_stored_date(&date, "date")?;
        let slot = &mut months[date.month0() as usize];
        match TxnKind::parse(&kind)? {
            TxnKind::Income => slot.income_total += amount,
            TxnKind::Expense => slot.expense_total += amount,
            _ => {}
        }
    }
    Ok(months)
}

/// Expense spend grouped by category name over an inclusive date range.
/// Rows without a category land in the "Uncategorized" bucket; none are
/// dropped. Sorted by amount, largest first.
pub fn expenses_by_category(
    conn: &Connection,
    user_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<CategorySpend>> {
    let mut stmt = conn.prepare(
        "SELECT c.name, c.icon, t.amount
         FROM transactions t LEFT JOIN categories c ON t.category_id=c.id
         WHERE t.user_id=?1 AND t.kind='expense' AND t.date>=?2 AND t.date<=?3",
    )?;
    let mut rows = stmt.query(params![user_id, from.to_string(), to.to_string()])?;

    use std::collections::HashMap;
    let mut agg: HashMap<String, (Option<String>, Decimal)> = HashMap::new();
    while let Some(r) = rows.next()? {
        let name: Option<String> = r.get(0)?;
        let icon: Option<String> = r.get(1)?;
        let amount: String = r.get(2)?;
        let amount = parse_stored_decimal(&amount, "amount")?;
        let key = name.unwrap_or_else(|| "Uncategorized".to_string());
        let entry = agg.entry(key).or_insert((icon, Decimal::ZERO));
        entry.1 += amount;
    }
    let mut out: Vec<CategorySpend> = agg
        .into_iter()
        .map(|(category, (icon, amount))| CategorySpend {
            category,
            icon,
            amount,
        })
        .collect();
    out.sort_by(|a, b| b.amount.cmp(&a.amount));
    Ok(out)
}

/// The user's net position over the entire transaction history: income in,
/// expenses and savings contributions out, withdrawals back in. Transfers
/// and investments do not move the main balance.
pub fn current_balance(conn: &Connection, user_id: &str) -> Result<Decimal> {
    let mut stmt =
        conn.prepare("SELECT amount, kind FROM transactions WHERE user_id=?1")?;
    let mut rows = stmt.query(params![user_id])?;
    let mut balance = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let amount: String = r.get(0)?;
        let kind: String = r.get(1)?;
        let amount = parse_stored_decimal(&amount, "amount")?;
        match TxnKind::parse(&kind)? {
            TxnKind::Income => balance += amount,
            TxnKind::Expense | TxnKind::Savings => balance -= amount,
            TxnKind::SavingsWithdrawal => balance += amount,
            TxnKind::Transfer | TxnKind::Investment => {}
        }
    }
    Ok(balance)
}

/// Progress of every goal, for the savings chart feed.
pub fn savings_progress(conn: &Connection, user_id: &str) -> Result<Vec<SavingsProgress>> {
    let mut stmt = conn.prepare(
        "SELECT name, target_amount, current_amount
         FROM savings_goals WHERE user_id=?1 ORDER BY name",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let name: String = r.get(0)?;
        let target: String = r.get(1)?;
        let current: String = r.get(2)?;
        let target = parse_stored_decimal(&target, "target amount")?;
        let current = parse_stored_decimal(&current, "current amount")?;
        out.push(SavingsProgress {
            name,
            target,
            current,
            remaining: target - current,
            percent_complete: current / target * Decimal::from(100),
        });
    }
    Ok(out)
}
