// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger core: every operation takes an explicit `user_id` and checks
//! ownership of any row it touches. Budget usage and the main balance are
//! projections over the transaction log, never stored counters.

pub mod balance;
pub mod budgets;
pub mod categories;
pub mod recurring;
pub mod savings;
pub mod transactions;

use chrono::NaiveDate;

use crate::error::{LedgerError, Result};

/// First and last day of a calendar month.
pub(crate) fn month_span(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| LedgerError::validation(format!("invalid month {}-{:02}", year, month)))?;
    let last_day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => {
            return Err(LedgerError::validation(format!(
                "invalid month number {}",
                month
            )))
        }
    };
    let last = NaiveDate::from_ymd_opt(year, month, last_day)
        .ok_or_else(|| LedgerError::validation(format!("invalid month {}-{:02}", year, month)))?;
    Ok((first, last))
}

pub(crate) fn parse_stored_decimal(s: &str, what: &str) -> Result<rust_decimal::Decimal> {
    s.parse::<rust_decimal::Decimal>()
        .map_err(|_| LedgerError::validation(format!("invalid {} '{}' in storage", what, s)))
}

pub(crate) fn parse_stored_date(s: &str, what: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| LedgerError::validation(format!("invalid {} '{}' in storage", what, s)))
}
