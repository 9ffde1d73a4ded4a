// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerclip::ledger::{balance, categories, savings, transactions};
use ledgerclip::models::{CategoryKind, NewTransaction, TxnKind};
use rust_decimal::Decimal;

fn setup() -> rusqlite::Connection {
    ledgerclip::db::open_in_memory().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(
    conn: &rusqlite::Connection,
    user: &str,
    kind: TxnKind,
    amount: &str,
    day: NaiveDate,
    category_id: Option<i64>,
) {
    transactions::record(
        conn,
        user,
        &NewTransaction {
            category_id,
            amount: amount.parse().unwrap(),
            kind,
            description: None,
            date: day,
        },
    )
    .unwrap();
}

#[test]
fn current_balance_nets_income_expense_and_savings() {
    let mut conn = setup();
    let today = date(2025, 8, 10);
    record(&conn, "alice", TxnKind::Income, "1000", date(2025, 8, 1), None);
    record(&conn, "alice", TxnKind::Expense, "300", date(2025, 8, 2), None);
    let goal = savings::create(&conn, "alice", "Vacation", Decimal::from(500), None, today).unwrap();
    savings::contribute(&mut conn, "alice", goal.id, Decimal::from(200), today).unwrap();

    assert_eq!(
        balance::current_balance(&conn, "alice").unwrap(),
        Decimal::from(500)
    );
}

#[test]
fn transfers_and_investments_do_not_move_the_balance() {
    let conn = setup();
    record(&conn, "alice", TxnKind::Income, "100", date(2025, 8, 1), None);
    record(&conn, "alice", TxnKind::Transfer, "40", date(2025, 8, 2), None);
    record(&conn, "alice", TxnKind::Investment, "25", date(2025, 8, 3), None);

    assert_eq!(
        balance::current_balance(&conn, "alice").unwrap(),
        Decimal::from(100)
    );
}

#[test]
fn balance_is_all_time_not_monthly() {
    let conn = setup();
    record(&conn, "alice", TxnKind::Income, "100", date(2023, 1, 1), None);
    record(&conn, "alice", TxnKind::Expense, "30", date(2024, 6, 15), None);
    record(&conn, "alice", TxnKind::Income, "5", date(2025, 8, 1), None);

    assert_eq!(
        balance::current_balance(&conn, "alice").unwrap(),
        Decimal::from(75)
    );
}

#[test]
fn monthly_summary_counts_only_income_and_expense_in_month() {
    let mut conn = setup();
    let today = date(2025, 8, 10);
    record(&conn, "alice", TxnKind::Income, "900", date(2025, 8, 1), None);
    record(&conn, "alice", TxnKind::Income, "100", date(2025, 8, 31), None);
    record(&conn, "alice", TxnKind::Expense, "250", date(2025, 8, 15), None);
    // Adjacent months stay out.
    record(&conn, "alice", TxnKind::Income, "77", date(2025, 7, 31), None);
    record(&conn, "alice", TxnKind::Expense, "88", date(2025, 9, 1), None);
    // Savings movements do not show in the monthly figures.
    let goal = savings::create(&conn, "alice", "Fund", Decimal::from(500), None, today).unwrap();
    savings::contribute(&mut conn, "alice", goal.id, Decimal::from(60), today).unwrap();

    let s = balance::monthly_summary(&conn, "alice", 2025, 8).unwrap();
    assert_eq!(s.income_total, Decimal::from(1000));
    assert_eq!(s.expense_total, Decimal::from(250));
}

#[test]
fn monthly_totals_slot_a_whole_year() {
    let conn = setup();
    record(&conn, "alice", TxnKind::Income, "10", date(2025, 1, 5), None);
    record(&conn, "alice", TxnKind::Expense, "4", date(2025, 1, 20), None);
    record(&conn, "alice", TxnKind::Income, "7", date(2025, 12, 31), None);
    record(&conn, "alice", TxnKind::Income, "99", date(2024, 12, 31), None);

    let months = balance::monthly_totals(&conn, "alice", 2025).unwrap();
    assert_eq!(months.len(), 12);
    assert_eq!(months[0].income_total, Decimal::from(10));
    assert_eq!(months[0].expense_total, Decimal::from(4));
    assert_eq!(months[11].income_total, Decimal::from(7));
    assert!(months[1..11]
        .iter()
        .all(|m| m.income_total.is_zero() && m.expense_total.is_zero()));
}

#[test]
fn expenses_by_category_buckets_uncategorized() {
    let conn = setup();
    let dining =
        categories::ensure(&conn, "alice", "Dining", CategoryKind::Expense, None).unwrap();
    let travel =
        categories::ensure(&conn, "alice", "Travel", CategoryKind::Expense, None).unwrap();
    record(&conn, "alice", TxnKind::Expense, "30", date(2025, 8, 1), Some(dining.id));
    record(&conn, "alice", TxnKind::Expense, "20", date(2025, 8, 2), Some(dining.id));
    record(&conn, "alice", TxnKind::Expense, "45", date(2025, 8, 3), Some(travel.id));
    record(&conn, "alice", TxnKind::Expense, "5", date(2025, 8, 4), None);
    // Income never shows up in a spend breakdown.
    record(&conn, "alice", TxnKind::Income, "500", date(2025, 8, 4), None);

    let spend =
        balance::expenses_by_category(&conn, "alice", date(2025, 8, 1), date(2025, 8, 31))
            .unwrap();
    assert_eq!(spend.len(), 3);
    // Sorted by amount, largest first.
    assert_eq!(spend[0].category, "Dining");
    assert_eq!(spend[0].amount, Decimal::from(50));
    assert_eq!(spend[1].category, "Travel");
    assert_eq!(spend[1].amount, Decimal::from(45));
    assert_eq!(spend[2].category, "Uncategorized");
    assert_eq!(spend[2].amount, Decimal::from(5));
}

#[test]
fn savings_progress_reports_every_goal() {
    let mut conn = setup();
    let today = date(2025, 8, 1);
    let a = savings::create(&conn, "alice", "Car", Decimal::from(2000), None, today).unwrap();
    savings::create(&conn, "alice", "Laptop", Decimal::from(800), None, today).unwrap();
    savings::contribute(&mut conn, "alice", a.id, Decimal::from(500), today).unwrap();

    let progress = balance::savings_progress(&conn, "alice").unwrap();
    assert_eq!(progress.len(), 2);
    let car = progress.iter().find(|p| p.name == "Car").unwrap();
    assert_eq!(car.current, Decimal::from(500));
    assert_eq!(car.remaining, Decimal::from(1500));
    assert_eq!(car.percent_complete, Decimal::from(25));
}

#[test]
fn projections_are_user_scoped() {
    let conn = setup();
    record(&conn, "alice", TxnKind::Income, "100", date(2025, 8, 1), None);
    record(&conn, "bob", TxnKind::Income, "900", date(2025, 8, 1), None);

    assert_eq!(
        balance::current_balance(&conn, "alice").unwrap(),
        Decimal::from(100)
    );
    assert_eq!(
        balance::current_balance(&conn, "bob").unwrap(),
        Decimal::from(900)
    );
}
