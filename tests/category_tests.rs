// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerclip::error::LedgerError;
use ledgerclip::ledger::{budgets, categories, transactions};
use ledgerclip::models::{
    BudgetPeriod, CategoryKind, NewBudget, NewTransaction, TxnKind,
};
use rust_decimal::Decimal;

fn setup() -> rusqlite::Connection {
    ledgerclip::db::open_in_memory().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn ensure_is_idempotent_by_name() {
    let conn = setup();
    let first = categories::ensure(&conn, "alice", "Dining", CategoryKind::Expense, Some("🍜"))
        .unwrap();
    let second =
        categories::ensure(&conn, "alice", " Dining ", CategoryKind::Expense, None).unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(categories::list(&conn, "alice", None).unwrap().len(), 1);
}

#[test]
fn ensure_rejects_kind_change_and_empty_name() {
    let conn = setup();
    categories::ensure(&conn, "alice", "Salary", CategoryKind::Income, None).unwrap();
    let err = categories::ensure(&conn, "alice", "Salary", CategoryKind::Expense, None)
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)), "{:?}", err);

    let err = categories::ensure(&conn, "alice", "  ", CategoryKind::Expense, None).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)), "{:?}", err);
}

#[test]
fn same_name_is_independent_per_user() {
    let conn = setup();
    let a = categories::ensure(&conn, "alice", "Dining", CategoryKind::Expense, None).unwrap();
    let b = categories::ensure(&conn, "bob", "Dining", CategoryKind::Expense, None).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn list_filters_by_kind_and_sorts_by_name() {
    let conn = setup();
    categories::ensure(&conn, "alice", "Travel", CategoryKind::Expense, None).unwrap();
    categories::ensure(&conn, "alice", "Dining", CategoryKind::Expense, None).unwrap();
    categories::ensure(&conn, "alice", "Salary", CategoryKind::Income, None).unwrap();

    let expenses = categories::list(&conn, "alice", Some(CategoryKind::Expense)).unwrap();
    let names: Vec<&str> = expenses.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Dining", "Travel"]);
}

#[test]
fn remove_conflicts_while_referenced() {
    let conn = setup();
    let dining =
        categories::ensure(&conn, "alice", "Dining", CategoryKind::Expense, None).unwrap();
    let t = transactions::record(
        &conn,
        "alice",
        &NewTransaction {
            category_id: Some(dining.id),
            amount: Decimal::from(10),
            kind: TxnKind::Expense,
            description: None,
            date: date(2025, 8, 1),
        },
    )
    .unwrap();
    let b = budgets::create(
        &conn,
        "alice",
        &NewBudget {
            name: "Dining cap".into(),
            category_id: Some(dining.id),
            limit_amount: Decimal::from(100),
            period: BudgetPeriod::Monthly,
            start_date: date(2025, 8, 1),
            end_date: None,
        },
        date(2025, 8, 1),
    )
    .unwrap();

    let err = categories::remove(&conn, "alice", dining.id).unwrap_err();
    assert!(matches!(err, LedgerError::Conflict(_)), "{:?}", err);

    // Dropping the referencing rows clears the conflict.
    transactions::remove(&conn, "alice", t.id).unwrap();
    budgets::remove(&conn, "alice", b.id).unwrap();
    categories::remove(&conn, "alice", dining.id).unwrap();
    assert!(categories::list(&conn, "alice", None).unwrap().is_empty());
}

#[test]
fn categories_are_user_scoped() {
    let conn = setup();
    let dining =
        categories::ensure(&conn, "alice", "Dining", CategoryKind::Expense, None).unwrap();
    let err = categories::get(&conn, "bob", dining.id).unwrap_err();
    assert!(matches!(err, LedgerError::Authorization { .. }), "{:?}", err);
}
