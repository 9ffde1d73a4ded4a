// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerclip::error::LedgerError;
use ledgerclip::ledger::{categories, recurring, transactions};
use ledgerclip::models::{
    CategoryKind, Frequency, NewRecurringPayment, TxnFilter, TxnKind,
};
use rust_decimal::Decimal;

fn setup() -> rusqlite::Connection {
    ledgerclip::db::open_in_memory().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn monthly(
    conn: &rusqlite::Connection,
    name: &str,
    amount: &str,
    start: NaiveDate,
    end: Option<NaiveDate>,
    category_id: Option<i64>,
) -> ledgerclip::models::RecurringPayment {
    recurring::create(
        conn,
        "alice",
        &NewRecurringPayment {
            name: name.into(),
            amount: amount.parse().unwrap(),
            category_id,
            frequency: Frequency::Monthly,
            start_date: start,
            end_date: end,
        },
    )
    .unwrap()
}

#[test]
fn create_validates_and_sets_first_due_date() {
    let conn = setup();
    let p = monthly(&conn, "Rent", "1200", date(2025, 8, 1), None, None);
    assert_eq!(p.next_payment, p.start_date);

    let err = recurring::create(
        &conn,
        "alice",
        &NewRecurringPayment {
            name: "Bad".into(),
            amount: Decimal::ZERO,
            category_id: None,
            frequency: Frequency::Monthly,
            start_date: date(2025, 8, 1),
            end_date: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)), "{:?}", err);
}

#[test]
fn process_due_materializes_every_elapsed_occurrence() {
    let mut conn = setup();
    let bills =
        categories::ensure(&conn, "alice", "Bills", CategoryKind::Expense, None).unwrap();
    monthly(&conn, "Rent", "1200", date(2025, 5, 1), None, Some(bills.id));

    let recorded = recurring::process_due(&mut conn, "alice", date(2025, 7, 15)).unwrap();
    // May, June, and July occurrences are all due by mid-July.
    assert_eq!(recorded.len(), 3);
    let dates: Vec<NaiveDate> = recorded.iter().map(|t| t.date).collect();
    assert_eq!(dates, vec![date(2025, 5, 1), date(2025, 6, 1), date(2025, 7, 1)]);
    for t in &recorded {
        assert_eq!(t.kind, TxnKind::Expense);
        assert_eq!(t.amount, Decimal::from(1200));
        assert_eq!(t.category_id, Some(bills.id));
        assert_eq!(t.description.as_deref(), Some("Rent"));
    }

    let defs = recurring::list(&conn, "alice").unwrap();
    assert_eq!(defs[0].next_payment, date(2025, 8, 1));

    // Processing again at the same date records nothing new.
    let again = recurring::process_due(&mut conn, "alice", date(2025, 7, 15)).unwrap();
    assert!(again.is_empty());
}

#[test]
fn process_due_respects_the_end_date() {
    let mut conn = setup();
    monthly(
        &conn,
        "Gym",
        "30",
        date(2025, 1, 1),
        Some(date(2025, 2, 15)),
        None,
    );

    let recorded = recurring::process_due(&mut conn, "alice", date(2025, 6, 1)).unwrap();
    // Only January and February fall inside the definition's lifetime.
    assert_eq!(recorded.len(), 2);
    let total = transactions::sum(
        &conn,
        "alice",
        &TxnFilter {
            kind: Some(TxnKind::Expense),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(total, Decimal::from(60));
}

#[test]
fn nothing_due_before_the_start_date() {
    let mut conn = setup();
    monthly(&conn, "Rent", "1200", date(2025, 9, 1), None, None);
    let recorded = recurring::process_due(&mut conn, "alice", date(2025, 8, 15)).unwrap();
    assert!(recorded.is_empty());
}

#[test]
fn update_and_remove_definitions() {
    let conn = setup();
    let p = monthly(&conn, "Rent", "1200", date(2025, 8, 1), None, None);
    let updated = recurring::update(
        &conn,
        "alice",
        p.id,
        &ledgerclip::models::RecurringPatch {
            amount: Some(Decimal::from(1250)),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(updated.amount, Decimal::from(1250));

    recurring::remove(&conn, "alice", p.id).unwrap();
    let err = recurring::remove(&conn, "alice", p.id).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }), "{:?}", err);
}

#[test]
fn definitions_are_user_scoped() {
    let mut conn = setup();
    let p = monthly(&conn, "Rent", "1200", date(2025, 1, 1), None, None);
    let err = recurring::get(&conn, "bob", p.id).unwrap_err();
    assert!(matches!(err, LedgerError::Authorization { .. }), "{:?}", err);

    // Bob's processing run leaves Alice's definitions alone.
    let recorded = recurring::process_due(&mut conn, "bob", date(2025, 6, 1)).unwrap();
    assert!(recorded.is_empty());
    let defs = recurring::list(&conn, "alice").unwrap();
    assert_eq!(defs[0].next_payment, date(2025, 1, 1));
}
