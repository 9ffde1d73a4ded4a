// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerclip::error::LedgerError;
use ledgerclip::ledger::{categories, transactions};
use ledgerclip::models::{
    CategoryFilter, CategoryKind, NewTransaction, TxnFilter, TxnKind,
};
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
) -> ledgerclip::models::Transaction {
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
    .unwrap()
}

#[test]
fn record_rejects_non_positive_amounts() {
    let conn = setup();
    for bad in ["0", "-5"] {
        let err = transactions::record(
            &conn,
            "alice",
            &NewTransaction {
                category_id: None,
                amount: bad.parse().unwrap(),
                kind: TxnKind::Expense,
                description: None,
                date: date(2025, 8, 1),
            },
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)), "{:?}", err);
    }
}

#[test]
fn record_rejects_unknown_category() {
    let conn = setup();
    let err = transactions::record(
        &conn,
        "alice",
        &NewTransaction {
            category_id: Some(999),
            amount: Decimal::from(10),
            kind: TxnKind::Expense,
            description: None,
            date: date(2025, 8, 1),
        },
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }), "{:?}", err);
}

#[test]
fn round_trip_preserves_fields() {
    let conn = setup();
    let cat = categories::ensure(&conn, "alice", "Dining", CategoryKind::Expense, Some("🍜"))
        .unwrap();
    let recorded = transactions::record(
        &conn,
        "alice",
        &NewTransaction {
            category_id: Some(cat.id),
            amount: "42.35".parse().unwrap(),
            kind: TxnKind::Expense,
            description: Some("lunch".into()),
            date: date(2025, 8, 10),
        },
    )
    .unwrap();
    let fetched = transactions::get(&conn, "alice", recorded.id).unwrap();
    assert_eq!(fetched.category_id, Some(cat.id));
    assert_eq!(fetched.amount, "42.35".parse::<Decimal>().unwrap());
    assert_eq!(fetched.kind, TxnKind::Expense);
    assert_eq!(fetched.description.as_deref(), Some("lunch"));
    assert_eq!(fetched.date, date(2025, 8, 10));
}

#[test]
fn list_orders_newest_first_with_stable_ties() {
    let conn = setup();
    let a = record(&conn, "alice", TxnKind::Income, "1", date(2025, 8, 5), None);
    let b = record(&conn, "alice", TxnKind::Income, "2", date(2025, 8, 7), None);
    let c = record(&conn, "alice", TxnKind::Income, "3", date(2025, 8, 5), None);

    let listed = transactions::list(&conn, "alice", &TxnFilter::default()).unwrap();
    let ids: Vec<i64> = listed.iter().map(|t| t.id).collect();
    // Newest date first; same-date rows keep insertion order.
    assert_eq!(ids, vec![b.id, a.id, c.id]);
}

#[test]
fn sum_equals_mathematical_sum() {
    let conn = setup();
    let amounts = ["10.10", "20.25", "0.65", "100"];
    for a in amounts {
        record(&conn, "alice", TxnKind::Expense, a, date(2025, 8, 3), None);
    }
    record(&conn, "alice", TxnKind::Income, "55", date(2025, 8, 3), None);

    let expected: Decimal = amounts.iter().map(|a| a.parse::<Decimal>().unwrap()).sum();
    let total = transactions::sum(
        &conn,
        "alice",
        &TxnFilter {
            kind: Some(TxnKind::Expense),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(total, expected);
}

#[test]
fn filters_restrict_by_category_kind_and_range() {
    let conn = setup();
    let dining = categories::ensure(&conn, "alice", "Dining", CategoryKind::Expense, None)
        .unwrap();
    record(&conn, "alice", TxnKind::Expense, "10", date(2025, 7, 1), Some(dining.id));
    record(&conn, "alice", TxnKind::Expense, "20", date(2025, 8, 1), Some(dining.id));
    record(&conn, "alice", TxnKind::Expense, "40", date(2025, 8, 2), None);

    let filter = TxnFilter {
        category: CategoryFilter::Id(dining.id),
        kind: Some(TxnKind::Expense),
        from: Some(date(2025, 8, 1)),
        to: Some(date(2025, 8, 31)),
    };
    assert_eq!(
        transactions::sum(&conn, "alice", &filter).unwrap(),
        Decimal::from(20)
    );

    let uncat = TxnFilter {
        category: CategoryFilter::Uncategorized,
        ..Default::default()
    };
    assert_eq!(
        transactions::sum(&conn, "alice", &uncat).unwrap(),
        Decimal::from(40)
    );
}

#[test]
fn amend_corrects_description_and_category_only() {
    let conn = setup();
    let groceries =
        categories::ensure(&conn, "alice", "Groceries", CategoryKind::Expense, None).unwrap();
    let t = record(&conn, "alice", TxnKind::Expense, "15", date(2025, 8, 4), None);

    let amended = transactions::amend(
        &conn,
        "alice",
        t.id,
        Some(Some("weekly shop".into())),
        Some(Some(groceries.id)),
    )
    .unwrap();
    assert_eq!(amended.description.as_deref(), Some("weekly shop"));
    assert_eq!(amended.category_id, Some(groceries.id));
    // Immutable fields untouched.
    assert_eq!(amended.amount, t.amount);
    assert_eq!(amended.date, t.date);

    let cleared =
        transactions::amend(&conn, "alice", t.id, Some(None), Some(None)).unwrap();
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.category_id, None);
}

#[test]
fn remove_succeeds_once_then_not_found() {
    let conn = setup();
    let t = record(&conn, "alice", TxnKind::Income, "5", date(2025, 8, 1), None);
    transactions::remove(&conn, "alice", t.id).unwrap();
    let err = transactions::remove(&conn, "alice", t.id).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }), "{:?}", err);
}

#[test]
fn other_users_rows_are_denied_not_revealed() {
    let conn = setup();
    let t = record(&conn, "alice", TxnKind::Income, "5", date(2025, 8, 1), None);

    let err = transactions::get(&conn, "bob", t.id).unwrap_err();
    assert!(matches!(err, LedgerError::Authorization { .. }), "{:?}", err);
    // Bob's listings are unaffected by Alice's ledger.
    assert!(transactions::list(&conn, "bob", &TxnFilter::default())
        .unwrap()
        .is_empty());
}

#[test]
fn unknown_kind_is_a_validation_error() {
    let err = TxnKind::parse("groceries").unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)), "{:?}", err);
    for good in [
        "income",
        "expense",
        "transfer",
        "savings",
        "savings-withdrawal",
        "investment",
    ] {
        assert_eq!(TxnKind::parse(good).unwrap().as_str(), good);
    }
}

#[test]
fn database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledgerclip.sqlite");
    {
        let conn = ledgerclip::db::open_at(&path).unwrap();
        record(&conn, "alice", TxnKind::Income, "12.50", date(2025, 8, 1), None);
    }
    let conn = ledgerclip::db::open_at(&path).unwrap();
    let listed = transactions::list(&conn, "alice", &TxnFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].amount, "12.50".parse::<Decimal>().unwrap());
}

#[test]
fn cli_tx_add_trims_inputs() {
    let conn = setup();
    let cli = ledgerclip::cli::build_cli();
    let matches = cli.get_matches_from([
        "ledgerclip", "tx", "add", "--date", " 2025-08-02 ", "--amount", " 19.99 ", "--kind",
        "expense",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        ledgerclip::commands::transactions::handle(&conn, "alice", tx_m).unwrap();
    } else {
        panic!("tx command not parsed");
    }
    let listed = transactions::list(&conn, "alice", &TxnFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].amount, "19.99".parse::<Decimal>().unwrap());
    assert_eq!(listed[0].date, date(2025, 8, 2));
}
