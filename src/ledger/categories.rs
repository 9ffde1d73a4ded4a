// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{LedgerError, Result};
use crate::models::{Category, CategoryKind};

/// Create a category, or return the existing one with the same name.
/// Idempotent by `(user_id, name)`; re-ensuring with a different kind is a
/// validation error rather than a silent overwrite.
pub fn ensure(
    conn: &Connection,
    user_id: &str,
    name: &str,
    kind: CategoryKind,
    icon: Option<&str>,
) -> Result<Category> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::validation("category name must not be empty"));
    }
    let existing: Option<(i64, String)> = conn
        .query_row(
            "SELECT id, kind FROM categories WHERE user_id=?1 AND name=?2",
            params![user_id, name],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    if let Some((id, stored_kind)) = existing {
        if CategoryKind::parse(&stored_kind)? != kind {
            return Err(LedgerError::validation(format!(
                "category '{}' already exists with kind {}",
                name, stored_kind
            )));
        }
        return get(conn, user_id, id);
    }
    conn.execute(
        "INSERT INTO categories(user_id, name, kind, icon) VALUES (?1, ?2, ?3, ?4)",
        params![user_id, name, kind.as_str(), icon],
    )?;
    get(conn, user_id, conn.last_insert_rowid())
}

pub fn get(conn: &Connection, user_id: &str, id: i64) -> Result<Category> {
    let row: Option<(String, String, String, Option<String>)> = conn
        .query_row(
            "SELECT user_id, name, kind, icon FROM categories WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    let (owner, name, kind, icon) = row.ok_or(LedgerError::not_found("category", id))?;
    if owner != user_id {
        return Err(LedgerError::Authorization {
            what: "category",
            id,
        });
    }
    Ok(Category {
        id,
        user_id: owner,
        name,
        kind: CategoryKind::parse(&kind)?,
        icon,
    })
}

pub fn list(conn: &Connection, user_id: &str, kind: Option<CategoryKind>) -> Result<Vec<Category>> {
    let mut sql =
        String::from("SELECT id, user_id, name, kind, icon FROM categories WHERE user_id=?");
    let mut params_vec: Vec<String> = vec![user_id.to_string()];
    if let Some(k) = kind {
        sql.push_str(" AND kind=?");
        params_vec.push(k.as_str().to_string());
    }
    sql.push_str(" ORDER BY name");

    let mut stmt = conn.prepare(&sql)?;
    let bind: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(bind))?;

    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: String = r.get(3)?;
        out.push(Category {
            id: r.get(0)?,
            user_id: r.get(1)?,
            name: r.get(2)?,
            kind: CategoryKind::parse(&kind)?,
            icon: r.get(4)?,
        });
    }
    Ok(out)
}

/// Delete a category. Fails with a conflict while any transaction, budget,
/// or recurring payment still references it.
pub fn remove(conn: &Connection, user_id: &str, id: i64) -> Result<()> {
    let cat = get(conn, user_id, id)?;
    let refs: i64 = conn.query_row(
        "SELECT (SELECT COUNT(*) FROM transactions WHERE category_id=?1)
              + (SELECT COUNT(*) FROM budgets WHERE category_id=?1)
              + (SELECT COUNT(*) FROM recurring_payments WHERE category_id=?1)",
        params![id],
        |r| r.get(0),
    )?;
    if refs > 0 {
        return Err(LedgerError::Conflict(format!(
            "category '{}' is still referenced by {} row(s)",
            cat.name, refs
        )));
    }
    conn.execute("DELETE FROM categories WHERE id=?1", params![id])?;
    Ok(())
}
