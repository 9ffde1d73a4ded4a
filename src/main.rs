// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use ledgerclip::{cli, commands, db, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;
    let user = match matches.get_one::<String>("user") {
        Some(u) => u.trim().to_string(),
        None => utils::get_active_user(&conn)?,
    };

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("user", sub)) => commands::user::handle(&conn, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, &user, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, &user, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&conn, &user, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut conn, &user, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&mut conn, &user, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, &user, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, &user)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
