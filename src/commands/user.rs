// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_active_user, set_active_user};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("use", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim().to_string();
            set_active_user(conn, &id)?;
            println!("Active user set to '{}'", id);
        }
        Some(("show", _)) => {
            println!("{}", get_active_user(conn)?);
        }
        _ => {}
    }
    Ok(())
}
