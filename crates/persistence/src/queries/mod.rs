// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `league`: Seasons, groups, players, memberships and matches
//! - `closure`: Closures, rollovers and season history
//! - `audit`: Audit events and season timelines

pub mod audit;
pub mod closure;
pub mod league;

use diesel::SqliteConnection;
use freesquash::State;

use crate::error::PersistenceError;

/// Loads everything a command may need to read.
///
/// # Errors
///
/// Returns an error if any query fails or a row cannot be reconstructed.
pub fn load_state(conn: &mut SqliteConnection) -> Result<State, PersistenceError> {
    Ok(State {
        snapshot: league::load_snapshot(conn)?,
        closures: closure::list_closures(conn)?,
        rollovers: closure::list_rollovers(conn)?,
    })
}
