// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season closure mutations.
//!
//! Every write to an existing closure is guarded by its `version`: the
//! update only matches while the row still carries the version the change
//! was computed from and is still `DRAFT`. A concurrent writer that got
//! there first leaves zero matching rows and the write fails with
//! `VersionConflict`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use freesquash_domain::{ClosureEntry, ClosureStatus, SeasonClosure, SeasonHistoryRecord};
use tracing::{debug, warn};

use crate::backend::get_last_insert_rowid;
use crate::convert::{to_column, timestamp_to_column};
use crate::diesel_schema::{closure_entries, season_closures, season_history};
use crate::error::PersistenceError;

/// Inserts a new draft closure and its entries.
///
/// # Returns
///
/// The new `closure_id`.
///
/// # Errors
///
/// Returns `ConstraintViolation` if the season already has a closure, or an
/// error if any insert fails.
pub fn insert_closure(
    conn: &mut SqliteConnection,
    closure: &SeasonClosure,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(season_closures::table)
        .values((
            season_closures::season_id.eq(closure.season_id),
            season_closures::status.eq(closure.status.as_str()),
            season_closures::version.eq(closure.version),
            season_closures::created_at.eq(timestamp_to_column(closure.created_at)?),
        ))
        .execute(conn)?;
    let closure_id: i64 = get_last_insert_rowid(conn)?;

    for entry in &closure.entries {
        insert_entry(conn, closure_id, entry)?;
    }

    debug!(
        closure_id,
        season_id = closure.season_id,
        entries = closure.entries.len(),
        "Inserted draft closure"
    );
    Ok(closure_id)
}

fn insert_entry(
    conn: &mut SqliteConnection,
    closure_id: i64,
    entry: &ClosureEntry,
) -> Result<(), PersistenceError> {
    diesel::insert_into(closure_entries::table)
        .values((
            closure_entries::closure_id.eq(closure_id),
            closure_entries::player_id.eq(entry.player_id),
            closure_entries::from_group_id.eq(entry.from_group_id),
            closure_entries::final_rank.eq(to_column(entry.final_rank, "final_rank")?),
            closure_entries::movement_type.eq(entry.movement_type.as_str()),
            closure_entries::matches_won.eq(to_column(entry.matches_won, "matches_won")?),
        ))
        .execute(conn)?;
    Ok(())
}

/// Moves a draft closure row from `expected_version` to the closure's
/// version, status and approval stamp.
fn advance_version(
    conn: &mut SqliteConnection,
    closure: &SeasonClosure,
    expected_version: i64,
) -> Result<i64, PersistenceError> {
    let closure_id: i64 = closure.closure_id.ok_or_else(|| {
        PersistenceError::NotFound(format!("Closure of season {}", closure.season_id))
    })?;
    let approved_at: Option<String> = closure.approved_at.map(timestamp_to_column).transpose()?;

    let updated: usize = diesel::update(
        season_closures::table
            .filter(season_closures::closure_id.eq(closure_id))
            .filter(season_closures::version.eq(expected_version))
            .filter(season_closures::status.eq(ClosureStatus::Draft.as_str())),
    )
    .set((
        season_closures::version.eq(closure.version),
        season_closures::status.eq(closure.status.as_str()),
        season_closures::approved_at.eq(approved_at),
    ))
    .execute(conn)?;

    if updated == 0 {
        warn!(
            closure_id,
            season_id = closure.season_id,
            expected_version,
            "Closure changed concurrently"
        );
        return Err(PersistenceError::VersionConflict {
            season_id: closure.season_id,
            expected_version,
        });
    }
    Ok(closure_id)
}

/// Writes edited entry movements of a draft closure.
///
/// # Errors
///
/// Returns `VersionConflict` if the closure moved past `expected_version`
/// or was approved, or an error if an update fails.
pub fn update_closure_entries(
    conn: &mut SqliteConnection,
    closure: &SeasonClosure,
    expected_version: i64,
) -> Result<(), PersistenceError> {
    // Entries are written before the version bump: the frozen trigger
    // rejects them once the row is approved.
    let closure_id: i64 = closure.closure_id.ok_or_else(|| {
        PersistenceError::NotFound(format!("Closure of season {}", closure.season_id))
    })?;
    for entry in &closure.entries {
        diesel::update(closure_entries::table.find((closure_id, entry.player_id)))
            .set(closure_entries::movement_type.eq(entry.movement_type.as_str()))
            .execute(conn)?;
    }
    advance_version(conn, closure, expected_version)?;
    Ok(())
}

/// Approves a draft closure and writes the season history records.
///
/// # Errors
///
/// Returns `VersionConflict` if the closure moved past `expected_version`
/// or was already approved, or an error if a write fails.
pub fn approve_closure(
    conn: &mut SqliteConnection,
    closure: &SeasonClosure,
    expected_version: i64,
    history: &[SeasonHistoryRecord],
) -> Result<(), PersistenceError> {
    let closure_id: i64 = advance_version(conn, closure, expected_version)?;

    for record in history {
        diesel::insert_into(season_history::table)
            .values((
                season_history::player_id.eq(record.player_id),
                season_history::season_id.eq(record.season_id),
                season_history::season_name.eq(&record.season_name),
                season_history::group_id.eq(record.group_id),
                season_history::group_name.eq(&record.group_name),
                season_history::final_rank.eq(to_column(record.final_rank, "final_rank")?),
                season_history::movement.eq(record.movement.as_str()),
                season_history::recorded_at.eq(timestamp_to_column(record.recorded_at)?),
            ))
            .execute(conn)?;
    }

    debug!(
        closure_id,
        season_id = closure.season_id,
        history = history.len(),
        "Approved closure"
    );
    Ok(())
}
