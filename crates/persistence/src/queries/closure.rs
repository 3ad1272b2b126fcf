// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season closure, rollover and season history queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use freesquash::RolloverRecord;
use freesquash_domain::{
    ClosureEntry, ClosureStatus, MovementType, SeasonClosure, SeasonHistoryRecord,
};

use crate::convert::{enum_from_column, from_column, from_flag, timestamp_from_column};
use crate::diesel_schema::{
    closure_entries, league_groups, season_closures, season_history, season_rollovers,
};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = season_closures)]
struct ClosureRow {
    closure_id: i64,
    season_id: i64,
    status: String,
    version: i64,
    created_at: String,
    approved_at: Option<String>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = closure_entries)]
struct EntryRow {
    #[allow(dead_code)]
    closure_id: i64,
    player_id: i64,
    from_group_id: i64,
    final_rank: i32,
    movement_type: String,
    matches_won: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = season_rollovers)]
struct RolloverRow {
    #[allow(dead_code)]
    rollover_id: i64,
    closure_id: i64,
    source_season_id: i64,
    new_season_id: i64,
    imported_players: i32,
    created_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = season_history)]
struct HistoryRow {
    #[allow(dead_code)]
    history_id: i64,
    player_id: i64,
    season_id: i64,
    season_name: String,
    group_id: i64,
    group_name: String,
    final_rank: i32,
    movement: String,
    recorded_at: String,
}

fn load_entries(
    conn: &mut SqliteConnection,
    closure_id: i64,
) -> Result<Vec<ClosureEntry>, PersistenceError> {
    closure_entries::table
        .inner_join(league_groups::table)
        .filter(closure_entries::closure_id.eq(closure_id))
        .order((
            league_groups::sequence.asc(),
            closure_entries::final_rank.asc(),
        ))
        .select(EntryRow::as_select())
        .load::<EntryRow>(conn)?
        .into_iter()
        .map(|row| {
            Ok(ClosureEntry {
                player_id: row.player_id,
                from_group_id: row.from_group_id,
                final_rank: from_column(row.final_rank, "final_rank")?,
                movement_type: enum_from_column::<MovementType>(&row.movement_type)?,
                matches_won: from_column(row.matches_won, "matches_won")?,
            })
        })
        .collect()
}

fn closure_from_row(
    conn: &mut SqliteConnection,
    row: ClosureRow,
) -> Result<SeasonClosure, PersistenceError> {
    let entries: Vec<ClosureEntry> = load_entries(conn, row.closure_id)?;
    Ok(SeasonClosure {
        closure_id: Some(row.closure_id),
        season_id: row.season_id,
        status: enum_from_column::<ClosureStatus>(&row.status)?,
        created_at: timestamp_from_column(&row.created_at)?,
        approved_at: row
            .approved_at
            .as_deref()
            .map(timestamp_from_column)
            .transpose()?,
        version: row.version,
        entries,
    })
}

/// Retrieves the closure of a season with its entries.
///
/// # Returns
///
/// `None` if the season has no closure.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn get_closure(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<Option<SeasonClosure>, PersistenceError> {
    let row: Option<ClosureRow> = season_closures::table
        .filter(season_closures::season_id.eq(season_id))
        .select(ClosureRow::as_select())
        .first::<ClosureRow>(conn)
        .optional()?;

    row.map(|row| closure_from_row(conn, row)).transpose()
}

/// Loads every closure with its entries.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_closures(conn: &mut SqliteConnection) -> Result<Vec<SeasonClosure>, PersistenceError> {
    let rows: Vec<ClosureRow> = season_closures::table
        .order(season_closures::closure_id.asc())
        .select(ClosureRow::as_select())
        .load::<ClosureRow>(conn)?;

    rows.into_iter()
        .map(|row| closure_from_row(conn, row))
        .collect()
}

/// Loads every applied rollover.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_rollovers(conn: &mut SqliteConnection) -> Result<Vec<RolloverRecord>, PersistenceError> {
    season_rollovers::table
        .order(season_rollovers::rollover_id.asc())
        .select(RolloverRow::as_select())
        .load::<RolloverRow>(conn)?
        .into_iter()
        .map(|row| {
            Ok(RolloverRecord {
                closure_id: row.closure_id,
                source_season_id: row.source_season_id,
                new_season_id: row.new_season_id,
                imported_players: from_flag(row.imported_players),
                created_at: timestamp_from_column(&row.created_at)?,
            })
        })
        .collect()
}

/// Lists a player's season history, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn get_player_history(
    conn: &mut SqliteConnection,
    player_id: i64,
) -> Result<Vec<SeasonHistoryRecord>, PersistenceError> {
    season_history::table
        .filter(season_history::player_id.eq(player_id))
        .order((
            season_history::recorded_at.desc(),
            season_history::history_id.desc(),
        ))
        .select(HistoryRow::as_select())
        .load::<HistoryRow>(conn)?
        .into_iter()
        .map(|row| {
            Ok(SeasonHistoryRecord {
                player_id: row.player_id,
                season_id: row.season_id,
                season_name: row.season_name,
                group_id: row.group_id,
                group_name: row.group_name,
                final_rank: from_column(row.final_rank, "final_rank")?,
                movement: enum_from_column::<MovementType>(&row.movement)?,
                recorded_at: timestamp_from_column(&row.recorded_at)?,
            })
        })
        .collect()
}
