// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season, group, player, membership and match mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use freesquash_domain::{Group, GroupPlayer, Match, Player, Season, format_date};
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::convert::{to_column, to_flag};
use crate::diesel_schema::{group_players, league_groups, matches, players, seasons};
use crate::error::PersistenceError;

/// Clears the active flag of every season.
fn deactivate_all_seasons(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    diesel::update(seasons::table.filter(seasons::is_active.eq(1)))
        .set(seasons::is_active.eq(0))
        .execute(conn)?;
    Ok(())
}

/// Inserts a season, deactivating the previous active season first when the
/// new one is active.
///
/// # Returns
///
/// The new `season_id`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_season(conn: &mut SqliteConnection, season: &Season) -> Result<i64, PersistenceError> {
    if season.is_active {
        deactivate_all_seasons(conn)?;
        clear_all_current_groups(conn)?;
    }

    diesel::insert_into(seasons::table)
        .values((
            seasons::name.eq(&season.name),
            seasons::start_date.eq(format_date(season.start_date)),
            seasons::end_date.eq(format_date(season.end_date)),
            seasons::is_active.eq(to_flag(season.is_active)),
        ))
        .execute(conn)?;

    let season_id: i64 = get_last_insert_rowid(conn)?;
    debug!(season_id, name = %season.name, "Inserted season");
    Ok(season_id)
}

/// Makes a season the active one and re-points every player's current
/// group at their membership in it.
///
/// # Errors
///
/// Returns an error if any update fails.
pub fn activate_season(conn: &mut SqliteConnection, season_id: i64) -> Result<(), PersistenceError> {
    deactivate_all_seasons(conn)?;
    let updated: usize = diesel::update(seasons::table.find(season_id))
        .set(seasons::is_active.eq(1))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Season {season_id}")));
    }

    clear_all_current_groups(conn)?;
    let memberships: Vec<(i64, i64)> = group_players::table
        .inner_join(league_groups::table)
        .filter(league_groups::season_id.eq(season_id))
        .select((group_players::group_id, group_players::player_id))
        .load::<(i64, i64)>(conn)?;
    for (group_id, player_id) in memberships {
        set_current_group(conn, player_id, Some(group_id))?;
    }
    Ok(())
}

/// Inserts a group.
///
/// # Returns
///
/// The new `group_id`.
///
/// # Errors
///
/// Returns an error if the insert fails, including a duplicate sequence.
pub fn insert_group(conn: &mut SqliteConnection, group: &Group) -> Result<i64, PersistenceError> {
    diesel::insert_into(league_groups::table)
        .values((
            league_groups::season_id.eq(group.season_id),
            league_groups::name.eq(&group.name),
            league_groups::sequence.eq(to_column(group.sequence, "sequence")?),
        ))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Inserts a player.
///
/// # Returns
///
/// The new `player_id`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_player(conn: &mut SqliteConnection, player: &Player) -> Result<i64, PersistenceError> {
    diesel::insert_into(players::table)
        .values((
            players::name.eq(&player.name),
            players::nickname.eq(&player.nickname),
            players::email.eq(&player.email),
            players::phone.eq(&player.phone),
            players::is_active.eq(to_flag(player.is_active)),
            players::current_group_id.eq(player.current_group_id),
        ))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Sets a player's active flag.
///
/// # Errors
///
/// Returns an error if the player does not exist or the update fails.
pub fn set_player_active(
    conn: &mut SqliteConnection,
    player_id: i64,
    is_active: bool,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(players::table.find(player_id))
        .set(players::is_active.eq(to_flag(is_active)))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Player {player_id}")));
    }
    Ok(())
}

/// Points a player's current group at a group, or clears it.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_current_group(
    conn: &mut SqliteConnection,
    player_id: i64,
    group_id: Option<i64>,
) -> Result<(), PersistenceError> {
    diesel::update(players::table.find(player_id))
        .set(players::current_group_id.eq(group_id))
        .execute(conn)?;
    Ok(())
}

/// Clears every player's current group.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn clear_all_current_groups(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    diesel::update(players::table)
        .set(players::current_group_id.eq(None::<i64>))
        .execute(conn)?;
    Ok(())
}

/// Inserts one membership row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_membership(
    conn: &mut SqliteConnection,
    membership: &GroupPlayer,
) -> Result<(), PersistenceError> {
    diesel::insert_into(group_players::table)
        .values((
            group_players::group_id.eq(membership.group_id),
            group_players::player_id.eq(membership.player_id),
            group_players::ranking_position
                .eq(to_column(membership.ranking_position, "ranking_position")?),
        ))
        .execute(conn)?;
    Ok(())
}

/// Deletes one membership row.
///
/// # Errors
///
/// Returns an error if the membership does not exist or the delete fails.
pub fn delete_membership(
    conn: &mut SqliteConnection,
    group_id: i64,
    player_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(group_players::table.find((group_id, player_id)))
        .execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Player {player_id} in group {group_id}"
        )));
    }
    Ok(())
}

/// Rewrites the ranking positions of existing memberships.
///
/// # Errors
///
/// Returns an error if an update fails.
pub fn write_positions(
    conn: &mut SqliteConnection,
    positions: &[GroupPlayer],
) -> Result<(), PersistenceError> {
    for member in positions {
        diesel::update(group_players::table.find((member.group_id, member.player_id)))
            .set(
                group_players::ranking_position
                    .eq(to_column(member.ranking_position, "ranking_position")?),
            )
            .execute(conn)?;
    }
    Ok(())
}

/// Inserts a match result.
///
/// # Returns
///
/// The new `match_id`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_match(conn: &mut SqliteConnection, result: &Match) -> Result<i64, PersistenceError> {
    diesel::insert_into(matches::table)
        .values((
            matches::group_id.eq(result.group_id),
            matches::player1_id.eq(result.player1_id),
            matches::player2_id.eq(result.player2_id),
            matches::games_p1.eq(i32::from(result.games_p1)),
            matches::games_p2.eq(i32::from(result.games_p2)),
            matches::status.eq(result.status.as_str()),
            matches::match_date.eq(format_date(result.date)),
        ))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}
