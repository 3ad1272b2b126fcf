// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season, group, player, membership and match queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use freesquash_domain::{Group, GroupPlayer, LeagueSnapshot, Match, MatchStatus, Player, Season};

use crate::convert::{
    date_from_column, enum_from_column, from_column, from_flag, games_from_column,
};
use crate::diesel_schema::{group_players, league_groups, matches, players, seasons};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = seasons)]
struct SeasonRow {
    season_id: i64,
    name: String,
    start_date: String,
    end_date: String,
    is_active: i32,
}

impl SeasonRow {
    fn into_domain(self) -> Result<Season, PersistenceError> {
        Ok(Season::with_id(
            self.season_id,
            self.name,
            date_from_column(&self.start_date)?,
            date_from_column(&self.end_date)?,
            from_flag(self.is_active),
        ))
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = league_groups)]
struct GroupRow {
    group_id: i64,
    season_id: i64,
    name: String,
    sequence: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = players)]
struct PlayerRow {
    player_id: i64,
    name: String,
    nickname: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    is_active: i32,
    current_group_id: Option<i64>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = group_players)]
struct MembershipRow {
    group_id: i64,
    player_id: i64,
    ranking_position: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = matches)]
struct MatchRow {
    match_id: i64,
    group_id: i64,
    player1_id: i64,
    player2_id: i64,
    games_p1: i32,
    games_p2: i32,
    status: String,
    match_date: String,
}

/// Lists every season, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_seasons(conn: &mut SqliteConnection) -> Result<Vec<Season>, PersistenceError> {
    seasons::table
        .order((seasons::start_date.asc(), seasons::season_id.asc()))
        .select(SeasonRow::as_select())
        .load::<SeasonRow>(conn)?
        .into_iter()
        .map(SeasonRow::into_domain)
        .collect()
}

fn list_groups(conn: &mut SqliteConnection) -> Result<Vec<Group>, PersistenceError> {
    league_groups::table
        .order((league_groups::season_id.asc(), league_groups::sequence.asc()))
        .select(GroupRow::as_select())
        .load::<GroupRow>(conn)?
        .into_iter()
        .map(|row| {
            Ok(Group::with_id(
                row.group_id,
                row.season_id,
                row.name,
                from_column(row.sequence, "sequence")?,
            ))
        })
        .collect()
}

fn list_players(conn: &mut SqliteConnection) -> Result<Vec<Player>, PersistenceError> {
    let rows: Vec<PlayerRow> = players::table
        .order(players::player_id.asc())
        .select(PlayerRow::as_select())
        .load::<PlayerRow>(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| Player {
            player_id: Some(row.player_id),
            name: row.name,
            nickname: row.nickname,
            email: row.email,
            phone: row.phone,
            is_active: from_flag(row.is_active),
            current_group_id: row.current_group_id,
        })
        .collect())
}

fn list_memberships(conn: &mut SqliteConnection) -> Result<Vec<GroupPlayer>, PersistenceError> {
    group_players::table
        .order((
            group_players::group_id.asc(),
            group_players::ranking_position.asc(),
        ))
        .select(MembershipRow::as_select())
        .load::<MembershipRow>(conn)?
        .into_iter()
        .map(|row| {
            Ok(GroupPlayer::new(
                row.group_id,
                row.player_id,
                from_column(row.ranking_position, "ranking_position")?,
            ))
        })
        .collect()
}

fn list_matches(conn: &mut SqliteConnection) -> Result<Vec<Match>, PersistenceError> {
    matches::table
        .order(matches::match_id.asc())
        .select(MatchRow::as_select())
        .load::<MatchRow>(conn)?
        .into_iter()
        .map(|row| {
            Ok(Match {
                match_id: Some(row.match_id),
                group_id: row.group_id,
                player1_id: row.player1_id,
                player2_id: row.player2_id,
                games_p1: games_from_column(row.games_p1, "games_p1")?,
                games_p2: games_from_column(row.games_p2, "games_p2")?,
                status: enum_from_column::<MatchStatus>(&row.status)?,
                date: date_from_column(&row.match_date)?,
            })
        })
        .collect()
}

/// Loads the whole league as a classification snapshot.
///
/// # Errors
///
/// Returns an error if any query fails or a row cannot be reconstructed.
pub fn load_snapshot(conn: &mut SqliteConnection) -> Result<LeagueSnapshot, PersistenceError> {
    Ok(LeagueSnapshot {
        seasons: list_seasons(conn)?,
        groups: list_groups(conn)?,
        memberships: list_memberships(conn)?,
        players: list_players(conn)?,
        matches: list_matches(conn)?,
    })
}
