// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Group, GroupPlayer, LeagueSnapshot, Match, MatchStatus, Player, Season};
use time::Date;
use time::macros::date;

pub const SEASON_ID: i64 = 1;
pub const GROUP_ID: i64 = 10;

pub fn create_test_season(season_id: i64, name: &str, is_active: bool) -> Season {
    Season::with_id(
        season_id,
        String::from(name),
        date!(2026 - 01 - 01),
        date!(2026 - 03 - 31),
        is_active,
    )
}

pub fn create_test_group(group_id: i64, season_id: i64, name: &str, sequence: u32) -> Group {
    Group::with_id(group_id, season_id, String::from(name), sequence)
}

pub fn create_test_player(player_id: i64, name: &str) -> Player {
    let mut player: Player = Player::new(String::from(name));
    player.player_id = Some(player_id);
    player
}

pub fn create_test_match(
    match_id: i64,
    group_id: i64,
    players: (i64, i64),
    games: (u8, u8),
    status: MatchStatus,
    date: Date,
) -> Match {
    Match {
        match_id: Some(match_id),
        group_id,
        player1_id: players.0,
        player2_id: players.1,
        games_p1: games.0,
        games_p2: games.1,
        status,
        date,
    }
}

pub fn played(match_id: i64, group_id: i64, players: (i64, i64), games: (u8, u8)) -> Match {
    create_test_match(
        match_id,
        group_id,
        players,
        games,
        MatchStatus::Played,
        date!(2026 - 02 - 01),
    )
}

/// One active season with a single group of `size` players (ids 1..=size,
/// named "Player 01", "Player 02", ...) and no matches.
pub fn create_test_group_snapshot(size: i64) -> LeagueSnapshot {
    let mut snapshot: LeagueSnapshot = LeagueSnapshot {
        seasons: vec![create_test_season(SEASON_ID, "Spring 2026", true)],
        groups: vec![create_test_group(GROUP_ID, SEASON_ID, "Group A", 1)],
        ..LeagueSnapshot::default()
    };
    for player_id in 1..=size {
        snapshot
            .players
            .push(create_test_player(player_id, &format!("Player {player_id:02}")));
        snapshot.memberships.push(GroupPlayer::new(
            GROUP_ID,
            player_id,
            u32::try_from(player_id).unwrap(),
        ));
    }
    snapshot
}

/// Full round robin in which the lower id always wins 3-1.
///
/// Player `i` ends with `size - i` wins, so the classification is 1..=size.
pub fn create_round_robin_snapshot(size: i64) -> LeagueSnapshot {
    let mut snapshot: LeagueSnapshot = create_test_group_snapshot(size);
    let mut match_id: i64 = 1;
    for p1 in 1..=size {
        for p2 in (p1 + 1)..=size {
            snapshot
                .matches
                .push(played(match_id, GROUP_ID, (p1, p2), (3, 1)));
            match_id += 1;
        }
    }
    snapshot
}
