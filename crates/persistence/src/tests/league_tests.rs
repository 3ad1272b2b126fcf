// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{TestLeague, create_league, execute, prepare};
use crate::{PersistTransitionResult, Persistence, PersistenceError};
use freesquash::{Command, TransitionResult};
use freesquash_domain::{
    GroupPlayer, LeagueSnapshot, Match, MatchStatus, Player, Season,
};
use time::macros::date;

fn positions(snapshot: &LeagueSnapshot, group_id: i64) -> Vec<(i64, u32)> {
    snapshot
        .members_of(group_id)
        .into_iter()
        .map(|member| (member.player_id, member.ranking_position))
        .collect()
}

// ============================================================================
// Seasons
// ============================================================================

#[test]
fn test_season_round_trip() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let league: TestLeague = create_league(&mut persistence, &[2]);

    let seasons: Vec<Season> = persistence.list_seasons().unwrap();
    assert_eq!(seasons.len(), 1);
    assert_eq!(seasons[0].season_id, Some(league.season_id));
    assert_eq!(seasons[0].name, "Spring 2026");
    assert_eq!(seasons[0].start_date, date!(2026 - 01 - 05));
    assert_eq!(seasons[0].end_date, date!(2026 - 03 - 29));
    assert!(seasons[0].is_active);
}

#[test]
fn test_activating_a_season_moves_current_groups() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let league: TestLeague = create_league(&mut persistence, &[2]);

    let summer: i64 = execute(
        &mut persistence,
        Command::CreateSeason {
            name: String::from("Summer 2026"),
            start_date: date!(2026 - 04 - 06),
            end_date: date!(2026 - 06 - 28),
        },
    )
    .entity_id
    .unwrap();
    execute(&mut persistence, Command::ActivateSeason { season_id: summer });

    let snapshot: LeagueSnapshot = persistence.load_snapshot().unwrap();
    assert_eq!(
        snapshot.active_season().and_then(|s| s.season_id),
        Some(summer)
    );
    let player: &Player = snapshot.player(league.players[0][0]).unwrap();
    assert_eq!(player.current_group_id, None);

    execute(
        &mut persistence,
        Command::ActivateSeason {
            season_id: league.season_id,
        },
    );
    let snapshot: LeagueSnapshot = persistence.load_snapshot().unwrap();
    let player: &Player = snapshot.player(league.players[0][0]).unwrap();
    assert_eq!(player.current_group_id, Some(league.group_ids[0]));
    assert_eq!(
        snapshot.seasons.iter().filter(|s| s.is_active).count(),
        1
    );
}

// ============================================================================
// Membership
// ============================================================================

#[test]
fn test_added_players_point_at_their_group() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let league: TestLeague = create_league(&mut persistence, &[3]);

    let snapshot: LeagueSnapshot = persistence.load_snapshot().unwrap();
    let group_id: i64 = league.group_ids[0];
    assert_eq!(
        positions(&snapshot, group_id),
        vec![
            (league.players[0][0], 1),
            (league.players[0][1], 2),
            (league.players[0][2], 3)
        ]
    );
    for player_id in &league.players[0] {
        assert_eq!(
            snapshot.player(*player_id).unwrap().current_group_id,
            Some(group_id)
        );
    }
}

#[test]
fn test_remove_player_compacts_and_clears_pointer() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let league: TestLeague = create_league(&mut persistence, &[3]);
    let group_id: i64 = league.group_ids[0];
    let removed: i64 = league.players[0][0];

    execute(
        &mut persistence,
        Command::RemovePlayerFromGroup {
            group_id,
            player_id: removed,
        },
    );

    let snapshot: LeagueSnapshot = persistence.load_snapshot().unwrap();
    assert_eq!(
        positions(&snapshot, group_id),
        vec![(league.players[0][1], 1), (league.players[0][2], 2)]
    );
    assert_eq!(snapshot.player(removed).unwrap().current_group_id, None);
}

#[test]
fn test_swap_players_between_groups() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let league: TestLeague = create_league(&mut persistence, &[2, 2]);
    let bottom_of_a: i64 = league.players[0][1];
    let top_of_b: i64 = league.players[1][0];

    execute(
        &mut persistence,
        Command::SwapPlayers {
            first_group_id: league.group_ids[0],
            first_player_id: bottom_of_a,
            second_group_id: league.group_ids[1],
            second_player_id: top_of_b,
        },
    );

    let snapshot: LeagueSnapshot = persistence.load_snapshot().unwrap();
    assert_eq!(
        positions(&snapshot, league.group_ids[0]),
        vec![(league.players[0][0], 1), (top_of_b, 2)]
    );
    assert_eq!(
        positions(&snapshot, league.group_ids[1]),
        vec![(bottom_of_a, 1), (league.players[1][1], 2)]
    );
    assert_eq!(
        snapshot.player(top_of_b).unwrap().current_group_id,
        Some(league.group_ids[0])
    );
}

#[test]
fn test_recalculate_ranking_writes_positions() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let league: TestLeague = create_league(&mut persistence, &[3]);
    let group_id: i64 = league.group_ids[0];
    let last: i64 = league.players[0][2];

    // The bottom player beats both others twice more.
    for opponent in &league.players[0][..2] {
        for _ in 0..2 {
            execute(
                &mut persistence,
                Command::RecordMatch {
                    group_id,
                    player1_id: last,
                    player2_id: *opponent,
                    games_p1: 3,
                    games_p2: 0,
                    status: MatchStatus::Played,
                    date: date!(2026 - 03 - 01),
                },
            );
        }
    }
    execute(
        &mut persistence,
        Command::RecalculateGroupRanking { group_id },
    );

    let snapshot: LeagueSnapshot = persistence.load_snapshot().unwrap();
    assert_eq!(positions(&snapshot, group_id)[0], (last, 1));
    let ranks: Vec<u32> = snapshot
        .members_of(group_id)
        .iter()
        .map(|member: &GroupPlayer| member.ranking_position)
        .collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

// ============================================================================
// Matches and constraints
// ============================================================================

#[test]
fn test_match_round_trip() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let league: TestLeague = create_league(&mut persistence, &[2]);
    let group_id: i64 = league.group_ids[0];

    let recorded: PersistTransitionResult = execute(
        &mut persistence,
        Command::RecordMatch {
            group_id,
            player1_id: league.players[0][1],
            player2_id: league.players[0][0],
            games_p1: 1,
            games_p2: 2,
            status: MatchStatus::Injury,
            date: date!(2026 - 03 - 15),
        },
    );

    let snapshot: LeagueSnapshot = persistence.load_snapshot().unwrap();
    let stored: &Match = snapshot
        .matches
        .iter()
        .find(|m| m.match_id == recorded.entity_id)
        .unwrap();
    assert_eq!(stored.status, MatchStatus::Injury);
    assert_eq!((stored.games_p1, stored.games_p2), (1, 2));
    assert_eq!(stored.date, date!(2026 - 03 - 15));
    assert_eq!(stored.winner_id(), None);
}

#[test]
fn test_duplicate_sequence_rejected_by_database() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let league: TestLeague = create_league(&mut persistence, &[2]);

    // Two results computed from the same state race for sequence 2.
    let command = || Command::CreateGroup {
        season_id: league.season_id,
        name: String::from("Group B"),
        sequence: 2,
    };
    let first: TransitionResult = prepare(&mut persistence, command()).unwrap();
    let second: TransitionResult = prepare(&mut persistence, command()).unwrap();

    assert!(persistence.persist_transition(&first).is_ok());
    assert!(matches!(
        persistence.persist_transition(&second),
        Err(PersistenceError::ConstraintViolation(_))
    ));
}

#[test]
fn test_failed_transition_writes_nothing() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let league: TestLeague = create_league(&mut persistence, &[2]);
    let timeline_before: usize = persistence
        .get_audit_timeline(league.season_id)
        .unwrap()
        .len();

    let first: TransitionResult = prepare(
        &mut persistence,
        Command::RemovePlayerFromGroup {
            group_id: league.group_ids[0],
            player_id: league.players[0][0],
        },
    )
    .unwrap();
    persistence.persist_transition(&first).unwrap();

    // Replaying the same removal finds no membership row.
    let replay: Result<PersistTransitionResult, PersistenceError> =
        persistence.persist_transition(&first);
    assert!(matches!(replay, Err(PersistenceError::NotFound(_))));
    assert_eq!(
        persistence
            .get_audit_timeline(league.season_id)
            .unwrap()
            .len(),
        timeline_before + 1
    );
}
