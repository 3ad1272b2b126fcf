// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use freesquash_audit::Cause;
use freesquash_domain::MovementPolicy;
use freesquash_persistence::Persistence;

use crate::{
    AuthenticatedActor, CreateClosureRequest, CreateGroupRequest, CreateSeasonRequest,
    GroupMemberRequest, RecordMatchRequest, RegisterPlayerRequest, Role, SeasonRequest,
    add_player_to_group, approve_closure, create_closure, create_group, create_season,
    record_match, register_player,
};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-123"), Role::Admin)
}

pub fn create_test_player() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("player-456"), Role::Player)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn setup_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_season_request(name: &str) -> CreateSeasonRequest {
    CreateSeasonRequest {
        name: String::from(name),
        start_date: String::from("2026-01-05"),
        end_date: String::from("2026-03-29"),
    }
}

/// Ids of a league built by [`create_test_league`].
pub struct TestLeague {
    pub season_id: i64,
    pub group_ids: Vec<i64>,
    /// Player ids per group, in initial ranking order.
    pub players: Vec<Vec<i64>>,
}

/// Builds an active season with one group per entry of `sizes` through the
/// API handlers.
///
/// Every group plays a full round robin in which the earlier-ranked player
/// wins 3-1.
pub fn create_test_league(persistence: &mut Persistence, sizes: &[usize]) -> TestLeague {
    let admin: AuthenticatedActor = create_test_admin();
    let season_id: i64 = create_season(
        persistence,
        &create_test_season_request("Spring 2026"),
        &admin,
        create_test_cause(),
    )
    .expect("Failed to create season")
    .season_id;

    let mut group_ids: Vec<i64> = Vec::new();
    let mut players: Vec<Vec<i64>> = Vec::new();
    let mut counter: usize = 0;

    for (index, size) in sizes.iter().enumerate() {
        let letter: char = char::from(b'A' + u8::try_from(index).unwrap());
        let group_id: i64 = create_group(
            persistence,
            &CreateGroupRequest {
                season_id,
                name: format!("Group {letter}"),
                sequence: u32::try_from(index + 1).unwrap(),
            },
            &admin,
            create_test_cause(),
        )
        .expect("Failed to create group")
        .group_id;

        let mut members: Vec<i64> = Vec::new();
        for _ in 0..*size {
            counter += 1;
            let player_id: i64 = register_player(
                persistence,
                &RegisterPlayerRequest {
                    name: format!("Player {counter:02}"),
                    nickname: None,
                    email: None,
                    phone: None,
                },
                &admin,
                create_test_cause(),
            )
            .expect("Failed to register player")
            .player_id;
            add_player_to_group(
                persistence,
                &GroupMemberRequest {
                    group_id,
                    player_id,
                },
                &admin,
                create_test_cause(),
            )
            .expect("Failed to add player to group");
            members.push(player_id);
        }

        for (i, first) in members.iter().enumerate() {
            for second in &members[i + 1..] {
                record_match(
                    persistence,
                    &create_test_match_request(group_id, *first, *second),
                    &admin,
                    create_test_cause(),
                )
                .expect("Failed to record match");
            }
        }

        group_ids.push(group_id);
        players.push(members);
    }

    TestLeague {
        season_id,
        group_ids,
        players,
    }
}

/// A 3-1 win for `player1_id`.
pub fn create_test_match_request(
    group_id: i64,
    player1_id: i64,
    player2_id: i64,
) -> RecordMatchRequest {
    RecordMatchRequest {
        group_id,
        player1_id,
        player2_id,
        games_p1: 3,
        games_p2: 1,
        status: String::from("PLAYED"),
        date: String::from("2026-02-01"),
    }
}

/// Builds a league and approves its closure with the proposed movements.
pub fn create_approved_league(persistence: &mut Persistence, sizes: &[usize]) -> TestLeague {
    let league: TestLeague = create_test_league(persistence, sizes);
    create_closure(
        persistence,
        &MovementPolicy::default(),
        &CreateClosureRequest {
            season_id: league.season_id,
            overrides: Vec::new(),
        },
        &create_test_admin(),
        create_test_cause(),
    )
    .expect("Failed to create closure");
    approve_closure(
        persistence,
        &SeasonRequest {
            season_id: league.season_id,
        },
        &create_test_admin(),
        create_test_cause(),
    )
    .expect("Failed to approve closure");
    league
}
