// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{PersistTransitionResult, Persistence};
use freesquash::{Command, CoreError, State, TransitionResult, apply};
use freesquash_audit::{Actor, Cause};
use freesquash_domain::{MatchStatus, MovementPolicy};
use time::OffsetDateTime;
use time::macros::{date, datetime};

pub const NOW: OffsetDateTime = datetime!(2026-04-01 12:00 UTC);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-admin"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

/// Applies a command against the persisted state without writing it.
pub fn prepare(
    persistence: &mut Persistence,
    command: Command,
) -> Result<TransitionResult, CoreError> {
    let state: State = persistence.load_state().unwrap();
    apply(
        &state,
        &MovementPolicy::default(),
        command,
        create_test_actor(),
        create_test_cause(),
        NOW,
    )
}

/// Applies and persists a command that is expected to succeed.
pub fn execute(persistence: &mut Persistence, command: Command) -> PersistTransitionResult {
    let result: TransitionResult = prepare(persistence, command).unwrap();
    persistence.persist_transition(&result).unwrap()
}

/// Ids of a league built by [`create_league`].
pub struct TestLeague {
    pub season_id: i64,
    pub group_ids: Vec<i64>,
    /// Player ids per group, in initial ranking order.
    pub players: Vec<Vec<i64>>,
}

/// Builds an active season with one group per entry of `sizes`, going
/// through commands exactly as the API does.
///
/// Groups are named "Group A", "Group B", ... in ladder order. Every group
/// plays a full round robin in which the earlier-ranked player wins 3-1.
pub fn create_league(persistence: &mut Persistence, sizes: &[usize]) -> TestLeague {
    let season_id: i64 = execute(
        persistence,
        Command::CreateSeason {
            name: String::from("Spring 2026"),
            start_date: date!(2026 - 01 - 05),
            end_date: date!(2026 - 03 - 29),
        },
    )
    .entity_id
    .unwrap();

    let mut group_ids: Vec<i64> = Vec::new();
    let mut players: Vec<Vec<i64>> = Vec::new();
    let mut counter: usize = 0;

    for (index, size) in sizes.iter().enumerate() {
        let letter: char = char::from(b'A' + u8::try_from(index).unwrap());
        let group_id: i64 = execute(
            persistence,
            Command::CreateGroup {
                season_id,
                name: format!("Group {letter}"),
                sequence: u32::try_from(index + 1).unwrap(),
            },
        )
        .entity_id
        .unwrap();

        let mut members: Vec<i64> = Vec::new();
        for _ in 0..*size {
            counter += 1;
            let player_id: i64 = execute(
                persistence,
                Command::RegisterPlayer {
                    name: format!("Player {counter:02}"),
                    nickname: None,
                    email: None,
                    phone: None,
                },
            )
            .entity_id
            .unwrap();
            execute(
                persistence,
                Command::AddPlayerToGroup {
                    group_id,
                    player_id,
                },
            );
            members.push(player_id);
        }

        for (i, first) in members.iter().enumerate() {
            for second in &members[i + 1..] {
                execute(
                    persistence,
                    Command::RecordMatch {
                        group_id,
                        player1_id: *first,
                        player2_id: *second,
                        games_p1: 3,
                        games_p2: 1,
                        status: MatchStatus::Played,
                        date: date!(2026 - 02 - 01),
                    },
                );
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
