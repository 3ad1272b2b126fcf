// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, State, StateChange, TransitionResult, apply};
use freesquash_audit::{Actor, Cause};
use freesquash_domain::{
    Group, GroupPlayer, LeagueSnapshot, Match, MatchStatus, MovementPolicy, Player, Season,
    SeasonClosure,
};
use time::OffsetDateTime;
use time::macros::{date, datetime};

pub const SEASON_ID: i64 = 1;
pub const NOW: OffsetDateTime = datetime!(2026-04-01 12:00 UTC);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-1"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Season end"))
}

/// Group id of the `index`-th group (0-based) of the test ladder.
pub fn group_id(index: usize) -> i64 {
    10 + i64::try_from(index).unwrap()
}

/// An active season whose ladder has one group per entry of `sizes`.
///
/// Players are numbered consecutively from 1 down the ladder, so with
/// `[8, 8, 8]` group A holds 1..=8, group B 9..=16 and group C 17..=24.
/// Every group has a full round robin in which the lower id wins 3-1,
/// making each group's classification follow player ids.
pub fn create_ladder_state(sizes: &[i64]) -> State {
    let mut snapshot: LeagueSnapshot = LeagueSnapshot {
        seasons: vec![Season::with_id(
            SEASON_ID,
            String::from("Spring 2026"),
            date!(2026 - 01 - 05),
            date!(2026 - 03 - 29),
            true,
        )],
        ..LeagueSnapshot::default()
    };

    let mut next_player: i64 = 1;
    let mut next_match: i64 = 1;
    for (index, size) in sizes.iter().enumerate() {
        let gid: i64 = group_id(index);
        let letter: char = char::from(b'A' + u8::try_from(index).unwrap());
        snapshot.groups.push(Group::with_id(
            gid,
            SEASON_ID,
            format!("Group {letter}"),
            u32::try_from(index + 1).unwrap(),
        ));

        let first: i64 = next_player;
        for offset in 0..*size {
            let player_id: i64 = first + offset;
            let mut player: Player = Player::new(format!("Player {player_id:02}"));
            player.player_id = Some(player_id);
            player.current_group_id = Some(gid);
            snapshot.players.push(player);
            snapshot.memberships.push(GroupPlayer::new(
                gid,
                player_id,
                u32::try_from(offset + 1).unwrap(),
            ));
        }
        for p1 in first..first + size {
            for p2 in (p1 + 1)..first + size {
                snapshot.matches.push(Match {
                    match_id: Some(next_match),
                    group_id: gid,
                    player1_id: p1,
                    player2_id: p2,
                    games_p1: 3,
                    games_p2: 1,
                    status: MatchStatus::Played,
                    date: date!(2026 - 02 - 01),
                });
                next_match += 1;
            }
        }
        next_player += size;
    }

    State::new(snapshot)
}

pub fn run(state: &State, command: Command) -> TransitionResult {
    apply(
        state,
        &MovementPolicy::default(),
        command,
        create_test_actor(),
        create_test_cause(),
        NOW,
    )
    .unwrap()
}

/// Creates the draft closure of the test season and stores it as persisted.
pub fn with_draft_closure(mut state: State) -> State {
    let result: TransitionResult = run(
        &state,
        Command::CreateClosure {
            season_id: SEASON_ID,
            overrides: Vec::new(),
        },
    );
    let StateChange::ClosureCreated(mut closure) = result.change else {
        panic!("expected ClosureCreated");
    };
    closure.closure_id = Some(1);
    state.closures.push(closure);
    state
}

/// Creates and approves the closure of the test season.
pub fn with_approved_closure(state: State) -> State {
    let mut state: State = with_draft_closure(state);
    let result: TransitionResult = run(
        &state,
        Command::ApproveClosure {
            season_id: SEASON_ID,
        },
    );
    let StateChange::ClosureApproved { closure, .. } = result.change else {
        panic!("expected ClosureApproved");
    };
    state.closures = vec![closure];
    state
}

pub fn closure_of(state: &State) -> &SeasonClosure {
    state.closure(SEASON_ID).unwrap()
}
