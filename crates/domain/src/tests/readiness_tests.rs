// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    GROUP_ID, SEASON_ID, create_round_robin_snapshot, create_test_group,
    create_test_group_snapshot, create_test_match, played,
};
use crate::{
    DomainError, GroupPlayer, LeagueSnapshot, MatchStatus, ensure_season_complete,
    missing_pairings, unfinished_groups,
};
use time::macros::date;

#[test]
fn test_full_round_robin_is_complete() {
    let snapshot: LeagueSnapshot = create_round_robin_snapshot(5);
    assert!(missing_pairings(GROUP_ID, &snapshot).is_empty());
    assert!(ensure_season_complete(SEASON_ID, &snapshot).is_ok());
}

#[test]
fn test_missing_pairings_listed_lowest_first() {
    let mut snapshot: LeagueSnapshot = create_test_group_snapshot(3);
    snapshot.matches.push(played(1, GROUP_ID, (3, 1), (3, 0)));

    assert_eq!(missing_pairings(GROUP_ID, &snapshot), vec![(1, 2), (2, 3)]);
}

#[test]
fn test_any_status_counts_as_recorded() {
    let mut snapshot: LeagueSnapshot = create_test_group_snapshot(2);
    snapshot.matches.push(create_test_match(
        1,
        GROUP_ID,
        (1, 2),
        (0, 0),
        MatchStatus::Cancelled,
        date!(2026 - 02 - 02),
    ));

    assert!(ensure_season_complete(SEASON_ID, &snapshot).is_ok());
}

#[test]
fn test_incomplete_season_names_groups() {
    let mut snapshot: LeagueSnapshot = create_round_robin_snapshot(3);
    snapshot
        .groups
        .push(create_test_group(11, SEASON_ID, "Group B", 2));
    snapshot.memberships.push(GroupPlayer::new(11, 20, 1));
    snapshot.memberships.push(GroupPlayer::new(11, 21, 2));

    assert_eq!(
        unfinished_groups(SEASON_ID, &snapshot),
        vec![String::from("Group B")]
    );
    assert_eq!(
        ensure_season_complete(SEASON_ID, &snapshot),
        Err(DomainError::SeasonIncomplete {
            season_id: SEASON_ID,
            groups: vec![String::from("Group B")],
        })
    );
}

#[test]
fn test_season_without_groups_rejected() {
    let snapshot: LeagueSnapshot = create_round_robin_snapshot(3);
    assert_eq!(
        ensure_season_complete(99, &snapshot),
        Err(DomainError::SeasonHasNoGroups(99))
    );
}

#[test]
fn test_single_member_group_is_complete() {
    let snapshot: LeagueSnapshot = create_test_group_snapshot(1);
    assert!(ensure_season_complete(SEASON_ID, &snapshot).is_ok());
}
