// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{SEASON_ID, create_ladder_state, group_id};
use crate::{
    GroupProposal, State, preview_closure, propose_movements, ranked_members,
    recompute_group_ranking,
};
use freesquash_domain::{
    ClosureEntry, DomainError, Group, GroupPlayer, MovementPolicy, MovementType,
};

fn movements(entries: &[ClosureEntry]) -> Vec<(i64, MovementType)> {
    entries
        .iter()
        .map(|entry| (entry.player_id, entry.movement_type))
        .collect()
}

#[test]
fn test_eight_player_group_default_bands() {
    let state: State = create_ladder_state(&[8, 8, 8]);
    let proposals: Vec<GroupProposal> =
        propose_movements(SEASON_ID, &state.snapshot, &MovementPolicy::default()).unwrap();

    assert_eq!(proposals.len(), 3);
    let middle: &GroupProposal = &proposals[1];
    assert_eq!(middle.group_name, "Group B");
    assert_eq!(middle.sequence, 2);
    assert_eq!(
        movements(&middle.entries),
        vec![
            (9, MovementType::Promotion),
            (10, MovementType::Promotion),
            (11, MovementType::Stay),
            (12, MovementType::Stay),
            (13, MovementType::Stay),
            (14, MovementType::Stay),
            (15, MovementType::Relegation),
            (16, MovementType::Relegation),
        ]
    );
}

#[test]
fn test_entries_carry_rank_and_wins() {
    let state: State = create_ladder_state(&[6]);
    let proposals: Vec<GroupProposal> =
        propose_movements(SEASON_ID, &state.snapshot, &MovementPolicy::default()).unwrap();

    let entries: &[ClosureEntry] = &proposals[0].entries;
    assert_eq!(entries.len(), 6);
    for (index, entry) in entries.iter().enumerate() {
        assert_eq!(entry.final_rank, u32::try_from(index + 1).unwrap());
        assert_eq!(entry.from_group_id, group_id(0));
        assert_eq!(entry.matches_won, u32::try_from(5 - index).unwrap());
    }
}

#[test]
fn test_small_group_moves_one_each_way() {
    let state: State = create_ladder_state(&[4, 4]);
    let proposals: Vec<GroupProposal> =
        propose_movements(SEASON_ID, &state.snapshot, &MovementPolicy::default()).unwrap();

    assert_eq!(
        movements(&proposals[1].entries),
        vec![
            (5, MovementType::Promotion),
            (6, MovementType::Stay),
            (7, MovementType::Stay),
            (8, MovementType::Relegation),
        ]
    );
}

#[test]
fn test_hold_ladder_ends_policy() {
    let state: State = create_ladder_state(&[6, 6, 6]);
    let policy: MovementPolicy = MovementPolicy {
        hold_ladder_ends: true,
        ..MovementPolicy::default()
    };
    let proposals: Vec<GroupProposal> =
        propose_movements(SEASON_ID, &state.snapshot, &policy).unwrap();

    let top_promotions: usize = proposals[0]
        .entries
        .iter()
        .filter(|e| e.movement_type == MovementType::Promotion)
        .count();
    let bottom_relegations: usize = proposals[2]
        .entries
        .iter()
        .filter(|e| e.movement_type == MovementType::Relegation)
        .count();
    let middle_promotions: usize = proposals[1]
        .entries
        .iter()
        .filter(|e| e.movement_type == MovementType::Promotion)
        .count();

    assert_eq!(top_promotions, 0);
    assert_eq!(bottom_relegations, 0);
    assert_eq!(middle_promotions, 2);
}

#[test]
fn test_season_without_groups_cannot_be_proposed() {
    let state: State = create_ladder_state(&[]);
    assert_eq!(
        propose_movements(SEASON_ID, &state.snapshot, &MovementPolicy::default()),
        Err(DomainError::SeasonHasNoGroups(SEASON_ID))
    );
}

#[test]
fn test_preview_requires_known_season() {
    let state: State = create_ladder_state(&[4]);
    assert!(preview_closure(&state, &MovementPolicy::default(), 99).is_err());
    assert_eq!(
        preview_closure(&state, &MovementPolicy::default(), SEASON_ID)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_ranked_members_skips_former_members() {
    let mut state: State = create_ladder_state(&[4]);
    // Player 1 leaves the group but keeps their results.
    state
        .snapshot
        .memberships
        .retain(|membership| membership.player_id != 1);

    let group: Group = state.snapshot.groups[0].clone();
    let ids: Vec<i64> = ranked_members(&group, &state.snapshot)
        .iter()
        .map(|row| row.player_id)
        .collect();

    assert_eq!(ids, vec![2, 3, 4]);
}

#[test]
fn test_recompute_ranking_follows_classification() {
    let mut state: State = create_ladder_state(&[3]);
    // Scramble stored positions.
    for membership in &mut state.snapshot.memberships {
        membership.ranking_position = 4 - membership.ranking_position;
    }

    let group: Group = state.snapshot.groups[0].clone();
    let positions: Vec<GroupPlayer> = recompute_group_ranking(&group, &state.snapshot);

    assert_eq!(
        positions,
        vec![
            GroupPlayer::new(group_id(0), 1, 1),
            GroupPlayer::new(group_id(0), 2, 2),
            GroupPlayer::new(group_id(0), 3, 3),
        ]
    );
}
