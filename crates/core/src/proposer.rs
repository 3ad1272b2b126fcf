// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Movement proposals and group ranking.
//!
//! Both work from a group's whole-season classification restricted to the
//! group's current members, so positions always run 1..N.

use freesquash_domain::{
    ClassificationRow, ClassificationScope, ClosureEntry, DomainError, Group, GroupPlayer,
    LadderPlacement, LeagueSnapshot, MovementPolicy, compute_classification,
};
use std::collections::HashSet;

/// Proposed movements for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupProposal {
    pub group_id: i64,
    pub group_name: String,
    pub sequence: u32,
    pub entries: Vec<ClosureEntry>,
}

/// Returns the current members of a group in classification order.
///
/// Former members who still have matches in the group are left out.
#[must_use]
pub fn ranked_members(group: &Group, snapshot: &LeagueSnapshot) -> Vec<ClassificationRow> {
    let Some(group_id) = group.group_id else {
        return Vec::new();
    };
    let members: HashSet<i64> = snapshot
        .members_of(group_id)
        .iter()
        .map(|membership| membership.player_id)
        .collect();

    compute_classification(
        &ClassificationScope::for_group(group.season_id, group_id),
        snapshot,
    )
    .into_iter()
    .filter(|row| members.contains(&row.player_id))
    .collect()
}

/// Computes fresh ranking positions for a group.
#[must_use]
pub fn recompute_group_ranking(group: &Group, snapshot: &LeagueSnapshot) -> Vec<GroupPlayer> {
    let Some(group_id) = group.group_id else {
        return Vec::new();
    };
    ranked_members(group, snapshot)
        .iter()
        .zip(1..)
        .map(|(row, position)| GroupPlayer::new(group_id, row.player_id, position))
        .collect()
}

/// Proposes default movements for one group.
///
/// # Errors
///
/// Returns `DomainError::InvalidRankPosition` only if the band policy
/// rejects a position, which cannot happen for a 1..N ranking.
pub fn propose_group(
    group: &Group,
    placement: LadderPlacement,
    snapshot: &LeagueSnapshot,
    policy: &MovementPolicy,
) -> Result<Vec<ClosureEntry>, DomainError> {
    let Some(group_id) = group.group_id else {
        return Ok(Vec::new());
    };
    let rows: Vec<ClassificationRow> = ranked_members(group, snapshot);
    let group_size: u32 = u32::try_from(rows.len()).unwrap_or(u32::MAX);

    rows.iter()
        .zip(1..)
        .map(|(row, final_rank)| {
            Ok(ClosureEntry {
                player_id: row.player_id,
                from_group_id: group_id,
                final_rank,
                movement_type: policy.band_at(final_rank, group_size, placement)?,
                matches_won: row.wins,
            })
        })
        .collect()
}

/// Proposes default movements for every group of a season, in ladder order.
///
/// # Errors
///
/// Returns `DomainError::SeasonHasNoGroups` if the season has no groups.
pub fn propose_movements(
    season_id: i64,
    snapshot: &LeagueSnapshot,
    policy: &MovementPolicy,
) -> Result<Vec<GroupProposal>, DomainError> {
    let groups: Vec<&Group> = snapshot.groups_of_season(season_id);
    if groups.is_empty() {
        return Err(DomainError::SeasonHasNoGroups(season_id));
    }

    let group_count: usize = groups.len();
    groups
        .iter()
        .enumerate()
        .filter_map(|(index, group)| group.group_id.map(|group_id| (index, group_id, *group)))
        .map(|(index, group_id, group)| {
            Ok(GroupProposal {
                group_id,
                group_name: group.name.clone(),
                sequence: group.sequence,
                entries: propose_group(
                    group,
                    LadderPlacement::of(index, group_count),
                    snapshot,
                    policy,
                )?,
            })
        })
        .collect()
}
