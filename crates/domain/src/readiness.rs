// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season completeness checks.
//!
//! A group is finished once every pair of its current members has at least
//! one recorded match, whatever the status of that match.

use crate::classification::LeagueSnapshot;
use crate::error::DomainError;
use crate::types::{Group, GroupPlayer};
use std::collections::HashSet;

/// Returns the member pairs of a group that have no recorded match.
///
/// Pairs are returned with the lower player id first.
#[must_use]
pub fn missing_pairings(group_id: i64, snapshot: &LeagueSnapshot) -> Vec<(i64, i64)> {
    let members: Vec<GroupPlayer> = snapshot.members_of(group_id);

    let played: HashSet<(i64, i64)> = snapshot
        .matches
        .iter()
        .filter(|result| result.group_id == group_id)
        .map(|result| ordered_pair(result.player1_id, result.player2_id))
        .collect();

    let mut missing: Vec<(i64, i64)> = Vec::new();
    for (i, first) in members.iter().enumerate() {
        for second in &members[i + 1..] {
            let pair: (i64, i64) = ordered_pair(first.player_id, second.player_id);
            if !played.contains(&pair) {
                missing.push(pair);
            }
        }
    }
    missing.sort_unstable();
    missing
}

/// Returns the names of a season's groups that still have unplayed pairings,
/// in ladder order.
#[must_use]
pub fn unfinished_groups(season_id: i64, snapshot: &LeagueSnapshot) -> Vec<String> {
    snapshot
        .groups_of_season(season_id)
        .into_iter()
        .filter(|group| {
            group
                .group_id
                .is_some_and(|group_id| !missing_pairings(group_id, snapshot).is_empty())
        })
        .map(|group: &Group| group.name.clone())
        .collect()
}

/// Fails if any group of the season is unfinished.
///
/// # Errors
///
/// - `SeasonHasNoGroups` if the season has no groups
/// - `SeasonIncomplete` listing the unfinished groups
pub fn ensure_season_complete(season_id: i64, snapshot: &LeagueSnapshot) -> Result<(), DomainError> {
    if snapshot.groups_of_season(season_id).is_empty() {
        return Err(DomainError::SeasonHasNoGroups(season_id));
    }
    let groups: Vec<String> = unfinished_groups(season_id, snapshot);
    if !groups.is_empty() {
        return Err(DomainError::SeasonIncomplete { season_id, groups });
    }
    Ok(())
}

const fn ordered_pair(a: i64, b: i64) -> (i64, i64) {
    if a <= b { (a, b) } else { (b, a) }
}
