// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season rollover planning.
//!
//! The next season gets one group per group that appears in the closure,
//! with the same name and sequence. Each active player lands one rung up,
//! one rung down, or in place, clamped at the ends of the ladder. Within a
//! destination group, arrivals are ranked by cohort:
//!
//! 1. promoted from the group below
//! 2. stayers (including movers clamped at a ladder end)
//! 3. relegated from the group above
//!
//! and inside each cohort by prior final rank, then source sequence, then
//! player id.

use crate::state::State;
use freesquash_domain::{
    ClosureEntry, DomainError, Group, MovementType, Season, SeasonClosure,
};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A member placed into a new group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMember {
    pub player_id: i64,
    pub ranking_position: u32,
}

/// A group of the new season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedGroup {
    /// The group of the closed season this one continues.
    pub source_group_id: i64,
    pub name: String,
    pub sequence: u32,
    pub members: Vec<PlannedMember>,
}

/// Everything needed to materialize the next season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloverPlan {
    pub closure_id: i64,
    pub source_season_id: i64,
    /// The new season; always active.
    pub season: Season,
    pub groups: Vec<PlannedGroup>,
    pub import_players: bool,
    /// Players whose current group pointer must be cleared.
    pub skipped_players: Vec<i64>,
}

impl RolloverPlan {
    /// Number of players placed into new groups.
    #[must_use]
    pub fn imported_count(&self) -> usize {
        self.groups.iter().map(|group| group.members.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Cohort {
    PromotedFromBelow,
    Stayer,
    RelegatedFromAbove,
}

#[derive(Debug, Clone, Copy)]
struct Arrival {
    cohort: Cohort,
    final_rank: u32,
    source_sequence: u32,
    player_id: i64,
}

fn compare_arrivals(a: &Arrival, b: &Arrival) -> Ordering {
    match a.cohort.cmp(&b.cohort) {
        Ordering::Equal => {}
        other => return other,
    }
    match a.final_rank.cmp(&b.final_rank) {
        Ordering::Equal => {}
        other => return other,
    }
    match a.source_sequence.cmp(&b.source_sequence) {
        Ordering::Equal => {}
        other => return other,
    }
    a.player_id.cmp(&b.player_id)
}

/// Index of the destination rung, clamped to the ladder.
const fn destination_index(source: usize, movement: MovementType, rungs: usize) -> usize {
    match movement {
        MovementType::Promotion => source.saturating_sub(1),
        MovementType::Relegation => {
            if source + 1 < rungs {
                source + 1
            } else {
                source
            }
        }
        MovementType::Stay => source,
    }
}

/// Plans the rollover of an approved closure.
///
/// # Arguments
///
/// * `state` - Current league state
/// * `closure` - The closure to roll over
/// * `season` - The new season (name and dates already validated)
/// * `import_players` - When false, only the season and empty groups are created
///
/// # Errors
///
/// - `ClosureNotApproved` if the closure is still a draft
/// - `ClosureNotFound` if the closure was never persisted
/// - `RolloverAlreadyApplied` if the closure has been rolled over before
/// - `GroupNotFound` if an entry references a missing group
pub fn plan_rollover(
    state: &State,
    closure: &SeasonClosure,
    season: Season,
    import_players: bool,
) -> Result<RolloverPlan, DomainError> {
    closure.ensure_approved()?;
    let closure_id: i64 = closure.closure_id.ok_or(DomainError::ClosureNotFound {
        season_id: closure.season_id,
    })?;
    if let Some(previous) = state.rollover_of(closure_id) {
        return Err(DomainError::RolloverAlreadyApplied {
            season_id: closure.season_id,
            new_season_id: previous.new_season_id,
        });
    }

    // Ladder of groups that appear in the closure, strongest first.
    let mut ladder: Vec<&Group> = Vec::new();
    for entry in &closure.entries {
        if ladder
            .iter()
            .all(|group| group.group_id != Some(entry.from_group_id))
        {
            ladder.push(state.group(entry.from_group_id)?);
        }
    }
    ladder.sort_by_key(|group| (group.sequence, group.group_id));
    let rung_of: BTreeMap<i64, usize> = ladder
        .iter()
        .enumerate()
        .filter_map(|(index, group)| group.group_id.map(|group_id| (group_id, index)))
        .collect();

    let mut arrivals: Vec<Vec<Arrival>> = vec![Vec::new(); ladder.len()];
    let mut skipped_players: Vec<i64> = Vec::new();

    for entry in &closure.entries {
        let active: bool = state
            .snapshot
            .player(entry.player_id)
            .is_some_and(|player| player.is_active);
        if !import_players || !active {
            skipped_players.push(entry.player_id);
            continue;
        }
        let Some(&source) = rung_of.get(&entry.from_group_id) else {
            return Err(DomainError::GroupNotFound(entry.from_group_id));
        };
        let destination: usize = destination_index(source, entry.movement_type, ladder.len());
        arrivals[destination].push(arrival(entry, source, destination, ladder[source].sequence));
    }

    let groups: Vec<PlannedGroup> = ladder
        .iter()
        .zip(arrivals)
        .filter_map(|(group, mut arriving)| {
            let source_group_id: i64 = group.group_id?;
            arriving.sort_by(compare_arrivals);
            let members: Vec<PlannedMember> = arriving
                .iter()
                .zip(1..)
                .map(|(arrival, ranking_position)| PlannedMember {
                    player_id: arrival.player_id,
                    ranking_position,
                })
                .collect();
            Some(PlannedGroup {
                source_group_id,
                name: group.name.clone(),
                sequence: group.sequence,
                members,
            })
        })
        .collect();

    skipped_players.sort_unstable();

    Ok(RolloverPlan {
        closure_id,
        source_season_id: closure.season_id,
        season,
        groups,
        import_players,
        skipped_players,
    })
}

fn arrival(entry: &ClosureEntry, source: usize, destination: usize, source_sequence: u32) -> Arrival {
    let cohort: Cohort = match source.cmp(&destination) {
        Ordering::Greater => Cohort::PromotedFromBelow,
        Ordering::Equal => Cohort::Stayer,
        Ordering::Less => Cohort::RelegatedFromAbove,
    };
    Arrival {
        cohort,
        final_rank: entry.final_rank,
        source_sequence,
        player_id: entry.player_id,
    }
}
