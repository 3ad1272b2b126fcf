// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Classification calculator.
//!
//! Turns match results into an ordered ranking. The calculation is pure:
//! the caller loads a [`LeagueSnapshot`] and passes a [`ClassificationScope`];
//! nothing here touches storage.
//!
//! Ordering is a strict total order:
//! 1. wins, descending
//! 2. average (sets won minus sets lost), descending
//! 3. sets won, descending
//! 4. player name, ascending
//! 5. player id, ascending
//!
//! Because the last key is unique, the result never depends on the order in
//! which matches or members were supplied.

use crate::types::{Group, GroupPlayer, Match, MatchStatus, Player, Season};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use time::Date;

/// Filters applied to a classification.
///
/// All fields are optional. See [`compute_classification`] for how they
/// combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationScope {
    pub group_id: Option<i64>,
    pub season_id: Option<i64>,
    /// Restricts counted matches to those this player took part in.
    pub player_id: Option<i64>,
    /// Inclusive lower bound on match date.
    pub start_date: Option<Date>,
    /// Inclusive upper bound on match date.
    pub end_date: Option<Date>,
}

impl ClassificationScope {
    /// Scope covering one group's whole season.
    #[must_use]
    pub const fn for_group(season_id: i64, group_id: i64) -> Self {
        Self {
            group_id: Some(group_id),
            season_id: Some(season_id),
            player_id: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Scope covering every group of a season.
    #[must_use]
    pub const fn for_season(season_id: i64) -> Self {
        Self {
            group_id: None,
            season_id: Some(season_id),
            player_id: None,
            start_date: None,
            end_date: None,
        }
    }

    fn admits_date(&self, date: Date) -> bool {
        self.start_date.is_none_or(|start| date >= start)
            && self.end_date.is_none_or(|end| date <= end)
    }
}

/// The league data a classification is computed from.
#[derive(Debug, Clone, Default)]
pub struct LeagueSnapshot {
    pub seasons: Vec<Season>,
    pub groups: Vec<Group>,
    pub memberships: Vec<GroupPlayer>,
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
}

impl LeagueSnapshot {
    /// Returns the active season, if one is present in the snapshot.
    #[must_use]
    pub fn active_season(&self) -> Option<&Season> {
        self.seasons.iter().find(|season| season.is_active)
    }

    /// Returns the group with the given id.
    #[must_use]
    pub fn group(&self, group_id: i64) -> Option<&Group> {
        self.groups
            .iter()
            .find(|group| group.group_id == Some(group_id))
    }

    /// Returns the player with the given id.
    #[must_use]
    pub fn player(&self, player_id: i64) -> Option<&Player> {
        self.players
            .iter()
            .find(|player| player.player_id == Some(player_id))
    }

    /// Returns the groups of a season, ordered by ladder sequence.
    #[must_use]
    pub fn groups_of_season(&self, season_id: i64) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self
            .groups
            .iter()
            .filter(|group| group.season_id == season_id)
            .collect();
        groups.sort_by_key(|group| (group.sequence, group.group_id));
        groups
    }

    /// Returns the members of a group, ordered by ranking position.
    #[must_use]
    pub fn members_of(&self, group_id: i64) -> Vec<GroupPlayer> {
        let mut members: Vec<GroupPlayer> = self
            .memberships
            .iter()
            .filter(|membership| membership.group_id == group_id)
            .copied()
            .collect();
        members.sort_by_key(|membership| (membership.ranking_position, membership.player_id));
        members
    }
}

/// One row of a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRow {
    pub player_id: i64,
    pub player_name: String,
    pub wins: u32,
    pub losses: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    /// Sets won minus sets lost.
    pub average: i64,
    /// `round(100 * wins / (wins + losses))`, 0 without matches.
    pub win_percentage: u32,
    pub matches_played: u32,
}

impl ClassificationRow {
    fn empty(player_id: i64, player_name: String) -> Self {
        Self {
            player_id,
            player_name,
            wins: 0,
            losses: 0,
            sets_won: 0,
            sets_lost: 0,
            average: 0,
            win_percentage: 0,
            matches_played: 0,
        }
    }

    fn record(&mut self, own_games: u8, opponent_games: u8, won: bool) {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.sets_won += u32::from(own_games);
        self.sets_lost += u32::from(opponent_games);
        self.matches_played += 1;
    }

    fn finish(&mut self) {
        self.average = i64::from(self.sets_won) - i64::from(self.sets_lost);
        self.win_percentage = win_percentage(self.wins, self.losses);
    }
}

/// Rounded win percentage, halves rounded up.
#[must_use]
pub fn win_percentage(wins: u32, losses: u32) -> u32 {
    let total: u64 = u64::from(wins) + u64::from(losses);
    if total == 0 {
        return 0;
    }
    let scaled: u64 = (200 * u64::from(wins) + total) / (2 * total);
    u32::try_from(scaled).unwrap_or(100)
}

/// Compares two classification rows in ranking order.
///
/// Returns `Less` when `a` ranks above `b`.
#[must_use]
pub fn compare_rows(a: &ClassificationRow, b: &ClassificationRow) -> Ordering {
    match b.wins.cmp(&a.wins) {
        Ordering::Equal => {}
        other => return other,
    }
    match b.average.cmp(&a.average) {
        Ordering::Equal => {}
        other => return other,
    }
    match b.sets_won.cmp(&a.sets_won) {
        Ordering::Equal => {}
        other => return other,
    }
    match a.player_name.cmp(&b.player_name) {
        Ordering::Equal => {}
        other => return other,
    }
    a.player_id.cmp(&b.player_id)
}

/// Groups whose members and matches fall inside a scope.
enum ResolvedScope {
    /// Scope refers to something that does not exist.
    Empty,
    /// Members and matches limited to these groups.
    Groups(BTreeSet<i64>),
    /// Members from these groups, matches from any group.
    ActiveSeason(BTreeSet<i64>),
}

fn resolve_scope(scope: &ClassificationScope, snapshot: &LeagueSnapshot) -> ResolvedScope {
    if scope
        .player_id
        .is_some_and(|player_id| snapshot.player(player_id).is_none())
    {
        return ResolvedScope::Empty;
    }

    if let Some(group_id) = scope.group_id {
        let Some(group) = snapshot.group(group_id) else {
            return ResolvedScope::Empty;
        };
        if scope
            .season_id
            .is_some_and(|season_id| season_id != group.season_id)
        {
            return ResolvedScope::Empty;
        }
        return ResolvedScope::Groups(BTreeSet::from([group_id]));
    }

    if let Some(season_id) = scope.season_id {
        let groups: BTreeSet<i64> = snapshot
            .groups_of_season(season_id)
            .iter()
            .filter_map(|group| group.group_id)
            .collect();
        if groups.is_empty() {
            return ResolvedScope::Empty;
        }
        return ResolvedScope::Groups(groups);
    }

    let active_groups: BTreeSet<i64> = snapshot
        .active_season()
        .and_then(|season| season.season_id)
        .map(|season_id| {
            snapshot
                .groups_of_season(season_id)
                .iter()
                .filter_map(|group| group.group_id)
                .collect()
        })
        .unwrap_or_default();
    ResolvedScope::ActiveSeason(active_groups)
}

/// Computes a classification.
///
/// Scope resolution:
/// - `group_id` limits members and matches to that group; if `season_id`
///   is also set and the group belongs to another season, the result is
///   empty
/// - `season_id` alone covers every group of the season
/// - with neither, members come from the active season's groups and
///   matches from every season
/// - `player_id` counts only matches that player took part in; members are
///   still listed
/// - date bounds are inclusive
/// - unknown ids yield an empty classification
///
/// Only `Played` matches count. Members without a counted match appear with
/// zeros; non-members appear only if they have a counted match.
#[must_use]
pub fn compute_classification(
    scope: &ClassificationScope,
    snapshot: &LeagueSnapshot,
) -> Vec<ClassificationRow> {
    let (member_groups, match_groups): (BTreeSet<i64>, Option<BTreeSet<i64>>) =
        match resolve_scope(scope, snapshot) {
            ResolvedScope::Empty => return Vec::new(),
            ResolvedScope::Groups(groups) => (groups.clone(), Some(groups)),
            ResolvedScope::ActiveSeason(groups) => (groups, None),
        };

    let names: HashMap<i64, &str> = snapshot
        .players
        .iter()
        .filter_map(|player| player.player_id.map(|id| (id, player.name.as_str())))
        .collect();
    let name_of = |player_id: i64| -> String {
        names
            .get(&player_id)
            .map_or_else(String::new, |name| (*name).to_string())
    };

    let mut rows: BTreeMap<i64, ClassificationRow> = BTreeMap::new();

    for membership in snapshot
        .memberships
        .iter()
        .filter(|membership| member_groups.contains(&membership.group_id))
    {
        rows.entry(membership.player_id)
            .or_insert_with(|| ClassificationRow::empty(membership.player_id, name_of(membership.player_id)));
    }

    let counted = snapshot.matches.iter().filter(|result| {
        result.status == MatchStatus::Played
            && match_groups
                .as_ref()
                .is_none_or(|groups| groups.contains(&result.group_id))
            && scope.admits_date(result.date)
            && scope
                .player_id
                .is_none_or(|player_id| result.involves(player_id))
    });

    for result in counted {
        let Some(winner_id) = result.winner_id() else {
            continue;
        };
        rows.entry(result.player1_id)
            .or_insert_with(|| ClassificationRow::empty(result.player1_id, name_of(result.player1_id)))
            .record(result.games_p1, result.games_p2, winner_id == result.player1_id);
        rows.entry(result.player2_id)
            .or_insert_with(|| ClassificationRow::empty(result.player2_id, name_of(result.player2_id)))
            .record(result.games_p2, result.games_p1, winner_id == result.player2_id);
    }

    let mut classification: Vec<ClassificationRow> = rows.into_values().collect();
    for row in &mut classification {
        row.finish();
    }
    classification.sort_by(compare_rows);
    classification
}
