// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A name (season, group, player) is empty or invalid.
    InvalidName(String),
    /// Season end date precedes its start date.
    InvalidSeasonDates {
        /// The start date.
        start_date: Date,
        /// The end date.
        end_date: Date,
    },
    /// A classification date range is inverted.
    InvalidDateRange {
        /// The lower bound.
        start_date: Date,
        /// The upper bound.
        end_date: Date,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A match score is not a well-formed best-of-five result.
    InvalidMatchScore {
        /// Games won by player 1.
        games_p1: u8,
        /// Games won by player 2.
        games_p2: u8,
        /// Why the score was rejected.
        reason: String,
    },
    /// A match lists the same player on both sides.
    SelfMatch {
        /// The duplicated player.
        player_id: i64,
    },
    /// Unknown match status string.
    InvalidMatchStatus(String),
    /// Unknown movement type string.
    InvalidMovementType(String),
    /// Unknown closure status string.
    InvalidClosureStatus(String),
    /// A ranking position lies outside `1..=group_size`.
    InvalidRankPosition {
        /// The rejected position.
        position: u32,
        /// The size of the group.
        group_size: u32,
    },
    /// Season does not exist.
    SeasonNotFound(i64),
    /// Group does not exist.
    GroupNotFound(i64),
    /// Player does not exist.
    PlayerNotFound(i64),
    /// Player is not a member of the group.
    PlayerNotInGroup {
        /// The player.
        player_id: i64,
        /// The group.
        group_id: i64,
    },
    /// Player is already a member of the group.
    PlayerAlreadyInGroup {
        /// The player.
        player_id: i64,
        /// The group.
        group_id: i64,
    },
    /// Group sequence numbers start at 1.
    InvalidGroupSequence(u32),
    /// Another group of the season already holds this ladder position.
    DuplicateGroupSequence {
        /// The season.
        season_id: i64,
        /// The contested sequence.
        sequence: u32,
    },
    /// A swap names two players of the same group.
    SwapWithinGroup {
        /// The group.
        group_id: i64,
    },
    /// A swap names groups of two different seasons.
    SwapAcrossSeasons {
        /// Season of the first group.
        first_season_id: i64,
        /// Season of the second group.
        second_season_id: i64,
    },
    /// A season has no groups to close or roll over.
    SeasonHasNoGroups(i64),
    /// No closure has been created for the season.
    ClosureNotFound {
        /// The season.
        season_id: i64,
    },
    /// The season already has a closure.
    ClosureAlreadyExists {
        /// The season.
        season_id: i64,
    },
    /// Some groups still have unplayed pairings.
    SeasonIncomplete {
        /// The season.
        season_id: i64,
        /// Names of the unfinished groups.
        groups: Vec<String>,
    },
    /// An edit references a player with no entry in the closure.
    ClosureEntryNotFound {
        /// The season.
        season_id: i64,
        /// The player without an entry.
        player_id: i64,
    },
    /// The same player appears twice in one edit batch.
    DuplicateEntryEdit {
        /// The repeated player.
        player_id: i64,
    },
    /// A draft closure exists, so the season's groups are locked.
    MembershipLocked {
        /// The season.
        season_id: i64,
    },
    /// The closure is approved and can no longer change.
    ClosureFrozen {
        /// The season.
        season_id: i64,
    },
    /// Rollover requires an approved closure.
    ClosureNotApproved {
        /// The season.
        season_id: i64,
    },
    /// The closure has already been rolled over.
    RolloverAlreadyApplied {
        /// The season that was closed.
        season_id: i64,
        /// The season created by the first rollover.
        new_season_id: i64,
    },
    /// A state transition is not permitted.
    InvalidStateTransition {
        /// The current state.
        current: String,
        /// The requested state.
        target: String,
    },
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidSeasonDates {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Season end date {end_date} must not precede start date {start_date}"
                )
            }
            Self::InvalidDateRange {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Date range start {start_date} is after its end {end_date}"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidMatchScore {
                games_p1,
                games_p2,
                reason,
            } => {
                write!(f, "Invalid match score {games_p1}-{games_p2}: {reason}")
            }
            Self::SelfMatch { player_id } => {
                write!(f, "Player {player_id} cannot play against themselves")
            }
            Self::InvalidMatchStatus(s) => write!(f, "Invalid match status: {s}"),
            Self::InvalidMovementType(s) => write!(f, "Invalid movement type: {s}"),
            Self::InvalidClosureStatus(s) => write!(f, "Invalid closure status: {s}"),
            Self::InvalidRankPosition {
                position,
                group_size,
            } => {
                write!(
                    f,
                    "Ranking position {position} is outside 1..={group_size}"
                )
            }
            Self::SeasonNotFound(id) => write!(f, "Season {id} not found"),
            Self::GroupNotFound(id) => write!(f, "Group {id} not found"),
            Self::PlayerNotFound(id) => write!(f, "Player {id} not found"),
            Self::PlayerNotInGroup {
                player_id,
                group_id,
            } => {
                write!(f, "Player {player_id} is not a member of group {group_id}")
            }
            Self::PlayerAlreadyInGroup {
                player_id,
                group_id,
            } => {
                write!(f, "Player {player_id} is already a member of group {group_id}")
            }
            Self::InvalidGroupSequence(sequence) => {
                write!(f, "Group sequence must be at least 1, got {sequence}")
            }
            Self::DuplicateGroupSequence {
                season_id,
                sequence,
            } => {
                write!(
                    f,
                    "Season {season_id} already has a group at sequence {sequence}"
                )
            }
            Self::SwapWithinGroup { group_id } => {
                write!(f, "Both players are in group {group_id}; nothing to swap")
            }
            Self::SwapAcrossSeasons {
                first_season_id,
                second_season_id,
            } => write!(
                f,
                "Cannot swap between season {first_season_id} and season {second_season_id}"
            ),
            Self::SeasonHasNoGroups(id) => write!(f, "Season {id} has no groups"),
            Self::ClosureNotFound { season_id } => {
                write!(f, "No closure exists for season {season_id}")
            }
            Self::ClosureAlreadyExists { season_id } => {
                write!(f, "Season {season_id} already has a closure")
            }
            Self::SeasonIncomplete { season_id, groups } => {
                write!(
                    f,
                    "Season {season_id} has unfinished groups: {}",
                    groups.join(", ")
                )
            }
            Self::ClosureEntryNotFound {
                season_id,
                player_id,
            } => {
                write!(
                    f,
                    "Player {player_id} has no entry in the closure of season {season_id}"
                )
            }
            Self::DuplicateEntryEdit { player_id } => {
                write!(f, "Player {player_id} is edited more than once")
            }
            Self::MembershipLocked { season_id } => write!(
                f,
                "Season {season_id} has a draft closure; its groups are locked"
            ),
            Self::ClosureFrozen { season_id } => {
                write!(
                    f,
                    "The closure of season {season_id} is approved and cannot change"
                )
            }
            Self::ClosureNotApproved { season_id } => {
                write!(
                    f,
                    "The closure of season {season_id} must be approved before rollover"
                )
            }
            Self::RolloverAlreadyApplied {
                season_id,
                new_season_id,
            } => {
                write!(
                    f,
                    "Season {season_id} was already rolled over into season {new_season_id}"
                )
            }
            Self::InvalidStateTransition { current, target } => {
                write!(f, "Cannot transition from {current} to {target}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
