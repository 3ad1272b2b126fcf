// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// A league season.
///
/// Exactly one season is active at any time. The active season is the one
/// whose groups define "current membership".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the season has not been persisted yet.
    pub season_id: Option<i64>,
    /// Display name (e.g. "Spring 2026").
    pub name: String,
    /// First day of play.
    pub start_date: Date,
    /// Last day of play.
    pub end_date: Date,
    /// Whether this is the active season.
    pub is_active: bool,
}

impl Season {
    /// Creates a new inactive `Season` without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `name` - The season name
    /// * `start_date` - First day of play
    /// * `end_date` - Last day of play
    #[must_use]
    pub const fn new(name: String, start_date: Date, end_date: Date) -> Self {
        Self {
            season_id: None,
            name,
            start_date,
            end_date,
            is_active: false,
        }
    }

    /// Creates a `Season` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        season_id: i64,
        name: String,
        start_date: Date,
        end_date: Date,
        is_active: bool,
    ) -> Self {
        Self {
            season_id: Some(season_id),
            name,
            start_date,
            end_date,
            is_active,
        }
    }
}

/// A group within a season.
///
/// Groups form a ladder ordered by `sequence`; sequence 1 is the strongest
/// group. Promotion moves a player to `sequence - 1`, relegation to
/// `sequence + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// The canonical numeric identifier assigned by the database.
    pub group_id: Option<i64>,
    /// The owning season.
    pub season_id: i64,
    /// Display name (e.g. "Group A").
    pub name: String,
    /// Position in the season's ladder, 1 = strongest.
    pub sequence: u32,
}

impl Group {
    /// Creates a new `Group` without a persisted ID.
    #[must_use]
    pub const fn new(season_id: i64, name: String, sequence: u32) -> Self {
        Self {
            group_id: None,
            season_id,
            name,
            sequence,
        }
    }

    /// Creates a `Group` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(group_id: i64, season_id: i64, name: String, sequence: u32) -> Self {
        Self {
            group_id: Some(group_id),
            season_id,
            name,
            sequence,
        }
    }
}

/// Membership of a player in a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupPlayer {
    /// The group.
    pub group_id: i64,
    /// The player.
    pub player_id: i64,
    /// Ranking inside the group, 1 = best.
    pub ranking_position: u32,
}

impl GroupPlayer {
    #[must_use]
    pub const fn new(group_id: i64, player_id: i64, ranking_position: u32) -> Self {
        Self {
            group_id,
            player_id,
            ranking_position,
        }
    }
}

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// The canonical numeric identifier assigned by the database.
    pub player_id: Option<i64>,
    /// Full name.
    pub name: String,
    /// Optional nickname.
    pub nickname: Option<String>,
    /// Optional contact email.
    pub email: Option<String>,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Inactive players are skipped at rollover.
    pub is_active: bool,
    /// The player's group in the active season, if any.
    pub current_group_id: Option<i64>,
}

impl Player {
    /// Creates a new active `Player` without a persisted ID.
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self {
            player_id: None,
            name,
            nickname: None,
            email: None,
            phone: None,
            is_active: true,
            current_group_id: None,
        }
    }
}

/// Outcome status of a recorded match.
///
/// Only `Played` matches contribute to a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    /// The match was completed.
    Played,
    /// The match ended through injury.
    Injury,
    /// The match did not take place.
    Cancelled,
}

impl MatchStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Played => "PLAYED",
            Self::Injury => "INJURY",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLAYED" => Ok(Self::Played),
            "INJURY" => Ok(Self::Injury),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidMatchStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded match between two members of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The canonical numeric identifier assigned by the database.
    pub match_id: Option<i64>,
    /// The group the match belongs to.
    pub group_id: i64,
    /// First player.
    pub player1_id: i64,
    /// Second player.
    pub player2_id: i64,
    /// Games won by the first player (0-3).
    pub games_p1: u8,
    /// Games won by the second player (0-3).
    pub games_p2: u8,
    /// Outcome status.
    pub status: MatchStatus,
    /// Day the match was played.
    pub date: Date,
}

impl Match {
    /// Returns the winner of a played match.
    ///
    /// The winner is derived from the score, never stored independently.
    /// Non-played matches and level scores have no winner.
    #[must_use]
    pub const fn winner_id(&self) -> Option<i64> {
        if !matches!(self.status, MatchStatus::Played) {
            return None;
        }
        if self.games_p1 > self.games_p2 {
            Some(self.player1_id)
        } else if self.games_p2 > self.games_p1 {
            Some(self.player2_id)
        } else {
            None
        }
    }

    /// Returns whether the given player took part in this match.
    #[must_use]
    pub const fn involves(&self, player_id: i64) -> bool {
        self.player1_id == player_id || self.player2_id == player_id
    }
}

/// Movement assigned to a ranked player at season closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    /// Move up one group.
    Promotion,
    /// Move down one group.
    Relegation,
    /// Remain in the same group.
    Stay,
}

impl MovementType {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Promotion => "PROMOTION",
            Self::Relegation => "RELEGATION",
            Self::Stay => "STAY",
        }
    }
}

impl FromStr for MovementType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROMOTION" => Ok(Self::Promotion),
            "RELEGATION" => Ok(Self::Relegation),
            "STAY" => Ok(Self::Stay),
            _ => Err(DomainError::InvalidMovementType(s.to_string())),
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a season closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClosureStatus {
    /// Movements are editable.
    #[default]
    Draft,
    /// Movements are final.
    Approved,
}

impl ClosureStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Approved => "APPROVED",
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// The only valid transition is Draft → Approved.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Draft, Self::Approved))
    }

    /// Returns whether entries can no longer change.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl FromStr for ClosureStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "APPROVED" => Ok(Self::Approved),
            _ => Err(DomainError::InvalidClosureStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ClosureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A player's record of one closed season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonHistoryRecord {
    pub player_id: i64,
    pub season_id: i64,
    pub season_name: String,
    pub group_id: i64,
    pub group_name: String,
    pub final_rank: u32,
    pub movement: MovementType,
    /// When the approval that produced this record happened.
    pub recorded_at: OffsetDateTime,
}
