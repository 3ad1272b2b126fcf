// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::rollover::RolloverPlan;
use freesquash_audit::AuditEvent;
use freesquash_domain::{
    DomainError, Group, GroupPlayer, LeagueSnapshot, Match, Player, Season, SeasonClosure,
    SeasonHistoryRecord,
};
use time::OffsetDateTime;

/// Record of a completed rollover.
///
/// At most one exists per closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloverRecord {
    pub closure_id: i64,
    pub source_season_id: i64,
    pub new_season_id: i64,
    pub imported_players: bool,
    pub created_at: OffsetDateTime,
}

/// Everything a command may need to read.
#[derive(Debug, Clone, Default)]
pub struct State {
    pub snapshot: LeagueSnapshot,
    pub closures: Vec<SeasonClosure>,
    pub rollovers: Vec<RolloverRecord>,
}

impl State {
    /// Creates a state with no closures or rollovers.
    #[must_use]
    pub fn new(snapshot: LeagueSnapshot) -> Self {
        Self {
            snapshot,
            closures: Vec::new(),
            rollovers: Vec::new(),
        }
    }

    /// Returns the season, or `SeasonNotFound`.
    ///
    /// # Errors
    ///
    /// Returns an error if no season has the given id.
    pub fn season(&self, season_id: i64) -> Result<&Season, DomainError> {
        self.snapshot
            .seasons
            .iter()
            .find(|season| season.season_id == Some(season_id))
            .ok_or(DomainError::SeasonNotFound(season_id))
    }

    /// Returns the group, or `GroupNotFound`.
    ///
    /// # Errors
    ///
    /// Returns an error if no group has the given id.
    pub fn group(&self, group_id: i64) -> Result<&Group, DomainError> {
        self.snapshot
            .group(group_id)
            .ok_or(DomainError::GroupNotFound(group_id))
    }

    /// Returns the player, or `PlayerNotFound`.
    ///
    /// # Errors
    ///
    /// Returns an error if no player has the given id.
    pub fn player(&self, player_id: i64) -> Result<&Player, DomainError> {
        self.snapshot
            .player(player_id)
            .ok_or(DomainError::PlayerNotFound(player_id))
    }

    /// Returns the closure of a season, if one was created.
    #[must_use]
    pub fn closure(&self, season_id: i64) -> Option<&SeasonClosure> {
        self.closures
            .iter()
            .find(|closure| closure.season_id == season_id)
    }

    /// Returns the closure of a season, or `ClosureNotFound`.
    ///
    /// # Errors
    ///
    /// Returns an error if the season has no closure.
    pub fn require_closure(&self, season_id: i64) -> Result<&SeasonClosure, DomainError> {
        self.closure(season_id)
            .ok_or(DomainError::ClosureNotFound { season_id })
    }

    /// Returns the rollover already applied to a closure, if any.
    #[must_use]
    pub fn rollover_of(&self, closure_id: i64) -> Option<&RolloverRecord> {
        self.rollovers
            .iter()
            .find(|rollover| rollover.closure_id == closure_id)
    }

    /// Fails once the season has a closure; its entries mirror the groups.
    ///
    /// # Errors
    ///
    /// - `ClosureFrozen` when the season's closure is approved
    /// - `MembershipLocked` when the season's closure is still a draft
    pub fn ensure_membership_editable(&self, season_id: i64) -> Result<(), DomainError> {
        match self.closure(season_id) {
            Some(closure) => {
                closure.ensure_editable()?;
                Err(DomainError::MembershipLocked { season_id })
            }
            None => Ok(()),
        }
    }

    /// Returns whether the given season is the active one.
    #[must_use]
    pub fn is_active_season(&self, season_id: i64) -> bool {
        self.snapshot
            .active_season()
            .is_some_and(|season| season.season_id == Some(season_id))
    }
}

/// The change a successful command asks the persistence layer to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    SeasonCreated(Season),
    SeasonActivated {
        season_id: i64,
    },
    GroupCreated(Group),
    PlayerRegistered(Player),
    MembershipAdded {
        membership: GroupPlayer,
        /// Point the player's current group at the new membership.
        set_current_group: bool,
    },
    MembershipRemoved {
        group_id: i64,
        player_id: i64,
        /// The remaining members with compacted positions.
        remaining: Vec<GroupPlayer>,
        /// Clear the player's current group pointer.
        clear_current_group: bool,
    },
    PlayersSwapped {
        /// The two memberships being replaced.
        removed: [GroupPlayer; 2],
        /// Their replacements.
        added: [GroupPlayer; 2],
        /// Move the players' current group pointers.
        set_current_group: bool,
    },
    MatchRecorded(Match),
    RankingRecalculated {
        group_id: i64,
        positions: Vec<GroupPlayer>,
    },
    ClosureCreated(SeasonClosure),
    ClosureEdited {
        closure: SeasonClosure,
        /// The version the edit was based on.
        expected_version: i64,
    },
    ClosureApproved {
        closure: SeasonClosure,
        expected_version: i64,
        history: Vec<SeasonHistoryRecord>,
    },
    SeasonRolledOver(RolloverPlan),
    PlayerActivityToggled {
        player_id: i64,
        is_active: bool,
    },
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// What to persist.
    pub change: StateChange,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
