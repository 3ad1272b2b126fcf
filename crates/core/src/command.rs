// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use freesquash_domain::{EntryEdit, MatchStatus};
use time::Date;

/// A command represents administrator intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a season. The first season ever created becomes active.
    CreateSeason {
        name: String,
        start_date: Date,
        end_date: Date,
    },
    /// Make a season the active one, deactivating the current one.
    ActivateSeason { season_id: i64 },
    /// Add a group to a season's ladder.
    CreateGroup {
        season_id: i64,
        name: String,
        /// Ladder position, 1 = strongest.
        sequence: u32,
    },
    /// Register a new player.
    RegisterPlayer {
        name: String,
        nickname: Option<String>,
        email: Option<String>,
        phone: Option<String>,
    },
    /// Append a player to the bottom of a group.
    AddPlayerToGroup { group_id: i64, player_id: i64 },
    /// Remove a player from a group, closing the gap in the ranking.
    RemovePlayerFromGroup { group_id: i64, player_id: i64 },
    /// Exchange two players between groups; each takes the other's position.
    SwapPlayers {
        first_group_id: i64,
        first_player_id: i64,
        second_group_id: i64,
        second_player_id: i64,
    },
    /// Record a match result.
    RecordMatch {
        group_id: i64,
        player1_id: i64,
        player2_id: i64,
        games_p1: u8,
        games_p2: u8,
        status: MatchStatus,
        date: Date,
    },
    /// Rewrite a group's ranking positions from its season classification.
    RecalculateGroupRanking { group_id: i64 },
    /// Create the draft closure of a season, optionally overriding some of
    /// the proposed movements.
    CreateClosure {
        season_id: i64,
        overrides: Vec<EntryEdit>,
    },
    /// Change movements of a draft closure.
    EditClosureEntries {
        season_id: i64,
        edits: Vec<EntryEdit>,
    },
    /// Approve a draft closure.
    ApproveClosure { season_id: i64 },
    /// Build the next season from an approved closure.
    RolloverSeason {
        season_id: i64,
        name: String,
        start_date: Date,
        end_date: Date,
        import_players: bool,
    },
    /// Flip a player's active flag.
    TogglePlayerActive { player_id: i64 },
}

impl Command {
    /// The name recorded in the audit trail.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateSeason { .. } => "CreateSeason",
            Self::ActivateSeason { .. } => "ActivateSeason",
            Self::CreateGroup { .. } => "CreateGroup",
            Self::RegisterPlayer { .. } => "RegisterPlayer",
            Self::AddPlayerToGroup { .. } => "AddPlayerToGroup",
            Self::RemovePlayerFromGroup { .. } => "RemovePlayerFromGroup",
            Self::SwapPlayers { .. } => "SwapPlayers",
            Self::RecordMatch { .. } => "RecordMatch",
            Self::RecalculateGroupRanking { .. } => "RecalculateGroupRanking",
            Self::CreateClosure { .. } => "CreateClosure",
            Self::EditClosureEntries { .. } => "EditClosureEntries",
            Self::ApproveClosure { .. } => "ApproveClosure",
            Self::RolloverSeason { .. } => "RolloverSeason",
            Self::TogglePlayerActive { .. } => "TogglePlayerActive",
        }
    }
}
