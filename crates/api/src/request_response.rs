// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates travel as `YYYY-MM-DD` strings and timestamps as RFC 3339 strings.
//! Enumerations travel as their upper-case database spelling.

use serde::{Deserialize, Serialize};

/// API response for write operations that create nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResponse {
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

// ============================================================================
// Seasons
// ============================================================================

/// API request to create a season.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateSeasonRequest {
    /// The season name.
    pub name: String,
    /// First day of the season.
    pub start_date: String,
    /// Last day of the season.
    pub end_date: String,
}

/// API response for a successful season creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSeasonResponse {
    /// The canonical numeric identifier.
    pub season_id: i64,
    /// The season name.
    pub name: String,
    /// Whether the new season became the active one.
    pub is_active: bool,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

/// API request to make a season the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActivateSeasonRequest {
    /// The season to activate.
    pub season_id: i64,
}

/// Season information for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonInfo {
    /// The canonical numeric identifier.
    pub season_id: i64,
    /// The season name.
    pub name: String,
    /// First day of the season.
    pub start_date: String,
    /// Last day of the season.
    pub end_date: String,
    /// Whether this is the active season.
    pub is_active: bool,
}

/// API response listing every season, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSeasonsResponse {
    /// The seasons.
    pub seasons: Vec<SeasonInfo>,
}

// ============================================================================
// Groups and players
// ============================================================================

/// API request to add a group to a season's ladder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateGroupRequest {
    /// The season the group belongs to.
    pub season_id: i64,
    /// The group name.
    pub name: String,
    /// Ladder position, 1 = strongest.
    pub sequence: u32,
}

/// API response for a successful group creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGroupResponse {
    /// The canonical numeric identifier.
    pub group_id: i64,
    /// The season the group belongs to.
    pub season_id: i64,
    /// The group name.
    pub name: String,
    /// Ladder position.
    pub sequence: u32,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

/// API request to register a player.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegisterPlayerRequest {
    /// The player's full name.
    pub name: String,
    /// Optional nickname.
    #[serde(default)]
    pub nickname: Option<String>,
    /// Optional email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

/// API response for a successful player registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterPlayerResponse {
    /// The canonical numeric identifier.
    pub player_id: i64,
    /// The player's full name.
    pub name: String,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

/// API request naming one player of one group.
///
/// Used to add a player to a group and to remove them from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct GroupMemberRequest {
    /// The group.
    pub group_id: i64,
    /// The player.
    pub player_id: i64,
}

/// API request to swap two players between groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SwapPlayersRequest {
    /// The group of the first player.
    pub first_group_id: i64,
    /// The first player.
    pub first_player_id: i64,
    /// The group of the second player.
    pub second_group_id: i64,
    /// The second player.
    pub second_player_id: i64,
}

/// A group member and their ranking position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    /// The player.
    pub player_id: i64,
    /// 1-based position inside the group.
    pub ranking_position: u32,
}

/// API response describing a group's roster after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRosterResponse {
    /// The group.
    pub group_id: i64,
    /// The members in ranking order.
    pub members: Vec<MemberInfo>,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

/// API request to rewrite a group's ranking from its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecalculateGroupRankingRequest {
    /// The group.
    pub group_id: i64,
}

/// API request to flip a player's active flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TogglePlayerActiveRequest {
    /// The player.
    pub player_id: i64,
}

/// API response for a successful active flag toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TogglePlayerActiveResponse {
    /// The player.
    pub player_id: i64,
    /// The new value of the flag.
    pub is_active: bool,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

// ============================================================================
// Matches and classification
// ============================================================================

/// API request to record a match result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecordMatchRequest {
    /// The group the match was played in.
    pub group_id: i64,
    /// First player.
    pub player1_id: i64,
    /// Second player.
    pub player2_id: i64,
    /// Games won by the first player.
    pub games_p1: u8,
    /// Games won by the second player.
    pub games_p2: u8,
    /// `PLAYED`, `INJURY` or `CANCELLED`.
    pub status: String,
    /// The day the match took place.
    pub date: String,
}

/// API response for a successfully recorded match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMatchResponse {
    /// The canonical numeric identifier.
    pub match_id: i64,
    /// The winner, if the match has one.
    pub winner_id: Option<i64>,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

/// One line of a classification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRowInfo {
    /// 1-based position in the table.
    pub position: u32,
    /// The player.
    pub player_id: i64,
    /// The player's name.
    pub player_name: String,
    /// Matches won.
    pub wins: u32,
    /// Matches lost.
    pub losses: u32,
    /// Games won.
    pub sets_won: u32,
    /// Games lost.
    pub sets_lost: u32,
    /// `sets_won - sets_lost`.
    pub average: i64,
    /// Rounded win percentage.
    pub win_percentage: u32,
    /// Counted matches.
    pub matches_played: u32,
}

/// API response carrying a classification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    /// The rows in ranking order.
    pub rows: Vec<ClassificationRowInfo>,
}

// ============================================================================
// Closures
// ============================================================================

/// API request naming a season.
///
/// Used for closure previews and approvals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeasonRequest {
    /// The season.
    pub season_id: i64,
}

/// A requested movement for one player.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EntryEditRequest {
    /// The player.
    pub player_id: i64,
    /// `PROMOTION`, `RELEGATION` or `STAY`.
    pub movement_type: String,
}

/// API request to create a season's draft closure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateClosureRequest {
    /// The season to close.
    pub season_id: i64,
    /// Movements that replace the proposed ones.
    #[serde(default)]
    pub overrides: Vec<EntryEditRequest>,
}

/// API request to edit movements of a draft closure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EditClosureEntriesRequest {
    /// The season whose closure is edited.
    pub season_id: i64,
    /// The new movements.
    pub entries: Vec<EntryEditRequest>,
}

/// One player's line in a closure or preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureEntryInfo {
    /// The player.
    pub player_id: i64,
    /// The player's name.
    pub player_name: String,
    /// The group the player finished in.
    pub from_group_id: i64,
    /// Position in that group's classification.
    pub final_rank: u32,
    /// The movement into the next season.
    pub movement_type: String,
    /// Matches won during the season.
    pub matches_won: u32,
}

/// Proposed movements for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupProposalInfo {
    /// The group.
    pub group_id: i64,
    /// The group name.
    pub group_name: String,
    /// Ladder position.
    pub sequence: u32,
    /// The entries in final rank order.
    pub entries: Vec<ClosureEntryInfo>,
}

/// API response for a closure preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewClosureResponse {
    /// The season.
    pub season_id: i64,
    /// Groups unfinished at preview time, by name.
    pub unfinished_groups: Vec<String>,
    /// One proposal per group in ladder order.
    pub groups: Vec<GroupProposalInfo>,
}

/// A persisted closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureInfo {
    /// The canonical numeric identifier.
    pub closure_id: i64,
    /// The closed season.
    pub season_id: i64,
    /// `DRAFT` or `APPROVED`.
    pub status: String,
    /// Optimistic concurrency counter.
    pub version: i64,
    /// When the closure was created.
    pub created_at: String,
    /// When the closure was approved.
    pub approved_at: Option<String>,
    /// The entries, grouped by ladder position then final rank.
    pub entries: Vec<ClosureEntryInfo>,
}

/// API response for a closure mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureResponse {
    /// The closure after the change.
    pub closure: ClosureInfo,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

// ============================================================================
// Rollover
// ============================================================================

/// API request to build the next season from an approved closure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RolloverSeasonRequest {
    /// The closed season.
    pub season_id: i64,
    /// Name of the new season.
    pub name: String,
    /// First day of the new season.
    pub start_date: String,
    /// Last day of the new season.
    pub end_date: String,
    /// Whether players are carried over into the new groups.
    pub import_players: bool,
}

/// A group created by a rollover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverGroupInfo {
    /// The canonical numeric identifier.
    pub group_id: i64,
    /// The group name.
    pub name: String,
    /// Ladder position.
    pub sequence: u32,
    /// The members in ranking order.
    pub members: Vec<MemberInfo>,
}

/// API response for a successful rollover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverSeasonResponse {
    /// The new season.
    pub new_season_id: i64,
    /// The new season's groups in ladder order.
    pub groups: Vec<RolloverGroupInfo>,
    /// Players left out because they are inactive.
    pub skipped_players: Vec<i64>,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

// ============================================================================
// History and audit
// ============================================================================

/// One season of a player's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonHistoryInfo {
    /// The season.
    pub season_id: i64,
    /// The season name at approval time.
    pub season_name: String,
    /// The group the player finished in.
    pub group_id: i64,
    /// The group name at approval time.
    pub group_name: String,
    /// Final position in the group.
    pub final_rank: u32,
    /// The movement recorded at approval.
    pub movement: String,
    /// When the record was written.
    pub recorded_at: String,
}

/// API response listing a player's history, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHistoryResponse {
    /// The player.
    pub player_id: i64,
    /// The history records.
    pub history: Vec<SeasonHistoryInfo>,
}

/// Serializable representation of an audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// The event ID.
    pub event_id: Option<i64>,
    /// The actor ID.
    pub actor_id: String,
    /// The actor type.
    pub actor_type: String,
    /// The cause ID.
    pub cause_id: String,
    /// The cause description.
    pub cause_description: String,
    /// The action name.
    pub action_name: String,
    /// Optional action details.
    pub action_details: Option<String>,
    /// State before the transition.
    pub before_snapshot: String,
    /// State after the transition.
    pub after_snapshot: String,
}

/// API response listing a season's audit events in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTimelineResponse {
    /// The season.
    pub season_id: i64,
    /// The events, oldest first.
    pub events: Vec<AuditEventInfo>,
}
