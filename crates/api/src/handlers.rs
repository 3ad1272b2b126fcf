// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every mutating handler is one unit of work: authorize, load the current
//! state, apply the command, persist the change with its audit event.

use freesquash::{
    Command, GroupProposal, State, StateChange, TransitionResult, apply,
    preview_closure as propose_closure,
};
use freesquash_audit::{Actor, AuditEvent, Cause};
use freesquash_domain::{
    ClassificationRow, ClassificationScope, ClosureEntry, EntryEdit, GroupPlayer, LeagueSnapshot,
    MatchStatus, MovementPolicy, MovementType, Season, SeasonClosure, SeasonHistoryRecord,
    compute_classification, format_date, parse_date, unfinished_groups,
};
use freesquash_persistence::{PersistTransitionResult, Persistence};
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    ActivateSeasonRequest, AuditEventInfo, AuditTimelineResponse, ClassificationResponse,
    ClassificationRowInfo, ClosureEntryInfo, ClosureInfo, ClosureResponse, CreateClosureRequest,
    CreateGroupRequest, CreateGroupResponse, CreateSeasonRequest, CreateSeasonResponse,
    EditClosureEntriesRequest, EntryEditRequest, GroupMemberRequest, GroupProposalInfo,
    GroupRosterResponse, ListSeasonsResponse, MemberInfo, PlayerHistoryResponse,
    PreviewClosureResponse, RecalculateGroupRankingRequest, RecordMatchRequest,
    RecordMatchResponse, RegisterPlayerRequest, RegisterPlayerResponse, RolloverGroupInfo,
    RolloverSeasonRequest, RolloverSeasonResponse, SeasonHistoryInfo, SeasonInfo, SeasonRequest,
    SwapPlayersRequest, TogglePlayerActiveRequest, TogglePlayerActiveResponse, WriteResponse,
};
use crate::scope::ClassificationQuery;

// ============================================================================
// Shared plumbing
// ============================================================================

/// A persisted transition together with what it changed.
struct Executed {
    change: StateChange,
    persisted: PersistTransitionResult,
}

impl Executed {
    /// The id of the row the change created.
    fn created_id(&self, what: &str) -> Result<i64, ApiError> {
        self.persisted.entity_id.ok_or_else(|| ApiError::Internal {
            message: format!("No {what} id was returned after insert"),
        })
    }
}

fn execute(
    persistence: &mut Persistence,
    command: Command,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    action: &str,
) -> Result<Executed, ApiError> {
    execute_with_policy(
        persistence,
        &MovementPolicy::default(),
        command,
        authenticated_actor,
        cause,
        action,
    )
}

fn execute_with_policy(
    persistence: &mut Persistence,
    policy: &MovementPolicy,
    command: Command,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    action: &str,
) -> Result<Executed, ApiError> {
    AuthorizationService::authorize_mutation(authenticated_actor, action)?;

    let state: State = persistence
        .load_state()
        .map_err(translate_persistence_error)?;
    let actor: Actor = authenticated_actor.to_audit_actor();

    let result: TransitionResult = apply(
        &state,
        policy,
        command,
        actor,
        cause,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let persisted: PersistTransitionResult = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    info!(
        action,
        actor_id = %authenticated_actor.id,
        event_id = persisted.event_id,
        "Transition persisted"
    );

    Ok(Executed {
        change: result.change,
        persisted,
    })
}

fn parse_date_field(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|err| ApiError::InvalidInput {
        field: String::from(field),
        message: err.to_string(),
    })
}

fn parse_edits(entries: &[EntryEditRequest]) -> Result<Vec<EntryEdit>, ApiError> {
    entries
        .iter()
        .map(|entry| {
            MovementType::from_str(&entry.movement_type)
                .map(|movement_type| EntryEdit {
                    player_id: entry.player_id,
                    movement_type,
                })
                .map_err(translate_domain_error)
        })
        .collect()
}

fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, ApiError> {
    timestamp.format(&Rfc3339).map_err(|err| ApiError::Internal {
        message: format!("Failed to format timestamp: {err}"),
    })
}

fn load_snapshot(persistence: &mut Persistence) -> Result<LeagueSnapshot, ApiError> {
    persistence
        .load_snapshot()
        .map_err(translate_persistence_error)
}

fn player_name(snapshot: &LeagueSnapshot, player_id: i64) -> String {
    snapshot
        .player(player_id)
        .map_or_else(String::new, |player| player.name.clone())
}

fn entry_info(entry: &ClosureEntry, snapshot: &LeagueSnapshot) -> ClosureEntryInfo {
    ClosureEntryInfo {
        player_id: entry.player_id,
        player_name: player_name(snapshot, entry.player_id),
        from_group_id: entry.from_group_id,
        final_rank: entry.final_rank,
        movement_type: entry.movement_type.as_str().to_string(),
        matches_won: entry.matches_won,
    }
}

fn closure_info(closure: &SeasonClosure, snapshot: &LeagueSnapshot) -> Result<ClosureInfo, ApiError> {
    let closure_id: i64 = closure.closure_id.ok_or_else(|| ApiError::Internal {
        message: format!("Closure of season {} has no id", closure.season_id),
    })?;
    Ok(ClosureInfo {
        closure_id,
        season_id: closure.season_id,
        status: closure.status.as_str().to_string(),
        version: closure.version,
        created_at: format_timestamp(closure.created_at)?,
        approved_at: closure.approved_at.map(format_timestamp).transpose()?,
        entries: closure
            .entries
            .iter()
            .map(|entry| entry_info(entry, snapshot))
            .collect(),
    })
}

/// Re-reads a closure after a write so the response carries its new version.
fn closure_response(
    persistence: &mut Persistence,
    season_id: i64,
    executed: &Executed,
    message: String,
) -> Result<ClosureResponse, ApiError> {
    let closure: SeasonClosure = persistence
        .get_closure(season_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Closure of season {season_id} vanished after write"),
        })?;
    let snapshot: LeagueSnapshot = load_snapshot(persistence)?;
    Ok(ClosureResponse {
        closure: closure_info(&closure, &snapshot)?,
        message,
        event_id: executed.persisted.event_id,
    })
}

fn member_infos(members: &[GroupPlayer]) -> Vec<MemberInfo> {
    members
        .iter()
        .map(|member| MemberInfo {
            player_id: member.player_id,
            ranking_position: member.ranking_position,
        })
        .collect()
}

fn roster_response(
    persistence: &mut Persistence,
    group_id: i64,
    executed: &Executed,
    message: String,
) -> Result<GroupRosterResponse, ApiError> {
    let snapshot: LeagueSnapshot = load_snapshot(persistence)?;
    Ok(GroupRosterResponse {
        group_id,
        members: member_infos(&snapshot.members_of(group_id)),
        message,
        event_id: executed.persisted.event_id,
    })
}

fn season_info(season: &Season) -> Option<SeasonInfo> {
    season.season_id.map(|season_id| SeasonInfo {
        season_id,
        name: season.name.clone(),
        start_date: format_date(season.start_date),
        end_date: format_date(season.end_date),
        is_active: season.is_active,
    })
}

fn audit_event_info(event: &AuditEvent) -> AuditEventInfo {
    AuditEventInfo {
        event_id: event.event_id,
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action_name: event.action.name.clone(),
        action_details: event.action.details.clone(),
        before_snapshot: event.before.data.clone(),
        after_snapshot: event.after.data.clone(),
    }
}

// ============================================================================
// Classification and closures
// ============================================================================

/// Computes a classification table.
///
/// This function:
/// - Parses the raw query filters into a scope
/// - Loads the league snapshot
/// - Computes and numbers the rows
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `query` - The raw query filters
///
/// # Errors
///
/// Returns an error if a filter is malformed or the league cannot be read.
pub fn get_classification(
    persistence: &mut Persistence,
    query: &ClassificationQuery,
) -> Result<ClassificationResponse, ApiError> {
    let scope: ClassificationScope = query.parse()?;
    let snapshot: LeagueSnapshot = load_snapshot(persistence)?;
    let rows: Vec<ClassificationRow> = compute_classification(&scope, &snapshot);
    debug!(?scope, rows = rows.len(), "Computed classification");

    Ok(ClassificationResponse {
        rows: (1_u32..)
            .zip(rows)
            .map(|(position, row)| ClassificationRowInfo {
                position,
                player_id: row.player_id,
                player_name: row.player_name,
                wins: row.wins,
                losses: row.losses,
                sets_won: row.sets_won,
                sets_lost: row.sets_lost,
                average: row.average,
                win_percentage: row.win_percentage,
                matches_played: row.matches_played,
            })
            .collect(),
    })
}

/// Proposes the movements of a season without writing anything.
///
/// The preview also names the groups that still have unplayed pairings, so
/// the administrator knows whether creating the closure will succeed.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `policy` - Band thresholds
/// * `request` - The season to preview
///
/// # Errors
///
/// Returns an error if the season does not exist or has no groups.
pub fn preview_closure(
    persistence: &mut Persistence,
    policy: &MovementPolicy,
    request: &SeasonRequest,
) -> Result<PreviewClosureResponse, ApiError> {
    let state: State = persistence
        .load_state()
        .map_err(translate_persistence_error)?;
    let proposals: Vec<GroupProposal> =
        propose_closure(&state, policy, request.season_id).map_err(translate_core_error)?;

    Ok(PreviewClosureResponse {
        season_id: request.season_id,
        unfinished_groups: unfinished_groups(request.season_id, &state.snapshot),
        groups: proposals
            .iter()
            .map(|proposal| GroupProposalInfo {
                group_id: proposal.group_id,
                group_name: proposal.group_name.clone(),
                sequence: proposal.sequence,
                entries: proposal
                    .entries
                    .iter()
                    .map(|entry| entry_info(entry, &state.snapshot))
                    .collect(),
            })
            .collect(),
    })
}

/// Retrieves the persisted closure of a season.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the season has no closure.
pub fn get_closure(persistence: &mut Persistence, season_id: i64) -> Result<ClosureInfo, ApiError> {
    let closure: SeasonClosure = persistence
        .get_closure(season_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Closure"),
            message: format!("Season {season_id} has no closure"),
        })?;
    let snapshot: LeagueSnapshot = load_snapshot(persistence)?;
    closure_info(&closure, &snapshot)
}

/// Creates the draft closure of a season.
///
/// This function:
/// - Verifies the actor is authorized (Admin role required)
/// - Parses the movement overrides
/// - Applies a `CreateClosure` command with the configured band policy
/// - Persists the closure and its audit event
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `policy` - Band thresholds
/// * `request` - The season and optional overrides
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - An override names an unknown movement or a player without an entry
/// - The season already has a closure or still has unplayed pairings
pub fn create_closure(
    persistence: &mut Persistence,
    policy: &MovementPolicy,
    request: &CreateClosureRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ClosureResponse, ApiError> {
    let overrides: Vec<EntryEdit> = parse_edits(&request.overrides)?;
    let executed: Executed = execute_with_policy(
        persistence,
        policy,
        Command::CreateClosure {
            season_id: request.season_id,
            overrides,
        },
        authenticated_actor,
        cause,
        "create_closure",
    )?;
    closure_response(
        persistence,
        request.season_id,
        &executed,
        format!("Created draft closure for season {}", request.season_id),
    )
}

/// Changes movements of a draft closure.
///
/// The batch is applied entirely or not at all.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - The closure is approved or another edit won the race
/// - An entry names an unknown movement or player
pub fn edit_closure_entries(
    persistence: &mut Persistence,
    request: &EditClosureEntriesRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ClosureResponse, ApiError> {
    let edits: Vec<EntryEdit> = parse_edits(&request.entries)?;
    let count: usize = edits.len();
    let executed: Executed = execute(
        persistence,
        Command::EditClosureEntries {
            season_id: request.season_id,
            edits,
        },
        authenticated_actor,
        cause,
        "edit_closure_entries",
    )?;
    closure_response(
        persistence,
        request.season_id,
        &executed,
        format!("Updated {count} closure entries"),
    )
}

/// Approves a draft closure and records every player's season history.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - The season has no closure
/// - The closure is already approved
pub fn approve_closure(
    persistence: &mut Persistence,
    request: &SeasonRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ClosureResponse, ApiError> {
    let executed: Executed = execute(
        persistence,
        Command::ApproveClosure {
            season_id: request.season_id,
        },
        authenticated_actor,
        cause,
        "approve_closure",
    )?;
    closure_response(
        persistence,
        request.season_id,
        &executed,
        format!("Approved closure of season {}", request.season_id),
    )
}

/// Builds the next season from an approved closure.
///
/// This function:
/// - Verifies the actor is authorized (Admin role required)
/// - Parses the new season's dates
/// - Applies a `RolloverSeason` command
/// - Persists the season, groups and memberships in one transaction
/// - Returns the new ladder as stored
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - A date is malformed or the range is inverted
/// - The closure is missing, still a draft, or already rolled over
pub fn rollover_season(
    persistence: &mut Persistence,
    request: &RolloverSeasonRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RolloverSeasonResponse, ApiError> {
    let start_date: Date = parse_date_field("start_date", &request.start_date)?;
    let end_date: Date = parse_date_field("end_date", &request.end_date)?;

    let executed: Executed = execute(
        persistence,
        Command::RolloverSeason {
            season_id: request.season_id,
            name: request.name.clone(),
            start_date,
            end_date,
            import_players: request.import_players,
        },
        authenticated_actor,
        cause,
        "rollover_season",
    )?;
    let new_season_id: i64 = executed.created_id("season")?;
    let skipped_players: Vec<i64> = match &executed.change {
        StateChange::SeasonRolledOver(plan) => plan.skipped_players.clone(),
        _ => Vec::new(),
    };

    let snapshot: LeagueSnapshot = load_snapshot(persistence)?;
    let groups: Vec<RolloverGroupInfo> = snapshot
        .groups_of_season(new_season_id)
        .into_iter()
        .filter_map(|group| {
            group.group_id.map(|group_id| RolloverGroupInfo {
                group_id,
                name: group.name.clone(),
                sequence: group.sequence,
                members: member_infos(&snapshot.members_of(group_id)),
            })
        })
        .collect();

    Ok(RolloverSeasonResponse {
        new_season_id,
        groups,
        skipped_players,
        message: format!(
            "Rolled season {} over into '{}'",
            request.season_id, request.name
        ),
        event_id: executed.persisted.event_id,
    })
}

/// Flips a player's active flag.
///
/// Inactive players keep their history but are left out of rollovers.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the player does not exist.
pub fn toggle_player_active(
    persistence: &mut Persistence,
    request: &TogglePlayerActiveRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TogglePlayerActiveResponse, ApiError> {
    let executed: Executed = execute(
        persistence,
        Command::TogglePlayerActive {
            player_id: request.player_id,
        },
        authenticated_actor,
        cause,
        "toggle_player_active",
    )?;
    let is_active: bool = match executed.change {
        StateChange::PlayerActivityToggled { is_active, .. } => is_active,
        _ => {
            return Err(ApiError::Internal {
                message: String::from("Unexpected change for toggle_player_active"),
            });
        }
    };

    Ok(TogglePlayerActiveResponse {
        player_id: request.player_id,
        is_active,
        message: format!(
            "Player {} is now {}",
            request.player_id,
            if is_active { "active" } else { "inactive" }
        ),
        event_id: executed.persisted.event_id,
    })
}

// ============================================================================
// Seasons
// ============================================================================

/// Creates a season.
///
/// The first season ever created becomes the active one.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - The name is blank or a date is malformed
/// - The end date precedes the start date
pub fn create_season(
    persistence: &mut Persistence,
    request: &CreateSeasonRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateSeasonResponse, ApiError> {
    let start_date: Date = parse_date_field("start_date", &request.start_date)?;
    let end_date: Date = parse_date_field("end_date", &request.end_date)?;

    let executed: Executed = execute(
        persistence,
        Command::CreateSeason {
            name: request.name.clone(),
            start_date,
            end_date,
        },
        authenticated_actor,
        cause,
        "create_season",
    )?;
    let season_id: i64 = executed.created_id("season")?;
    let is_active: bool = match &executed.change {
        StateChange::SeasonCreated(season) => season.is_active,
        _ => false,
    };

    Ok(CreateSeasonResponse {
        season_id,
        name: request.name.clone(),
        is_active,
        message: format!("Created season '{}'", request.name),
        event_id: executed.persisted.event_id,
    })
}

/// Lists every season, oldest first.
///
/// # Errors
///
/// Returns an error if the seasons cannot be read.
pub fn list_seasons(persistence: &mut Persistence) -> Result<ListSeasonsResponse, ApiError> {
    let seasons: Vec<Season> = persistence
        .list_seasons()
        .map_err(translate_persistence_error)?;
    Ok(ListSeasonsResponse {
        seasons: seasons.iter().filter_map(season_info).collect(),
    })
}

/// Makes a season the active one.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the season does not exist.
pub fn activate_season(
    persistence: &mut Persistence,
    request: &ActivateSeasonRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<WriteResponse, ApiError> {
    let executed: Executed = execute(
        persistence,
        Command::ActivateSeason {
            season_id: request.season_id,
        },
        authenticated_actor,
        cause,
        "activate_season",
    )?;
    Ok(WriteResponse {
        message: format!("Season {} is now active", request.season_id),
        event_id: executed.persisted.event_id,
    })
}

// ============================================================================
// Groups and players
// ============================================================================

/// Adds a group to a season's ladder.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - The season does not exist or its closure is approved
/// - Another group already holds the sequence
pub fn create_group(
    persistence: &mut Persistence,
    request: &CreateGroupRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateGroupResponse, ApiError> {
    let executed: Executed = execute(
        persistence,
        Command::CreateGroup {
            season_id: request.season_id,
            name: request.name.clone(),
            sequence: request.sequence,
        },
        authenticated_actor,
        cause,
        "create_group",
    )?;
    Ok(CreateGroupResponse {
        group_id: executed.created_id("group")?,
        season_id: request.season_id,
        name: request.name.clone(),
        sequence: request.sequence,
        message: format!("Created group '{}'", request.name),
        event_id: executed.persisted.event_id,
    })
}

/// Registers a player.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the name is blank.
pub fn register_player(
    persistence: &mut Persistence,
    request: &RegisterPlayerRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RegisterPlayerResponse, ApiError> {
    let executed: Executed = execute(
        persistence,
        Command::RegisterPlayer {
            name: request.name.clone(),
            nickname: request.nickname.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
        },
        authenticated_actor,
        cause,
        "register_player",
    )?;
    Ok(RegisterPlayerResponse {
        player_id: executed.created_id("player")?,
        name: request.name.clone(),
        message: format!("Registered player '{}'", request.name),
        event_id: executed.persisted.event_id,
    })
}

/// Appends a player to the bottom of a group.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - The group or player does not exist
/// - The player already has a group this season
/// - The season's closure is approved
pub fn add_player_to_group(
    persistence: &mut Persistence,
    request: &GroupMemberRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<GroupRosterResponse, ApiError> {
    let executed: Executed = execute(
        persistence,
        Command::AddPlayerToGroup {
            group_id: request.group_id,
            player_id: request.player_id,
        },
        authenticated_actor,
        cause,
        "add_player_to_group",
    )?;
    roster_response(
        persistence,
        request.group_id,
        &executed,
        format!(
            "Added player {} to group {}",
            request.player_id, request.group_id
        ),
    )
}

/// Removes a player from a group and closes the gap in its ranking.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - The player is not a member of the group
/// - The season's closure is approved
pub fn remove_player_from_group(
    persistence: &mut Persistence,
    request: &GroupMemberRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<GroupRosterResponse, ApiError> {
    let executed: Executed = execute(
        persistence,
        Command::RemovePlayerFromGroup {
            group_id: request.group_id,
            player_id: request.player_id,
        },
        authenticated_actor,
        cause,
        "remove_player_from_group",
    )?;
    roster_response(
        persistence,
        request.group_id,
        &executed,
        format!(
            "Removed player {} from group {}",
            request.player_id, request.group_id
        ),
    )
}

/// Exchanges two players between groups; each takes the other's position.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - Either player is not a member of the named group
/// - Both players are in the same group
/// - The season's closure is approved
pub fn swap_players(
    persistence: &mut Persistence,
    request: &SwapPlayersRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<WriteResponse, ApiError> {
    let executed: Executed = execute(
        persistence,
        Command::SwapPlayers {
            first_group_id: request.first_group_id,
            first_player_id: request.first_player_id,
            second_group_id: request.second_group_id,
            second_player_id: request.second_player_id,
        },
        authenticated_actor,
        cause,
        "swap_players",
    )?;
    Ok(WriteResponse {
        message: format!(
            "Swapped player {} and player {}",
            request.first_player_id, request.second_player_id
        ),
        event_id: executed.persisted.event_id,
    })
}

/// Rewrites a group's ranking positions from its season classification.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the group does not exist,
/// or the season's closure is approved.
pub fn recalculate_group_ranking(
    persistence: &mut Persistence,
    request: &RecalculateGroupRankingRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<GroupRosterResponse, ApiError> {
    let executed: Executed = execute(
        persistence,
        Command::RecalculateGroupRanking {
            group_id: request.group_id,
        },
        authenticated_actor,
        cause,
        "recalculate_group_ranking",
    )?;
    roster_response(
        persistence,
        request.group_id,
        &executed,
        format!("Recalculated ranking of group {}", request.group_id),
    )
}

// ============================================================================
// Matches
// ============================================================================

/// Records a match result.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - The status or date is malformed
/// - The score is not a valid best-of-five result
/// - Either player is not a member of the group
pub fn record_match(
    persistence: &mut Persistence,
    request: &RecordMatchRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RecordMatchResponse, ApiError> {
    let status: MatchStatus =
        MatchStatus::from_str(&request.status).map_err(translate_domain_error)?;
    let date: Date = parse_date_field("date", &request.date)?;

    let executed: Executed = execute(
        persistence,
        Command::RecordMatch {
            group_id: request.group_id,
            player1_id: request.player1_id,
            player2_id: request.player2_id,
            games_p1: request.games_p1,
            games_p2: request.games_p2,
            status,
            date,
        },
        authenticated_actor,
        cause,
        "record_match",
    )?;
    let winner_id: Option<i64> = match &executed.change {
        StateChange::MatchRecorded(result) => result.winner_id(),
        _ => None,
    };

    Ok(RecordMatchResponse {
        match_id: executed.created_id("match")?,
        winner_id,
        message: format!(
            "Recorded {}-{} between player {} and player {}",
            request.games_p1, request.games_p2, request.player1_id, request.player2_id
        ),
        event_id: executed.persisted.event_id,
    })
}

// ============================================================================
// History and audit
// ============================================================================

/// Lists a player's season history, newest first.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the player does not exist.
pub fn get_player_history(
    persistence: &mut Persistence,
    player_id: i64,
) -> Result<PlayerHistoryResponse, ApiError> {
    let snapshot: LeagueSnapshot = load_snapshot(persistence)?;
    if snapshot.player(player_id).is_none() {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Player"),
            message: format!("Player {player_id} does not exist"),
        });
    }

    let records: Vec<SeasonHistoryRecord> = persistence
        .get_player_history(player_id)
        .map_err(translate_persistence_error)?;
    let history: Vec<SeasonHistoryInfo> = records
        .iter()
        .map(|record| {
            Ok(SeasonHistoryInfo {
                season_id: record.season_id,
                season_name: record.season_name.clone(),
                group_id: record.group_id,
                group_name: record.group_name.clone(),
                final_rank: record.final_rank,
                movement: record.movement.as_str().to_string(),
                recorded_at: format_timestamp(record.recorded_at)?,
            })
        })
        .collect::<Result<Vec<SeasonHistoryInfo>, ApiError>>()?;

    Ok(PlayerHistoryResponse { player_id, history })
}

/// Lists a season's audit events, oldest first.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the season does not exist.
pub fn get_audit_timeline(
    persistence: &mut Persistence,
    season_id: i64,
) -> Result<AuditTimelineResponse, ApiError> {
    let seasons: Vec<Season> = persistence
        .list_seasons()
        .map_err(translate_persistence_error)?;
    if !seasons
        .iter()
        .any(|season| season.season_id == Some(season_id))
    {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Season"),
            message: format!("Season {season_id} does not exist"),
        });
    }

    let events: Vec<AuditEvent> = persistence
        .get_audit_timeline(season_id)
        .map_err(translate_persistence_error)?;
    Ok(AuditTimelineResponse {
        season_id,
        events: events.iter().map(audit_event_info).collect(),
    })
}
