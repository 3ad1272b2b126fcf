// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::proposer::{GroupProposal, propose_movements, recompute_group_ranking};
use crate::rollover::{RolloverPlan, plan_rollover};
use crate::state::{State, StateChange, TransitionResult};
use freesquash_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use freesquash_domain::{
    ClosureEntry, DomainError, EntryEdit, Group, GroupPlayer, Match, MovementPolicy,
    Player, Season, SeasonClosure, SeasonHistoryRecord, ensure_season_complete,
    validate_match_result, validate_name, validate_season_dates,
};
use serde_json::{Value, json};
use time::{Date, OffsetDateTime};

/// The parts of an audit event that vary per command.
struct Outcome {
    change: StateChange,
    season_id: Option<i64>,
    details: String,
    before: Value,
    after: Value,
}

/// Applies a command to the current state.
///
/// `apply` never writes anything: it validates the command against `state`
/// and describes the resulting change together with its audit event. The
/// caller persists both atomically.
///
/// # Arguments
///
/// * `state` - The current league state (immutable)
/// * `policy` - Band thresholds used when proposing movements
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - Timestamp for anything the command stamps
///
/// # Errors
///
/// Returns an error if the command violates a domain rule or references a
/// missing season, group, player or closure.
pub fn apply(
    state: &State,
    policy: &MovementPolicy,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let name: &'static str = command.name();

    let outcome: Outcome = match command {
        Command::CreateSeason {
            name,
            start_date,
            end_date,
        } => create_season(state, name, start_date, end_date)?,
        Command::ActivateSeason { season_id } => activate_season(state, season_id)?,
        Command::CreateGroup {
            season_id,
            name,
            sequence,
        } => create_group(state, season_id, name, sequence)?,
        Command::RegisterPlayer {
            name,
            nickname,
            email,
            phone,
        } => register_player(name, nickname, email, phone)?,
        Command::AddPlayerToGroup {
            group_id,
            player_id,
        } => add_player_to_group(state, group_id, player_id)?,
        Command::RemovePlayerFromGroup {
            group_id,
            player_id,
        } => remove_player_from_group(state, group_id, player_id)?,
        Command::SwapPlayers {
            first_group_id,
            first_player_id,
            second_group_id,
            second_player_id,
        } => swap_players(
            state,
            (first_group_id, first_player_id),
            (second_group_id, second_player_id),
        )?,
        Command::RecordMatch {
            group_id,
            player1_id,
            player2_id,
            games_p1,
            games_p2,
            status,
            date,
        } => record_match(
            state,
            Match {
                match_id: None,
                group_id,
                player1_id,
                player2_id,
                games_p1,
                games_p2,
                status,
                date,
            },
        )?,
        Command::RecalculateGroupRanking { group_id } => recalculate_ranking(state, group_id)?,
        Command::CreateClosure {
            season_id,
            overrides,
        } => create_closure(state, policy, season_id, &overrides, now)?,
        Command::EditClosureEntries { season_id, edits } => {
            edit_closure_entries(state, season_id, &edits)?
        }
        Command::ApproveClosure { season_id } => approve_closure(state, season_id, now)?,
        Command::RolloverSeason {
            season_id,
            name,
            start_date,
            end_date,
            import_players,
        } => rollover_season(state, season_id, name, start_date, end_date, import_players)?,
        Command::TogglePlayerActive { player_id } => toggle_player_active(state, player_id)?,
    };

    let action: Action = Action::new(String::from(name), Some(outcome.details));
    let before: StateSnapshot = StateSnapshot::new(outcome.before.to_string());
    let after: StateSnapshot = StateSnapshot::new(outcome.after.to_string());
    let audit_event: AuditEvent = match outcome.season_id {
        Some(season_id) => AuditEvent::for_season(season_id, actor, cause, action, before, after),
        None => AuditEvent::new(actor, cause, action, before, after),
    };

    Ok(TransitionResult {
        change: outcome.change,
        audit_event,
    })
}

/// Computes the movement preview of a season without creating anything.
///
/// # Errors
///
/// Returns an error if the season does not exist or has no groups.
pub fn preview_closure(
    state: &State,
    policy: &MovementPolicy,
    season_id: i64,
) -> Result<Vec<GroupProposal>, CoreError> {
    state.season(season_id)?;
    Ok(propose_movements(season_id, &state.snapshot, policy)?)
}

// ============================================================================
// Snapshots
// ============================================================================

fn closure_json(closure: &SeasonClosure) -> Value {
    json!({
        "season_id": closure.season_id,
        "status": closure.status.as_str(),
        "version": closure.version,
        "entries": closure.entries.iter().map(entry_json).collect::<Vec<Value>>(),
    })
}

fn entry_json(entry: &ClosureEntry) -> Value {
    json!({
        "player_id": entry.player_id,
        "from_group_id": entry.from_group_id,
        "final_rank": entry.final_rank,
        "movement_type": entry.movement_type.as_str(),
    })
}

fn members_json(members: &[GroupPlayer]) -> Value {
    Value::Array(
        members
            .iter()
            .map(|member| json!([member.player_id, member.ranking_position]))
            .collect(),
    )
}

// ============================================================================
// Seasons, groups, players
// ============================================================================

fn create_season(
    state: &State,
    name: String,
    start_date: Date,
    end_date: Date,
) -> Result<Outcome, DomainError> {
    validate_name("Season", &name)?;
    validate_season_dates(start_date, end_date)?;

    let first: bool = state.snapshot.active_season().is_none();
    let mut season: Season = Season::new(name, start_date, end_date);
    season.is_active = first;

    Ok(Outcome {
        details: format!("Created season '{}'", season.name),
        before: json!({ "seasons": state.snapshot.seasons.len() }),
        after: json!({ "seasons": state.snapshot.seasons.len() + 1, "active": first }),
        season_id: None,
        change: StateChange::SeasonCreated(season),
    })
}

fn activate_season(state: &State, season_id: i64) -> Result<Outcome, DomainError> {
    let season: &Season = state.season(season_id)?;
    let previous: Option<i64> = state
        .snapshot
        .active_season()
        .and_then(|active| active.season_id);

    Ok(Outcome {
        details: format!("Activated season '{}'", season.name),
        before: json!({ "active_season_id": previous }),
        after: json!({ "active_season_id": season_id }),
        season_id: Some(season_id),
        change: StateChange::SeasonActivated { season_id },
    })
}

fn create_group(
    state: &State,
    season_id: i64,
    name: String,
    sequence: u32,
) -> Result<Outcome, DomainError> {
    state.season(season_id)?;
    state.ensure_membership_editable(season_id)?;
    validate_name("Group", &name)?;
    if sequence == 0 {
        return Err(DomainError::InvalidGroupSequence(sequence));
    }
    if state
        .snapshot
        .groups_of_season(season_id)
        .iter()
        .any(|group| group.sequence == sequence)
    {
        return Err(DomainError::DuplicateGroupSequence {
            season_id,
            sequence,
        });
    }

    let group: Group = Group::new(season_id, name, sequence);
    Ok(Outcome {
        details: format!("Created group '{}' at sequence {sequence}", group.name),
        before: json!({ "groups": state.snapshot.groups_of_season(season_id).len() }),
        after: json!({ "groups": state.snapshot.groups_of_season(season_id).len() + 1 }),
        season_id: Some(season_id),
        change: StateChange::GroupCreated(group),
    })
}

fn register_player(
    name: String,
    nickname: Option<String>,
    email: Option<String>,
    phone: Option<String>,
) -> Result<Outcome, DomainError> {
    validate_name("Player", &name)?;
    let mut player: Player = Player::new(name);
    player.nickname = nickname;
    player.email = email;
    player.phone = phone;

    Ok(Outcome {
        details: format!("Registered player '{}'", player.name),
        before: Value::Null,
        after: json!({ "name": player.name, "is_active": true }),
        season_id: None,
        change: StateChange::PlayerRegistered(player),
    })
}

fn toggle_player_active(state: &State, player_id: i64) -> Result<Outcome, DomainError> {
    let player: &Player = state.player(player_id)?;
    let is_active: bool = !player.is_active;

    Ok(Outcome {
        details: format!(
            "Player '{}' is now {}",
            player.name,
            if is_active { "active" } else { "inactive" }
        ),
        before: json!({ "player_id": player_id, "is_active": player.is_active }),
        after: json!({ "player_id": player_id, "is_active": is_active }),
        season_id: None,
        change: StateChange::PlayerActivityToggled {
            player_id,
            is_active,
        },
    })
}

// ============================================================================
// Group membership
// ============================================================================

fn membership(state: &State, group_id: i64, player_id: i64) -> Result<GroupPlayer, DomainError> {
    state
        .snapshot
        .members_of(group_id)
        .into_iter()
        .find(|member| member.player_id == player_id)
        .ok_or(DomainError::PlayerNotInGroup {
            player_id,
            group_id,
        })
}

fn add_player_to_group(
    state: &State,
    group_id: i64,
    player_id: i64,
) -> Result<Outcome, DomainError> {
    let group: &Group = state.group(group_id)?;
    state.player(player_id)?;
    state.ensure_membership_editable(group.season_id)?;

    // A player belongs to at most one group per season.
    for sibling in state.snapshot.groups_of_season(group.season_id) {
        let Some(sibling_id) = sibling.group_id else {
            continue;
        };
        if membership(state, sibling_id, player_id).is_ok() {
            return Err(DomainError::PlayerAlreadyInGroup {
                player_id,
                group_id: sibling_id,
            });
        }
    }

    let members: Vec<GroupPlayer> = state.snapshot.members_of(group_id);
    let position: u32 = u32::try_from(members.len() + 1).unwrap_or(u32::MAX);
    let added: GroupPlayer = GroupPlayer::new(group_id, player_id, position);

    let mut after: Vec<GroupPlayer> = members.clone();
    after.push(added);

    Ok(Outcome {
        details: format!("Added player {player_id} to group '{}' at position {position}", group.name),
        before: members_json(&members),
        after: members_json(&after),
        season_id: Some(group.season_id),
        change: StateChange::MembershipAdded {
            membership: added,
            set_current_group: state.is_active_season(group.season_id),
        },
    })
}

fn remove_player_from_group(
    state: &State,
    group_id: i64,
    player_id: i64,
) -> Result<Outcome, DomainError> {
    let group: &Group = state.group(group_id)?;
    state.ensure_membership_editable(group.season_id)?;
    membership(state, group_id, player_id)?;

    let members: Vec<GroupPlayer> = state.snapshot.members_of(group_id);
    let remaining: Vec<GroupPlayer> = members
        .iter()
        .filter(|member| member.player_id != player_id)
        .zip(1..)
        .map(|(member, position)| GroupPlayer::new(group_id, member.player_id, position))
        .collect();

    let clear_current_group: bool = state
        .snapshot
        .player(player_id)
        .is_some_and(|player| player.current_group_id == Some(group_id));

    Ok(Outcome {
        details: format!("Removed player {player_id} from group '{}'", group.name),
        before: members_json(&members),
        after: members_json(&remaining),
        season_id: Some(group.season_id),
        change: StateChange::MembershipRemoved {
            group_id,
            player_id,
            remaining,
            clear_current_group,
        },
    })
}

fn swap_players(
    state: &State,
    first: (i64, i64),
    second: (i64, i64),
) -> Result<Outcome, DomainError> {
    let (first_group_id, first_player_id) = first;
    let (second_group_id, second_player_id) = second;

    if first_group_id == second_group_id {
        return Err(DomainError::SwapWithinGroup {
            group_id: first_group_id,
        });
    }
    let first_group: &Group = state.group(first_group_id)?;
    let second_group: &Group = state.group(second_group_id)?;
    if first_group.season_id != second_group.season_id {
        return Err(DomainError::SwapAcrossSeasons {
            first_season_id: first_group.season_id,
            second_season_id: second_group.season_id,
        });
    }
    state.ensure_membership_editable(first_group.season_id)?;

    let first_member: GroupPlayer = membership(state, first_group_id, first_player_id)?;
    let second_member: GroupPlayer = membership(state, second_group_id, second_player_id)?;

    let added: [GroupPlayer; 2] = [
        GroupPlayer::new(
            second_group_id,
            first_player_id,
            second_member.ranking_position,
        ),
        GroupPlayer::new(
            first_group_id,
            second_player_id,
            first_member.ranking_position,
        ),
    ];

    Ok(Outcome {
        details: format!(
            "Swapped player {first_player_id} ('{}') with player {second_player_id} ('{}')",
            first_group.name, second_group.name
        ),
        before: members_json(&[first_member, second_member]),
        after: members_json(&added),
        season_id: Some(first_group.season_id),
        change: StateChange::PlayersSwapped {
            removed: [first_member, second_member],
            added,
            set_current_group: state.is_active_season(first_group.season_id)
                || state.is_active_season(second_group.season_id),
        },
    })
}

fn record_match(state: &State, result: Match) -> Result<Outcome, DomainError> {
    let group: &Group = state.group(result.group_id)?;
    validate_match_result(&result)?;
    membership(state, result.group_id, result.player1_id)?;
    membership(state, result.group_id, result.player2_id)?;

    Ok(Outcome {
        details: format!(
            "Recorded {} {}-{} between players {} and {} in group '{}'",
            result.status,
            result.games_p1,
            result.games_p2,
            result.player1_id,
            result.player2_id,
            group.name
        ),
        before: Value::Null,
        after: json!({
            "group_id": result.group_id,
            "player1_id": result.player1_id,
            "player2_id": result.player2_id,
            "games": [result.games_p1, result.games_p2],
            "status": result.status.as_str(),
            "winner_id": result.winner_id(),
        }),
        season_id: Some(group.season_id),
        change: StateChange::MatchRecorded(result),
    })
}

fn recalculate_ranking(state: &State, group_id: i64) -> Result<Outcome, DomainError> {
    let group: &Group = state.group(group_id)?;
    state.ensure_membership_editable(group.season_id)?;

    let before: Vec<GroupPlayer> = state.snapshot.members_of(group_id);
    let positions: Vec<GroupPlayer> = recompute_group_ranking(group, &state.snapshot);

    Ok(Outcome {
        details: format!("Recalculated ranking of group '{}'", group.name),
        before: members_json(&before),
        after: members_json(&positions),
        season_id: Some(group.season_id),
        change: StateChange::RankingRecalculated {
            group_id,
            positions,
        },
    })
}

// ============================================================================
// Closure workflow
// ============================================================================

fn create_closure(
    state: &State,
    policy: &MovementPolicy,
    season_id: i64,
    overrides: &[EntryEdit],
    now: OffsetDateTime,
) -> Result<Outcome, DomainError> {
    state.season(season_id)?;
    if state.closure(season_id).is_some() {
        return Err(DomainError::ClosureAlreadyExists { season_id });
    }
    ensure_season_complete(season_id, &state.snapshot)?;

    let entries: Vec<ClosureEntry> = propose_movements(season_id, &state.snapshot, policy)?
        .into_iter()
        .flat_map(|proposal| proposal.entries)
        .collect();
    let mut closure: SeasonClosure = SeasonClosure::draft(season_id, entries, now);
    closure.apply_edits(overrides)?;

    Ok(Outcome {
        details: format!(
            "Created closure with {} entries ({} overridden)",
            closure.entries.len(),
            overrides.len()
        ),
        before: Value::Null,
        after: closure_json(&closure),
        season_id: Some(season_id),
        change: StateChange::ClosureCreated(closure),
    })
}

fn edit_closure_entries(
    state: &State,
    season_id: i64,
    edits: &[EntryEdit],
) -> Result<Outcome, DomainError> {
    let current: &SeasonClosure = state.require_closure(season_id)?;
    let mut closure: SeasonClosure = current.clone();
    closure.apply_edits(edits)?;
    closure.version = current.version + 1;

    Ok(Outcome {
        details: format!("Edited {} closure entries", edits.len()),
        before: closure_json(current),
        after: closure_json(&closure),
        season_id: Some(season_id),
        change: StateChange::ClosureEdited {
            closure,
            expected_version: current.version,
        },
    })
}

fn approve_closure(
    state: &State,
    season_id: i64,
    now: OffsetDateTime,
) -> Result<Outcome, DomainError> {
    let season: &Season = state.season(season_id)?;
    let current: &SeasonClosure = state.require_closure(season_id)?;
    let mut closure: SeasonClosure = current.clone();
    closure.approve(now)?;
    closure.version = current.version + 1;

    let history: Vec<SeasonHistoryRecord> = closure
        .entries
        .iter()
        .map(|entry| {
            let group: &Group = state.group(entry.from_group_id)?;
            Ok(SeasonHistoryRecord {
                player_id: entry.player_id,
                season_id,
                season_name: season.name.clone(),
                group_id: entry.from_group_id,
                group_name: group.name.clone(),
                final_rank: entry.final_rank,
                movement: entry.movement_type,
                recorded_at: now,
            })
        })
        .collect::<Result<Vec<SeasonHistoryRecord>, DomainError>>()?;

    Ok(Outcome {
        details: format!("Approved closure with {} entries", closure.entries.len()),
        before: closure_json(current),
        after: closure_json(&closure),
        season_id: Some(season_id),
        change: StateChange::ClosureApproved {
            closure,
            expected_version: current.version,
            history,
        },
    })
}

fn rollover_season(
    state: &State,
    season_id: i64,
    name: String,
    start_date: Date,
    end_date: Date,
    import_players: bool,
) -> Result<Outcome, DomainError> {
    state.season(season_id)?;
    let closure: &SeasonClosure = state.require_closure(season_id)?;
    validate_name("Season", &name)?;
    validate_season_dates(start_date, end_date)?;

    let mut season: Season = Season::new(name, start_date, end_date);
    season.is_active = true;
    let plan: RolloverPlan = plan_rollover(state, closure, season, import_players)?;

    let groups_json: Vec<Value> = plan
        .groups
        .iter()
        .map(|group| {
            json!({
                "name": group.name,
                "sequence": group.sequence,
                "members": group.members.iter().map(|m| m.player_id).collect::<Vec<i64>>(),
            })
        })
        .collect();

    Ok(Outcome {
        details: format!(
            "Rolled over into '{}' with {} groups and {} players",
            plan.season.name,
            plan.groups.len(),
            plan.imported_count()
        ),
        before: closure_json(closure),
        after: json!({
            "season": plan.season.name,
            "groups": groups_json,
            "skipped_players": plan.skipped_players,
        }),
        season_id: Some(season_id),
        change: StateChange::SeasonRolledOver(plan),
    })
}
