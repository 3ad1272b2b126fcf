// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writes a `TransitionResult`: the state change and its audit event.

use diesel::SqliteConnection;
use freesquash::{StateChange, TransitionResult};
use tracing::debug;

use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::closure::{approve_closure, insert_closure, update_closure_entries};
use crate::mutations::league::{
    activate_season, delete_membership, insert_group, insert_match, insert_membership,
    insert_player, insert_season, set_current_group, set_player_active, write_positions,
};
use crate::mutations::rollover::apply_rollover;

/// Result of persisting a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistTransitionResult {
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// The ID of the row the change created (season, group, player, match
    /// or closure), if it created one.
    pub entity_id: Option<i64>,
}

/// Persists a transition.
///
/// Callers run this inside a transaction so the change and its audit event
/// are written together or not at all.
///
/// # Errors
///
/// Returns an error if any write fails, including optimistic version
/// conflicts on closures.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    let entity_id: Option<i64> = apply_change(conn, &result.change)?;

    let event_id: i64 = persist_audit_event(conn, &result.audit_event)?;
    debug!(
        event_id,
        action = %result.audit_event.action.name,
        entity_id,
        "Persisted transition"
    );

    Ok(PersistTransitionResult {
        event_id,
        entity_id,
    })
}

fn apply_change(
    conn: &mut SqliteConnection,
    change: &StateChange,
) -> Result<Option<i64>, PersistenceError> {
    match change {
        StateChange::SeasonCreated(season) => insert_season(conn, season).map(Some),
        StateChange::SeasonActivated { season_id } => {
            activate_season(conn, *season_id)?;
            Ok(None)
        }
        StateChange::GroupCreated(group) => insert_group(conn, group).map(Some),
        StateChange::PlayerRegistered(player) => insert_player(conn, player).map(Some),
        StateChange::MembershipAdded {
            membership,
            set_current_group: point,
        } => {
            insert_membership(conn, membership)?;
            if *point {
                set_current_group(conn, membership.player_id, Some(membership.group_id))?;
            }
            Ok(None)
        }
        StateChange::MembershipRemoved {
            group_id,
            player_id,
            remaining,
            clear_current_group,
        } => {
            delete_membership(conn, *group_id, *player_id)?;
            write_positions(conn, remaining)?;
            if *clear_current_group {
                set_current_group(conn, *player_id, None)?;
            }
            Ok(None)
        }
        StateChange::PlayersSwapped {
            removed,
            added,
            set_current_group: point,
        } => {
            for member in removed {
                delete_membership(conn, member.group_id, member.player_id)?;
            }
            for member in added {
                insert_membership(conn, member)?;
                if *point {
                    set_current_group(conn, member.player_id, Some(member.group_id))?;
                }
            }
            Ok(None)
        }
        StateChange::MatchRecorded(result) => insert_match(conn, result).map(Some),
        StateChange::RankingRecalculated { positions, .. } => {
            write_positions(conn, positions)?;
            Ok(None)
        }
        StateChange::ClosureCreated(closure) => insert_closure(conn, closure).map(Some),
        StateChange::ClosureEdited {
            closure,
            expected_version,
        } => {
            update_closure_entries(conn, closure, *expected_version)?;
            Ok(None)
        }
        StateChange::ClosureApproved {
            closure,
            expected_version,
            history,
        } => {
            approve_closure(conn, closure, *expected_version, history)?;
            Ok(None)
        }
        StateChange::SeasonRolledOver(plan) => apply_rollover(conn, plan).map(Some),
        StateChange::PlayerActivityToggled {
            player_id,
            is_active,
        } => {
            set_player_active(conn, *player_id, *is_active)?;
            Ok(None)
        }
    }
}
