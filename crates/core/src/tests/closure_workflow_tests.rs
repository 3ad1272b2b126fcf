// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    NOW, SEASON_ID, closure_of, create_ladder_state, create_test_actor, create_test_cause,
    group_id, run, with_approved_closure, with_draft_closure,
};
use crate::{Command, CoreError, State, StateChange, TransitionResult, apply};
use freesquash_domain::{
    ClosureStatus, DomainError, EntryEdit, MovementPolicy, MovementType, SeasonClosure,
};

fn try_run(state: &State, command: Command) -> Result<TransitionResult, CoreError> {
    apply(
        state,
        &MovementPolicy::default(),
        command,
        create_test_actor(),
        create_test_cause(),
        NOW,
    )
}

// ============================================================================
// Create
// ============================================================================

#[test]
fn test_create_closure_proposes_every_member() {
    let state: State = create_ladder_state(&[8, 8, 8]);
    let result: TransitionResult = run(
        &state,
        Command::CreateClosure {
            season_id: SEASON_ID,
            overrides: Vec::new(),
        },
    );

    let StateChange::ClosureCreated(closure) = result.change else {
        panic!("expected ClosureCreated");
    };
    assert_eq!(closure.entries.len(), 24);
    assert_eq!(closure.status, ClosureStatus::Draft);
    assert_eq!(closure.created_at, NOW);
    assert_eq!(
        closure.entry_for(15).unwrap().movement_type,
        MovementType::Relegation
    );

    assert_eq!(result.audit_event.action.name, "CreateClosure");
    assert_eq!(result.audit_event.season_id, Some(SEASON_ID));
    assert_eq!(result.audit_event.actor.id, "admin-1");
    assert_eq!(result.audit_event.before.data, "null");
    assert!(result.audit_event.after.data.contains("\"DRAFT\""));
}

#[test]
fn test_create_closure_applies_overrides() {
    let state: State = create_ladder_state(&[4, 4]);
    let result: TransitionResult = run(
        &state,
        Command::CreateClosure {
            season_id: SEASON_ID,
            overrides: vec![EntryEdit {
                player_id: 8,
                movement_type: MovementType::Stay,
            }],
        },
    );

    let StateChange::ClosureCreated(closure) = result.change else {
        panic!("expected ClosureCreated");
    };
    assert_eq!(closure.entry_for(8).unwrap().movement_type, MovementType::Stay);
    assert_eq!(
        closure.entry_for(5).unwrap().movement_type,
        MovementType::Promotion
    );
}

#[test]
fn test_create_closure_rejects_unknown_override() {
    let state: State = create_ladder_state(&[4]);
    let result: Result<TransitionResult, CoreError> = try_run(
        &state,
        Command::CreateClosure {
            season_id: SEASON_ID,
            overrides: vec![EntryEdit {
                player_id: 77,
                movement_type: MovementType::Stay,
            }],
        },
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ClosureEntryNotFound {
                season_id: SEASON_ID,
                player_id: 77
            }
        ))
    );
}

#[test]
fn test_second_closure_rejected() {
    let state: State = with_draft_closure(create_ladder_state(&[4]));
    let result: Result<TransitionResult, CoreError> = try_run(
        &state,
        Command::CreateClosure {
            season_id: SEASON_ID,
            overrides: Vec::new(),
        },
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ClosureAlreadyExists {
                season_id: SEASON_ID
            }
        ))
    );
}

#[test]
fn test_incomplete_season_rejected() {
    let mut state: State = create_ladder_state(&[4, 4]);
    let gid: i64 = group_id(1);
    state
        .snapshot
        .matches
        .retain(|result| !(result.group_id == gid && result.player1_id == 5));

    let result: Result<TransitionResult, CoreError> = try_run(
        &state,
        Command::CreateClosure {
            season_id: SEASON_ID,
            overrides: Vec::new(),
        },
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::SeasonIncomplete {
            season_id: SEASON_ID,
            groups: vec![String::from("Group B")],
        }))
    );
}

#[test]
fn test_unknown_season_rejected() {
    let state: State = create_ladder_state(&[4]);
    let result: Result<TransitionResult, CoreError> = try_run(
        &state,
        Command::CreateClosure {
            season_id: 42,
            overrides: Vec::new(),
        },
    );
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::SeasonNotFound(42)))
    );
}

// ============================================================================
// Edit
// ============================================================================

#[test]
fn test_edit_bumps_version() {
    let state: State = with_draft_closure(create_ladder_state(&[4]));
    let result: TransitionResult = run(
        &state,
        Command::EditClosureEntries {
            season_id: SEASON_ID,
            edits: vec![EntryEdit {
                player_id: 1,
                movement_type: MovementType::Stay,
            }],
        },
    );

    let StateChange::ClosureEdited {
        closure,
        expected_version,
    } = result.change
    else {
        panic!("expected ClosureEdited");
    };
    assert_eq!(expected_version, 0);
    assert_eq!(closure.version, 1);
    assert_eq!(closure.entry_for(1).unwrap().movement_type, MovementType::Stay);
    assert_eq!(result.audit_event.action.name, "EditClosureEntries");
}

#[test]
fn test_edit_without_closure_rejected() {
    let state: State = create_ladder_state(&[4]);
    let result: Result<TransitionResult, CoreError> = try_run(
        &state,
        Command::EditClosureEntries {
            season_id: SEASON_ID,
            edits: Vec::new(),
        },
    );
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::ClosureNotFound {
            season_id: SEASON_ID
        }))
    );
}

#[test]
fn test_edit_after_approval_is_frozen() {
    let state: State = with_approved_closure(create_ladder_state(&[4]));
    let result: Result<TransitionResult, CoreError> = try_run(
        &state,
        Command::EditClosureEntries {
            season_id: SEASON_ID,
            edits: vec![EntryEdit {
                player_id: 1,
                movement_type: MovementType::Stay,
            }],
        },
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::ClosureFrozen {
            season_id: SEASON_ID
        }))
    );
    assert_eq!(
        closure_of(&state).entry_for(1).unwrap().movement_type,
        MovementType::Promotion
    );
}

// ============================================================================
// Approve
// ============================================================================

#[test]
fn test_approve_writes_history_per_entry() {
    let state: State = with_draft_closure(create_ladder_state(&[4, 4]));
    let result: TransitionResult = run(
        &state,
        Command::ApproveClosure {
            season_id: SEASON_ID,
        },
    );

    let StateChange::ClosureApproved {
        closure,
        expected_version,
        history,
    } = result.change
    else {
        panic!("expected ClosureApproved");
    };
    assert_eq!(closure.status, ClosureStatus::Approved);
    assert_eq!(closure.approved_at, Some(NOW));
    assert_eq!(expected_version, 0);
    assert_eq!(history.len(), 8);

    let record = history.iter().find(|r| r.player_id == 5).unwrap();
    assert_eq!(record.season_name, "Spring 2026");
    assert_eq!(record.group_name, "Group B");
    assert_eq!(record.final_rank, 1);
    assert_eq!(record.movement, MovementType::Promotion);
    assert_eq!(record.recorded_at, NOW);
}

#[test]
fn test_reapprove_is_frozen() {
    let state: State = with_approved_closure(create_ladder_state(&[4]));
    let result: Result<TransitionResult, CoreError> = try_run(
        &state,
        Command::ApproveClosure {
            season_id: SEASON_ID,
        },
    );
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::ClosureFrozen {
            season_id: SEASON_ID
        }))
    );
}

// ============================================================================
// Toggle active
// ============================================================================

#[test]
fn test_toggle_active_allowed_after_approval() {
    let state: State = with_approved_closure(create_ladder_state(&[4]));
    let before: SeasonClosure = closure_of(&state).clone();

    let result: TransitionResult = run(&state, Command::TogglePlayerActive { player_id: 3 });

    assert_eq!(
        result.change,
        StateChange::PlayerActivityToggled {
            player_id: 3,
            is_active: false
        }
    );
    assert_eq!(result.audit_event.season_id, None);
    assert_eq!(closure_of(&state), &before);
}

#[test]
fn test_toggle_unknown_player_rejected() {
    let state: State = create_ladder_state(&[4]);
    assert_eq!(
        try_run(&state, Command::TogglePlayerActive { player_id: 99 }),
        Err(CoreError::DomainViolation(DomainError::PlayerNotFound(99)))
    );
}
