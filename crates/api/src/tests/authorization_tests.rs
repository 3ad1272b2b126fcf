// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication stub and admin-only enforcement.

use freesquash_persistence::Persistence;

use crate::{
    ApiError, AuthError, AuthenticatedActor, EditClosureEntriesRequest, EntryEditRequest, Role,
    RolloverSeasonRequest, SeasonRequest, TogglePlayerActiveRequest, approve_closure,
    authenticate_stub, create_season, edit_closure_entries, get_closure, list_seasons,
    rollover_season, toggle_player_active,
};

use super::helpers::{
    TestLeague, create_test_cause, create_test_league, create_test_player,
    create_test_season_request, setup_test_persistence,
};

// ============================================================================
// Stub authentication
// ============================================================================

#[test]
fn test_authenticate_stub_builds_actor() {
    let actor: AuthenticatedActor = authenticate_stub(String::from("admin-1"), "admin").unwrap();
    assert_eq!(actor.role, Role::Admin);
    assert_eq!(actor.to_audit_actor().actor_type, "admin");
}

#[test]
fn test_authenticate_stub_role_is_case_insensitive() {
    let actor: AuthenticatedActor = authenticate_stub(String::from("p-1"), "Player").unwrap();
    assert_eq!(actor.role, Role::Player);
}

#[test]
fn test_authenticate_stub_rejects_empty_id() {
    let err: AuthError = authenticate_stub(String::from("  "), "admin").unwrap_err();
    assert!(matches!(err, AuthError::AuthenticationFailed { .. }));
}

#[test]
fn test_authenticate_stub_rejects_unknown_role() {
    let err: AuthError = authenticate_stub(String::from("x"), "coach").unwrap_err();
    assert!(matches!(err, AuthError::AuthenticationFailed { .. }));
}

// ============================================================================
// Mutations require Admin
// ============================================================================

#[test]
fn test_create_season_rejects_player() {
    let mut persistence: Persistence = setup_test_persistence();

    let err: ApiError = create_season(
        &mut persistence,
        &create_test_season_request("Spring 2026"),
        &create_test_player(),
        create_test_cause(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        ApiError::Unauthorized {
            action: String::from("create_season"),
            required_role: String::from("Admin"),
        }
    );
    assert!(list_seasons(&mut persistence).unwrap().seasons.is_empty());
}

#[test]
fn test_closure_workflow_rejects_player() {
    let mut persistence: Persistence = setup_test_persistence();
    let league: TestLeague = create_test_league(&mut persistence, &[4]);
    let player: AuthenticatedActor = create_test_player();

    let err: ApiError = edit_closure_entries(
        &mut persistence,
        &EditClosureEntriesRequest {
            season_id: league.season_id,
            entries: vec![EntryEditRequest {
                player_id: league.players[0][0],
                movement_type: String::from("STAY"),
            }],
        },
        &player,
        create_test_cause(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    let err: ApiError = approve_closure(
        &mut persistence,
        &SeasonRequest {
            season_id: league.season_id,
        },
        &player,
        create_test_cause(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    let err: ApiError = rollover_season(
        &mut persistence,
        &RolloverSeasonRequest {
            season_id: league.season_id,
            name: String::from("Summer 2026"),
            start_date: String::from("2026-04-06"),
            end_date: String::from("2026-06-28"),
            import_players: true,
        },
        &player,
        create_test_cause(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    let err: ApiError = toggle_player_active(
        &mut persistence,
        &TogglePlayerActiveRequest {
            player_id: league.players[0][0],
        },
        &player,
        create_test_cause(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_authorization_checked_before_state() {
    let mut persistence: Persistence = setup_test_persistence();

    // The season does not exist, but the player is turned away first.
    let err: ApiError = approve_closure(
        &mut persistence,
        &SeasonRequest { season_id: 99 },
        &create_test_player(),
        create_test_cause(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    let err: ApiError = get_closure(&mut persistence, 99).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}
