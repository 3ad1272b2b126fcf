// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, AuditEvent, Cause, StateSnapshot};

fn create_test_parts() -> (Actor, Cause, Action, StateSnapshot, StateSnapshot) {
    (
        Actor::new(String::from("admin-1"), String::from("admin")),
        Cause::new(String::from("req-77"), String::from("End of season")),
        Action::new(String::from("ApproveClosure"), None),
        StateSnapshot::new(String::from(r#"{"status":"DRAFT"}"#)),
        StateSnapshot::new(String::from(r#"{"status":"APPROVED"}"#)),
    )
}

#[test]
fn test_actor_creation_requires_all_fields() {
    let actor: Actor = Actor::new(String::from("admin-1"), String::from("admin"));

    assert_eq!(actor.id, "admin-1");
    assert_eq!(actor.actor_type, "admin");
}

#[test]
fn test_action_creation_with_details() {
    let action: Action = Action::new(
        String::from("EditClosureEntries"),
        Some(String::from("2 entries")),
    );

    assert_eq!(action.name, "EditClosureEntries");
    assert_eq!(action.details.as_deref(), Some("2 entries"));
}

#[test]
fn test_empty_snapshot_is_json_null() {
    assert_eq!(StateSnapshot::empty().data, "null");
}

#[test]
fn test_league_wide_event_has_no_season() {
    let (actor, cause, action, before, after) = create_test_parts();
    let event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

    assert_eq!(event.season_id, None);
    assert_eq!(event.event_id, None);
}

#[test]
fn test_season_event_carries_season() {
    let (actor, cause, action, before, after) = create_test_parts();
    let event: AuditEvent =
        AuditEvent::for_season(3, actor.clone(), cause, action, before.clone(), after);

    assert_eq!(event.season_id, Some(3));
    assert_eq!(event.actor, actor);
    assert_eq!(event.before, before);
    assert_eq!(event.action.name, "ApproveClosure");
}
