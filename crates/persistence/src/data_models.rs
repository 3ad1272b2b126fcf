// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON payloads of the `audit_events` columns.
//!
//! Audit types live in `freesquash-audit`, which carries no serde
//! dependency; these mirrors give each column a stable on-disk shape.

use freesquash_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Stored form of the administrator (or player) behind an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub role: String,
}

impl From<&Actor> for ActorData {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            role: actor.actor_type.clone(),
        }
    }
}

impl From<ActorData> for Actor {
    fn from(data: ActorData) -> Self {
        Self::new(data.id, data.role)
    }
}

/// Stored form of the request reason, e.g. "end of spring season".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

impl From<&Cause> for CauseData {
    fn from(cause: &Cause) -> Self {
        Self {
            id: cause.id.clone(),
            description: cause.description.clone(),
        }
    }
}

impl From<CauseData> for Cause {
    fn from(data: CauseData) -> Self {
        Self::new(data.id, data.description)
    }
}

/// Stored form of the league command that ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&Action> for ActionData {
    fn from(action: &Action) -> Self {
        Self {
            command: action.name.clone(),
            details: action.details.clone(),
        }
    }
}

impl From<ActionData> for Action {
    fn from(data: ActionData) -> Self {
        Self::new(data.command, data.details)
    }
}

/// Encoded JSON text of every payload column of one audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditColumns {
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
}

impl AuditColumns {
    /// Encodes the payload columns of an event.
    ///
    /// Snapshots are already JSON documents and are stored as they are.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if a payload cannot be encoded.
    pub fn encode(event: &AuditEvent) -> Result<Self, PersistenceError> {
        Ok(Self {
            actor_json: serde_json::to_string(&ActorData::from(&event.actor))?,
            cause_json: serde_json::to_string(&CauseData::from(&event.cause))?,
            action_json: serde_json::to_string(&ActionData::from(&event.action))?,
            before_snapshot_json: event.before.data.clone(),
            after_snapshot_json: event.after.data.clone(),
        })
    }

    /// Rebuilds an event from its stored columns.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if a payload column is malformed.
    pub fn decode(
        self,
        event_id: i64,
        season_id: Option<i64>,
    ) -> Result<AuditEvent, PersistenceError> {
        let actor: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause: CauseData = serde_json::from_str(&self.cause_json)?;
        let action: ActionData = serde_json::from_str(&self.action_json)?;

        Ok(AuditEvent {
            event_id: Some(event_id),
            season_id,
            actor: actor.into(),
            cause: cause.into(),
            action: action.into(),
            before: StateSnapshot::new(self.before_snapshot_json),
            after: StateSnapshot::new(self.after_snapshot_json),
        })
    }
}
