// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use diesel::SqliteConnection;
use diesel::prelude::*;
use freesquash_audit::AuditEvent;

use crate::backend::get_last_insert_rowid;
use crate::data_models::AuditColumns;
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Persists an audit event.
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let columns: AuditColumns = AuditColumns::encode(event)?;

    diesel::insert_into(diesel_schema::audit_events::table)
        .values((
            diesel_schema::audit_events::season_id.eq(event.season_id),
            diesel_schema::audit_events::actor_json.eq(&columns.actor_json),
            diesel_schema::audit_events::cause_json.eq(&columns.cause_json),
            diesel_schema::audit_events::action_json.eq(&columns.action_json),
            diesel_schema::audit_events::before_snapshot_json.eq(&columns.before_snapshot_json),
            diesel_schema::audit_events::after_snapshot_json.eq(&columns.after_snapshot_json),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}
