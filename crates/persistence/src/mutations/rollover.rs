// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season rollover persistence.

use diesel::SqliteConnection;
use diesel::prelude::*;
use freesquash::{PlannedGroup, RolloverPlan};
use freesquash_domain::{Group, GroupPlayer};
use time::OffsetDateTime;
use tracing::info;

use crate::convert::{timestamp_to_column, to_flag};
use crate::diesel_schema::season_rollovers;
use crate::error::PersistenceError;
use crate::mutations::league::{insert_group, insert_membership, insert_season, set_current_group};

/// Writes a rollover plan: the new active season, its groups, the imported
/// memberships, the players' current group pointers and the rollover record.
///
/// The rollover record's `closure_id` is unique, so a second rollover of
/// the same closure fails and the enclosing transaction discards the season
/// it had started to create.
///
/// # Returns
///
/// The new `season_id`.
///
/// # Errors
///
/// Returns `ConstraintViolation` if the closure was already rolled over, or
/// an error if any write fails.
pub fn apply_rollover(
    conn: &mut SqliteConnection,
    plan: &RolloverPlan,
) -> Result<i64, PersistenceError> {
    let new_season_id: i64 = insert_season(conn, &plan.season)?;

    diesel::insert_into(season_rollovers::table)
        .values((
            season_rollovers::closure_id.eq(plan.closure_id),
            season_rollovers::source_season_id.eq(plan.source_season_id),
            season_rollovers::new_season_id.eq(new_season_id),
            season_rollovers::imported_players.eq(to_flag(plan.import_players)),
            season_rollovers::created_at.eq(timestamp_to_column(OffsetDateTime::now_utc())?),
        ))
        .execute(conn)?;

    for planned in &plan.groups {
        insert_planned_group(conn, new_season_id, planned)?;
    }

    // insert_season already cleared every pointer; skipped players stay cleared.
    info!(
        closure_id = plan.closure_id,
        source_season_id = plan.source_season_id,
        new_season_id,
        groups = plan.groups.len(),
        imported = plan.imported_count(),
        skipped = plan.skipped_players.len(),
        "Applied season rollover"
    );
    Ok(new_season_id)
}

fn insert_planned_group(
    conn: &mut SqliteConnection,
    season_id: i64,
    planned: &PlannedGroup,
) -> Result<(), PersistenceError> {
    let group: Group = Group::new(season_id, planned.name.clone(), planned.sequence);
    let group_id: i64 = insert_group(conn, &group)?;

    for member in &planned.members {
        insert_membership(
            conn,
            &GroupPlayer::new(group_id, member.player_id, member.ranking_position),
        )?;
        set_current_group(conn, member.player_id, Some(group_id))?;
    }
    Ok(())
}
