// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season closure entity and its editing rules.
//!
//! A closure records, for every ranked player of a season, where they
//! finished and which movement they take into the next season. It starts as
//! `DRAFT`, where movements may be edited, and becomes `APPROVED` exactly
//! once. Approved closures never change again.

use crate::error::DomainError;
use crate::types::{ClosureStatus, MovementType};
use std::collections::HashSet;
use time::OffsetDateTime;

/// One player's line in a season closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosureEntry {
    pub player_id: i64,
    /// The group the player finished the season in.
    pub from_group_id: i64,
    /// 1-based position in that group's season classification.
    pub final_rank: u32,
    pub movement_type: MovementType,
    pub matches_won: u32,
}

/// Requested change to one entry's movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryEdit {
    pub player_id: i64,
    pub movement_type: MovementType,
}

/// The end-of-season closure of one season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonClosure {
    /// The canonical numeric identifier assigned by the database.
    pub closure_id: Option<i64>,
    pub season_id: i64,
    pub status: ClosureStatus,
    pub created_at: OffsetDateTime,
    pub approved_at: Option<OffsetDateTime>,
    /// Optimistic concurrency counter, bumped on every persisted change.
    pub version: i64,
    pub entries: Vec<ClosureEntry>,
}

impl SeasonClosure {
    /// Creates a new draft closure.
    #[must_use]
    pub const fn draft(
        season_id: i64,
        entries: Vec<ClosureEntry>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            closure_id: None,
            season_id,
            status: ClosureStatus::Draft,
            created_at,
            approved_at: None,
            version: 0,
            entries,
        }
    }

    /// Returns the entry of a player, if any.
    #[must_use]
    pub fn entry_for(&self, player_id: i64) -> Option<&ClosureEntry> {
        self.entries
            .iter()
            .find(|entry| entry.player_id == player_id)
    }

    /// Fails unless the closure is still a draft.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ClosureFrozen` once approved.
    pub const fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.status.is_frozen() {
            return Err(DomainError::ClosureFrozen {
                season_id: self.season_id,
            });
        }
        Ok(())
    }

    /// Fails unless the closure has been approved.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ClosureNotApproved` while still a draft.
    pub const fn ensure_approved(&self) -> Result<(), DomainError> {
        if !self.status.is_frozen() {
            return Err(DomainError::ClosureNotApproved {
                season_id: self.season_id,
            });
        }
        Ok(())
    }

    /// Checks an edit batch without applying it.
    ///
    /// # Errors
    ///
    /// - `ClosureFrozen` if the closure is approved
    /// - `DuplicateEntryEdit` if a player appears twice in the batch
    /// - `ClosureEntryNotFound` if a player has no entry
    pub fn validate_edits(&self, edits: &[EntryEdit]) -> Result<(), DomainError> {
        self.ensure_editable()?;

        let mut seen: HashSet<i64> = HashSet::new();
        for edit in edits {
            if !seen.insert(edit.player_id) {
                return Err(DomainError::DuplicateEntryEdit {
                    player_id: edit.player_id,
                });
            }
            if self.entry_for(edit.player_id).is_none() {
                return Err(DomainError::ClosureEntryNotFound {
                    season_id: self.season_id,
                    player_id: edit.player_id,
                });
            }
        }
        Ok(())
    }

    /// Applies a batch of movement edits.
    ///
    /// Either every edit is applied or none is.
    ///
    /// # Errors
    ///
    /// See [`Self::validate_edits`].
    pub fn apply_edits(&mut self, edits: &[EntryEdit]) -> Result<(), DomainError> {
        self.validate_edits(edits)?;
        for edit in edits {
            if let Some(entry) = self
                .entries
                .iter_mut()
                .find(|entry| entry.player_id == edit.player_id)
            {
                entry.movement_type = edit.movement_type;
            }
        }
        Ok(())
    }

    /// Moves the closure from draft to approved.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ClosureFrozen` if already approved.
    pub fn approve(&mut self, at: OffsetDateTime) -> Result<(), DomainError> {
        self.ensure_editable()?;
        if !self.status.can_transition_to(ClosureStatus::Approved) {
            return Err(DomainError::InvalidStateTransition {
                current: self.status.to_string(),
                target: ClosureStatus::Approved.to_string(),
            });
        }
        self.status = ClosureStatus::Approved;
        self.approved_at = Some(at);
        Ok(())
    }
}
