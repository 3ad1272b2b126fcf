// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Promotion / relegation band policy.

use crate::error::DomainError;
use crate::types::MovementType;

/// Where a group sits in its season's ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LadderPlacement {
    /// The season has a single group.
    Only,
    /// Sequence 1 of several.
    Top,
    /// Neither end.
    Middle,
    /// Highest sequence of several.
    Bottom,
}

impl LadderPlacement {
    /// Derives the placement of the `index`-th group (0-based, strongest
    /// first) of a ladder with `group_count` groups.
    #[must_use]
    pub const fn of(index: usize, group_count: usize) -> Self {
        if group_count <= 1 {
            Self::Only
        } else if index == 0 {
            Self::Top
        } else if index + 1 >= group_count {
            Self::Bottom
        } else {
            Self::Middle
        }
    }

    const fn is_top(self) -> bool {
        matches!(self, Self::Only | Self::Top)
    }

    const fn is_bottom(self) -> bool {
        matches!(self, Self::Only | Self::Bottom)
    }
}

/// Sizes of the promotion and relegation bands for one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandSizes {
    pub promoted: u32,
    pub relegated: u32,
}

/// Configurable band thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementPolicy {
    /// Players promoted from a regular group.
    pub promote_slots: u32,
    /// Players relegated from a regular group.
    pub relegate_slots: u32,
    /// Groups of this size or smaller move at most one player each way.
    pub small_group_max: u32,
    /// When set, the top group promotes nobody and the bottom group
    /// relegates nobody.
    pub hold_ladder_ends: bool,
}

impl Default for MovementPolicy {
    fn default() -> Self {
        Self {
            promote_slots: 2,
            relegate_slots: 2,
            small_group_max: 4,
            hold_ladder_ends: false,
        }
    }
}

impl MovementPolicy {
    /// Computes band sizes for a group of `group_size` players.
    ///
    /// Bands never overlap: the relegation band shrinks first, then the
    /// promotion band, until `promoted + relegated <= group_size`.
    #[must_use]
    pub fn band_sizes(&self, group_size: u32, placement: LadderPlacement) -> BandSizes {
        let mut promote: u32 = self.promote_slots;
        let mut relegate: u32 = self.relegate_slots;

        if group_size <= self.small_group_max {
            promote = promote.min(1);
            relegate = relegate.min(1);
        }

        if self.hold_ladder_ends {
            if placement.is_top() {
                promote = 0;
            }
            if placement.is_bottom() {
                relegate = 0;
            }
        }

        let promoted: u32 = promote.min(group_size);
        let relegated: u32 = relegate.min(group_size - promoted);
        BandSizes {
            promoted,
            relegated,
        }
    }

    /// Assigns the default movement for a ranking position in a middle
    /// group.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRankPosition` if `position` lies outside
    /// `1..=group_size`.
    pub fn band(&self, position: u32, group_size: u32) -> Result<MovementType, DomainError> {
        self.band_at(position, group_size, LadderPlacement::Middle)
    }

    /// Assigns the default movement for a ranking position, taking the
    /// group's place in the ladder into account.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRankPosition` if `position` lies outside
    /// `1..=group_size`.
    pub fn band_at(
        &self,
        position: u32,
        group_size: u32,
        placement: LadderPlacement,
    ) -> Result<MovementType, DomainError> {
        if position == 0 || position > group_size {
            return Err(DomainError::InvalidRankPosition {
                position,
                group_size,
            });
        }

        let sizes: BandSizes = self.band_sizes(group_size, placement);
        if position <= sizes.promoted {
            Ok(MovementType::Promotion)
        } else if position > group_size - sizes.relegated {
            Ok(MovementType::Relegation)
        } else {
            Ok(MovementType::Stay)
        }
    }
}
