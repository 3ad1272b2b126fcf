// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod classification;
mod closure;
mod error;
mod movement;
mod readiness;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use classification::{
    ClassificationRow, ClassificationScope, LeagueSnapshot, compare_rows, compute_classification,
    win_percentage,
};
pub use closure::{ClosureEntry, EntryEdit, SeasonClosure};
pub use movement::{BandSizes, LadderPlacement, MovementPolicy};
pub use readiness::{ensure_season_complete, missing_pairings, unfinished_groups};

// Re-export public types
pub use error::DomainError;
pub use types::{
    ClosureStatus, Group, GroupPlayer, Match, MatchStatus, MovementType, Player, Season,
    SeasonHistoryRecord,
};
pub use validation::{
    GAMES_TO_WIN, format_date, parse_date, validate_date_range, validate_match_result,
    validate_name, validate_season_dates,
};
