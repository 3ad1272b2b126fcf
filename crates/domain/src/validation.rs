// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Match, MatchStatus};
use time::Date;
use time::macros::format_description;

/// Games needed to win a best-of-five match.
pub const GAMES_TO_WIN: u8 = 3;

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Validates that a display name is usable.
///
/// # Arguments
///
/// * `kind` - What is being named, used in the error message
/// * `name` - The proposed name
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty or whitespace.
pub fn validate_name(kind: &str, name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(format!(
            "{kind} name cannot be empty"
        )));
    }
    Ok(())
}

/// Validates that a season does not end before it starts.
///
/// A single-day season is allowed.
///
/// # Errors
///
/// Returns `DomainError::InvalidSeasonDates` if `end_date < start_date`.
pub fn validate_season_dates(start_date: Date, end_date: Date) -> Result<(), DomainError> {
    if end_date < start_date {
        return Err(DomainError::InvalidSeasonDates {
            start_date,
            end_date,
        });
    }
    Ok(())
}

/// Validates an optional inclusive date range used to filter matches.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if both bounds are present and
/// the start lies after the end.
pub fn validate_date_range(
    start_date: Option<Date>,
    end_date: Option<Date>,
) -> Result<(), DomainError> {
    match (start_date, end_date) {
        (Some(start_date), Some(end_date)) if start_date > end_date => {
            Err(DomainError::InvalidDateRange {
                start_date,
                end_date,
            })
        }
        _ => Ok(()),
    }
}

/// Validates the shape of a match result.
///
/// Rules:
/// - the two players must differ
/// - each side wins between 0 and 3 games
/// - a played match has exactly one side on 3 games
/// - an injury or cancellation never shows both sides on 3 games
///
/// Group membership is checked by the caller, which has the roster.
///
/// # Errors
///
/// Returns `DomainError::SelfMatch` or `DomainError::InvalidMatchScore`.
pub fn validate_match_result(result: &Match) -> Result<(), DomainError> {
    if result.player1_id == result.player2_id {
        return Err(DomainError::SelfMatch {
            player_id: result.player1_id,
        });
    }

    let invalid = |reason: &str| DomainError::InvalidMatchScore {
        games_p1: result.games_p1,
        games_p2: result.games_p2,
        reason: reason.to_string(),
    };

    if result.games_p1 > GAMES_TO_WIN || result.games_p2 > GAMES_TO_WIN {
        return Err(invalid("a side cannot win more than 3 games"));
    }

    let winners: usize = [result.games_p1, result.games_p2]
        .iter()
        .filter(|games| **games == GAMES_TO_WIN)
        .count();

    match result.status {
        MatchStatus::Played if winners != 1 => {
            Err(invalid("a played match needs exactly one side on 3 games"))
        }
        MatchStatus::Injury | MatchStatus::Cancelled if winners == 2 => {
            Err(invalid("both sides cannot reach 3 games"))
        }
        _ => Ok(()),
    }
}
