// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Classification query parsing.
//!
//! Query strings arrive as raw text so that a malformed filter is reported
//! against the field that carried it. Blank values count as absent.

use freesquash_domain::{ClassificationScope, parse_date};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;

/// Classification filter errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScopeFilterError {
    /// An id filter is not a positive integer.
    #[error("{field} must be a positive integer, got '{value}'")]
    InvalidId { field: &'static str, value: String },

    /// A date filter is not a `YYYY-MM-DD` date.
    #[error("{field} must be a YYYY-MM-DD date, got '{value}'")]
    InvalidDate { field: &'static str, value: String },

    /// The date range ends before it starts.
    #[error("start_date {start_date} is after end_date {end_date}")]
    InvertedRange { start_date: Date, end_date: Date },
}

/// Raw classification query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationQuery {
    /// Restrict to one group.
    pub group_id: Option<String>,
    /// Restrict to one season.
    pub season_id: Option<String>,
    /// Count only the matches of one player.
    pub player_id: Option<String>,
    /// Inclusive lower date bound.
    pub start_date: Option<String>,
    /// Inclusive upper date bound.
    pub end_date: Option<String>,
}

impl ClassificationQuery {
    /// Parses the query into a classification scope.
    ///
    /// # Errors
    ///
    /// Returns an error if an id or date is malformed or the date range is
    /// inverted.
    pub fn parse(&self) -> Result<ClassificationScope, ScopeFilterError> {
        let start_date: Option<Date> = parse_date_field("start_date", self.start_date.as_deref())?;
        let end_date: Option<Date> = parse_date_field("end_date", self.end_date.as_deref())?;
        let inverted: Option<(Date, Date)> = start_date
            .zip(end_date)
            .filter(|(start, end)| start > end);
        if let Some((start_date, end_date)) = inverted {
            return Err(ScopeFilterError::InvertedRange {
                start_date,
                end_date,
            });
        }

        Ok(ClassificationScope {
            group_id: parse_id_field("group_id", self.group_id.as_deref())?,
            season_id: parse_id_field("season_id", self.season_id.as_deref())?,
            player_id: parse_id_field("player_id", self.player_id.as_deref())?,
            start_date,
            end_date,
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_id_field(field: &'static str, value: Option<&str>) -> Result<Option<i64>, ScopeFilterError> {
    present(value)
        .map(|raw| match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(ScopeFilterError::InvalidId {
                field,
                value: raw.to_string(),
            }),
        })
        .transpose()
}

fn parse_date_field(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Date>, ScopeFilterError> {
    present(value)
        .map(|raw| {
            parse_date(raw).map_err(|_| ScopeFilterError::InvalidDate {
                field,
                value: raw.to_string(),
            })
        })
        .transpose()
}
