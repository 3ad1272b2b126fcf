// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Column conversions shared by queries and mutations.
//!
//! Dates are stored as `YYYY-MM-DD` text, timestamps as RFC 3339 text and
//! booleans as `0`/`1` integers.

use freesquash_domain::{DomainError, parse_date};
use num_traits::ToPrimitive;
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::error::PersistenceError;

pub fn to_column(value: u32, column: &str) -> Result<i32, PersistenceError> {
    value.to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("{column} value {value} out of range"))
    })
}

pub fn from_column(value: i32, column: &str) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("{column} value {value} out of range"))
    })
}

pub fn games_from_column(value: i32, column: &str) -> Result<u8, PersistenceError> {
    value.to_u8().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("{column} value {value} out of range"))
    })
}

pub fn to_flag(value: bool) -> i32 {
    i32::from(value)
}

pub const fn from_flag(value: i32) -> bool {
    value != 0
}

pub fn date_from_column(value: &str) -> Result<Date, PersistenceError> {
    parse_date(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

pub fn timestamp_to_column(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

pub fn timestamp_from_column(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::ReconstructionError(format!("{value}: {e}")))
}

/// Parses one of the upper-case enum columns (`status`, `movement_type`).
pub fn enum_from_column<T>(value: &str) -> Result<T, PersistenceError>
where
    T: FromStr<Err = DomainError>,
{
    value
        .parse::<T>()
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}
