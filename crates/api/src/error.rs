// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::scope::ScopeFilterError;
use freesquash::CoreError;
use freesquash_domain::DomainError;
use freesquash_persistence::PersistenceError;
use tracing::error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The request conflicts with the current workflow state.
    StateConflict {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::StateConflict { rule, message } => {
                write!(f, "State conflict ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<ScopeFilterError> for ApiError {
    fn from(err: ScopeFilterError) -> Self {
        let field: &str = match &err {
            ScopeFilterError::InvalidId { field, .. } | ScopeFilterError::InvalidDate { field, .. } => {
                field
            }
            ScopeFilterError::InvertedRange { .. } => "start_date",
        };
        Self::InvalidInput {
            field: String::from(field),
            message: err.to_string(),
        }
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message: err.to_string(),
    }
}

fn not_found(resource_type: &str, err: &DomainError) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from(resource_type),
        message: err.to_string(),
    }
}

fn rule_violation(rule: &str, err: &DomainError) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from(rule),
        message: err.to_string(),
    }
}

fn state_conflict(rule: &str, err: &DomainError) -> ApiError {
    ApiError::StateConflict {
        rule: String::from(rule),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidName(_) => invalid_input("name", &err),
        DomainError::InvalidSeasonDates { .. } => invalid_input("end_date", &err),
        DomainError::InvalidDateRange { .. } => invalid_input("start_date", &err),
        DomainError::DateParseError { .. } => invalid_input("date", &err),
        DomainError::InvalidMatchScore { .. } => invalid_input("games", &err),
        DomainError::SelfMatch { .. } => invalid_input("player2_id", &err),
        DomainError::InvalidMatchStatus(_) => invalid_input("status", &err),
        DomainError::InvalidMovementType(_) => invalid_input("movement_type", &err),
        DomainError::InvalidClosureStatus(_) => invalid_input("status", &err),
        DomainError::InvalidRankPosition { .. } => invalid_input("ranking_position", &err),
        DomainError::InvalidGroupSequence(_) => invalid_input("sequence", &err),
        DomainError::DuplicateEntryEdit { .. } => invalid_input("entries", &err),
        DomainError::SeasonNotFound(_) => not_found("Season", &err),
        DomainError::GroupNotFound(_) => not_found("Group", &err),
        DomainError::PlayerNotFound(_) => not_found("Player", &err),
        DomainError::ClosureNotFound { .. } => not_found("Closure", &err),
        DomainError::ClosureEntryNotFound { .. } => not_found("Closure entry", &err),
        DomainError::PlayerNotInGroup { .. } => rule_violation("group_membership", &err),
        DomainError::PlayerAlreadyInGroup { .. } => rule_violation("unique_membership", &err),
        DomainError::DuplicateGroupSequence { .. } => rule_violation("unique_sequence", &err),
        DomainError::SwapWithinGroup { .. } => rule_violation("swap_across_groups", &err),
        DomainError::SwapAcrossSeasons { .. } => rule_violation("swap_within_season", &err),
        DomainError::SeasonHasNoGroups(_) => rule_violation("season_has_groups", &err),
        DomainError::MembershipLocked { .. } => state_conflict("membership_locked", &err),
        DomainError::ClosureFrozen { .. } => state_conflict("closure_frozen", &err),
        DomainError::ClosureNotApproved { .. } => state_conflict("closure_approved", &err),
        DomainError::ClosureAlreadyExists { .. } => state_conflict("single_closure", &err),
        DomainError::SeasonIncomplete { .. } => state_conflict("season_complete", &err),
        DomainError::RolloverAlreadyApplied { .. } => state_conflict("single_rollover", &err),
        DomainError::InvalidStateTransition { .. } => state_conflict("closure_lifecycle", &err),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Lost races (stale closure versions, unique constraints) surface as
/// conflicts; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::VersionConflict { .. } => ApiError::StateConflict {
            rule: String::from("closure_version"),
            message: err.to_string(),
        },
        PersistenceError::ConstraintViolation(message) => ApiError::StateConflict {
            rule: String::from("database_constraint"),
            message,
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::EventNotFound(event_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message: format!("Audit event {event_id} does not exist"),
        },
        other => {
            error!(error = %other, "Persistence error");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}
