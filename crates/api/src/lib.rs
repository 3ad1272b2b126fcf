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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;
mod scope;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    activate_season, add_player_to_group, approve_closure, create_closure, create_group,
    create_season, edit_closure_entries, get_audit_timeline, get_classification, get_closure,
    get_player_history, list_seasons, preview_closure, recalculate_group_ranking, record_match,
    register_player, remove_player_from_group, rollover_season, swap_players,
    toggle_player_active,
};
pub use request_response::{
    ActivateSeasonRequest, AuditEventInfo, AuditTimelineResponse, ClassificationResponse,
    ClassificationRowInfo, ClosureEntryInfo, ClosureInfo, ClosureResponse, CreateClosureRequest,
    CreateGroupRequest, CreateGroupResponse, CreateSeasonRequest, CreateSeasonResponse,
    EditClosureEntriesRequest, EntryEditRequest, GroupMemberRequest, GroupProposalInfo,
    GroupRosterResponse, ListSeasonsResponse, MemberInfo, PlayerHistoryResponse,
    PreviewClosureResponse, RecalculateGroupRankingRequest, RecordMatchRequest,
    RecordMatchResponse, RegisterPlayerRequest, RegisterPlayerResponse, RolloverGroupInfo,
    RolloverSeasonRequest, RolloverSeasonResponse, SeasonHistoryInfo, SeasonInfo, SeasonRequest,
    SwapPlayersRequest, TogglePlayerActiveRequest, TogglePlayerActiveResponse, WriteResponse,
};
pub use scope::{ClassificationQuery, ScopeFilterError};
