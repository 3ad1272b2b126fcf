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

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use freesquash_api::{
    ActivateSeasonRequest, ApiError, AuditTimelineResponse, AuthenticatedActor,
    ClassificationQuery, ClassificationResponse, ClosureInfo, ClosureResponse,
    CreateClosureRequest, CreateGroupRequest, CreateGroupResponse, CreateSeasonRequest,
    CreateSeasonResponse, EditClosureEntriesRequest, GroupMemberRequest, GroupRosterResponse,
    ListSeasonsResponse, PlayerHistoryResponse, PreviewClosureResponse,
    RecalculateGroupRankingRequest, RecordMatchRequest, RecordMatchResponse,
    RegisterPlayerRequest, RegisterPlayerResponse, RolloverSeasonRequest, RolloverSeasonResponse,
    SeasonRequest, SwapPlayersRequest, TogglePlayerActiveRequest, TogglePlayerActiveResponse,
    WriteResponse, activate_season, add_player_to_group, approve_closure, authenticate_stub,
    create_closure, create_group, create_season, edit_closure_entries, get_audit_timeline,
    get_classification, get_closure, get_player_history, list_seasons, preview_closure,
    recalculate_group_ranking, record_match, register_player, remove_player_from_group,
    rollover_season, swap_players, toggle_player_active,
};
use freesquash_audit::Cause;
use freesquash_domain::MovementPolicy;
use freesquash_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// FreeSquash Server - HTTP server for the squash league portal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,

    /// Players promoted from a regular group
    #[arg(long, default_value_t = 2)]
    promote_slots: u32,

    /// Players relegated from a regular group
    #[arg(long, default_value_t = 2)]
    relegate_slots: u32,

    /// Groups of this size or smaller move at most one player each way
    #[arg(long, default_value_t = 4)]
    small_group_max: u32,

    /// Keep the top group from promoting and the bottom group from relegating
    #[arg(long)]
    hold_ladder_ends: bool,
}

impl Args {
    const fn policy(&self) -> MovementPolicy {
        MovementPolicy {
            promote_slots: self.promote_slots,
            relegate_slots: self.relegate_slots,
            small_group_max: self.small_group_max,
            hold_ladder_ends: self.hold_ladder_ends,
        }
    }
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, and the band policy used for closures.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for league data and audit events.
    persistence: Arc<Mutex<Persistence>>,
    /// Band thresholds applied when proposing movements.
    policy: MovementPolicy,
}

/// A mutating request: the caller's identity plus the operation payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AuthenticatedRequest<T> {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The operation payload.
    #[serde(flatten)]
    body: T,
}

impl<T> AuthenticatedRequest<T> {
    /// Authenticates the caller and splits off the payload.
    fn into_parts(self) -> Result<(AuthenticatedActor, Cause, T), HttpError> {
        let actor: AuthenticatedActor = authenticate_stub(self.actor_id, &self.actor_role)
            .map_err(|err| HttpError::from(ApiError::from(err)))?;
        let cause: Cause = Cause::new(self.cause_id, self.cause_description);
        Ok((actor, cause, self.body))
    }
}

/// Payload of requests that carry nothing but the caller's identity.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct NoPayload {}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::StateConflict { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %err, "Request rejected");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Classification and closures
// ============================================================================

/// Handler for GET `/classification` endpoint.
async fn handle_get_classification(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ClassificationQuery>,
) -> Result<Json<ClassificationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_classification(&mut persistence, &query)?))
}

/// Handler for POST `/closure/preview` endpoint.
///
/// Computes proposed movements without writing anything.
async fn handle_preview_closure(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SeasonRequest>,
) -> Result<Json<PreviewClosureResponse>, HttpError> {
    info!(season_id = req.season_id, "Handling preview_closure request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(preview_closure(
        &mut persistence,
        &app_state.policy,
        &req,
    )?))
}

/// Handler for GET `/closure/{season_id}` endpoint.
async fn handle_get_closure(
    AxumState(app_state): AxumState<AppState>,
    Path(season_id): Path<i64>,
) -> Result<Json<ClosureInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_closure(&mut persistence, season_id)?))
}

/// Handler for POST `/closure` endpoint.
///
/// Creates the draft closure of a season.
async fn handle_create_closure(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<CreateClosureRequest>>,
) -> Result<Json<ClosureResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        season_id = req.body.season_id,
        overrides = req.body.overrides.len(),
        "Handling create_closure request"
    );
    let (actor, cause, body) = req.into_parts()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ClosureResponse =
        create_closure(&mut persistence, &app_state.policy, &body, &actor, cause)?;
    drop(persistence);

    info!(
        event_id = response.event_id,
        closure_id = response.closure.closure_id,
        "Successfully created closure"
    );
    Ok(Json(response))
}

/// Handler for PUT `/closure/entries` endpoint.
async fn handle_edit_closure_entries(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<EditClosureEntriesRequest>>,
) -> Result<Json<ClosureResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        season_id = req.body.season_id,
        entries = req.body.entries.len(),
        "Handling edit_closure_entries request"
    );
    let (actor, cause, body) = req.into_parts()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(edit_closure_entries(
        &mut persistence,
        &body,
        &actor,
        cause,
    )?))
}

/// Handler for POST `/closure/approve` endpoint.
async fn handle_approve_closure(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<SeasonRequest>>,
) -> Result<Json<ClosureResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        season_id = req.body.season_id,
        "Handling approve_closure request"
    );
    let (actor, cause, body) = req.into_parts()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(approve_closure(&mut persistence, &body, &actor, cause)?))
}

/// Handler for POST `/season/rollover` endpoint.
///
/// Builds the next season from an approved closure.
async fn handle_rollover_season(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<RolloverSeasonRequest>>,
) -> Result<Json<RolloverSeasonResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        season_id = req.body.season_id,
        import_players = req.body.import_players,
        "Handling rollover_season request"
    );
    let (actor, cause, body) = req.into_parts()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: RolloverSeasonResponse =
        rollover_season(&mut persistence, &body, &actor, cause)?;
    drop(persistence);

    info!(
        event_id = response.event_id,
        new_season_id = response.new_season_id,
        skipped = response.skipped_players.len(),
        "Successfully rolled season over"
    );
    Ok(Json(response))
}

/// Handler for POST `/users/toggle-active` endpoint.
async fn handle_toggle_player_active(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<TogglePlayerActiveRequest>>,
) -> Result<Json<TogglePlayerActiveResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        player_id = req.body.player_id,
        "Handling toggle_player_active request"
    );
    let (actor, cause, body) = req.into_parts()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(toggle_player_active(
        &mut persistence,
        &body,
        &actor,
        cause,
    )?))
}

// ============================================================================
// Seasons, groups, players, matches
// ============================================================================

/// Handler for POST `/seasons` endpoint.
async fn handle_create_season(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<CreateSeasonRequest>>,
) -> Result<Json<CreateSeasonResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        name = %req.body.name,
        "Handling create_season request"
    );
    let (actor, cause, body) = req.into_parts()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(create_season(&mut persistence, &body, &actor, cause)?))
}

/// Handler for GET `/seasons` endpoint.
async fn handle_list_seasons(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListSeasonsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_seasons(&mut persistence)?))
}

/// Handler for POST `/seasons/activate` endpoint.
async fn handle_activate_season(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<ActivateSeasonRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        season_id = req.body.season_id,
        "Handling activate_season request"
    );
    let (actor, cause, body) = req.into_parts()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(activate_season(&mut persistence, &body, &actor, cause)?))
}

/// Handler for POST `/groups` endpoint.
async fn handle_create_group(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<CreateGroupRequest>>,
) -> Result<Json<CreateGroupResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        season_id = req.body.season_id,
        sequence = req.body.sequence,
        "Handling create_group request"
    );
    let (actor, cause, body) = req.into_parts()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(create_group(&mut persistence, &body, &actor, cause)?))
}

/// Handler for POST `/groups/add-player` endpoint.
async fn handle_add_player_to_group(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<GroupMemberRequest>>,
) -> Result<Json<GroupRosterResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        group_id = req.body.group_id,
        player_id = req.body.player_id,
        "Handling add_player_to_group request"
    );
    let (actor, cause, body) = req.into_parts()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(add_player_to_group(
        &mut persistence,
        &body,
        &actor,
        cause,
    )?))
}

/// Handler for POST `/groups/remove-player` endpoint.
async fn handle_remove_player_from_group(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<GroupMemberRequest>>,
) -> Result<Json<GroupRosterResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        group_id = req.body.group_id,
        player_id = req.body.player_id,
        "Handling remove_player_from_group request"
    );
    let (actor, cause, body) = req.into_parts()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(remove_player_from_group(
        &mut persistence,
        &body,
        &actor,
        cause,
    )?))
}

/// Handler for POST `/groups/swap-players` endpoint.
async fn handle_swap_players(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<SwapPlayersRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        first_player_id = req.body.first_player_id,
        second_player_id = req.body.second_player_id,
        "Handling swap_players request"
    );
    let (actor, cause, body) = req.into_parts()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(swap_players(&mut persistence, &body, &actor, cause)?))
}

/// Handler for POST `/groups/{group_id}/recalculate` endpoint.
async fn handle_recalculate_group_ranking(
    AxumState(app_state): AxumState<AppState>,
    Path(group_id): Path<i64>,
    Json(req): Json<AuthenticatedRequest<NoPayload>>,
) -> Result<Json<GroupRosterResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        group_id,
        "Handling recalculate_group_ranking request"
    );
    let (actor, cause, _) = req.into_parts()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(recalculate_group_ranking(
        &mut persistence,
        &RecalculateGroupRankingRequest { group_id },
        &actor,
        cause,
    )?))
}

/// Handler for POST `/players` endpoint.
async fn handle_register_player(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<RegisterPlayerRequest>>,
) -> Result<Json<RegisterPlayerResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        name = %req.body.name,
        "Handling register_player request"
    );
    let (actor, cause, body) = req.into_parts()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(register_player(&mut persistence, &body, &actor, cause)?))
}

/// Handler for POST `/matches` endpoint.
async fn handle_record_match(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<RecordMatchRequest>>,
) -> Result<Json<RecordMatchResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        group_id = req.body.group_id,
        player1_id = req.body.player1_id,
        player2_id = req.body.player2_id,
        "Handling record_match request"
    );
    let (actor, cause, body) = req.into_parts()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(record_match(&mut persistence, &body, &actor, cause)?))
}

/// Handler for GET `/players/{player_id}/history` endpoint.
async fn handle_get_player_history(
    AxumState(app_state): AxumState<AppState>,
    Path(player_id): Path<i64>,
) -> Result<Json<PlayerHistoryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_player_history(&mut persistence, player_id)?))
}

/// Handler for GET `/audit/{season_id}` endpoint.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(season_id): Path<i64>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_audit_timeline(&mut persistence, season_id)?))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/classification", get(handle_get_classification))
        .route("/closure", post(handle_create_closure))
        .route("/closure/preview", post(handle_preview_closure))
        .route("/closure/entries", put(handle_edit_closure_entries))
        .route("/closure/approve", post(handle_approve_closure))
        .route("/closure/{season_id}", get(handle_get_closure))
        .route("/season/rollover", post(handle_rollover_season))
        .route("/users/toggle-active", post(handle_toggle_player_active))
        .route("/seasons", post(handle_create_season).get(handle_list_seasons))
        .route("/seasons/activate", post(handle_activate_season))
        .route("/groups", post(handle_create_group))
        .route("/groups/add-player", post(handle_add_player_to_group))
        .route("/groups/remove-player", post(handle_remove_player_from_group))
        .route("/groups/swap-players", post(handle_swap_players))
        .route(
            "/groups/{group_id}/recalculate",
            post(handle_recalculate_group_ranking),
        )
        .route("/players", post(handle_register_player))
        .route("/players/{player_id}/history", get(handle_get_player_history))
        .route("/matches", post(handle_record_match))
        .route("/audit/{season_id}", get(handle_get_audit_timeline))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing FreeSquash Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let policy: MovementPolicy = args.policy();
    info!(
        promote_slots = policy.promote_slots,
        relegate_slots = policy.relegate_slots,
        small_group_max = policy.small_group_max,
        hold_ladder_ends = policy.hold_ladder_ends,
        "Movement policy configured"
    );

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        policy,
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
