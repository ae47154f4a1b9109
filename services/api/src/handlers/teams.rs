use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use playconnect_auth_types::identity::Identity;

use crate::error::ApiError;
use crate::handlers::views::TeamView;
use crate::state::AppState;
use crate::usecase::team::{
    ApproveRequestUseCase, CreateTeamInput, CreateTeamUseCase, GetTeamUseCase, LeaveTeamUseCase,
    RejectRequestUseCase, RemoveMemberUseCase, RequestJoinUseCase,
};

#[derive(Serialize)]
pub struct TeamResponse {
    pub team: TeamView,
}

impl From<crate::domain::types::Team> for TeamResponse {
    fn from(team: crate::domain::types::Team) -> Self {
        Self {
            team: TeamView::from(team),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamTargetRequest {
    pub team_id: Uuid,
    pub user_id: Uuid,
}

// ── POST /api/teams/create ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub description: Option<String>,
}

pub async fn create_team(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateTeamRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = CreateTeamUseCase {
        repo: state.team_repo(),
    };
    let created = usecase
        .execute(
            identity.user_id,
            CreateTeamInput {
                name: body.name,
                description: body.description,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(TeamResponse::from(created))))
}

// ── GET /api/teams/{teamId} ──────────────────────────────────────────────────

pub async fn get_team(
    _identity: Identity,
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<TeamResponse>, ApiError> {
    let usecase = GetTeamUseCase {
        repo: state.team_repo(),
    };
    let team = usecase.execute(team_id).await?;
    Ok(Json(TeamResponse::from(team)))
}

// ── POST /api/teams/join-request ─────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequestRequest {
    pub team_id: Uuid,
}

pub async fn join_request(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<JoinRequestRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    let usecase = RequestJoinUseCase {
        repo: state.team_repo(),
    };
    let team = usecase.execute(identity.user_id, body.team_id).await?;
    Ok(Json(TeamResponse::from(team)))
}

// ── POST /api/teams/approve-request ──────────────────────────────────────────

pub async fn approve_request(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<TeamTargetRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    let usecase = ApproveRequestUseCase {
        repo: state.team_repo(),
    };
    let team = usecase
        .execute(identity.user_id, body.team_id, body.user_id)
        .await?;
    Ok(Json(TeamResponse::from(team)))
}

// ── POST /api/teams/reject-request ───────────────────────────────────────────

pub async fn reject_request(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<TeamTargetRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    let usecase = RejectRequestUseCase {
        repo: state.team_repo(),
    };
    let team = usecase
        .execute(identity.user_id, body.team_id, body.user_id)
        .await?;
    Ok(Json(TeamResponse::from(team)))
}

// ── POST /api/teams/delete-member ────────────────────────────────────────────

pub async fn delete_member(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<TeamTargetRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    let usecase = RemoveMemberUseCase {
        repo: state.team_repo(),
    };
    let team = usecase
        .execute(identity.user_id, body.team_id, body.user_id)
        .await?;
    Ok(Json(TeamResponse::from(team)))
}

// ── POST /api/teams/leave-team ───────────────────────────────────────────────

pub async fn leave_team(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<TeamResponse>, ApiError> {
    let usecase = LeaveTeamUseCase {
        repo: state.team_repo(),
    };
    let team = usecase.execute(identity.user_id).await?;
    Ok(Json(TeamResponse::from(team)))
}
