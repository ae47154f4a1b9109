use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use playconnect_auth_types::identity::Identity;

use crate::domain::types::{MatchChanges, MatchFilter, MatchStatus};
use crate::error::ApiError;
use crate::handlers::password::MsgResponse;
use crate::handlers::views::MatchView;
use crate::state::AppState;
use crate::usecase::matches::{
    CreateMatchInput, CreateMatchUseCase, DeleteMatchUseCase, GetMatchUseCase,
    ListJoinedMatchesUseCase, ListMatchesUseCase, ListMyMatchesUseCase, UpdateMatchUseCase,
};
use crate::usecase::membership::{JoinMatchUseCase, LeaveMatchUseCase};

#[derive(Serialize)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub match_: MatchView,
}

#[derive(Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchView>,
}

impl From<crate::domain::types::Match> for MatchResponse {
    fn from(m: crate::domain::types::Match) -> Self {
        Self {
            match_: MatchView::from(m),
        }
    }
}

// ── POST /api/matches ────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    pub title: String,
    pub game_type: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub max_players: Option<u32>,
    pub description: Option<String>,
}

pub async fn create_match(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateMatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = CreateMatchUseCase {
        repo: state.match_repo(),
    };
    let created = usecase
        .execute(
            identity.user_id,
            CreateMatchInput {
                title: body.title,
                game_type: body.game_type,
                date: body.date,
                location: body.location,
                max_players: body.max_players,
                description: body.description,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(MatchResponse::from(created))))
}

// ── GET /api/matches ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchListQuery {
    pub game_type: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    /// Lower bound (inclusive) on the scheduled date.
    pub date: Option<DateTime<Utc>>,
}

pub async fn get_matches(
    _identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<MatchListQuery>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => Some(
            MatchStatus::parse(raw)
                .ok_or_else(|| ApiError::Validation(format!("invalid status filter {raw:?}")))?,
        ),
    };
    let usecase = ListMatchesUseCase {
        repo: state.match_repo(),
    };
    let matches = usecase
        .execute(MatchFilter {
            game_type: query.game_type,
            location: query.location,
            status,
            date_from: query.date,
        })
        .await?;
    Ok(Json(MatchListResponse {
        matches: matches.into_iter().map(MatchView::from).collect(),
    }))
}

// ── GET /api/matches/my-matches ──────────────────────────────────────────────

pub async fn get_my_matches(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let usecase = ListMyMatchesUseCase {
        repo: state.match_repo(),
    };
    let matches = usecase.execute(identity.user_id).await?;
    Ok(Json(MatchListResponse {
        matches: matches.into_iter().map(MatchView::from).collect(),
    }))
}

// ── GET /api/matches/joined-matches ──────────────────────────────────────────

pub async fn get_joined_matches(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let usecase = ListJoinedMatchesUseCase {
        repo: state.match_repo(),
    };
    let matches = usecase.execute(identity.user_id).await?;
    Ok(Json(MatchListResponse {
        matches: matches.into_iter().map(MatchView::from).collect(),
    }))
}

// ── GET /api/matches/{id} ────────────────────────────────────────────────────

pub async fn get_match(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchResponse>, ApiError> {
    let usecase = GetMatchUseCase {
        repo: state.match_repo(),
    };
    let found = usecase.execute(id).await?;
    Ok(Json(MatchResponse::from(found)))
}

// ── PUT /api/matches/{id} ────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMatchRequest {
    pub title: Option<String>,
    pub game_type: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub max_players: Option<u32>,
    pub description: Option<String>,
}

pub async fn update_match(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let usecase = UpdateMatchUseCase {
        repo: state.match_repo(),
    };
    let updated = usecase
        .execute(
            identity.user_id,
            id,
            MatchChanges {
                title: body.title,
                game_type: body.game_type,
                date: body.date,
                location: body.location,
                max_players: body.max_players,
                description: body.description,
            },
        )
        .await?;
    Ok(Json(MatchResponse::from(updated)))
}

// ── DELETE /api/matches/{id} ─────────────────────────────────────────────────

pub async fn delete_match(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MsgResponse>, ApiError> {
    let usecase = DeleteMatchUseCase {
        repo: state.match_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(Json(MsgResponse {
        msg: "match deleted successfully".to_owned(),
    }))
}

// ── POST /api/matches/{id}/join ──────────────────────────────────────────────

pub async fn join_match(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchResponse>, ApiError> {
    let usecase = JoinMatchUseCase {
        repo: state.match_repo(),
    };
    let joined = usecase.execute(identity.user_id, id).await?;
    Ok(Json(MatchResponse::from(joined)))
}

// ── POST /api/matches/{id}/leave ─────────────────────────────────────────────

pub async fn leave_match(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchResponse>, ApiError> {
    let usecase = LeaveMatchUseCase {
        repo: state.match_repo(),
    };
    let left = usecase.execute(identity.user_id, id).await?;
    Ok(Json(MatchResponse::from(left)))
}
