use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use playconnect_auth_types::identity::Identity;

use crate::error::ApiError;
use crate::handlers::password::MsgResponse;
use crate::handlers::views::UserRefView;
use crate::state::AppState;
use crate::usecase::membership::{ListParticipantsUseCase, RemoveParticipantUseCase};

#[derive(Serialize)]
pub struct ParticipantListResponse {
    pub participants: Vec<UserRefView>,
}

// ── GET /api/participants/match/{matchId} ────────────────────────────────────

pub async fn get_match_participants(
    _identity: Identity,
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<ParticipantListResponse>, ApiError> {
    let usecase = ListParticipantsUseCase {
        repo: state.match_repo(),
    };
    let participants = usecase.execute(match_id).await?;
    Ok(Json(ParticipantListResponse {
        participants: participants.into_iter().map(UserRefView::from).collect(),
    }))
}

// ── DELETE /api/participants/match/{matchId}/{participantId} ─────────────────

pub async fn delete_participant(
    identity: Identity,
    State(state): State<AppState>,
    Path((match_id, participant_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MsgResponse>, ApiError> {
    let usecase = RemoveParticipantUseCase {
        repo: state.match_repo(),
    };
    usecase
        .execute(identity.user_id, match_id, participant_id)
        .await?;
    Ok(Json(MsgResponse {
        msg: "participant removed successfully".to_owned(),
    }))
}
