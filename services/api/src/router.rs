use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use playconnect_core::health::healthz;
use playconnect_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{login, register},
    health::readyz,
    matches::{
        create_match, delete_match, get_joined_matches, get_match, get_matches, get_my_matches,
        join_match, leave_match, update_match,
    },
    participants::{delete_participant, get_match_participants},
    password::{forgot_password, reset_password},
    teams::{
        approve_request, create_team, delete_member, get_team, join_request, leave_team,
        reject_request,
    },
    users::{get_profile, update_profile, upload_media},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // Password recovery
        .route("/api/password/forgot-password", post(forgot_password))
        .route("/api/password/reset-password", post(reset_password))
        // Matches
        .route("/api/matches", post(create_match))
        .route("/api/matches", get(get_matches))
        .route("/api/matches/my-matches", get(get_my_matches))
        .route("/api/matches/joined-matches", get(get_joined_matches))
        .route("/api/matches/{id}", get(get_match))
        .route("/api/matches/{id}", put(update_match))
        .route("/api/matches/{id}", delete(delete_match))
        .route("/api/matches/{id}/join", post(join_match))
        .route("/api/matches/{id}/leave", post(leave_match))
        // Participants
        .route(
            "/api/participants/match/{matchId}",
            get(get_match_participants),
        )
        .route(
            "/api/participants/match/{matchId}/{participantId}",
            delete(delete_participant),
        )
        // Profile
        .route("/api/users", get(get_profile))
        .route("/api/users", put(update_profile))
        .route("/api/users/media", post(upload_media))
        // Teams
        .route("/api/teams/create", post(create_team))
        .route("/api/teams/join-request", post(join_request))
        .route("/api/teams/approve-request", post(approve_request))
        .route("/api/teams/reject-request", post(reject_request))
        .route("/api/teams/delete-member", post(delete_member))
        .route("/api/teams/leave-team", post(leave_team))
        .route("/api/teams/{teamId}", get(get_team))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
