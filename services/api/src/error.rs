use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API service domain error variants.
///
/// Login failures for unknown email and wrong password both map to
/// `InvalidCredentials` so the response never reveals whether an account
/// exists.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("not authorized to modify this resource")]
    NotOwner,
    #[error("user not found")]
    UserNotFound,
    #[error("match not found")]
    MatchNotFound,
    #[error("team not found")]
    TeamNotFound,
    #[error("participant not found in match")]
    ParticipantNotFound,
    #[error("you are not a member of any team")]
    NoTeamMembership,
    #[error("user with this email already exists")]
    EmailTaken,
    #[error("already joined this match")]
    AlreadyJoined,
    #[error("match is full")]
    MatchFull,
    #[error("cannot join completed or cancelled matches")]
    MatchNotJoinable,
    #[error("not joined this match")]
    NotJoined,
    #[error("creator cannot leave their own match")]
    CreatorCannotLeave,
    #[error("creator cannot be removed from their own match")]
    CreatorNotRemovable,
    #[error("already a member or have a pending request")]
    AlreadyMemberOrRequested,
    #[error("no pending request from this user")]
    NoPendingRequest,
    #[error("user is not a member of the team")]
    NotTeamMember,
    #[error("team owner cannot leave the team")]
    OwnerCannotLeaveTeam,
    #[error("invalid or expired reset code")]
    InvalidResetCode,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotOwner => "NOT_OWNER",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::ParticipantNotFound => "PARTICIPANT_NOT_FOUND",
            Self::NoTeamMembership => "NO_TEAM_MEMBERSHIP",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::MatchFull => "MATCH_FULL",
            Self::MatchNotJoinable => "MATCH_NOT_JOINABLE",
            Self::NotJoined => "NOT_JOINED",
            Self::CreatorCannotLeave => "CREATOR_CANNOT_LEAVE",
            Self::CreatorNotRemovable => "CREATOR_NOT_REMOVABLE",
            Self::AlreadyMemberOrRequested => "ALREADY_MEMBER_OR_REQUESTED",
            Self::NoPendingRequest => "NO_PENDING_REQUEST",
            Self::NotTeamMember => "NOT_TEAM_MEMBER",
            Self::OwnerCannotLeaveTeam => "OWNER_CANNOT_LEAVE_TEAM",
            Self::InvalidResetCode => "INVALID_RESET_CODE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_)
            | Self::AlreadyJoined
            | Self::MatchFull
            | Self::MatchNotJoinable
            | Self::NotJoined
            | Self::CreatorCannotLeave
            | Self::CreatorNotRemovable
            | Self::AlreadyMemberOrRequested
            | Self::NoPendingRequest
            | Self::NotTeamMember
            | Self::OwnerCannotLeaveTeam
            | Self::InvalidResetCode => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotOwner => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::MatchNotFound
            | Self::TeamNotFound
            | Self::ParticipantNotFound
            | Self::NoTeamMembership => StatusCode::NOT_FOUND,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
