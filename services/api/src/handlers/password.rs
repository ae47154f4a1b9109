use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::password::{
    RequestResetInput, RequestResetUseCase, ResetPasswordInput, ResetPasswordUseCase,
};

#[derive(Serialize)]
pub struct MsgResponse {
    pub msg: String,
}

// ── POST /api/password/forgot-password ───────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<MsgResponse>, ApiError> {
    let usecase = RequestResetUseCase {
        users: state.user_repo(),
        codes: state.reset_codes(),
        mailer: state.mailer(),
    };
    let out = usecase
        .execute(RequestResetInput { email: body.email })
        .await?;

    // Delivery failure is reported but still a 200: the code is valid and
    // retrievable from the service log.
    let msg = if out.delivered {
        "reset code sent to registered email".to_owned()
    } else {
        "reset code generated but email delivery failed; contact support".to_owned()
    };
    Ok(Json(MsgResponse { msg }))
}

// ── POST /api/password/reset-password ────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<MsgResponse>, ApiError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        codes: state.reset_codes(),
    };
    usecase
        .execute(ResetPasswordInput {
            email: body.email,
            code: body.otp,
            new_password: body.new_password,
        })
        .await?;

    Ok(Json(MsgResponse {
        msg: "password reset successful".to_owned(),
    }))
}
