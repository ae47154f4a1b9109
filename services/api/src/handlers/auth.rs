use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::views::UserView;
use crate::state::AppState;
use crate::usecase::auth::{
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, UploadedFile,
};

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::Validation(format!("invalid multipart body: {e}"))
}

// ── POST /api/auth/register ──────────────────────────────────────────────────

pub async fn register(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut input = RegisterInput {
        name: String::new(),
        email: String::new(),
        password: String::new(),
        mobile: String::new(),
        dob: String::new(),
        location: String::new(),
        profile_image: None,
    };

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "name" => input.name = field.text().await.map_err(bad_multipart)?,
            "email" => input.email = field.text().await.map_err(bad_multipart)?,
            "password" => input.password = field.text().await.map_err(bad_multipart)?,
            "mobile" => input.mobile = field.text().await.map_err(bad_multipart)?,
            "dob" => input.dob = field.text().await.map_err(bad_multipart)?,
            "location" => input.location = field.text().await.map_err(bad_multipart)?,
            "profileImage" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                if !bytes.is_empty() {
                    input.profile_image = Some(UploadedFile {
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let usecase = RegisterUseCase {
        users: state.user_repo(),
        storage: state.storage(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: out.token,
            user: UserView::from_user(out.user),
        }),
    ))
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        token: out.token,
        user: UserView::from_user(out.user),
    }))
}
