use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use playconnect_auth_types::identity::Identity;

use crate::domain::types::MediaKind;
use crate::error::ApiError;
use crate::handlers::views::{MediaView, UserView};
use crate::state::AppState;
use crate::usecase::media::{AttachMediaInput, AttachMediaUseCase};
use crate::usecase::profile::{GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase};

#[derive(Serialize)]
pub struct UserResponse {
    pub user: UserView,
}

// ── GET /api/users ───────────────────────────────────────────────────────────

pub async fn get_profile(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let out = usecase.execute(identity.user_id).await?;
    Ok(Json(UserResponse {
        user: UserView::with_media(out.user, out.media),
    }))
}

// ── PUT /api/users ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub mobile: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
}

pub async fn update_profile(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    let out = usecase
        .execute(
            identity.user_id,
            UpdateProfileInput {
                name: body.name,
                dob: body.dob,
                mobile: body.mobile,
                location: body.location,
                profile_image: body.profile_image,
            },
        )
        .await?;
    Ok(Json(UserResponse {
        user: UserView::with_media(out.user, out.media),
    }))
}

// ── POST /api/users/media ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MediaListResponse {
    pub media: Vec<MediaView>,
}

pub async fn upload_media(
    identity: Identity,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MediaListResponse>, ApiError> {
    let mut kind: Option<MediaKind> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("invalid multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "type" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Validation(format!("invalid multipart body: {e}")))?;
                kind = Some(
                    MediaKind::parse(raw.trim())
                        .ok_or_else(|| ApiError::Validation("invalid media type".to_owned()))?,
                );
            }
            "file" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(format!("invalid multipart body: {e}")))?;
                file = Some((content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let kind = kind.ok_or_else(|| ApiError::Validation("invalid media type".to_owned()))?;
    let (content_type, bytes) =
        file.ok_or_else(|| ApiError::Validation("no file uploaded".to_owned()))?;

    let usecase = AttachMediaUseCase {
        users: state.user_repo(),
        storage: state.storage(),
    };
    let media = usecase
        .execute(
            identity.user_id,
            AttachMediaInput {
                kind,
                content_type,
                bytes,
            },
        )
        .await?;

    Ok(Json(MediaListResponse {
        media: media.into_iter().map(MediaView::from).collect(),
    }))
}
