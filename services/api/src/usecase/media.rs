use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{MediaStoragePort, UserRepository};
use crate::domain::types::{MediaItem, MediaKind};
use crate::error::ApiError;

/// Storage folder for registration profile images.
pub const PROFILE_IMAGE_FOLDER: &str = "playconnect_profiles";
/// Storage folder for profile media attachments.
pub const MEDIA_FOLDER: &str = "playconnect_media";

const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];
const ALLOWED_VIDEO_TYPES: &[&str] = &["video/mp4", "video/webm", "video/quicktime"];
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
const MAX_VIDEO_BYTES: usize = 50 * 1024 * 1024;

/// Content-type and size gate for every upload path.
pub fn validate_upload(kind: MediaKind, content_type: &str, len: usize) -> Result<(), ApiError> {
    let (allowed, max_bytes) = match kind {
        MediaKind::Image => (ALLOWED_IMAGE_TYPES, MAX_IMAGE_BYTES),
        MediaKind::Video => (ALLOWED_VIDEO_TYPES, MAX_VIDEO_BYTES),
    };
    if !allowed.contains(&content_type) {
        return Err(ApiError::Validation(format!(
            "invalid file type {content_type}; allowed: {}",
            allowed.join(", ")
        )));
    }
    if len == 0 {
        return Err(ApiError::Validation("no file uploaded".to_owned()));
    }
    if len > max_bytes {
        return Err(ApiError::Validation(format!(
            "file too large; maximum {} MB allowed",
            max_bytes / (1024 * 1024)
        )));
    }
    Ok(())
}

// ── AttachMedia ──────────────────────────────────────────────────────────────

pub struct AttachMediaInput {
    pub kind: MediaKind,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct AttachMediaUseCase<U, S>
where
    U: UserRepository,
    S: MediaStoragePort,
{
    pub users: U,
    pub storage: S,
}

impl<U, S> AttachMediaUseCase<U, S>
where
    U: UserRepository,
    S: MediaStoragePort,
{
    pub async fn execute(
        &self,
        actor: Uuid,
        input: AttachMediaInput,
    ) -> Result<Vec<MediaItem>, ApiError> {
        self.users
            .find_by_id(actor)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        validate_upload(input.kind, &input.content_type, input.bytes.len())?;

        let url = self
            .storage
            .upload(MEDIA_FOLDER, input.kind, &input.content_type, input.bytes)
            .await?;

        let item = MediaItem {
            id: Uuid::now_v7(),
            kind: input.kind,
            url,
            uploaded_at: Utc::now(),
        };
        self.users.add_media(actor, &item).await?;
        self.users.list_media(actor).await
    }
}
