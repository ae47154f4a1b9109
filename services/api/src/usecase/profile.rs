use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::{
    MediaItem, ProfileChanges, User, validate_dob, validate_location, validate_mobile,
    validate_name,
};
use crate::error::ApiError;

pub struct ProfileOutput {
    pub user: User,
    pub media: Vec<MediaItem>,
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, actor: Uuid) -> Result<ProfileOutput, ApiError> {
        let user = self
            .users
            .find_by_id(actor)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let media = self.users.list_media(actor).await?;
        Ok(ProfileOutput { user, media })
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub name: Option<String>,
    /// Raw `YYYY-MM-DD` string; parsed during validation.
    pub dob: Option<String>,
    pub mobile: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
}

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    pub async fn execute(
        &self,
        actor: Uuid,
        input: UpdateProfileInput,
    ) -> Result<ProfileOutput, ApiError> {
        // Supplied fields pass the same policy as registration.
        let mut changes = ProfileChanges::default();

        if let Some(name) = input.name {
            let name = name.trim().to_owned();
            if !validate_name(&name) {
                return Err(ApiError::Validation(
                    "name should only contain letters and spaces (2-50 characters)".to_owned(),
                ));
            }
            changes.name = Some(name);
        }
        if let Some(dob) = input.dob {
            let dob = NaiveDate::parse_from_str(dob.trim(), "%Y-%m-%d")
                .ok()
                .filter(|dob| validate_dob(*dob, Utc::now().date_naive()))
                .ok_or_else(|| {
                    ApiError::Validation(
                        "invalid date of birth or age must be between 13 and 120 years".to_owned(),
                    )
                })?;
            changes.dob = Some(dob);
        }
        if let Some(mobile) = input.mobile {
            let mobile = mobile.trim().to_owned();
            if !validate_mobile(&mobile) {
                return Err(ApiError::Validation(
                    "please enter a valid mobile number (10-15 digits)".to_owned(),
                ));
            }
            changes.mobile = Some(mobile);
        }
        if let Some(location) = input.location {
            let location = location.trim().to_owned();
            if !validate_location(&location) {
                return Err(ApiError::Validation(
                    "location must be between 2 and 100 characters".to_owned(),
                ));
            }
            changes.location = Some(location);
        }
        changes.profile_image = input.profile_image;

        if changes.is_empty() {
            return Err(ApiError::Validation("no fields to update".to_owned()));
        }

        // Existence check first so an unknown actor gets 404, not a no-op.
        self.users
            .find_by_id(actor)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        self.users.update_profile(actor, &changes).await?;

        let user = self
            .users
            .find_by_id(actor)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let media = self.users.list_media(actor).await?;
        Ok(ProfileOutput { user, media })
    }
}
