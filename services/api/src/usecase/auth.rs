use std::time::{SystemTime, UNIX_EPOCH};

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{NaiveDate, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use playconnect_auth_types::token::{JwtClaims, SESSION_TOKEN_EXP_SECS};

use crate::domain::repository::{MediaStoragePort, UserRepository};
use crate::domain::types::{
    MediaKind, User, validate_dob, validate_email, validate_location, validate_mobile,
    validate_name, validate_password,
};
use crate::error::ApiError;
use crate::usecase::media::{PROFILE_IMAGE_FOLDER, validate_upload};

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign a 7-day session token for the user.
pub fn issue_session_token(user: &User, secret: &str) -> Result<String, ApiError> {
    let claims = JwtClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        exp: now_secs() + SESSION_TOKEN_EXP_SECS,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))
}

/// Hash a password with a per-record random salt (PHC string output).
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("failed to hash password: {e}")))
}

/// Constant-shape verification: parse failures count as mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

// ── Register ─────────────────────────────────────────────────────────────────

/// Optional profile image received with the registration form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub mobile: String,
    /// Raw `YYYY-MM-DD` string; parsed during validation.
    pub dob: String,
    pub location: String,
    pub profile_image: Option<UploadedFile>,
}

pub struct RegisterOutput {
    pub token: String,
    pub user: User,
}

pub struct RegisterUseCase<U, S>
where
    U: UserRepository,
    S: MediaStoragePort,
{
    pub users: U,
    pub storage: S,
    pub jwt_secret: String,
}

impl<U, S> RegisterUseCase<U, S>
where
    U: UserRepository,
    S: MediaStoragePort,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<RegisterOutput, ApiError> {
        let name = input.name.trim().to_owned();
        let email = input.email.trim().to_lowercase();
        let password = input.password.trim().to_owned();
        let mobile = input.mobile.trim().to_owned();
        let dob_raw = input.dob.trim().to_owned();
        let location = input.location.trim().to_owned();

        let missing: Vec<&str> = [
            ("name", name.is_empty()),
            ("email", email.is_empty()),
            ("password", password.is_empty()),
            ("mobile", mobile.is_empty()),
            ("dob", dob_raw.is_empty()),
            ("location", location.is_empty()),
        ]
        .iter()
        .filter(|(_, empty)| *empty)
        .map(|(field, _)| *field)
        .collect();
        if !missing.is_empty() {
            return Err(ApiError::Validation(format!(
                "all fields except profile image are required; missing: {}",
                missing.join(", ")
            )));
        }

        if !validate_name(&name) {
            return Err(ApiError::Validation(
                "name should only contain letters and spaces (2-50 characters)".to_owned(),
            ));
        }
        if !validate_email(&email) {
            return Err(ApiError::Validation(
                "please enter a valid email address".to_owned(),
            ));
        }
        if !validate_password(&password) {
            return Err(ApiError::Validation(
                "password must be at least 6 characters long and contain at least one letter and one number"
                    .to_owned(),
            ));
        }
        if !validate_mobile(&mobile) {
            return Err(ApiError::Validation(
                "please enter a valid mobile number (10-15 digits)".to_owned(),
            ));
        }
        let dob = NaiveDate::parse_from_str(&dob_raw, "%Y-%m-%d")
            .ok()
            .filter(|dob| validate_dob(*dob, Utc::now().date_naive()))
            .ok_or_else(|| {
                ApiError::Validation(
                    "invalid date of birth or age must be between 13 and 120 years".to_owned(),
                )
            })?;
        if !validate_location(&location) {
            return Err(ApiError::Validation(
                "location must be between 2 and 100 characters".to_owned(),
            ));
        }

        // Pre-check for a friendly 409; the unique index still backstops races.
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ApiError::EmailTaken);
        }

        let profile_image = match input.profile_image {
            Some(file) => {
                validate_upload(MediaKind::Image, &file.content_type, file.bytes.len())?;
                let url = self
                    .storage
                    .upload(
                        PROFILE_IMAGE_FOLDER,
                        MediaKind::Image,
                        &file.content_type,
                        file.bytes,
                    )
                    .await?;
                Some(url)
            }
            None => None,
        };

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name,
            email,
            password_hash: hash_password(&password)?,
            mobile,
            dob,
            location,
            profile_image,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;

        let token = issue_session_token(&user, &self.jwt_secret)?;
        Ok(RegisterOutput { token, user })
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    pub token: String,
    pub user: User,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ApiError> {
        let email = input.email.trim().to_lowercase();
        let password = input.password.trim().to_owned();

        if !validate_email(&email) {
            return Err(ApiError::Validation(
                "please enter a valid email address".to_owned(),
            ));
        }
        if password.len() < 6 {
            return Err(ApiError::Validation(
                "password must be at least 6 characters long".to_owned(),
            ));
        }

        // Unknown email and wrong password must be indistinguishable.
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;
        if !verify_password(&password, &user.password_hash) {
            return Err(ApiError::InvalidCredentials);
        }

        self.users.touch_last_login(user.id).await?;

        let token = issue_session_token(&user, &self.jwt_secret)?;
        Ok(LoginOutput { token, user })
    }
}
