use rand::RngExt;
use tracing::warn;

use crate::domain::repository::{MailerPort, ResetCodeStore, UserRepository};
use crate::domain::types::{validate_email, validate_password};
use crate::error::ApiError;
use crate::usecase::auth::hash_password;

/// Reset codes are 6 decimal digits, never starting with 0.
fn generate_reset_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(100_000..1_000_000).to_string()
}

fn reset_email_body(code: &str) -> String {
    format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h2>PlayConnect Password Reset</h2>\
         <p>Your one-time code:</p>\
         <div style=\"font-size: 32px; font-weight: bold; letter-spacing: 5px;\">{code}</div>\
         <p>This code is valid for 5 minutes only.</p>\
         <p>If you didn't request this, please ignore this email.</p>\
         </div>"
    )
}

// ── RequestReset ─────────────────────────────────────────────────────────────

pub struct RequestResetInput {
    pub email: String,
}

pub struct RequestResetOutput {
    /// `false` when the email could not be delivered; the code is still
    /// valid and was written to the service log for operator fallback.
    pub delivered: bool,
}

pub struct RequestResetUseCase<U, C, M>
where
    U: UserRepository,
    C: ResetCodeStore,
    M: MailerPort,
{
    pub users: U,
    pub codes: C,
    pub mailer: M,
}

impl<U, C, M> RequestResetUseCase<U, C, M>
where
    U: UserRepository,
    C: ResetCodeStore,
    M: MailerPort,
{
    pub async fn execute(&self, input: RequestResetInput) -> Result<RequestResetOutput, ApiError> {
        let email = input.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ApiError::Validation("email is required".to_owned()));
        }

        self.users
            .find_by_email(&email)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let code = generate_reset_code();
        // put() replaces any prior code for this email, so at most one is
        // ever redeemable.
        self.codes.put(&email, &code).await?;

        let delivered = match self
            .mailer
            .send(
                &email,
                "PlayConnect - Password Reset Code",
                &reset_email_body(&code),
            )
            .await
        {
            Ok(()) => true,
            Err(e) => {
                // Delivery failure is non-fatal: the code stays redeemable and
                // an operator can read it from the log.
                warn!(email = %email, code = %code, error = %e, "reset code delivery failed");
                false
            }
        };

        Ok(RequestResetOutput { delivered })
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<U, C>
where
    U: UserRepository,
    C: ResetCodeStore,
{
    pub users: U,
    pub codes: C,
}

impl<U, C> ResetPasswordUseCase<U, C>
where
    U: UserRepository,
    C: ResetCodeStore,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), ApiError> {
        let email = input.email.trim().to_lowercase();
        let code = input.code.trim().to_owned();
        let new_password = input.new_password.trim().to_owned();

        if email.is_empty() || code.is_empty() || new_password.is_empty() {
            return Err(ApiError::Validation(
                "email, code, and new password are required".to_owned(),
            ));
        }
        if !validate_email(&email) {
            return Err(ApiError::Validation(
                "please enter a valid email address".to_owned(),
            ));
        }
        if !validate_password(&new_password) {
            return Err(ApiError::Validation(
                "password must be at least 6 characters long and contain at least one letter and one number"
                    .to_owned(),
            ));
        }

        // Single-use: consume() deletes the code in the same step it matches.
        if !self.codes.consume(&email, &code).await? {
            return Err(ApiError::InvalidResetCode);
        }

        let hash = hash_password(&new_password)?;
        if !self.users.update_password(&email, &hash).await? {
            return Err(ApiError::UserNotFound);
        }
        Ok(())
    }
}
