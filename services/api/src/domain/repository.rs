#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{
    JoinOutcome, Match, MatchChanges, MatchFilter, MatchHead, MediaItem, MediaKind, NewMatch,
    NewTeam, ProfileChanges, Team, TeamHead, User, UserRef,
};
use crate::error::ApiError;

/// Repository for user accounts and their media lists.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    /// Lookup by lowercase email (the caller normalizes).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    /// Insert a new account. A concurrent insert of the same email surfaces
    /// as `EmailTaken`, not `Internal`.
    async fn create(&self, user: &User) -> Result<(), ApiError>;
    async fn update_profile(&self, id: Uuid, changes: &ProfileChanges) -> Result<(), ApiError>;
    /// Replace the password hash for the account owning `email`.
    /// Returns `false` when no such account exists.
    async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool, ApiError>;
    async fn touch_last_login(&self, id: Uuid) -> Result<(), ApiError>;
    async fn list_media(&self, user_id: Uuid) -> Result<Vec<MediaItem>, ApiError>;
    async fn add_media(&self, user_id: Uuid, item: &MediaItem) -> Result<(), ApiError>;
}

/// Repository for matches and their participant sets.
///
/// `add_participant` is the concurrency-critical entry point: all capacity,
/// state, and uniqueness checks run inside one row-locked transaction so that
/// of N simultaneous joins at the last free slot exactly one succeeds.
pub trait MatchRepository: Send + Sync {
    /// Insert the match and its creator-participant row in one transaction.
    async fn create(&self, m: &NewMatch) -> Result<(), ApiError>;
    async fn find(&self, id: Uuid) -> Result<Option<Match>, ApiError>;
    async fn head(&self, id: Uuid) -> Result<Option<MatchHead>, ApiError>;
    async fn list(&self, filter: &MatchFilter) -> Result<Vec<Match>, ApiError>;
    /// Matches where the user is creator or participant, date ascending.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Match>, ApiError>;
    /// Matches where the user participates but is not the creator.
    async fn list_joined(&self, user_id: Uuid) -> Result<Vec<Match>, ApiError>;
    async fn update(&self, id: Uuid, changes: &MatchChanges) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<(), ApiError>;
    async fn participant_count(&self, id: Uuid) -> Result<u64, ApiError>;
    async fn list_participants(&self, match_id: Uuid) -> Result<Vec<UserRef>, ApiError>;
    async fn add_participant(&self, match_id: Uuid, user_id: Uuid)
    -> Result<JoinOutcome, ApiError>;
    /// Remove a participant row. Returns `false` when the user was not joined.
    async fn remove_participant(&self, match_id: Uuid, user_id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for teams, their members, and pending join requests.
pub trait TeamRepository: Send + Sync {
    /// Insert the team and its creator-member row in one transaction.
    async fn create(&self, team: &NewTeam) -> Result<(), ApiError>;
    async fn find(&self, id: Uuid) -> Result<Option<Team>, ApiError>;
    async fn head(&self, id: Uuid) -> Result<Option<TeamHead>, ApiError>;
    async fn is_member(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError>;
    async fn has_request(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError>;
    async fn add_request(&self, team_id: Uuid, user_id: Uuid) -> Result<(), ApiError>;
    /// Drop a pending request. Returns `false` when none existed.
    async fn remove_request(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError>;
    /// Atomically move a pending request into the member set.
    /// Returns `false` when no request existed.
    async fn approve_request(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError>;
    /// Remove a member row. Returns `false` when the user was not a member.
    async fn remove_member(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError>;
    /// The team the user belongs to, if any.
    async fn find_by_member(&self, user_id: Uuid) -> Result<Option<TeamHead>, ApiError>;
}

/// Short-lived password-reset code store.
///
/// The backing store owns expiry; one code per email at a time.
pub trait ResetCodeStore: Send + Sync {
    /// Store `code` for `email`, replacing any prior code, with the store's TTL.
    async fn put(&self, email: &str, code: &str) -> Result<(), ApiError>;
    /// Atomically compare and delete. Returns `true` exactly once per stored
    /// code, `false` for mismatched, expired, or already-consumed codes.
    async fn consume(&self, email: &str, code: &str) -> Result<bool, ApiError>;
}

/// Outbound email delivery.
pub trait MailerPort: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), ApiError>;
}

/// External object storage for uploaded media.
pub trait MediaStoragePort: Send + Sync {
    /// Store the bytes and return a durable public URL.
    async fn upload(
        &self,
        folder: &str,
        kind: MediaKind,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError>;
}
