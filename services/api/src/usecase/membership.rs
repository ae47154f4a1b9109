use uuid::Uuid;

use crate::domain::repository::MatchRepository;
use crate::domain::types::{JoinOutcome, Match, UserRef};
use crate::error::ApiError;

// ── JoinMatch ────────────────────────────────────────────────────────────────

pub struct JoinMatchUseCase<M: MatchRepository> {
    pub repo: M,
}

impl<M: MatchRepository> JoinMatchUseCase<M> {
    pub async fn execute(&self, actor: Uuid, match_id: Uuid) -> Result<Match, ApiError> {
        // All membership checks live inside the guarded insert so that
        // concurrent joins at the capacity boundary stay consistent.
        match self.repo.add_participant(match_id, actor).await? {
            JoinOutcome::Joined => {}
            JoinOutcome::MatchNotFound => return Err(ApiError::MatchNotFound),
            JoinOutcome::NotJoinable => return Err(ApiError::MatchNotJoinable),
            JoinOutcome::AlreadyJoined => return Err(ApiError::AlreadyJoined),
            JoinOutcome::Full => return Err(ApiError::MatchFull),
        }
        self.repo
            .find(match_id)
            .await?
            .ok_or(ApiError::MatchNotFound)
    }
}

// ── LeaveMatch ───────────────────────────────────────────────────────────────

pub struct LeaveMatchUseCase<M: MatchRepository> {
    pub repo: M,
}

impl<M: MatchRepository> LeaveMatchUseCase<M> {
    pub async fn execute(&self, actor: Uuid, match_id: Uuid) -> Result<Match, ApiError> {
        let head = self
            .repo
            .head(match_id)
            .await?
            .ok_or(ApiError::MatchNotFound)?;
        if head.created_by == actor {
            return Err(ApiError::CreatorCannotLeave);
        }
        if !self.repo.remove_participant(match_id, actor).await? {
            return Err(ApiError::NotJoined);
        }
        self.repo
            .find(match_id)
            .await?
            .ok_or(ApiError::MatchNotFound)
    }
}

// ── RemoveParticipant (creator moderation) ───────────────────────────────────

pub struct RemoveParticipantUseCase<M: MatchRepository> {
    pub repo: M,
}

impl<M: MatchRepository> RemoveParticipantUseCase<M> {
    pub async fn execute(&self, actor: Uuid, match_id: Uuid, target: Uuid) -> Result<(), ApiError> {
        let head = self
            .repo
            .head(match_id)
            .await?
            .ok_or(ApiError::MatchNotFound)?;
        if head.created_by != actor {
            return Err(ApiError::NotOwner);
        }
        if target == head.created_by {
            return Err(ApiError::CreatorNotRemovable);
        }
        if !self.repo.remove_participant(match_id, target).await? {
            return Err(ApiError::ParticipantNotFound);
        }
        Ok(())
    }
}

// ── ListParticipants ─────────────────────────────────────────────────────────

pub struct ListParticipantsUseCase<M: MatchRepository> {
    pub repo: M,
}

impl<M: MatchRepository> ListParticipantsUseCase<M> {
    pub async fn execute(&self, match_id: Uuid) -> Result<Vec<UserRef>, ApiError> {
        self.repo
            .head(match_id)
            .await?
            .ok_or(ApiError::MatchNotFound)?;
        self.repo.list_participants(match_id).await
    }
}
