use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::MatchRepository;
use crate::domain::types::{Match, MatchChanges, MatchFilter, NewMatch};
use crate::error::ApiError;

/// Default participant capacity when the creator does not supply one.
pub const DEFAULT_MAX_PLAYERS: u32 = 10;
/// A match always has room for the creator plus at least one opponent.
pub const MIN_MAX_PLAYERS: u32 = 2;

// ── CreateMatch ──────────────────────────────────────────────────────────────

pub struct CreateMatchInput {
    pub title: String,
    pub game_type: String,
    pub date: chrono::DateTime<Utc>,
    pub location: String,
    pub max_players: Option<u32>,
    pub description: Option<String>,
}

pub struct CreateMatchUseCase<M: MatchRepository> {
    pub repo: M,
}

impl<M: MatchRepository> CreateMatchUseCase<M> {
    pub async fn execute(&self, actor: Uuid, input: CreateMatchInput) -> Result<Match, ApiError> {
        let title = input.title.trim().to_owned();
        let game_type = input.game_type.trim().to_owned();
        let location = input.location.trim().to_owned();
        if title.is_empty() || game_type.is_empty() || location.is_empty() {
            return Err(ApiError::Validation(
                "title, game type, date, and location are required".to_owned(),
            ));
        }
        if input.date <= Utc::now() {
            return Err(ApiError::Validation(
                "match date must be in the future".to_owned(),
            ));
        }
        let max_players = input.max_players.unwrap_or(DEFAULT_MAX_PLAYERS);
        if max_players < MIN_MAX_PLAYERS {
            return Err(ApiError::Validation(
                "max players must be at least 2".to_owned(),
            ));
        }

        let id = Uuid::now_v7();
        self.repo
            .create(&NewMatch {
                id,
                title,
                game_type,
                date: input.date,
                location,
                description: input.description.unwrap_or_default(),
                max_players,
                created_by: actor,
                created_at: Utc::now(),
            })
            .await?;

        self.repo
            .find(id)
            .await?
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("created match disappeared")))
    }
}

// ── GetMatch ─────────────────────────────────────────────────────────────────

pub struct GetMatchUseCase<M: MatchRepository> {
    pub repo: M,
}

impl<M: MatchRepository> GetMatchUseCase<M> {
    pub async fn execute(&self, id: Uuid) -> Result<Match, ApiError> {
        self.repo.find(id).await?.ok_or(ApiError::MatchNotFound)
    }
}

// ── ListMatches ──────────────────────────────────────────────────────────────

pub struct ListMatchesUseCase<M: MatchRepository> {
    pub repo: M,
}

impl<M: MatchRepository> ListMatchesUseCase<M> {
    pub async fn execute(&self, filter: MatchFilter) -> Result<Vec<Match>, ApiError> {
        self.repo.list(&filter).await
    }
}

// ── UpdateMatch ──────────────────────────────────────────────────────────────

pub struct UpdateMatchUseCase<M: MatchRepository> {
    pub repo: M,
}

impl<M: MatchRepository> UpdateMatchUseCase<M> {
    pub async fn execute(
        &self,
        actor: Uuid,
        id: Uuid,
        changes: MatchChanges,
    ) -> Result<Match, ApiError> {
        let head = self.repo.head(id).await?.ok_or(ApiError::MatchNotFound)?;
        if head.created_by != actor {
            return Err(ApiError::NotOwner);
        }

        if let Some(date) = changes.date {
            if date <= Utc::now() {
                return Err(ApiError::Validation(
                    "match date must be in the future".to_owned(),
                ));
            }
        }
        if let Some(max_players) = changes.max_players {
            if max_players < MIN_MAX_PLAYERS {
                return Err(ApiError::Validation(
                    "max players must be at least 2".to_owned(),
                ));
            }
            // Shrinking below the current roster would break the capacity
            // invariant for existing participants.
            let count = self.repo.participant_count(id).await?;
            if u64::from(max_players) < count {
                return Err(ApiError::Validation(
                    "max players cannot be lower than the current participant count".to_owned(),
                ));
            }
        }

        if !changes.is_empty() {
            self.repo.update(id, &changes).await?;
        }
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("updated match disappeared")))
    }
}

// ── DeleteMatch ──────────────────────────────────────────────────────────────

pub struct DeleteMatchUseCase<M: MatchRepository> {
    pub repo: M,
}

impl<M: MatchRepository> DeleteMatchUseCase<M> {
    pub async fn execute(&self, actor: Uuid, id: Uuid) -> Result<(), ApiError> {
        let head = self.repo.head(id).await?.ok_or(ApiError::MatchNotFound)?;
        if head.created_by != actor {
            return Err(ApiError::NotOwner);
        }
        self.repo.delete(id).await
    }
}

// ── ListMyMatches / ListJoinedMatches ────────────────────────────────────────

pub struct ListMyMatchesUseCase<M: MatchRepository> {
    pub repo: M,
}

impl<M: MatchRepository> ListMyMatchesUseCase<M> {
    pub async fn execute(&self, actor: Uuid) -> Result<Vec<Match>, ApiError> {
        self.repo.list_for_user(actor).await
    }
}

pub struct ListJoinedMatchesUseCase<M: MatchRepository> {
    pub repo: M,
}

impl<M: MatchRepository> ListJoinedMatchesUseCase<M> {
    pub async fn execute(&self, actor: Uuid) -> Result<Vec<Match>, ApiError> {
        self.repo.list_joined(actor).await
    }
}
