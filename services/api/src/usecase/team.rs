use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::TeamRepository;
use crate::domain::types::{NewTeam, Team};
use crate::error::ApiError;

// ── CreateTeam ───────────────────────────────────────────────────────────────

pub struct CreateTeamInput {
    pub name: String,
    pub description: Option<String>,
}

pub struct CreateTeamUseCase<T: TeamRepository> {
    pub repo: T,
}

impl<T: TeamRepository> CreateTeamUseCase<T> {
    pub async fn execute(&self, actor: Uuid, input: CreateTeamInput) -> Result<Team, ApiError> {
        let name = input.name.trim().to_owned();
        if name.is_empty() {
            return Err(ApiError::Validation("team name is required".to_owned()));
        }

        let id = Uuid::now_v7();
        self.repo
            .create(&NewTeam {
                id,
                name,
                description: input
                    .description
                    .map(|d| d.trim().to_owned())
                    .filter(|d| !d.is_empty()),
                created_by: actor,
                created_at: Utc::now(),
            })
            .await?;

        self.repo
            .find(id)
            .await?
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("created team disappeared")))
    }
}

// ── GetTeam ──────────────────────────────────────────────────────────────────

pub struct GetTeamUseCase<T: TeamRepository> {
    pub repo: T,
}

impl<T: TeamRepository> GetTeamUseCase<T> {
    pub async fn execute(&self, id: Uuid) -> Result<Team, ApiError> {
        self.repo.find(id).await?.ok_or(ApiError::TeamNotFound)
    }
}

// ── RequestJoin ──────────────────────────────────────────────────────────────

pub struct RequestJoinUseCase<T: TeamRepository> {
    pub repo: T,
}

impl<T: TeamRepository> RequestJoinUseCase<T> {
    pub async fn execute(&self, actor: Uuid, team_id: Uuid) -> Result<Team, ApiError> {
        self.repo
            .head(team_id)
            .await?
            .ok_or(ApiError::TeamNotFound)?;
        if self.repo.is_member(team_id, actor).await? || self.repo.has_request(team_id, actor).await?
        {
            return Err(ApiError::AlreadyMemberOrRequested);
        }
        self.repo.add_request(team_id, actor).await?;
        self.repo.find(team_id).await?.ok_or(ApiError::TeamNotFound)
    }
}

// ── ApproveRequest / RejectRequest ───────────────────────────────────────────

pub struct ApproveRequestUseCase<T: TeamRepository> {
    pub repo: T,
}

impl<T: TeamRepository> ApproveRequestUseCase<T> {
    pub async fn execute(&self, actor: Uuid, team_id: Uuid, target: Uuid) -> Result<Team, ApiError> {
        let head = self
            .repo
            .head(team_id)
            .await?
            .ok_or(ApiError::TeamNotFound)?;
        if head.created_by != actor {
            return Err(ApiError::NotOwner);
        }
        // Moves the row from requests to members in one step, so the target
        // is never in both sets.
        if !self.repo.approve_request(team_id, target).await? {
            return Err(ApiError::NoPendingRequest);
        }
        self.repo.find(team_id).await?.ok_or(ApiError::TeamNotFound)
    }
}

pub struct RejectRequestUseCase<T: TeamRepository> {
    pub repo: T,
}

impl<T: TeamRepository> RejectRequestUseCase<T> {
    pub async fn execute(&self, actor: Uuid, team_id: Uuid, target: Uuid) -> Result<Team, ApiError> {
        let head = self
            .repo
            .head(team_id)
            .await?
            .ok_or(ApiError::TeamNotFound)?;
        if head.created_by != actor {
            return Err(ApiError::NotOwner);
        }
        if !self.repo.remove_request(team_id, target).await? {
            return Err(ApiError::NoPendingRequest);
        }
        self.repo.find(team_id).await?.ok_or(ApiError::TeamNotFound)
    }
}

// ── RemoveMember ─────────────────────────────────────────────────────────────

pub struct RemoveMemberUseCase<T: TeamRepository> {
    pub repo: T,
}

impl<T: TeamRepository> RemoveMemberUseCase<T> {
    pub async fn execute(&self, actor: Uuid, team_id: Uuid, target: Uuid) -> Result<Team, ApiError> {
        let head = self
            .repo
            .head(team_id)
            .await?
            .ok_or(ApiError::TeamNotFound)?;
        if head.created_by != actor {
            return Err(ApiError::NotOwner);
        }
        if target == head.created_by {
            return Err(ApiError::Validation(
                "team owner cannot be removed from the team".to_owned(),
            ));
        }
        if !self.repo.remove_member(team_id, target).await? {
            return Err(ApiError::NotTeamMember);
        }
        self.repo.find(team_id).await?.ok_or(ApiError::TeamNotFound)
    }
}

// ── LeaveTeam ────────────────────────────────────────────────────────────────

pub struct LeaveTeamUseCase<T: TeamRepository> {
    pub repo: T,
}

impl<T: TeamRepository> LeaveTeamUseCase<T> {
    pub async fn execute(&self, actor: Uuid) -> Result<Team, ApiError> {
        let head = self
            .repo
            .find_by_member(actor)
            .await?
            .ok_or(ApiError::NoTeamMembership)?;
        if head.created_by == actor {
            return Err(ApiError::OwnerCannotLeaveTeam);
        }
        self.repo.remove_member(head.id, actor).await?;
        self.repo.find(head.id).await?.ok_or(ApiError::TeamNotFound)
    }
}
