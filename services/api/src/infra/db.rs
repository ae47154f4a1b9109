use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
    sea_query::extension::postgres::PgExpr,
};
use uuid::Uuid;

use playconnect_api_schema::{
    match_participants, matches, team_join_requests, team_members, teams, user_media, users,
};

use crate::domain::repository::{MatchRepository, TeamRepository, UserRepository};
use crate::domain::types::{
    JoinOutcome, Match, MatchChanges, MatchFilter, MatchHead, MatchStatus, MediaItem, MediaKind,
    NewMatch, NewTeam, ProfileChanges, Team, TeamHead, User, UserRef,
};
use crate::error::ApiError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            mobile: Set(user.mobile.clone()),
            dob: Set(user.dob),
            location: Set(user.location.clone()),
            profile_image: Set(user.profile_image.clone()),
            last_login: Set(None),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            // Two concurrent registrations can both pass the pre-check; the
            // unique index on email decides, and the loser gets the 409.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(ApiError::EmailTaken)
            }
            Err(e) => Err(anyhow::Error::from(e).context("create user").into()),
        }
    }

    async fn update_profile(&self, id: Uuid, changes: &ProfileChanges) -> Result<(), ApiError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref name) = changes.name {
            am.name = Set(name.clone());
        }
        if let Some(dob) = changes.dob {
            am.dob = Set(dob);
        }
        if let Some(ref mobile) = changes.mobile {
            am.mobile = Set(mobile.clone());
        }
        if let Some(ref location) = changes.location {
            am.location = Set(location.clone());
        }
        if let Some(ref profile_image) = changes.profile_image {
            am.profile_image = Set(Some(profile_image.clone()));
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("update user profile")?;
        Ok(())
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool, ApiError> {
        let result = users::Entity::update_many()
            .filter(users::Column::Email.eq(email))
            .col_expr(users::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("update user password")?;
        Ok(result.rows_affected > 0)
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), ApiError> {
        users::Entity::update_many()
            .filter(users::Column::Id.eq(id))
            .col_expr(users::Column::LastLogin, Expr::value(Some(Utc::now())))
            .exec(&self.db)
            .await
            .context("touch last login")?;
        Ok(())
    }

    async fn list_media(&self, user_id: Uuid) -> Result<Vec<MediaItem>, ApiError> {
        let models = user_media::Entity::find()
            .filter(user_media::Column::UserId.eq(user_id))
            .order_by_asc(user_media::Column::UploadedAt)
            .all(&self.db)
            .await
            .context("list user media")?;
        models.into_iter().map(media_item_from_model).collect()
    }

    async fn add_media(&self, user_id: Uuid, item: &MediaItem) -> Result<(), ApiError> {
        user_media::ActiveModel {
            id: Set(item.id),
            user_id: Set(user_id),
            kind: Set(item.kind.as_str().to_owned()),
            url: Set(item.url.clone()),
            uploaded_at: Set(item.uploaded_at),
        }
        .insert(&self.db)
        .await
        .context("add user media")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        mobile: model.mobile,
        dob: model.dob,
        location: model.location,
        profile_image: model.profile_image,
        last_login: model.last_login,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn user_ref_from_model(model: users::Model) -> UserRef {
    UserRef {
        id: model.id,
        name: model.name,
        email: model.email,
    }
}

fn media_item_from_model(model: user_media::Model) -> Result<MediaItem, ApiError> {
    let kind = MediaKind::parse(&model.kind)
        .ok_or_else(|| anyhow::anyhow!("unknown media kind {:?} in row {}", model.kind, model.id))?;
    Ok(MediaItem {
        id: model.id,
        kind,
        url: model.url,
        uploaded_at: model.uploaded_at,
    })
}

// ── Match repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMatchRepository {
    pub db: DatabaseConnection,
}

impl DbMatchRepository {
    /// Resolve creator and participants (join order) to display-safe views.
    async fn resolve(&self, model: matches::Model) -> Result<Match, ApiError> {
        let creator = users::Entity::find_by_id(model.created_by)
            .one(&self.db)
            .await
            .context("load match creator")?
            .map(user_ref_from_model)
            .ok_or_else(|| anyhow::anyhow!("creator missing for match {}", model.id))?;

        let participants = self.participants_of(model.id).await?;
        match_from_models(model, creator, participants)
    }

    /// Participants in join order (append semantics preserved).
    async fn participants_of(&self, match_id: Uuid) -> Result<Vec<UserRef>, ApiError> {
        let rows = match_participants::Entity::find()
            .filter(match_participants::Column::MatchId.eq(match_id))
            .order_by_asc(match_participants::Column::JoinedAt)
            .all(&self.db)
            .await
            .context("list match participant rows")?;

        let user_ids: Vec<Uuid> = rows.iter().map(|r| r.user_id).collect();
        let users_by_id: HashMap<Uuid, users::Model> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("load participant users")?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(user_ids
            .into_iter()
            .filter_map(|id| users_by_id.get(&id).cloned().map(user_ref_from_model))
            .collect())
    }

    async fn resolve_all(&self, models: Vec<matches::Model>) -> Result<Vec<Match>, ApiError> {
        let mut results = Vec::with_capacity(models.len());
        for model in models {
            results.push(self.resolve(model).await?);
        }
        Ok(results)
    }
}

/// Subquery selecting match ids the user participates in.
fn participant_match_ids(user_id: Uuid) -> sea_orm::sea_query::SelectStatement {
    Query::select()
        .column(match_participants::Column::MatchId)
        .from(match_participants::Entity)
        .and_where(Expr::col(match_participants::Column::UserId).eq(user_id))
        .to_owned()
}

impl MatchRepository for DbMatchRepository {
    async fn create(&self, m: &NewMatch) -> Result<(), ApiError> {
        let m = m.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    matches::ActiveModel {
                        id: Set(m.id),
                        title: Set(m.title.clone()),
                        game_type: Set(m.game_type.clone()),
                        date: Set(m.date),
                        location: Set(m.location.clone()),
                        description: Set(m.description.clone()),
                        max_players: Set(m.max_players as i32),
                        created_by: Set(m.created_by),
                        status: Set(MatchStatus::Upcoming.as_str().to_owned()),
                        created_at: Set(m.created_at),
                        updated_at: Set(m.created_at),
                    }
                    .insert(txn)
                    .await?;

                    // Creator joins automatically and permanently.
                    match_participants::ActiveModel {
                        match_id: Set(m.id),
                        user_id: Set(m.created_by),
                        joined_at: Set(m.created_at),
                    }
                    .insert(txn)
                    .await?;
                    Ok(())
                })
            })
            .await
            .context("create match")?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Match>, ApiError> {
        let model = matches::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find match by id")?;
        match model {
            Some(model) => Ok(Some(self.resolve(model).await?)),
            None => Ok(None),
        }
    }

    async fn head(&self, id: Uuid) -> Result<Option<MatchHead>, ApiError> {
        let model = matches::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find match head")?;
        model.map(match_head_from_model).transpose()
    }

    async fn list(&self, filter: &MatchFilter) -> Result<Vec<Match>, ApiError> {
        let mut query = matches::Entity::find();
        if let Some(ref game_type) = filter.game_type {
            query = query.filter(matches::Column::GameType.eq(game_type.clone()));
        }
        if let Some(ref location) = filter.location {
            let pattern = format!("%{}%", escape_like(location));
            query = query.filter(Expr::col(matches::Column::Location).ilike(pattern));
        }
        if let Some(status) = filter.status {
            query = query.filter(matches::Column::Status.eq(status.as_str()));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(matches::Column::Date.gte(date_from));
        }
        let models = query
            .order_by_asc(matches::Column::Date)
            .all(&self.db)
            .await
            .context("list matches")?;
        self.resolve_all(models).await
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Match>, ApiError> {
        let models = matches::Entity::find()
            .filter(
                Condition::any()
                    .add(matches::Column::CreatedBy.eq(user_id))
                    .add(matches::Column::Id.in_subquery(participant_match_ids(user_id))),
            )
            .order_by_asc(matches::Column::Date)
            .all(&self.db)
            .await
            .context("list matches for user")?;
        self.resolve_all(models).await
    }

    async fn list_joined(&self, user_id: Uuid) -> Result<Vec<Match>, ApiError> {
        let models = matches::Entity::find()
            .filter(matches::Column::Id.in_subquery(participant_match_ids(user_id)))
            .filter(matches::Column::CreatedBy.ne(user_id))
            .order_by_asc(matches::Column::Date)
            .all(&self.db)
            .await
            .context("list joined matches")?;
        self.resolve_all(models).await
    }

    async fn update(&self, id: Uuid, changes: &MatchChanges) -> Result<(), ApiError> {
        let mut am = matches::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref title) = changes.title {
            am.title = Set(title.clone());
        }
        if let Some(ref game_type) = changes.game_type {
            am.game_type = Set(game_type.clone());
        }
        if let Some(date) = changes.date {
            am.date = Set(date);
        }
        if let Some(ref location) = changes.location {
            am.location = Set(location.clone());
        }
        if let Some(max_players) = changes.max_players {
            am.max_players = Set(max_players as i32);
        }
        if let Some(ref description) = changes.description {
            am.description = Set(description.clone());
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("update match")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        matches::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete match")?;
        Ok(())
    }

    async fn participant_count(&self, id: Uuid) -> Result<u64, ApiError> {
        let count = match_participants::Entity::find()
            .filter(match_participants::Column::MatchId.eq(id))
            .count(&self.db)
            .await
            .context("count match participants")?;
        Ok(count)
    }

    async fn list_participants(&self, match_id: Uuid) -> Result<Vec<UserRef>, ApiError> {
        self.participants_of(match_id).await
    }

    async fn add_participant(
        &self,
        match_id: Uuid,
        user_id: Uuid,
    ) -> Result<JoinOutcome, ApiError> {
        // FOR UPDATE on the match row serializes concurrent joins, so the
        // capacity check and the insert see the same participant count.
        let outcome = self
            .db
            .transaction::<_, JoinOutcome, DbErr>(move |txn| {
                Box::pin(async move {
                    let Some(m) = matches::Entity::find_by_id(match_id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                    else {
                        return Ok(JoinOutcome::MatchNotFound);
                    };
                    if m.status != MatchStatus::Upcoming.as_str() {
                        return Ok(JoinOutcome::NotJoinable);
                    }
                    let already = match_participants::Entity::find_by_id((match_id, user_id))
                        .one(txn)
                        .await?
                        .is_some();
                    if already {
                        return Ok(JoinOutcome::AlreadyJoined);
                    }
                    let count = match_participants::Entity::find()
                        .filter(match_participants::Column::MatchId.eq(match_id))
                        .count(txn)
                        .await?;
                    if count >= m.max_players as u64 {
                        return Ok(JoinOutcome::Full);
                    }
                    match_participants::ActiveModel {
                        match_id: Set(match_id),
                        user_id: Set(user_id),
                        joined_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;
                    Ok(JoinOutcome::Joined)
                })
            })
            .await
            .context("join match")?;
        Ok(outcome)
    }

    async fn remove_participant(&self, match_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let result = match_participants::Entity::delete_many()
            .filter(match_participants::Column::MatchId.eq(match_id))
            .filter(match_participants::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("remove match participant")?;
        Ok(result.rows_affected > 0)
    }
}

fn match_head_from_model(model: matches::Model) -> Result<MatchHead, ApiError> {
    let status = MatchStatus::parse(&model.status).ok_or_else(|| {
        anyhow::anyhow!("unknown match status {:?} in row {}", model.status, model.id)
    })?;
    Ok(MatchHead {
        id: model.id,
        created_by: model.created_by,
        status,
        max_players: model.max_players as u32,
    })
}

fn match_from_models(
    model: matches::Model,
    created_by: UserRef,
    participants: Vec<UserRef>,
) -> Result<Match, ApiError> {
    let status = MatchStatus::parse(&model.status).ok_or_else(|| {
        anyhow::anyhow!("unknown match status {:?} in row {}", model.status, model.id)
    })?;
    Ok(Match {
        id: model.id,
        title: model.title,
        game_type: model.game_type,
        date: model.date,
        location: model.location,
        description: model.description,
        max_players: model.max_players as u32,
        created_by,
        participants,
        status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// Escape `%` and `_` so user input matches literally inside ILIKE patterns.
fn escape_like(input: &str) -> String {
    input.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

// ── Team repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTeamRepository {
    pub db: DatabaseConnection,
}

impl DbTeamRepository {
    async fn member_refs(&self, team_id: Uuid) -> Result<Vec<UserRef>, ApiError> {
        let rows = team_members::Entity::find()
            .filter(team_members::Column::TeamId.eq(team_id))
            .order_by_asc(team_members::Column::JoinedAt)
            .all(&self.db)
            .await
            .context("list team member rows")?;
        self.refs_for(rows.into_iter().map(|r| r.user_id).collect())
            .await
    }

    async fn request_refs(&self, team_id: Uuid) -> Result<Vec<UserRef>, ApiError> {
        let rows = team_join_requests::Entity::find()
            .filter(team_join_requests::Column::TeamId.eq(team_id))
            .order_by_asc(team_join_requests::Column::RequestedAt)
            .all(&self.db)
            .await
            .context("list team join request rows")?;
        self.refs_for(rows.into_iter().map(|r| r.user_id).collect())
            .await
    }

    async fn refs_for(&self, user_ids: Vec<Uuid>) -> Result<Vec<UserRef>, ApiError> {
        let users_by_id: HashMap<Uuid, users::Model> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("load team users")?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        Ok(user_ids
            .into_iter()
            .filter_map(|id| users_by_id.get(&id).cloned().map(user_ref_from_model))
            .collect())
    }
}

impl TeamRepository for DbTeamRepository {
    async fn create(&self, team: &NewTeam) -> Result<(), ApiError> {
        let team = team.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    teams::ActiveModel {
                        id: Set(team.id),
                        name: Set(team.name.clone()),
                        description: Set(team.description.clone()),
                        created_by: Set(team.created_by),
                        created_at: Set(team.created_at),
                    }
                    .insert(txn)
                    .await?;

                    team_members::ActiveModel {
                        team_id: Set(team.id),
                        user_id: Set(team.created_by),
                        joined_at: Set(team.created_at),
                    }
                    .insert(txn)
                    .await?;
                    Ok(())
                })
            })
            .await
            .context("create team")?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Team>, ApiError> {
        let Some(model) = teams::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find team by id")?
        else {
            return Ok(None);
        };

        let created_by = users::Entity::find_by_id(model.created_by)
            .one(&self.db)
            .await
            .context("load team creator")?
            .map(user_ref_from_model)
            .ok_or_else(|| anyhow::anyhow!("creator missing for team {}", model.id))?;

        Ok(Some(Team {
            id: model.id,
            name: model.name,
            description: model.description,
            created_by,
            members: self.member_refs(id).await?,
            join_requests: self.request_refs(id).await?,
            created_at: model.created_at,
        }))
    }

    async fn head(&self, id: Uuid) -> Result<Option<TeamHead>, ApiError> {
        let model = teams::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find team head")?;
        Ok(model.map(|m| TeamHead {
            id: m.id,
            created_by: m.created_by,
        }))
    }

    async fn is_member(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let row = team_members::Entity::find_by_id((team_id, user_id))
            .one(&self.db)
            .await
            .context("check team membership")?;
        Ok(row.is_some())
    }

    async fn has_request(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let row = team_join_requests::Entity::find_by_id((team_id, user_id))
            .one(&self.db)
            .await
            .context("check team join request")?;
        Ok(row.is_some())
    }

    async fn add_request(&self, team_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        team_join_requests::ActiveModel {
            team_id: Set(team_id),
            user_id: Set(user_id),
            requested_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .context("add team join request")?;
        Ok(())
    }

    async fn remove_request(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let result = team_join_requests::Entity::delete_many()
            .filter(team_join_requests::Column::TeamId.eq(team_id))
            .filter(team_join_requests::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("remove team join request")?;
        Ok(result.rows_affected > 0)
    }

    async fn approve_request(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        // Delete-then-insert in one transaction: the target is never in both
        // the request set and the member set.
        let approved = self
            .db
            .transaction::<_, bool, DbErr>(move |txn| {
                Box::pin(async move {
                    let deleted = team_join_requests::Entity::delete_many()
                        .filter(team_join_requests::Column::TeamId.eq(team_id))
                        .filter(team_join_requests::Column::UserId.eq(user_id))
                        .exec(txn)
                        .await?;
                    if deleted.rows_affected == 0 {
                        return Ok(false);
                    }
                    team_members::ActiveModel {
                        team_id: Set(team_id),
                        user_id: Set(user_id),
                        joined_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;
                    Ok(true)
                })
            })
            .await
            .context("approve team join request")?;
        Ok(approved)
    }

    async fn remove_member(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let result = team_members::Entity::delete_many()
            .filter(team_members::Column::TeamId.eq(team_id))
            .filter(team_members::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("remove team member")?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_member(&self, user_id: Uuid) -> Result<Option<TeamHead>, ApiError> {
        let Some(membership) = team_members::Entity::find()
            .filter(team_members::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find team by member")?
        else {
            return Ok(None);
        };
        self.head(membership.team_id).await
    }
}
