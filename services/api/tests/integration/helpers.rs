use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use playconnect_api::domain::repository::{
    MailerPort, MatchRepository, MediaStoragePort, ResetCodeStore, TeamRepository, UserRepository,
};
use playconnect_api::domain::types::{
    JoinOutcome, Match, MatchChanges, MatchFilter, MatchHead, MatchStatus, MediaItem, MediaKind,
    NewMatch, NewTeam, ProfileChanges, Team, TeamHead, User, UserRef,
};
use playconnect_api::error::ApiError;
use playconnect_api::usecase::auth::hash_password;

pub fn user_ref(id: Uuid) -> UserRef {
    UserRef {
        id,
        name: format!("user-{}", &id.to_string()[..8]),
        email: format!("{id}@example.com"),
    }
}

pub fn test_user(email: &str, password: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        name: "Alice Smith".to_owned(),
        email: email.to_owned(),
        password_hash: hash_password(password).unwrap(),
        mobile: "5551234567".to_owned(),
        dob: NaiveDate::from_ymd_opt(2000, 6, 15).unwrap(),
        location: "Berlin".to_owned(),
        profile_image: None,
        last_login: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn future_date() -> DateTime<Utc> {
    Utc::now() + chrono::Duration::days(7)
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
    pub media: Arc<Mutex<Vec<(Uuid, MediaItem)>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            media: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        // Mimics the unique index on email.
        if users.iter().any(|u| u.email == user.email) {
            return Err(ApiError::EmailTaken);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update_profile(&self, id: Uuid, changes: &ProfileChanges) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            if let Some(ref name) = changes.name {
                user.name = name.clone();
            }
            if let Some(dob) = changes.dob {
                user.dob = dob;
            }
            if let Some(ref mobile) = changes.mobile {
                user.mobile = mobile.clone();
            }
            if let Some(ref location) = changes.location {
                user.location = location.clone();
            }
            if let Some(ref profile_image) = changes.profile_image {
                user.profile_image = Some(profile_image.clone());
            }
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool, ApiError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.email == email) {
            Some(user) => {
                user.password_hash = password_hash.to_owned();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.last_login = Some(Utc::now());
        }
        Ok(())
    }

    async fn list_media(&self, user_id: Uuid) -> Result<Vec<MediaItem>, ApiError> {
        Ok(self
            .media
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, item)| item.clone())
            .collect())
    }

    async fn add_media(&self, user_id: Uuid, item: &MediaItem) -> Result<(), ApiError> {
        self.media.lock().unwrap().push((user_id, item.clone()));
        Ok(())
    }
}

// ── MockMatchRepo ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct StoredMatch {
    pub id: Uuid,
    pub title: String,
    pub game_type: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub max_players: u32,
    pub created_by: Uuid,
    pub status: MatchStatus,
    pub participants: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct MockMatchRepo {
    pub matches: Arc<Mutex<Vec<StoredMatch>>>,
}

impl MockMatchRepo {
    pub fn empty() -> Self {
        Self {
            matches: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn matches_handle(&self) -> Arc<Mutex<Vec<StoredMatch>>> {
        Arc::clone(&self.matches)
    }

    fn resolve(stored: &StoredMatch) -> Match {
        Match {
            id: stored.id,
            title: stored.title.clone(),
            game_type: stored.game_type.clone(),
            date: stored.date,
            location: stored.location.clone(),
            description: stored.description.clone(),
            max_players: stored.max_players,
            created_by: user_ref(stored.created_by),
            participants: stored.participants.iter().copied().map(user_ref).collect(),
            status: stored.status,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

impl MatchRepository for MockMatchRepo {
    async fn create(&self, m: &NewMatch) -> Result<(), ApiError> {
        self.matches.lock().unwrap().push(StoredMatch {
            id: m.id,
            title: m.title.clone(),
            game_type: m.game_type.clone(),
            date: m.date,
            location: m.location.clone(),
            description: m.description.clone(),
            max_players: m.max_players,
            created_by: m.created_by,
            status: MatchStatus::Upcoming,
            participants: vec![m.created_by],
            created_at: m.created_at,
            updated_at: m.created_at,
        });
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Match>, ApiError> {
        Ok(self
            .matches
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .map(Self::resolve))
    }

    async fn head(&self, id: Uuid) -> Result<Option<MatchHead>, ApiError> {
        Ok(self
            .matches
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .map(|m| MatchHead {
                id: m.id,
                created_by: m.created_by,
                status: m.status,
                max_players: m.max_players,
            }))
    }

    async fn list(&self, filter: &MatchFilter) -> Result<Vec<Match>, ApiError> {
        let mut results: Vec<StoredMatch> = self
            .matches
            .lock()
            .unwrap()
            .iter()
            .filter(|m| {
                filter
                    .game_type
                    .as_ref()
                    .is_none_or(|g| &m.game_type == g)
                    && filter.location.as_ref().is_none_or(|l| {
                        m.location.to_lowercase().contains(&l.to_lowercase())
                    })
                    && filter.status.is_none_or(|s| m.status == s)
                    && filter.date_from.is_none_or(|d| m.date >= d)
            })
            .cloned()
            .collect();
        results.sort_by_key(|m| m.date);
        Ok(results.iter().map(Self::resolve).collect())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Match>, ApiError> {
        let mut results: Vec<StoredMatch> = self
            .matches
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.created_by == user_id || m.participants.contains(&user_id))
            .cloned()
            .collect();
        results.sort_by_key(|m| m.date);
        Ok(results.iter().map(Self::resolve).collect())
    }

    async fn list_joined(&self, user_id: Uuid) -> Result<Vec<Match>, ApiError> {
        let mut results: Vec<StoredMatch> = self
            .matches
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.participants.contains(&user_id) && m.created_by != user_id)
            .cloned()
            .collect();
        results.sort_by_key(|m| m.date);
        Ok(results.iter().map(Self::resolve).collect())
    }

    async fn update(&self, id: Uuid, changes: &MatchChanges) -> Result<(), ApiError> {
        let mut matches = self.matches.lock().unwrap();
        if let Some(m) = matches.iter_mut().find(|m| m.id == id) {
            if let Some(ref title) = changes.title {
                m.title = title.clone();
            }
            if let Some(ref game_type) = changes.game_type {
                m.game_type = game_type.clone();
            }
            if let Some(date) = changes.date {
                m.date = date;
            }
            if let Some(ref location) = changes.location {
                m.location = location.clone();
            }
            if let Some(max_players) = changes.max_players {
                m.max_players = max_players;
            }
            if let Some(ref description) = changes.description {
                m.description = description.clone();
            }
            m.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.matches.lock().unwrap().retain(|m| m.id != id);
        Ok(())
    }

    async fn participant_count(&self, id: Uuid) -> Result<u64, ApiError> {
        Ok(self
            .matches
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.participants.len() as u64)
            .unwrap_or(0))
    }

    async fn list_participants(&self, match_id: Uuid) -> Result<Vec<UserRef>, ApiError> {
        Ok(self
            .matches
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == match_id)
            .map(|m| m.participants.iter().copied().map(user_ref).collect())
            .unwrap_or_default())
    }

    async fn add_participant(
        &self,
        match_id: Uuid,
        user_id: Uuid,
    ) -> Result<JoinOutcome, ApiError> {
        // One lock around check + insert — the same all-or-nothing semantics
        // the real repository gets from its row-locked transaction.
        let mut matches = self.matches.lock().unwrap();
        let Some(m) = matches.iter_mut().find(|m| m.id == match_id) else {
            return Ok(JoinOutcome::MatchNotFound);
        };
        if m.status != MatchStatus::Upcoming {
            return Ok(JoinOutcome::NotJoinable);
        }
        if m.participants.contains(&user_id) {
            return Ok(JoinOutcome::AlreadyJoined);
        }
        if m.participants.len() as u32 >= m.max_players {
            return Ok(JoinOutcome::Full);
        }
        m.participants.push(user_id);
        Ok(JoinOutcome::Joined)
    }

    async fn remove_participant(&self, match_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let mut matches = self.matches.lock().unwrap();
        let Some(m) = matches.iter_mut().find(|m| m.id == match_id) else {
            return Ok(false);
        };
        let before = m.participants.len();
        m.participants.retain(|p| *p != user_id);
        Ok(m.participants.len() < before)
    }
}

// ── MockTeamRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct StoredTeam {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub members: Vec<Uuid>,
    pub requests: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct MockTeamRepo {
    pub teams: Arc<Mutex<Vec<StoredTeam>>>,
}

impl MockTeamRepo {
    pub fn empty() -> Self {
        Self {
            teams: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn with_team(team: StoredTeam) -> Self {
        Self {
            teams: Arc::new(Mutex::new(vec![team])),
        }
    }

    pub fn teams_handle(&self) -> Arc<Mutex<Vec<StoredTeam>>> {
        Arc::clone(&self.teams)
    }

    fn resolve(stored: &StoredTeam) -> Team {
        Team {
            id: stored.id,
            name: stored.name.clone(),
            description: stored.description.clone(),
            created_by: user_ref(stored.created_by),
            members: stored.members.iter().copied().map(user_ref).collect(),
            join_requests: stored.requests.iter().copied().map(user_ref).collect(),
            created_at: stored.created_at,
        }
    }
}

pub fn stored_team(created_by: Uuid) -> StoredTeam {
    StoredTeam {
        id: Uuid::now_v7(),
        name: "The Ringers".to_owned(),
        description: None,
        created_by,
        members: vec![created_by],
        requests: vec![],
        created_at: Utc::now(),
    }
}

impl TeamRepository for MockTeamRepo {
    async fn create(&self, team: &NewTeam) -> Result<(), ApiError> {
        self.teams.lock().unwrap().push(StoredTeam {
            id: team.id,
            name: team.name.clone(),
            description: team.description.clone(),
            created_by: team.created_by,
            members: vec![team.created_by],
            requests: vec![],
            created_at: team.created_at,
        });
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Team>, ApiError> {
        Ok(self
            .teams
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .map(Self::resolve))
    }

    async fn head(&self, id: Uuid) -> Result<Option<TeamHead>, ApiError> {
        Ok(self
            .teams
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .map(|t| TeamHead {
                id: t.id,
                created_by: t.created_by,
            }))
    }

    async fn is_member(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        Ok(self
            .teams
            .lock()
            .unwrap()
            .iter()
            .any(|t| t.id == team_id && t.members.contains(&user_id)))
    }

    async fn has_request(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        Ok(self
            .teams
            .lock()
            .unwrap()
            .iter()
            .any(|t| t.id == team_id && t.requests.contains(&user_id)))
    }

    async fn add_request(&self, team_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        let mut teams = self.teams.lock().unwrap();
        if let Some(t) = teams.iter_mut().find(|t| t.id == team_id) {
            t.requests.push(user_id);
        }
        Ok(())
    }

    async fn remove_request(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let mut teams = self.teams.lock().unwrap();
        let Some(t) = teams.iter_mut().find(|t| t.id == team_id) else {
            return Ok(false);
        };
        let before = t.requests.len();
        t.requests.retain(|r| *r != user_id);
        Ok(t.requests.len() < before)
    }

    async fn approve_request(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let mut teams = self.teams.lock().unwrap();
        let Some(t) = teams.iter_mut().find(|t| t.id == team_id) else {
            return Ok(false);
        };
        let before = t.requests.len();
        t.requests.retain(|r| *r != user_id);
        if t.requests.len() == before {
            return Ok(false);
        }
        t.members.push(user_id);
        Ok(true)
    }

    async fn remove_member(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let mut teams = self.teams.lock().unwrap();
        let Some(t) = teams.iter_mut().find(|t| t.id == team_id) else {
            return Ok(false);
        };
        let before = t.members.len();
        t.members.retain(|m| *m != user_id);
        Ok(t.members.len() < before)
    }

    async fn find_by_member(&self, user_id: Uuid) -> Result<Option<TeamHead>, ApiError> {
        Ok(self
            .teams
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.members.contains(&user_id))
            .map(|t| TeamHead {
                id: t.id,
                created_by: t.created_by,
            }))
    }
}

// ── MockResetCodeStore ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockResetCodeStore {
    pub codes: Arc<Mutex<HashMap<String, String>>>,
}

impl MockResetCodeStore {
    pub fn empty() -> Self {
        Self {
            codes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn codes_handle(&self) -> Arc<Mutex<HashMap<String, String>>> {
        Arc::clone(&self.codes)
    }
}

impl ResetCodeStore for MockResetCodeStore {
    async fn put(&self, email: &str, code: &str) -> Result<(), ApiError> {
        self.codes
            .lock()
            .unwrap()
            .insert(email.to_owned(), code.to_owned());
        Ok(())
    }

    async fn consume(&self, email: &str, code: &str) -> Result<bool, ApiError> {
        let mut codes = self.codes.lock().unwrap();
        if codes.get(email).is_some_and(|stored| stored == code) {
            codes.remove(email);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockMailer {
    pub fail: bool,
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockMailer {
    pub fn working() -> Self {
        Self {
            fail: false,
            sent: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl MailerPort for MockMailer {
    async fn send(&self, to: &str, _subject: &str, html_body: &str) -> Result<(), ApiError> {
        if self.fail {
            return Err(ApiError::Internal(anyhow::anyhow!("smtp relay down")));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), html_body.to_owned()));
        Ok(())
    }
}

// ── MockStorage ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockStorage {
    pub uploads: Arc<Mutex<Vec<(String, String, usize)>>>,
}

impl MockStorage {
    pub fn empty() -> Self {
        Self {
            uploads: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn uploads_handle(&self) -> Arc<Mutex<Vec<(String, String, usize)>>> {
        Arc::clone(&self.uploads)
    }
}

impl MediaStoragePort for MockStorage {
    async fn upload(
        &self,
        folder: &str,
        _kind: MediaKind,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push((folder.to_owned(), content_type.to_owned(), bytes.len()));
        Ok(format!("https://cdn.test/{folder}/{}", uploads.len()))
    }
}
