use std::sync::OnceLock;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use regex::Regex;
use uuid::Uuid;

// ── Users ────────────────────────────────────────────────────────────────────

/// Registered user account. `password_hash` never leaves the service — wire
/// views go through the handler DTOs, which carry no credential field.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub mobile: String,
    pub dob: NaiveDate,
    pub location: String,
    pub profile_image: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Display-safe view of a user, embedded in match and team records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub mobile: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.dob.is_none()
            && self.mobile.is_none()
            && self.location.is_none()
            && self.profile_image.is_none()
    }
}

// ── Media ────────────────────────────────────────────────────────────────────

/// Kind of a media attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

/// A media attachment on a user profile.
#[derive(Debug, Clone)]
pub struct MediaItem {
    pub id: Uuid,
    pub kind: MediaKind,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

// ── Matches ──────────────────────────────────────────────────────────────────

/// Lifecycle label on a match. Nothing server-side advances a match to
/// `Completed`; the label exists for wire compatibility and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "upcoming" => Some(Self::Upcoming),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// A match with creator and participants resolved to display-safe views.
/// Invariants: creator ∈ participants, |participants| ≤ max_players,
/// participants unique.
#[derive(Debug, Clone)]
pub struct Match {
    pub id: Uuid,
    pub title: String,
    pub game_type: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub max_players: u32,
    pub created_by: UserRef,
    pub participants: Vec<UserRef>,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unresolved match row for persistence.
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub id: Uuid,
    pub title: String,
    pub game_type: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub max_players: u32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Ownership/state header of a match, fetched for authorization checks
/// without resolving participants.
#[derive(Debug, Clone)]
pub struct MatchHead {
    pub id: Uuid,
    pub created_by: Uuid,
    pub status: MatchStatus,
    pub max_players: u32,
}

/// Partial match update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct MatchChanges {
    pub title: Option<String>,
    pub game_type: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub max_players: Option<u32>,
    pub description: Option<String>,
}

impl MatchChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.game_type.is_none()
            && self.date.is_none()
            && self.location.is_none()
            && self.max_players.is_none()
            && self.description.is_none()
    }
}

/// Filters for the match listing; all optional, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct MatchFilter {
    pub game_type: Option<String>,
    /// Case-insensitive substring match on the location field.
    pub location: Option<String>,
    pub status: Option<MatchStatus>,
    /// Lower bound (inclusive) on the scheduled date.
    pub date_from: Option<DateTime<Utc>>,
}

/// Result of the guarded participant insert. Produced inside the row-locked
/// transaction so the checks and the write see the same state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    MatchNotFound,
    NotJoinable,
    AlreadyJoined,
    Full,
}

// ── Teams ────────────────────────────────────────────────────────────────────

/// A team with members and pending join requests resolved to views.
#[derive(Debug, Clone)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_by: UserRef,
    pub members: Vec<UserRef>,
    pub join_requests: Vec<UserRef>,
    pub created_at: DateTime<Utc>,
}

/// Unresolved team row for persistence.
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Ownership header of a team.
#[derive(Debug, Clone)]
pub struct TeamHead {
    pub id: Uuid,
    pub created_by: Uuid,
}

// ── Field validation ─────────────────────────────────────────────────────────
//
// One consolidated policy: the stricter variant wherever the original's two
// registration paths disagreed.

/// Name: letters and spaces, 2–50 characters.
pub fn validate_name(name: &str) -> bool {
    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z ]{2,50}$").expect("failed to compile name regex"));
    regex.is_match(name)
}

/// Email: standard address syntax, at most 254 characters.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 {
        return false;
    }
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("failed to compile email regex")
    });
    regex.is_match(email)
}

/// Password: at least 6 characters (at most 128), containing at least one
/// letter and one digit.
pub fn validate_password(password: &str) -> bool {
    if password.len() < 6 || password.len() > 128 {
        return false;
    }
    let mut has_letter = false;
    let mut has_digit = false;
    for c in password.chars() {
        if c.is_ascii_alphabetic() {
            has_letter = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        }
    }
    has_letter && has_digit
}

/// Strip common separators from a mobile number: spaces, `-`, `+`, `(`, `)`.
pub fn normalize_mobile(mobile: &str) -> String {
    mobile
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '+' | '(' | ')'))
        .collect()
}

/// Mobile: 10–15 digits after separator stripping.
pub fn validate_mobile(mobile: &str) -> bool {
    static MOBILE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = MOBILE_REGEX
        .get_or_init(|| Regex::new(r"^\d{10,15}$").expect("failed to compile mobile regex"));
    regex.is_match(&normalize_mobile(mobile))
}

/// Location: free text, 2–100 characters.
pub fn validate_location(location: &str) -> bool {
    (2..=100).contains(&location.chars().count())
}

/// Completed years between `dob` and `today`.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Date of birth must yield an age between 13 and 120 years.
pub fn validate_dob(dob: NaiveDate, today: NaiveDate) -> bool {
    let age = age_on(dob, today);
    (13..=120).contains(&age)
}
