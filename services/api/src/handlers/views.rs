//! Wire-format views shared across handlers.
//!
//! Field casing is camelCase for compatibility with the existing clients.
//! `UserView` carries no credential field, so a password hash cannot reach a
//! response by construction.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::types::{Match, MediaItem, Team, User, UserRef};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRefView {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<UserRef> for UserRefView {
    fn from(user: UserRef) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaView {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub url: String,
    #[serde(serialize_with = "playconnect_core::serde::to_rfc3339_ms")]
    pub uploaded_at: DateTime<Utc>,
}

impl From<MediaItem> for MediaView {
    fn from(item: MediaItem) -> Self {
        Self {
            id: item.id.to_string(),
            kind: item.kind.as_str(),
            url: item.url,
            uploaded_at: item.uploaded_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub dob: NaiveDate,
    pub location: String,
    pub profile_image: Option<String>,
    #[serde(serialize_with = "playconnect_core::serde::to_rfc3339_ms_opt")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<MediaView>>,
    #[serde(serialize_with = "playconnect_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "playconnect_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl UserView {
    /// View without the media list (auth responses).
    pub fn from_user(user: User) -> Self {
        Self::build(user, None)
    }

    /// Full profile view including media.
    pub fn with_media(user: User, media: Vec<MediaItem>) -> Self {
        Self::build(user, Some(media.into_iter().map(MediaView::from).collect()))
    }

    fn build(user: User, media: Option<Vec<MediaView>>) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            mobile: user.mobile,
            dob: user.dob,
            location: user.location,
            profile_image: user.profile_image,
            last_login: user.last_login,
            media,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub id: String,
    pub title: String,
    pub game_type: String,
    #[serde(serialize_with = "playconnect_core::serde::to_rfc3339_ms")]
    pub date: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub max_players: u32,
    pub created_by: UserRefView,
    pub participants: Vec<UserRefView>,
    pub status: &'static str,
    #[serde(serialize_with = "playconnect_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "playconnect_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Match> for MatchView {
    fn from(m: Match) -> Self {
        Self {
            id: m.id.to_string(),
            title: m.title,
            game_type: m.game_type,
            date: m.date,
            location: m.location,
            description: m.description,
            max_players: m.max_players,
            created_by: m.created_by.into(),
            participants: m.participants.into_iter().map(UserRefView::from).collect(),
            status: m.status.as_str(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_by: UserRefView,
    pub members: Vec<UserRefView>,
    pub join_requests: Vec<UserRefView>,
    #[serde(serialize_with = "playconnect_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Team> for TeamView {
    fn from(team: Team) -> Self {
        Self {
            id: team.id.to_string(),
            name: team.name,
            description: team.description,
            created_by: team.created_by.into(),
            members: team.members.into_iter().map(UserRefView::from).collect(),
            join_requests: team
                .join_requests
                .into_iter()
                .map(UserRefView::from)
                .collect(),
            created_at: team.created_at,
        }
    }
}
