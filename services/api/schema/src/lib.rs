//! sea-orm entities for the PlayConnect API database.

pub mod match_participants;
pub mod matches;
pub mod team_join_requests;
pub mod team_members;
pub mod teams;
pub mod user_media;
pub mod users;
