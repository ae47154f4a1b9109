use sea_orm_migration::prelude::*;

mod m20260501_000001_create_users;
mod m20260501_000002_create_user_media;
mod m20260501_000003_create_matches;
mod m20260501_000004_create_match_participants;
mod m20260501_000005_create_teams;
mod m20260501_000006_create_team_members;
mod m20260501_000007_create_team_join_requests;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260501_000001_create_users::Migration),
            Box::new(m20260501_000002_create_user_media::Migration),
            Box::new(m20260501_000003_create_matches::Migration),
            Box::new(m20260501_000004_create_match_participants::Migration),
            Box::new(m20260501_000005_create_teams::Migration),
            Box::new(m20260501_000006_create_team_members::Migration),
            Box::new(m20260501_000007_create_team_join_requests::Migration),
        ]
    }
}
