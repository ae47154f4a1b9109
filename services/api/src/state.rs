use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use playconnect_auth_types::identity::JwtSecretSource;

use crate::infra::cache::RedisResetCodeStore;
use crate::infra::db::{DbMatchRepository, DbTeamRepository, DbUserRepository};
use crate::infra::mail::HttpMailer;
use crate::infra::storage::S3MediaStorage;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub mailer: HttpMailer,
    pub storage: S3MediaStorage,
    pub jwt_secret: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn match_repo(&self) -> DbMatchRepository {
        DbMatchRepository {
            db: self.db.clone(),
        }
    }

    pub fn team_repo(&self) -> DbTeamRepository {
        DbTeamRepository {
            db: self.db.clone(),
        }
    }

    pub fn reset_codes(&self) -> RedisResetCodeStore {
        RedisResetCodeStore {
            pool: self.redis.clone(),
        }
    }

    pub fn mailer(&self) -> HttpMailer {
        self.mailer.clone()
    }

    pub fn storage(&self) -> S3MediaStorage {
        self.storage.clone()
    }
}

impl JwtSecretSource for AppState {
    fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}
