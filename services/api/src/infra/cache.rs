use deadpool_redis::Pool;
use deadpool_redis::redis::{AsyncCommands, Script};

use crate::domain::repository::ResetCodeStore;
use crate::error::ApiError;

/// Reset codes expire after 5 minutes; Redis owns the clock.
pub const RESET_CODE_TTL_SECS: u64 = 300;

/// Compare-and-delete in one round trip, so a code can be redeemed once even
/// under concurrent reset attempts.
const CONSUME_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
else
    return 0
end
"#;

#[derive(Clone)]
pub struct RedisResetCodeStore {
    pub pool: Pool,
}

fn reset_key(email: &str) -> String {
    format!("pwreset:{email}")
}

impl ResetCodeStore for RedisResetCodeStore {
    async fn put(&self, email: &str, code: &str) -> Result<(), ApiError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        // SET overwrites any earlier code for this email and resets the TTL.
        let (): () = conn
            .set_ex(reset_key(email), code, RESET_CODE_TTL_SECS)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| ApiError::Internal(e.into()))?;
        Ok(())
    }

    async fn consume(&self, email: &str, code: &str) -> Result<bool, ApiError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        let deleted: i64 = Script::new(CONSUME_SCRIPT)
            .key(reset_key(email))
            .arg(code)
            .invoke_async(&mut conn)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| ApiError::Internal(e.into()))?;
        Ok(deleted == 1)
    }
}
