/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL (reset-code store).
    pub redis_url: String,
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 8080). Env var: `API_PORT`.
    pub api_port: u16,
    /// HTTP mail-API endpoint for outbound email.
    pub mail_api_url: String,
    /// Optional bearer key for the mail API. Env var: `MAIL_API_KEY`.
    pub mail_api_key: Option<String>,
    /// From address on outbound email.
    pub mail_from: String,
    /// S3 bucket holding uploaded media.
    pub s3_bucket: String,
    /// Public base URL media is served from (bucket website or CDN).
    pub s3_public_url: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            redis_url: std::env::var("REDIS_URL").expect("REDIS_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            mail_api_url: std::env::var("MAIL_API_URL").expect("MAIL_API_URL"),
            mail_api_key: std::env::var("MAIL_API_KEY").ok(),
            mail_from: std::env::var("MAIL_FROM").expect("MAIL_FROM"),
            s3_bucket: std::env::var("S3_BUCKET").expect("S3_BUCKET"),
            s3_public_url: std::env::var("S3_PUBLIC_URL").expect("S3_PUBLIC_URL"),
        }
    }
}
