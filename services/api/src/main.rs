use aws_config::BehaviorVersion;
use sea_orm::Database;
use tracing::info;

use playconnect_api::config::ApiConfig;
use playconnect_api::infra::mail::HttpMailer;
use playconnect_api::infra::storage::S3MediaStorage;
use playconnect_api::router::build_router;
use playconnect_api::state::AppState;
use playconnect_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let storage = S3MediaStorage {
        client: aws_sdk_s3::Client::new(&aws_config),
        bucket: config.s3_bucket,
        public_base_url: config.s3_public_url,
    };

    let mailer = HttpMailer {
        client: reqwest::Client::new(),
        api_url: config.mail_api_url,
        api_key: config.mail_api_key,
        from: config.mail_from,
    };

    let state = AppState {
        db,
        redis,
        mailer,
        storage,
        jwt_secret: config.jwt_secret,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
