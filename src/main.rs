use std::sync::Arc;

use influo::{ Config, Result };
use migration::MigratorTrait;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber
        ::registry()
        .with(
            tracing_subscriber::EnvFilter
                ::try_from_default_env()
                .unwrap_or_else(|_| "influo=debug,tower_http=debug".into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| influo::AppError::Config(e.to_string()))?;

    // Initialize database connection
    let db = sea_orm::Database
        ::connect(&config.database_url).await
        .map_err(influo::AppError::Database)?;

    tracing::info!("Database connected successfully");

    // Run migrations
    migration::Migrator::up(&db, None).await.map_err(influo::AppError::Database)?;

    tracing::info!("Migrations completed successfully");

    // Outbound collaborators
    let mail = Arc::new(influo::mail::MailClient::new(&config.mail));
    let storage = Arc::new(influo::storage::StorageClient::new(&config.storage));

    // Initialize repositories
    let user_repo = Arc::new(influo::db::UserRepository::new(db.clone()));

    // Initialize services
    let auth_service = Arc::new(
        influo::services::AuthService::new(
            db.clone(),
            user_repo.clone(),
            mail.clone(),
            config.jwt_secret.clone(),
            config.jwt_ttl_seconds,
            config.frontend_base_url.clone()
        )
    );
    let campaign_service = Arc::new(influo::services::CampaignService::new(db.clone()));
    let video_service = Arc::new(influo::services::VideoService::new(db.clone()));
    let ledger_service = Arc::new(influo::services::LedgerService::new(db.clone()));
    let social_media_service = Arc::new(influo::services::SocialMediaService::new(db.clone()));

    let config = Arc::new(config);

    // Create app state
    let app_state = influo::api::AppState {
        auth_service,
        campaign_service,
        video_service,
        ledger_service,
        social_media_service,
        storage,
        config: config.clone(),
    };

    // Build application router
    let app = influo::api::router(app_state);

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener
        ::bind(&addr).await
        .map_err(|e| influo::AppError::Internal(e.to_string()))?;

    axum::serve(listener, app).await.map_err(|e| influo::AppError::Internal(e.to_string()))?;

    Ok(())
}
