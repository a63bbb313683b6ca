use std::sync::Arc;

use auth::TokenIssuer;
use chrono::Duration;
use music_service::config::Config;
use music_service::domain::account::service::AccountService;
use music_service::domain::playlist::service::PlaylistService;
use music_service::domain::song::service::SongService;
use music_service::inbound::http::router::create_router;
use music_service::outbound::repositories::PostgresAccountRepository;
use music_service::outbound::repositories::PostgresPlaylistRepository;
use music_service::outbound::repositories::PostgresSongRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "music_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "music-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_ttl_minutes = config.jwt.access_ttl_minutes,
        refresh_ttl_days = config.jwt.refresh_ttl_days,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_issuer = Arc::new(TokenIssuer::new(
        config.jwt.access_secret.as_bytes(),
        config.jwt.refresh_secret.as_bytes(),
        Duration::minutes(config.jwt.access_ttl_minutes),
        Duration::days(config.jwt.refresh_ttl_days),
    ));

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let song_repository = Arc::new(PostgresSongRepository::new(pg_pool.clone()));
    let playlist_repository = Arc::new(PostgresPlaylistRepository::new(pg_pool));

    let account_service = Arc::new(AccountService::new(
        account_repository,
        Arc::clone(&token_issuer),
    ));
    let song_service = Arc::new(SongService::new(song_repository));
    let playlist_service = Arc::new(PlaylistService::new(playlist_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        account_service,
        song_service,
        playlist_service,
        token_issuer,
    );

    axum::serve(http_listener, http_application).await?;

    Ok(())
}
