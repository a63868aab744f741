use std::sync::Arc;

use admin_service::config::Config;
use admin_service::domain::account::service::AccountService;
use admin_service::inbound::http::router::create_router;
use admin_service::outbound::repositories::PostgresAccountStore;
use auth::SigningSecret;
use auth::TokenService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "admin_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "admin-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
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

    // The secret is resolved exactly once here and injected; nothing
    // reads it from the environment at call time.
    let secret = match config.jwt.secret.as_deref() {
        Some(secret) => SigningSecret::new(secret),
        None => match SigningSecret::from_env() {
            Some(secret) => secret,
            None => {
                tracing::warn!(
                    env_var = SigningSecret::ENV_VAR,
                    "Signing secret not configured, using development fallback"
                );
                SigningSecret::dev_fallback()
            }
        },
    };

    let token_service = Arc::new(TokenService::new(&secret));
    let account_store = Arc::new(PostgresAccountStore::new(pg_pool));
    let account_service = Arc::new(AccountService::new(
        account_store,
        Arc::clone(&token_service),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, token_service);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
