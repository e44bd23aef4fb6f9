// src/main.rs

use connectsphere::config::Config;
use connectsphere::handlers::timeout;
use connectsphere::messenger::{Messenger, WebhookMessenger};
use connectsphere::routes;
use connectsphere::state::AppState;
use connectsphere::store;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "connectsphere.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize Database Pool with Retry
    let mut retry_count = 0;
    let pool = loop {
        match store::connect(&config.database_url, 5).await {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    panic!("Failed to open database after 5 retries: {}", e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    store::migrate(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations applied successfully.");

    if config.admin_user_id.is_none() {
        tracing::warn!("ADMIN_USER_ID is not set; reports will not be forwarded and /admin is disabled");
    }

    let state = AppState::new(pool, config.clone());

    // Out-of-band notices need somewhere to go
    let messenger: Option<Arc<dyn Messenger>> = match &config.outbound_webhook_url {
        Some(url) => match WebhookMessenger::new(url.as_str(), config.webhook_secret.as_str()) {
            Ok(m) => Some(Arc::new(m)),
            Err(e) => {
                tracing::error!("Outbound webhook disabled: {}", e);
                None
            }
        },
        None => {
            tracing::info!("OUTBOUND_WEBHOOK_URL not set; drafts expired by the sweeper end without a notice");
            None
        }
    };
    tokio::spawn(timeout::run(state.clone(), messenger));

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}
