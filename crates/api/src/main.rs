use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phishtrack_api::config::ServerConfig;
use phishtrack_api::router::build_app_router;
use phishtrack_api::state::AppState;
use phishtrack_db::models::campaign::CreateCampaign;
use phishtrack_db::repositories::CampaignRepo;
use phishtrack_notify::{AwarenessMailer, EmailConfig};

/// Campaign seeded at startup so a fresh install tracks events immediately.
const SEED_CAMPAIGN_ID: &str = "contagious-interview-2026";
const SEED_CAMPAIGN_NAME: &str = "Contagious Interview 2026";
const SEED_CAMPAIGN_DESCRIPTION: &str =
    "VS Code phishing simulation based on fake job-offer tactics";
const SEED_CAMPAIGN_TARGETS: i64 = 100;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phishtrack_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = phishtrack_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    phishtrack_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    phishtrack_db::run_migrations(&pool)
        .await
        .expect("Failed to apply database schema");
    tracing::info!("Database schema ready");

    seed_default_campaign(&pool).await;

    // --- Awareness mailer ---
    let mailer = EmailConfig::from_env().map(|cfg| Arc::new(AwarenessMailer::new(cfg)));
    if mailer.is_none() {
        tracing::warn!("SMTP_HOST not set; awareness emails are disabled");
    }

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Insert the default campaign; a duplicate means a previous run already
/// seeded it, which keeps startup idempotent.
async fn seed_default_campaign(pool: &phishtrack_db::DbPool) {
    let seed = CreateCampaign {
        campaign_id: SEED_CAMPAIGN_ID.to_string(),
        name: SEED_CAMPAIGN_NAME.to_string(),
        description: Some(SEED_CAMPAIGN_DESCRIPTION.to_string()),
        total_targets: Some(SEED_CAMPAIGN_TARGETS),
    };

    match CampaignRepo::create(pool, &seed).await {
        Ok(_) => tracing::info!(campaign_id = SEED_CAMPAIGN_ID, "Seeded default campaign"),
        Err(err) if CampaignRepo::is_duplicate(&err) => {
            tracing::debug!(campaign_id = SEED_CAMPAIGN_ID, "Default campaign already present");
        }
        Err(err) => tracing::error!(error = %err, "Failed to seed default campaign"),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
