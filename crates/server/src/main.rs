use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inbox_core::{
    load_config, load_config_from_env, seed_if_empty, validate_config, NotificationDispatcher,
    SeedOutcome, SqliteTicketStore, TicketStore, WebhookNotifier,
};
use inbox_server::{api::create_router, bundled::resolve_seed_path, state::AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration: explicit file if INBOX_CONFIG is set, defaults otherwise
    let config = match std::env::var("INBOX_CONFIG") {
        Ok(path) => {
            let config_path = PathBuf::from(path);
            info!("Loading configuration from {:?}", config_path);
            load_config(&config_path)
                .with_context(|| format!("Failed to load config from {:?}", config_path))?
        }
        Err(_) => {
            info!("INBOX_CONFIG not set, using defaults and environment overrides");
            load_config_from_env().context("Failed to load config from environment")?
        }
    };

    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);
    info!("Metrics artifact path: {:?}", config.metrics.path);

    // Create SQLite ticket store
    let ticket_store: Arc<dyn TicketStore> = Arc::new(
        SqliteTicketStore::new(&config.database.path).context("Failed to create ticket store")?,
    );
    info!("Ticket store initialized");

    // Seed an empty store; failures are logged and startup continues
    let seed_path = resolve_seed_path(&config.seed.path);
    match seed_if_empty(ticket_store.as_ref(), &seed_path) {
        Ok(SeedOutcome::Inserted(count)) => info!("Seeded {} tickets", count),
        Ok(SeedOutcome::AlreadyPopulated | SeedOutcome::MissingFile(_)) => {}
        Err(e) => error!("Failed to seed ticket store: {}", e),
    }

    // Webhook notifications
    let notifier =
        WebhookNotifier::new(&config.webhook).context("Failed to create webhook notifier")?;
    info!(
        "Ticket updates will be sent to {} (timeout {}s)",
        notifier.url(),
        config.webhook.timeout_secs
    );
    let notifications = NotificationDispatcher::new(Arc::new(notifier));

    let addr = SocketAddr::new(config.server.host, config.server.port);

    // Create app state and router
    let state = Arc::new(AppState::new(config, ticket_store, notifications));
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
