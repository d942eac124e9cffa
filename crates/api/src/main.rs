use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lucky_six_api::background::draw_scheduler::DrawScheduler;
use lucky_six_api::config::{ServerConfig, StoreBackend};
use lucky_six_api::notifications::DrawNotifier;
use lucky_six_api::router::build_app_router;
use lucky_six_api::state::AppState;
use lucky_six_api::ws;
use lucky_six_core::generator::DrawGenerator;
use lucky_six_db::{DrawStore, MemoryDrawStore, PgDrawStore};
use lucky_six_events::EventBus;
use lucky_six_oracle::{GeminiLuckyNumbers, OracleConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lucky_six_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(
        host = %config.host,
        port = config.port,
        store = ?config.store_backend,
        "Loaded server configuration"
    );

    // --- Store ---
    let store: Arc<dyn DrawStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .expect("DATABASE_URL is checked by ServerConfig");

            let pool = lucky_six_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            lucky_six_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            lucky_six_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgDrawStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory draw store; draws are lost on restart");
            Arc::new(MemoryDrawStore::new())
        }
    };

    // --- Draw generator ---
    let generator = match OracleConfig::from_env() {
        Some(oracle) => {
            tracing::info!(model = %oracle.model, "Lucky-number source enabled");
            DrawGenerator::new(
                Arc::new(GeminiLuckyNumbers::from_config(oracle)),
                Duration::from_secs(config.lucky_numbers_timeout_secs),
            )
        }
        None => {
            tracing::info!("LUCKY_NUMBERS_API_KEY not set, draws use random numbers only");
            DrawGenerator::random_only()
        }
    };
    let generator = Arc::new(generator);

    // --- WebSocket manager + heartbeat ---
    let ws_manager = Arc::new(ws::WsManager::new());
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- Event bus + notifier ---
    let event_bus = Arc::new(EventBus::default());
    let notifier = DrawNotifier::new(Arc::clone(&ws_manager));
    let notifier_handle = tokio::spawn(notifier.run(event_bus.subscribe()));

    // --- Draw scheduler ---
    let scheduler_cancel = CancellationToken::new();
    let scheduler_handle = if config.draw_scheduler_enabled {
        let scheduler = DrawScheduler::new(
            Arc::clone(&store),
            Arc::clone(&generator),
            Arc::clone(&event_bus),
            config.draw_interval_secs,
        );
        Some(tokio::spawn(scheduler.run(scheduler_cancel.clone())))
    } else {
        tracing::info!("Draw scheduler disabled");
        None
    };

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        event_bus: Arc::clone(&event_bus),
        generator,
    };

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

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    scheduler_cancel.cancel();
    if let Some(handle) = scheduler_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Draw scheduler stopped");
    }

    // Dropping the last sender closes the channel and stops the notifier.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), notifier_handle).await;

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    heartbeat_handle.abort();

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or (on Unix) SIGTERM.
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
