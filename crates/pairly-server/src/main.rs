mod config;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use pairly_bot::Bot;
use pairly_db::Database;
use pairly_gateway::TelegramClient;
use pairly_gateway::poller::run_poll_loop;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pairly=debug,pairly_bot=debug,pairly_gateway=info,tower_http=debug".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {:#}", e);
            eprintln!("       Set it in your .env file and restart.");
            std::process::exit(1);
        }
    };

    let db = Database::open(&config.db_path)?;
    let client = TelegramClient::new(&config.api_base, &config.telegram_token, config.poll_timeout)?;
    let bot = Bot::new(db, client);

    // Liveness only; the bot itself talks to Telegram, not to HTTP clients
    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Health endpoint listening on {}", config.addr);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Health endpoint stopped: {}", e);
        }
    });

    tokio::select! {
        _ = run_poll_loop(&bot, config.poll_timeout) => {}
        _ = shutdown_signal() => {}
    }

    info!("Pairly stopped");
    Ok(())
}

async fn root() -> &'static str {
    "Bot is running!"
}

async fn health() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    error!("Failed to install SIGTERM handler: {}", e);
                    ctrl_c.await.ok();
                    info!("Received Ctrl+C, shutting down...");
                    return;
                }
            };
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
