mod api;
mod backend;
mod bootstrap;
mod controller;
mod core;
mod logging;
mod oauth;
mod view;

use crate::backend::{Backend, BackendClient};
use crate::controller::DashboardController;
use crate::core::{AppState, DashboardConfig, DashboardError};
use crate::view::Document;
use std::sync::Arc;
use tracing::info;

fn usage() -> &'static str {
    r#"Usage:
    cargo run -- server      (default) host the dashboard over HTTP
    cargo run -- snapshot    one auth check + data load, page HTML to stdout
    cargo run -- status      backend auth status as JSON

Env:
    BACKEND_BASE_URL       (required) e.g. https://backend.example.com
    SERVER_ADDR            (default 127.0.0.1:8080)
    AUTH_RECHECK_DELAY_MS  (default 1000) wait before re-checking auth after a login redirect
    LOG_FORMAT             (pretty|json, default pretty)
    RUST_LOG               (default info)
"#
}

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    dotenvy::dotenv().ok();

    let cmd = std::env::args().nth(1).unwrap_or_else(|| "server".to_string());
    if !matches!(cmd.as_str(), "server" | "snapshot" | "status") {
        eprintln!("Unknown command: {}\n\n{}", cmd, usage());
        std::process::exit(2);
    }

    let config = DashboardConfig::from_env()?;
    logging::init_logging(&config.log_format);
    let backend = BackendClient::new(&config)?;

    match cmd.as_str() {
        "server" => run_server(config, backend).await?,
        "snapshot" => {
            let dashboard = DashboardController::new(&config, backend, Document::default());
            dashboard.check_auth_status().await;
            println!("{}", dashboard.view().await.to_html(None));
        }
        _ => {
            let status = backend.auth_status().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }

    Ok(())
}

async fn run_server(config: DashboardConfig, backend: BackendClient) -> Result<(), DashboardError> {
    let addr: std::net::SocketAddr = config
        .server_addr
        .parse()
        .map_err(|e| DashboardError::InvalidConfig(format!("Invalid SERVER_ADDR: {e}")))?;

    let dashboard = DashboardController::new(&config, backend.clone(), Document::default());
    let state = AppState {
        config: Arc::new(config),
        dashboard: Arc::new(dashboard),
    };

    bootstrap::initialize_on_startup(&state, &backend).await;

    let app = api::router(state);
    info!(%addr, "dashboard listening");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .map_err(|e| DashboardError::Server(e.to_string()))?;
    Ok(())
}
