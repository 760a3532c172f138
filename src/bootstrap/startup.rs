use crate::backend::Backend;
use crate::core::AppState;
use tracing::{info, warn};

/// Startup probe.
///
/// Reports the configuration and whether the backend answers its status
/// endpoint. Never fails: the dashboard surfaces connectivity problems per
/// page load instead.
pub async fn initialize_on_startup(state: &AppState, backend: &impl Backend) {
    info!(
        server_addr = %state.config.server_addr,
        backend = %state.config.backend_base_url,
        recheck_delay_ms = state.config.auth_recheck_delay.as_millis() as u64,
        "startup"
    );

    match backend.auth_status().await {
        Ok(status) => info!(authenticated = status.authenticated, "backend reachable"),
        Err(e) => warn!(error = %e, "backend not reachable at startup"),
    }
}
