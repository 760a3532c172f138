use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<crate::core::AppState> {
    Router::new()
        .route("/", get(page::index))
        .route("/refresh", post(page::refresh))
        .route("/login", get(page::login))
        .route("/api/health", get(health::health))
}

mod health {
    use axum::{extract::State, Json};
    use serde_json::json;

    use crate::core::AppState;

    pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
        Json(json!({
            "status": "ok",
            "backend": state.config.backend_base_url,
            "recheck_pending": state.dashboard.recheck_pending(),
        }))
    }
}

mod page {
    use axum::{
        extract::{RawQuery, State},
        response::{Html, IntoResponse, Redirect, Response},
    };

    use crate::{core::AppState, oauth::OAuthCallback};

    /// Page load. Runs the OAuth callback state machine, then paints.
    pub async fn index(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
        let callback = OAuthCallback::from_query(query.as_deref());
        let dashboard = &state.dashboard;

        match callback {
            OAuthCallback::Success => {
                let _ = dashboard.handle_oauth_callback(callback).await;
                // Drop `?auth=success` from the address bar; the re-check is already scheduled.
                Redirect::to("/").into_response()
            }
            // A fresh load while the post-login re-check is still waiting just shows the banner.
            OAuthCallback::Absent if dashboard.recheck_pending() => render(&state).await,
            other => {
                let _ = dashboard.handle_oauth_callback(other).await;
                render(&state).await
            }
        }
    }

    /// Refresh button: reload dashboard data without re-checking auth.
    pub async fn refresh(State(state): State<AppState>) -> Response {
        state.dashboard.refresh().await;
        render(&state).await
    }

    pub async fn login(State(state): State<AppState>) -> Redirect {
        Redirect::to(&state.dashboard.login_url())
    }

    async fn render(state: &AppState) -> Response {
        let dashboard = &state.dashboard;
        let refresh_after = dashboard
            .recheck_pending()
            .then(|| dashboard.recheck_delay());
        Html(dashboard.view().await.to_html(refresh_after)).into_response()
    }
}
