use crate::core::AppState;
use axum::{response::Redirect, Router};
use tower_http::trace::TraceLayer;

mod routes;

/// Dashboard HTTP surface. Anything unknown lands back on the page.
pub fn router(state: AppState) -> Router {
    routes::router()
        .fallback(|| async { Redirect::to("/") })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
