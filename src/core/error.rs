use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Missing required env var: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The request never produced a response (DNS, refused connection, TLS, ...).
    #[error(transparent)]
    Connectivity(#[from] reqwest::Error),

    /// The backend answered, but with a non-success status or a failure payload.
    #[error("{0}")]
    Backend(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}
