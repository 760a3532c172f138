use crate::backend::types::{AuthStatus, BackendEnvelope, DashboardData};
use crate::core::{DashboardConfig, DashboardError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// The remote brokerage backend as seen by the dashboard.
///
/// All business logic (session handling, P&L aggregation) lives behind this
/// trait; the dashboard only reads and paints.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn auth_status(&self) -> Result<AuthStatus, DashboardError>;

    async fn dashboard_data(&self) -> Result<DashboardData, DashboardError>;

    /// Where the login button sends the browser to start the OAuth flow.
    fn login_url(&self) -> String;

    fn base_url(&self) -> &str;
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, DashboardError> {
        // No client-side timeout: failures surface from the network layer itself.
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.backend_base_url.clone(),
        })
    }

    async fn get_text(&self, path: &str) -> Result<(reqwest::StatusCode, String), DashboardError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        Ok((status, text))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DashboardError> {
        let (status, text) = self.get_text(path).await?;
        if !status.is_success() {
            return Err(DashboardError::Backend(format!(
                "Backend returned {}",
                status.as_u16()
            )));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl Backend for BackendClient {
    async fn auth_status(&self) -> Result<AuthStatus, DashboardError> {
        self.get_json("/auth/status").await
    }

    async fn dashboard_data(&self) -> Result<DashboardData, DashboardError> {
        let (status, text) = self.get_text("/api/dashboard-data").await?;
        if !status.is_success() {
            tracing::warn!(status = %status, body = %text, "dashboard-data request rejected");
            return Err(DashboardError::Backend(
                "Failed to fetch dashboard data".to_string(),
            ));
        }

        let envelope: BackendEnvelope<DashboardData> = serde_json::from_str(&text)?;
        match envelope.status.as_deref() {
            None | Some("success") => envelope
                .data
                .ok_or_else(|| DashboardError::Backend("Missing data in response".to_string())),
            Some(_) => Err(DashboardError::Backend(
                envelope
                    .message
                    .unwrap_or_else(|| "Unknown backend error".to_string()),
            )),
        }
    }

    fn login_url(&self) -> String {
        format!("{}/kite-login", self.base_url)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
