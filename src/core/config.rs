use super::error::DashboardError;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone, Debug)]
pub struct DashboardConfig {
    pub server_addr: String,
    /// Backend base URL without a trailing slash, e.g. `https://backend.example.com`.
    pub backend_base_url: String,
    /// Delay before the status re-check that follows a successful OAuth redirect.
    pub auth_recheck_delay: Duration,
    pub log_format: LogFormat,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, DashboardError> {
        let server_addr = std::env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into());

        // The backend host differs per deployment, so there is no default.
        let backend_base_url = std::env::var("BACKEND_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or(DashboardError::MissingEnv("BACKEND_BASE_URL"))?;

        let auth_recheck_delay = match std::env::var("AUTH_RECHECK_DELAY_MS") {
            Ok(v) if !v.trim().is_empty() => {
                let ms: u64 = v.trim().parse().map_err(|e| {
                    DashboardError::InvalidConfig(format!("AUTH_RECHECK_DELAY_MS={v}: {e}"))
                })?;
                Duration::from_millis(ms)
            }
            _ => Duration::from_millis(1000),
        };

        let log_format = parse_log_format(std::env::var("LOG_FORMAT").ok().as_deref());

        Self::new(&backend_base_url, server_addr, auth_recheck_delay, log_format)
    }

    pub fn new(
        backend_base_url: &str,
        server_addr: String,
        auth_recheck_delay: Duration,
        log_format: LogFormat,
    ) -> Result<Self, DashboardError> {
        Ok(Self {
            server_addr,
            backend_base_url: normalize_base_url(backend_base_url)?,
            auth_recheck_delay,
            log_format,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.backend_base_url)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, DashboardError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = url::Url::parse(trimmed)
        .map_err(|e| DashboardError::InvalidConfig(format!("BACKEND_BASE_URL={raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DashboardError::InvalidConfig(format!(
            "BACKEND_BASE_URL={raw}: unsupported scheme {}",
            url.scheme()
        )));
    }
    Ok(trimmed.to_string())
}

fn parse_log_format(v: Option<&str>) -> LogFormat {
    match v.map(str::trim) {
        Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Pretty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let cfg = DashboardConfig::new(
            "https://backend.example.com/",
            "127.0.0.1:0".into(),
            Duration::from_millis(1),
            LogFormat::Pretty,
        )
        .unwrap();
        assert_eq!(cfg.backend_base_url, "https://backend.example.com");
        assert_eq!(cfg.endpoint("/auth/status"), "https://backend.example.com/auth/status");
    }

    #[test]
    fn rejects_relative_and_non_http_urls() {
        for bad in ["backend.example.com", "ftp://backend.example.com"] {
            let err = DashboardConfig::new(
                bad,
                "127.0.0.1:0".into(),
                Duration::from_millis(1),
                LogFormat::Pretty,
            )
            .unwrap_err();
            assert!(matches!(err, DashboardError::InvalidConfig(_)), "{bad}");
        }
    }

    #[test]
    fn log_format_defaults_to_pretty() {
        assert_eq!(parse_log_format(None), LogFormat::Pretty);
        assert_eq!(parse_log_format(Some("JSON")), LogFormat::Json);
        assert_eq!(parse_log_format(Some("compact")), LogFormat::Pretty);
    }
}
