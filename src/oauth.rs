use url::form_urlencoded;

/// Outcome the backend reports when it redirects back after the Kite login.
///
/// Read from `?auth=success|failed|error[&message=...]` on page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthCallback {
    Success,
    Failed,
    Error { message: Option<String> },
    /// No recognised `auth` parameter: an ordinary page load.
    Absent,
}

impl OAuthCallback {
    pub fn from_query(query: Option<&str>) -> Self {
        let Some(query) = query else {
            return Self::Absent;
        };

        let mut auth = None;
        let mut message = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "auth" if auth.is_none() => auth = Some(value.into_owned()),
                "message" if message.is_none() => message = Some(value.into_owned()),
                _ => {}
            }
        }

        match auth.as_deref() {
            Some("success") => Self::Success,
            Some("failed") => Self::Failed,
            Some("error") => Self::Error {
                message: message.filter(|m| !m.is_empty()).map(|m| decode_message(&m)),
            },
            _ => Self::Absent,
        }
    }

    /// Banner text for the failure variants.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Failed => Some(
                "Login failed. The authentication was not successful. Please try again."
                    .to_string(),
            ),
            Self::Error { message: Some(m) } => Some(format!("Login error: {m}")),
            Self::Error { message: None } => {
                Some("Login error occurred. Please try again.".to_string())
            }
            Self::Success | Self::Absent => None,
        }
    }
}

// Backends sometimes encode the message twice; undo one more layer when it decodes.
fn decode_message(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}
