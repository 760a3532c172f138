use serde::{Deserialize, Deserializer, Serialize};

/// Treats a missing *or* `null` field as `T::default()`.
///
/// Backend payloads are partial in practice; rendering must never fail on them.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub(crate) struct BackendEnvelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserProfile {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub broker: Option<String>,
}

impl UserProfile {
    /// Label for the signed-in banner: name, then id, then a generic fallback.
    pub fn display_name(&self) -> &str {
        non_empty(self.user_name.as_deref())
            .or_else(|| non_empty(self.user_id.as_deref()))
            .unwrap_or("User")
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashboardSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_value: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pnl: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub holdings_pnl: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub positions_pnl: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub holdings_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub positions_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Holding {
    #[serde(default)]
    pub tradingsymbol: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_price: f64,
}

impl Holding {
    pub fn current_value(&self) -> f64 {
        self.last_price * self.quantity
    }

    pub fn invested_value(&self) -> f64 {
        self.average_price * self.quantity
    }

    pub fn pnl(&self) -> f64 {
        self.current_value() - self.invested_value()
    }
}

/// Open position; `pnl` comes from the backend as-is.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Position {
    #[serde(default)]
    pub tradingsymbol: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pnl: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashboardData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile: UserProfile,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: DashboardSummary,
    #[serde(default, deserialize_with = "null_as_default")]
    pub holdings: Vec<Holding>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub positions: Vec<Position>,
}

pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}
