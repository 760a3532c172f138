pub mod client;
pub mod types;

pub use client::{Backend, BackendClient};
pub use types::{AuthStatus, DashboardData, DashboardSummary, Holding, Position, UserProfile};
