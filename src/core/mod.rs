pub mod config;
pub mod error;
pub mod state;

pub use config::{DashboardConfig, LogFormat};
pub use error::DashboardError;
pub use state::{AppState, Dashboard};
