use super::config::DashboardConfig;
use crate::backend::BackendClient;
use crate::controller::DashboardController;
use crate::view::Document;
use std::sync::Arc;

pub type Dashboard = DashboardController<BackendClient, Document>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub dashboard: Arc<Dashboard>,
}
