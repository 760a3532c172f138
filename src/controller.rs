use crate::backend::Backend;
use crate::core::DashboardConfig;
use crate::oauth::OAuthCallback;
use crate::view::{render, View};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const LOGIN_SUCCESS_MESSAGE: &str = "Login successful! Loading data...";

/// Drives the dashboard view from backend responses.
///
/// Every network call is issued sequentially from the calling flow; the view
/// lock is never held across a backend request.
pub struct DashboardController<B, V> {
    backend: B,
    view: Mutex<V>,
    recheck_delay: Duration,
    recheck_pending: AtomicBool,
}

impl<B, V> DashboardController<B, V>
where
    B: Backend + 'static,
    V: View + 'static,
{
    pub fn new(config: &DashboardConfig, backend: B, view: V) -> Self {
        Self {
            backend,
            view: Mutex::new(view),
            recheck_delay: config.auth_recheck_delay,
            recheck_pending: AtomicBool::new(false),
        }
    }

    pub async fn view(&self) -> MutexGuard<'_, V> {
        self.view.lock().await
    }

    pub fn login_url(&self) -> String {
        self.backend.login_url()
    }

    pub fn recheck_delay(&self) -> Duration {
        self.recheck_delay
    }

    /// True between a successful OAuth redirect and the end of its deferred re-check.
    pub fn recheck_pending(&self) -> bool {
        self.recheck_pending.load(Ordering::SeqCst)
    }

    pub async fn check_auth_status(&self) {
        {
            let mut view = self.view.lock().await;
            render::show_loading(&mut *view);
            render::hide_error(&mut *view);
        }

        match self.backend.auth_status().await {
            Ok(status) if status.authenticated => {
                info!(
                    user = status.user.as_ref().map(|u| u.display_name()).unwrap_or("User"),
                    "backend session active"
                );
                render::show_authenticated_ui(&mut *self.view.lock().await, status.user.as_ref());
                self.load_dashboard_data().await;
            }
            Ok(_) => {
                info!("no backend session");
                render::show_not_authenticated_ui(&mut *self.view.lock().await);
            }
            Err(e) => {
                warn!(error = %e, "auth check failed");
                // Fall back to the login prompt; the user may simply need to authenticate.
                let mut view = self.view.lock().await;
                render::show_not_authenticated_ui(&mut *view);
                render::show_error(
                    &mut *view,
                    format!(
                        "Cannot connect to backend at {}. Error: {e}",
                        self.backend.base_url()
                    ),
                );
            }
        }

        render::hide_loading(&mut *self.view.lock().await);
    }

    pub async fn load_dashboard_data(&self) {
        {
            let mut view = self.view.lock().await;
            render::show_loading(&mut *view);
            render::hide_error(&mut *view);
        }

        match self.backend.dashboard_data().await {
            Ok(data) => {
                info!(
                    holdings = data.holdings.len(),
                    positions = data.positions.len(),
                    "dashboard data loaded"
                );
                let mut view = self.view.lock().await;
                render::display_profile(&mut *view, &data.profile);
                render::display_summary(&mut *view, &data.summary);
                render::display_holdings(&mut *view, &data.holdings);
                render::display_positions(&mut *view, &data.positions);
            }
            Err(e) => {
                warn!(error = %e, "dashboard data load failed");
                render::show_error(
                    &mut *self.view.lock().await,
                    format!("Error loading dashboard data: {e}"),
                );
            }
        }

        render::hide_loading(&mut *self.view.lock().await);
    }

    /// Refresh button: data only, no auth re-check.
    pub async fn refresh(&self) {
        self.load_dashboard_data().await;
    }

    /// Page-load entry point.
    ///
    /// Returns the handle of the deferred re-check when one was scheduled.
    pub async fn handle_oauth_callback(
        self: &Arc<Self>,
        callback: OAuthCallback,
    ) -> Option<JoinHandle<()>> {
        debug!(callback = ?callback, "page load");
        match &callback {
            OAuthCallback::Success => {
                render::show_success(&mut *self.view.lock().await, LOGIN_SUCCESS_MESSAGE);
                Some(self.schedule_recheck())
            }
            OAuthCallback::Failed | OAuthCallback::Error { .. } => {
                let message = callback.failure_message().unwrap_or_default();
                warn!(message = %message, "login redirect reported failure");
                let mut view = self.view.lock().await;
                render::show_error(&mut *view, message);
                render::show_not_authenticated_ui(&mut *view);
                None
            }
            OAuthCallback::Absent => {
                self.check_auth_status().await;
                None
            }
        }
    }

    fn schedule_recheck(self: &Arc<Self>) -> JoinHandle<()> {
        self.recheck_pending.store(true, Ordering::SeqCst);
        let weak = Arc::downgrade(self);
        let delay = self.recheck_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The dashboard may have been torn down while we slept.
            let Some(this) = weak.upgrade() else {
                debug!("dashboard dropped before post-login re-check");
                return;
            };
            render::hide_error(&mut *this.view.lock().await);
            this.check_auth_status().await;
            this.recheck_pending.store(false, Ordering::SeqCst);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AuthStatus, DashboardData, DashboardSummary, Holding, UserProfile};
    use crate::core::{DashboardError, LogFormat};
    use crate::view::{BannerTone, Document, Region, Table, TableRow};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default, Clone)]
    struct Calls {
        auth: Arc<AtomicUsize>,
        data: Arc<AtomicUsize>,
    }

    impl Calls {
        fn auth(&self) -> usize {
            self.auth.load(Ordering::SeqCst)
        }

        fn data(&self) -> usize {
            self.data.load(Ordering::SeqCst)
        }
    }

    /// `None` makes the corresponding endpoint fail.
    struct FakeBackend {
        auth: Option<AuthStatus>,
        data: Option<DashboardData>,
        calls: Calls,
    }

    #[async_trait]
    impl Backend for FakeBackend {
        async fn auth_status(&self) -> Result<AuthStatus, DashboardError> {
            self.calls.auth.fetch_add(1, Ordering::SeqCst);
            self.auth
                .clone()
                .ok_or_else(|| DashboardError::Backend("Backend returned 502".into()))
        }

        async fn dashboard_data(&self) -> Result<DashboardData, DashboardError> {
            self.calls.data.fetch_add(1, Ordering::SeqCst);
            self.data
                .clone()
                .ok_or_else(|| DashboardError::Backend("Failed to fetch dashboard data".into()))
        }

        fn login_url(&self) -> String {
            "http://backend.test/kite-login".into()
        }

        fn base_url(&self) -> &str {
            "http://backend.test"
        }
    }

    fn signed_in() -> AuthStatus {
        AuthStatus {
            authenticated: true,
            user: Some(UserProfile {
                user_name: Some("Asha".into()),
                ..Default::default()
            }),
        }
    }

    fn sample_data() -> DashboardData {
        DashboardData {
            profile: UserProfile {
                user_id: Some("AB1234".into()),
                ..Default::default()
            },
            summary: DashboardSummary {
                total_value: 1000.0,
                total_pnl: 100.0,
                holdings_pnl: 100.0,
                positions_pnl: 0.0,
                holdings_count: 1,
                positions_count: 0,
            },
            holdings: vec![Holding {
                tradingsymbol: Some("INFY".into()),
                quantity: 10.0,
                average_price: 90.0,
                last_price: 100.0,
            }],
            positions: vec![],
        }
    }

    fn controller(
        auth: Option<AuthStatus>,
        data: Option<DashboardData>,
    ) -> (Arc<DashboardController<FakeBackend, Document>>, Calls) {
        let calls = Calls::default();
        let config = DashboardConfig::new(
            "http://backend.test",
            "127.0.0.1:0".into(),
            Duration::from_millis(10),
            LogFormat::Pretty,
        )
        .unwrap();
        let backend = FakeBackend {
            auth,
            data,
            calls: calls.clone(),
        };
        (
            Arc::new(DashboardController::new(&config, backend, Document::default())),
            calls,
        )
    }

    #[tokio::test]
    async fn unauthenticated_shows_login_and_skips_data_load() {
        let (ctrl, calls) = controller(Some(AuthStatus::default()), Some(sample_data()));
        ctrl.check_auth_status().await;

        let doc = ctrl.view().await;
        assert!(doc.is_visible(Region::NotAuthenticated));
        assert!(!doc.is_visible(Region::Authenticated));
        assert!(!doc.is_visible(Region::Loading));
        assert!(doc.banner().is_none());
        assert_eq!(calls.auth(), 1);
        assert_eq!(calls.data(), 0);
    }

    #[tokio::test]
    async fn authenticated_load_renders_every_section() {
        let (ctrl, calls) = controller(Some(signed_in()), Some(sample_data()));
        ctrl.check_auth_status().await;

        let doc = ctrl.view().await;
        assert!(doc.is_visible(Region::Authenticated));
        for region in [
            Region::Profile,
            Region::Summary,
            Region::Holdings,
            Region::Positions,
        ] {
            assert!(doc.is_visible(region), "{region:?}");
        }
        assert!(!doc.is_visible(Region::Loading));
        let TableRow::Data(cells) = &doc.rows(Table::Holdings)[0] else {
            panic!("expected a data row");
        };
        assert_eq!(cells[4].text, "+₹100.00");
        assert_eq!(calls.data(), 1);
    }

    #[tokio::test]
    async fn unreachable_backend_falls_back_to_login_with_banner() {
        let (ctrl, calls) = controller(None, Some(sample_data()));
        ctrl.check_auth_status().await;

        let doc = ctrl.view().await;
        assert!(doc.is_visible(Region::NotAuthenticated));
        assert!(!doc.is_visible(Region::Loading));
        let banner = doc.banner().expect("error banner");
        assert_eq!(banner.tone, BannerTone::Error);
        assert!(banner.message.starts_with("Cannot connect to backend"));
        assert!(banner.message.contains("Backend returned 502"));
        assert_eq!(calls.data(), 0);
    }

    #[tokio::test]
    async fn data_failure_keeps_auth_toggle() {
        let (ctrl, _) = controller(Some(signed_in()), None);
        ctrl.check_auth_status().await;
        {
            let doc = ctrl.view().await;
            assert!(doc.is_visible(Region::Authenticated));
            assert!(!doc.is_visible(Region::NotAuthenticated));
            let banner = doc.banner().expect("error banner");
            assert_eq!(
                banner.message,
                "Error loading dashboard data: Failed to fetch dashboard data"
            );
        }

        let (ctrl, _) = controller(Some(AuthStatus::default()), None);
        ctrl.check_auth_status().await;
        ctrl.refresh().await;
        let doc = ctrl.view().await;
        assert!(doc.is_visible(Region::NotAuthenticated));
        assert!(!doc.is_visible(Region::Authenticated));
        assert!(!doc.banner().expect("error banner").message.is_empty());
    }

    #[tokio::test]
    async fn refresh_overwrites_previous_render() {
        let (ctrl, calls) = controller(Some(signed_in()), Some(sample_data()));
        ctrl.check_auth_status().await;
        ctrl.refresh().await;
        assert_eq!(calls.data(), 2);
        assert_eq!(ctrl.view().await.rows(Table::Holdings).len(), 1);
    }

    #[tokio::test]
    async fn error_callback_shows_message_without_auth_check() {
        let (ctrl, calls) = controller(Some(signed_in()), Some(sample_data()));
        let cb = OAuthCallback::from_query(Some("auth=error&message=Foo%20Bar"));
        assert!(ctrl.handle_oauth_callback(cb).await.is_none());

        let doc = ctrl.view().await;
        assert!(doc.banner().unwrap().message.contains("Foo Bar"));
        assert!(doc.is_visible(Region::NotAuthenticated));
        assert_eq!(calls.auth(), 0);
    }

    #[tokio::test]
    async fn failed_callback_shows_login() {
        let (ctrl, calls) = controller(Some(signed_in()), Some(sample_data()));
        assert!(ctrl.handle_oauth_callback(OAuthCallback::Failed).await.is_none());
        let doc = ctrl.view().await;
        assert!(doc.banner().unwrap().message.starts_with("Login failed."));
        assert!(doc.is_visible(Region::NotAuthenticated));
        assert_eq!(calls.auth(), 0);
    }

    #[tokio::test]
    async fn absent_callback_runs_auth_check() {
        let (ctrl, calls) = controller(Some(AuthStatus::default()), None);
        assert!(ctrl.handle_oauth_callback(OAuthCallback::Absent).await.is_none());
        assert_eq!(calls.auth(), 1);
    }

    #[tokio::test]
    async fn success_callback_defers_the_auth_check() {
        let (ctrl, calls) = controller(Some(signed_in()), Some(sample_data()));
        let handle = ctrl
            .handle_oauth_callback(OAuthCallback::Success)
            .await
            .expect("deferred re-check");

        {
            let doc = ctrl.view().await;
            let banner = doc.banner().expect("success banner");
            assert_eq!(banner.tone, BannerTone::Success);
            assert_eq!(banner.message, LOGIN_SUCCESS_MESSAGE);
        }
        assert!(ctrl.recheck_pending());
        assert_eq!(calls.auth(), 0);

        handle.await.unwrap();
        assert!(!ctrl.recheck_pending());
        assert_eq!(calls.auth(), 1);
        assert_eq!(calls.data(), 1);
        let doc = ctrl.view().await;
        assert!(doc.banner().is_none());
        assert!(doc.is_visible(Region::Authenticated));
    }

    #[tokio::test]
    async fn deferred_check_skips_a_dropped_dashboard() {
        let (ctrl, calls) = controller(Some(signed_in()), Some(sample_data()));
        let handle = ctrl
            .handle_oauth_callback(OAuthCallback::Success)
            .await
            .expect("deferred re-check");
        drop(ctrl);

        handle.await.unwrap();
        assert_eq!(calls.auth(), 0);
    }
}
