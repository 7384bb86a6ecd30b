//! Business logic services

pub mod assets;
pub mod call_logs;
pub mod complaints;
pub mod dashboard;
pub mod notifications;
pub mod pm_reports;
pub mod users;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    error::AppResult,
    models::complaint::TransitionRules,
    repository::{complaints::ComplaintStore, Repository},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub assets: assets::AssetsService,
    pub complaints: complaints::ComplaintsService,
    pub call_logs: call_logs::CallLogsService,
    pub pm_reports: pm_reports::PmReportsService,
    pub users: users::UsersService,
    pub dashboard: dashboard::DashboardService,
    pub notifier: notifications::ChangeNotifier,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub async fn new(repository: Repository, config: &AppConfig) -> AppResult<Self> {
        let notifier = notifications::ChangeNotifier::new(config.notifications.capacity);
        let complaint_store: Arc<dyn ComplaintStore> = Arc::new(repository.complaints.clone());
        let rules = TransitionRules {
            enforce: config.complaints.enforce_transitions,
        };

        let services = Self {
            assets: assets::AssetsService::new(repository.clone(), notifier.clone()),
            complaints: complaints::ComplaintsService::new(complaint_store.clone(), notifier.clone(), rules),
            call_logs: call_logs::CallLogsService::new(repository.clone(), notifier.clone()),
            pm_reports: pm_reports::PmReportsService::new(repository.clone(), notifier.clone(), &config.uploads),
            users: users::UsersService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository.clone(), complaint_store),
            notifier,
            repository,
        };

        services
            .users
            .ensure_bootstrap_admin(config.users.bootstrap_admin_password.as_deref())
            .await?;

        Ok(services)
    }

    /// Database reachability, for the readiness check
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
