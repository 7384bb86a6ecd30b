//! Dashboard and analytics assembly

use std::sync::Arc;

use chrono::Utc;

use crate::{
    analytics::{self, StatusCount},
    api::dashboard::{AnalyticsResponse, DashboardResponse},
    error::AppResult,
    models::{enums::UserRole, user::ScopeQuery},
    repository::{complaints::ComplaintStore, Repository},
};

/// Rows shown in each recent-activity panel
const RECENT_ITEMS: usize = 5;

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
    complaints: Arc<dyn ComplaintStore>,
}

impl DashboardService {
    pub fn new(repository: Repository, complaints: Arc<dyn ComplaintStore>) -> Self {
        Self { repository, complaints }
    }

    pub async fn dashboard(&self, scope: &ScopeQuery) -> AppResult<DashboardResponse> {
        let dept = scope.department_filter();
        let (assets, complaints, call_logs, pm_reports) = tokio::try_join!(
            self.repository.assets.list(dept),
            self.complaints.list(dept),
            self.repository.call_logs.list(),
            self.repository.pm_reports.list(dept),
        )?;

        Ok(DashboardResponse {
            stats: analytics::dashboard_stats(&assets, &complaints, &call_logs, &pm_reports),
            // complaints come back oldest first
            recent_complaints: analytics::recent(complaints.iter().rev(), RECENT_ITEMS),
            recent_call_logs: analytics::recent(&call_logs, RECENT_ITEMS),
        })
    }

    /// Trends and engineer figures follow the caller scope; the category chart covers every asset
    pub async fn analytics(&self, scope: &ScopeQuery, months: u32) -> AppResult<AnalyticsResponse> {
        let (complaints, call_logs, users, assets) = tokio::try_join!(
            self.complaints.list(scope.department_filter()),
            self.repository.call_logs.list(),
            self.repository.users.list(),
            self.repository.assets.list(None),
        )?;

        let engineers: Vec<_> = users
            .into_iter()
            .filter(|u| u.user_role == UserRole::Engineer)
            .collect();

        Ok(AnalyticsResponse {
            monthly_trends: analytics::monthly_trends(&complaints, &call_logs, months, Utc::now()),
            engineer_performance: analytics::engineer_performance(&engineers, &complaints),
            category_distribution: analytics::category_distribution(&assets),
        })
    }

    pub async fn asset_status(&self, category: &str) -> AppResult<Vec<StatusCount>> {
        let assets = self.repository.assets.list(None).await?;
        Ok(analytics::status_breakdown(&assets, category))
    }
}
