//! Dashboard and analytics endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    analytics::{CategoryShare, DashboardStats, EngineerPerformance, MonthlyTrend, StatusCount, DEFAULT_TREND_MONTHS},
    error::{AppError, AppResult},
    models::{call_log::CallLog, complaint::Complaint, enums::UserRole, user::ScopeQuery},
};

/// Longest trend window served
const MAX_TREND_MONTHS: u32 = 36;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_complaints: Vec<Complaint>,
    pub recent_call_logs: Vec<CallLog>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyticsResponse {
    pub monthly_trends: Vec<MonthlyTrend>,
    pub engineer_performance: Vec<EngineerPerformance>,
    pub category_distribution: Vec<CategoryShare>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    pub user_role: Option<UserRole>,
    pub dept_id: Option<i32>,
    /// Number of trailing months in the trend series (default 7)
    pub months: Option<u32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssetStatusQuery {
    /// Asset category, e.g. "Printer"
    pub category: String,
}

/// Dashboard counters and recent activity
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    params(ScopeQuery),
    responses(
        (status = 200, description = "Dashboard data", body = DashboardResponse)
    )
)]
pub async fn get_dashboard(
    State(state): State<crate::AppState>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<Json<DashboardResponse>> {
    let dashboard = state.services.dashboard.dashboard(&scope).await?;
    Ok(Json(dashboard))
}

/// Monthly trends, engineer performance and category distribution
#[utoipa::path(
    get,
    path = "/analytics",
    tag = "dashboard",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Analytics series", body = AnalyticsResponse),
        (status = 400, description = "Invalid month count", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_analytics(
    State(state): State<crate::AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsResponse>> {
    let months = query.months.unwrap_or(DEFAULT_TREND_MONTHS);
    if months == 0 || months > MAX_TREND_MONTHS {
        return Err(AppError::Validation(format!(
            "months must be between 1 and {}",
            MAX_TREND_MONTHS
        )));
    }

    let scope = ScopeQuery::new(query.user_role, query.dept_id);
    let analytics = state.services.dashboard.analytics(&scope, months).await?;
    Ok(Json(analytics))
}

/// Status breakdown of the assets in one category
#[utoipa::path(
    get,
    path = "/analytics/assets/status",
    tag = "dashboard",
    params(AssetStatusQuery),
    responses(
        (status = 200, description = "Asset count per status", body = Vec<StatusCount>)
    )
)]
pub async fn get_asset_status(
    State(state): State<crate::AppState>,
    Query(query): Query<AssetStatusQuery>,
) -> AppResult<Json<Vec<StatusCount>>> {
    let breakdown = state.services.dashboard.asset_status(&query.category).await?;
    Ok(Json(breakdown))
}
