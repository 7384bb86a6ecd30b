//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assets, auth, call_logs, changes, complaints, dashboard, health, pm_reports, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AssetDesk API",
        version = "0.3.0",
        description = "IT asset lifecycle tracking REST API"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth & users
        auth::login,
        users::list_users,
        // Assets
        assets::list_assets,
        assets::get_asset,
        assets::create_asset,
        assets::update_asset,
        assets::delete_asset,
        assets::bulk_upload,
        assets::list_departments,
        // Complaints
        complaints::list_complaints,
        complaints::get_complaint,
        complaints::create_complaint,
        complaints::update_complaint,
        complaints::delete_complaint,
        // Call logs
        call_logs::list_call_logs,
        call_logs::get_call_log,
        call_logs::create_call_log,
        call_logs::update_call_log,
        call_logs::delete_call_log,
        // PM reports
        pm_reports::list_reports,
        pm_reports::get_report,
        pm_reports::upload_report,
        pm_reports::update_report,
        pm_reports::delete_report,
        pm_reports::download_report,
        // Dashboard
        dashboard::get_dashboard,
        dashboard::get_analytics,
        dashboard::get_asset_status,
        // Changes
        changes::stream_changes,
    ),
    components(
        schemas(
            // Auth & users
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::user::UserShort,
            crate::models::user::ScopeQuery,
            crate::models::enums::UserRole,
            // Assets
            crate::models::asset::Asset,
            crate::models::asset::CreateAsset,
            crate::models::asset::UpdateAsset,
            crate::models::enums::AssetStatus,
            crate::models::enums::Coverage,
            crate::models::department::Department,
            crate::models::bulk_import::BulkAssetRow,
            crate::models::bulk_import::BulkUploadResponse,
            crate::models::bulk_import::RowError,
            assets::CreateAssetResponse,
            // Complaints
            crate::models::complaint::Complaint,
            crate::models::complaint::CreateComplaint,
            crate::models::complaint::UpdateComplaint,
            crate::models::enums::ComplaintStatus,
            crate::models::enums::Priority,
            complaints::CreateComplaintResponse,
            complaints::UpdateComplaintResponse,
            // Call logs
            crate::models::call_log::CallLog,
            crate::models::call_log::CreateCallLog,
            crate::models::call_log::UpdateCallLog,
            crate::models::enums::CallType,
            crate::models::enums::CallStatus,
            call_logs::CreateCallLogResponse,
            // PM reports
            crate::models::pm_report::PmReport,
            crate::models::pm_report::PmReportUploadForm,
            crate::models::pm_report::UpdatePmReport,
            crate::models::enums::ReportType,
            crate::models::enums::ReportStatus,
            pm_reports::UploadReportResponse,
            // Dashboard
            dashboard::DashboardResponse,
            dashboard::AnalyticsResponse,
            crate::analytics::DashboardStats,
            crate::analytics::PriorityCount,
            crate::analytics::EngineerPerformance,
            crate::analytics::MonthlyTrend,
            crate::analytics::CategoryShare,
            crate::analytics::StatusCount,
            // Changes
            crate::services::notifications::DataChange,
            crate::services::notifications::Entity,
            crate::services::notifications::ChangeAction,
            // Common
            health::HealthResponse,
            super::ActionResponse,
            crate::error::ErrorResponse,
            crate::error::ErrorCode,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Login"),
        (name = "users", description = "User listing"),
        (name = "assets", description = "Asset registry and bulk import"),
        (name = "complaints", description = "Complaint lifecycle"),
        (name = "call-logs", description = "Support call records"),
        (name = "pm-reports", description = "Preventive maintenance report files"),
        (name = "dashboard", description = "Dashboard counters and analytics"),
        (name = "changes", description = "Live change notifications")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
