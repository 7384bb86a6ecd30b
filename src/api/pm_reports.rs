//! PM report endpoints (multipart upload, review, download)

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::Multipart;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::ReportType,
        pm_report::{PmReport, PmReportUploadForm, UpdatePmReport},
        user::ScopeQuery,
    },
    services::pm_reports::{content_type_for, sanitize_file_name, PendingUpload, ReportUpload},
};

use super::ActionResponse;

#[derive(Serialize, ToSchema)]
pub struct UploadReportResponse {
    pub success: bool,
    pub message: String,
    pub report_id: i32,
}

fn multipart_error(e: axum_extra::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {}", e))
}

fn parse_field<T: std::str::FromStr>(name: &str, value: Option<String>) -> AppResult<T> {
    let value = value.ok_or_else(|| AppError::Validation(format!("Missing field '{}'", name)))?;
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid value for '{}': {}", name, value)))
}

/// List PM reports visible to the caller, newest first
#[utoipa::path(
    get,
    path = "/pm-reports",
    tag = "pm-reports",
    params(ScopeQuery),
    responses(
        (status = 200, description = "PM reports", body = Vec<PmReport>)
    )
)]
pub async fn list_reports(
    State(state): State<crate::AppState>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<Json<Vec<PmReport>>> {
    let reports = state.services.pm_reports.list(&scope).await?;
    Ok(Json(reports))
}

/// Get PM report by ID
#[utoipa::path(
    get,
    path = "/pm-reports/{id}",
    tag = "pm-reports",
    params(("id" = i32, Path, description = "Report ID")),
    responses(
        (status = 200, description = "PM report", body = PmReport),
        (status = 404, description = "PM report not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_report(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PmReport>> {
    let report = state.services.pm_reports.get(id).await?;
    Ok(Json(report))
}

/// Upload a PM report file with its metadata
#[utoipa::path(
    post,
    path = "/pm-reports",
    tag = "pm-reports",
    request_body(content = PmReportUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Report uploaded", body = UploadReportResponse),
        (status = 400, description = "Missing file or disallowed type", body = crate::error::ErrorResponse),
        (status = 413, description = "File too large", body = crate::error::ErrorResponse)
    )
)]
pub async fn upload_report(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadReportResponse>)> {
    let service = &state.services.pm_reports;

    let mut file: Option<PendingUpload> = None;
    let mut asset_id = None;
    let mut report_type = None;
    let mut uploaded_by = None;
    let mut notes = None;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let mut pending = service.begin_upload(&file_name, &content_type)?;
            while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                pending.push(&chunk)?;
            }
            file = Some(pending);
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        match name.as_str() {
            "asset_id" => asset_id = Some(value),
            "report_type" => report_type = Some(value),
            "uploaded_by" => uploaded_by = Some(value),
            "notes" => notes = Some(value).filter(|n| !n.trim().is_empty()),
            other => tracing::debug!(field = other, "Ignoring unknown upload field"),
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    let upload = ReportUpload {
        file,
        asset_id: parse_field("asset_id", asset_id)?,
        report_type: parse_field::<ReportType>("report_type", report_type)?,
        uploaded_by: parse_field("uploaded_by", uploaded_by)?,
        notes,
    };

    let report_id = service.upload(upload).await?;
    Ok((
        StatusCode::CREATED,
        Json(UploadReportResponse {
            success: true,
            message: "Report uploaded successfully".to_string(),
            report_id,
        }),
    ))
}

/// Review a PM report
#[utoipa::path(
    put,
    path = "/pm-reports/{id}",
    tag = "pm-reports",
    params(("id" = i32, Path, description = "Report ID")),
    request_body = UpdatePmReport,
    responses(
        (status = 200, description = "Report updated", body = ActionResponse),
        (status = 404, description = "PM report not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_report(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdatePmReport>,
) -> AppResult<Json<ActionResponse>> {
    state.services.pm_reports.update(id, &data).await?;
    Ok(ActionResponse::ok("Report updated successfully"))
}

/// Delete a PM report and its file
#[utoipa::path(
    delete,
    path = "/pm-reports/{id}",
    tag = "pm-reports",
    params(("id" = i32, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report deleted", body = ActionResponse),
        (status = 404, description = "PM report not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_report(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActionResponse>> {
    state.services.pm_reports.delete(id).await?;
    Ok(ActionResponse::ok("Report deleted successfully"))
}

/// Download the stored report file
#[utoipa::path(
    get,
    path = "/pm-reports/download/{id}",
    tag = "pm-reports",
    params(("id" = i32, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report file", body = String, content_type = "application/octet-stream"),
        (status = 404, description = "Report or file not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn download_report(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let (report, content) = state.services.pm_reports.download(id).await?;
    let headers = [
        (header::CONTENT_TYPE, content_type_for(&report.file_name).to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", sanitize_file_name(&report.file_name)),
        ),
    ];
    Ok((headers, content))
}
