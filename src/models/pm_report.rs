//! Preventive maintenance report model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{ReportStatus, ReportType};

/// PM report row, joined with the asset name and uploader username
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PmReport {
    pub report_id: i32,
    pub asset_id: i32,
    pub asset_name: Option<String>,
    pub report_type: ReportType,
    /// Original file name as uploaded
    pub file_name: String,
    /// Path of the stored file, relative to the working directory
    pub file_path: String,
    pub file_size: i64,
    pub uploaded_by: i32,
    pub uploaded_by_name: Option<String>,
    pub status: ReportStatus,
    pub notes: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Report metadata once the file has been stored
#[derive(Debug, Clone)]
pub struct NewPmReport {
    pub asset_id: i32,
    pub report_type: ReportType,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub uploaded_by: i32,
    pub notes: Option<String>,
}

/// Multipart upload form, documented for OpenAPI only
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct PmReportUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    pub asset_id: i32,
    pub report_type: ReportType,
    pub uploaded_by: i32,
    pub notes: Option<String>,
}

/// Review update; only status and notes are editable
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePmReport {
    pub status: Option<ReportStatus>,
    pub notes: Option<String>,
}
