//! PM reports repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::ReportStatus,
        pm_report::{NewPmReport, PmReport, UpdatePmReport},
    },
};

const SELECT_REPORT: &str = r#"
    SELECT r.report_id, r.asset_id, a.asset_name, r.report_type, r.file_name, r.file_path,
           r.file_size, r.uploaded_by, u.username AS uploaded_by_name, r.status, r.notes,
           r.uploaded_at, r.reviewed_at
    FROM pm_reports r
    LEFT JOIN assets a ON a.asset_id = r.asset_id
    LEFT JOIN users u ON u.user_id = r.uploaded_by
"#;

#[derive(Clone)]
pub struct PmReportsRepository {
    pool: Pool<Postgres>,
}

impl PmReportsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Reports newest first, restricted to the assets of one department when `dept_id` is given
    pub async fn list(&self, dept_id: Option<i32>) -> AppResult<Vec<PmReport>> {
        let query = format!(
            "{} WHERE ($1::INTEGER IS NULL OR a.dept_id = $1) ORDER BY r.uploaded_at DESC, r.report_id DESC",
            SELECT_REPORT
        );
        let rows = sqlx::query_as::<_, PmReport>(&query)
            .bind(dept_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<PmReport> {
        let query = format!("{} WHERE r.report_id = $1", SELECT_REPORT);
        sqlx::query_as::<_, PmReport>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("PM report"))
    }

    pub async fn create(&self, data: &NewPmReport) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO pm_reports (
                asset_id, report_type, file_name, file_path, file_size, uploaded_by, status, notes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING report_id
            "#,
        )
        .bind(data.asset_id)
        .bind(data.report_type)
        .bind(&data.file_name)
        .bind(&data.file_path)
        .bind(data.file_size)
        .bind(data.uploaded_by)
        .bind(ReportStatus::Pending)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::reference("Referenced asset or user does not exist"))?;
        Ok(id)
    }

    /// Update review status and notes; entering Reviewed or Approved stamps `reviewed_at`
    pub async fn update(&self, id: i32, data: &UpdatePmReport) -> AppResult<()> {
        let mut sets = Vec::new();
        let mut idx = 1;

        if data.status.is_some() {
            sets.push(format!("status = ${}", idx));
            idx += 1;
        }
        if data.notes.is_some() {
            sets.push(format!("notes = ${}", idx));
            idx += 1;
        }
        if data.status.is_some_and(|s| s.marks_review()) {
            sets.push("reviewed_at = NOW()".to_string());
        }

        if sets.is_empty() {
            // Nothing to write, still report a missing row
            self.get_by_id(id).await?;
            return Ok(());
        }

        let query = format!("UPDATE pm_reports SET {} WHERE report_id = ${}", sets.join(", "), idx);
        let mut builder = sqlx::query(&query);
        if let Some(status) = data.status {
            builder = builder.bind(status);
        }
        if let Some(ref notes) = data.notes {
            builder = builder.bind(notes);
        }

        let result = builder.bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("PM report"));
        }
        Ok(())
    }

    /// Delete the row, returning the stored file path
    pub async fn delete(&self, id: i32) -> AppResult<String> {
        sqlx::query_scalar::<_, String>("DELETE FROM pm_reports WHERE report_id = $1 RETURNING file_path")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("PM report"))
    }
}
