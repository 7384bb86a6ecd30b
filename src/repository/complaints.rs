//! Complaints repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::complaint::{Complaint, CreateComplaint, LifecycleState, TransitionRules, UpdateComplaint},
    models::enums::{ComplaintStatus, Priority},
};

const SELECT_COMPLAINT: &str = r#"
    SELECT c.comp_id, c.asset_id, a.asset_name, c.raised_by, u.username AS reported_by,
           c.issue, c.comp_status, c.priority, c.creation_time, c.eng_assigned,
           e.username AS assigned_to, c.expected_res_date, c.spare_req,
           c.total_time_taken, c.actual_res_date, c.comp_type, c.updated_at
    FROM complaints c
    JOIN assets a ON a.asset_id = c.asset_id
    JOIN users u ON u.user_id = c.raised_by
    LEFT JOIN users e ON e.user_id = c.eng_assigned
"#;

const BAD_REFERENCE: &str = "Referenced asset or user does not exist";

/// Persistence operations the complaint lifecycle relies on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Enriched complaints, restricted to the assets of one department when `dept_id` is given
    async fn list(&self, dept_id: Option<i32>) -> AppResult<Vec<Complaint>>;

    async fn get(&self, id: i32) -> AppResult<Complaint>;

    /// Insert a complaint, returning its ID
    async fn create(&self, data: &CreateComplaint) -> AppResult<i32>;

    /// Apply a partial update under a row lock, returning the new lifecycle columns
    async fn update(&self, id: i32, data: &UpdateComplaint, rules: TransitionRules) -> AppResult<LifecycleState>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[derive(Clone)]
pub struct ComplaintsRepository {
    pool: Pool<Postgres>,
}

impl ComplaintsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComplaintStore for ComplaintsRepository {
    async fn list(&self, dept_id: Option<i32>) -> AppResult<Vec<Complaint>> {
        let query = format!(
            "{} WHERE ($1::INTEGER IS NULL OR a.dept_id = $1) ORDER BY c.creation_time, c.comp_id",
            SELECT_COMPLAINT
        );
        let rows = sqlx::query_as::<_, Complaint>(&query)
            .bind(dept_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> AppResult<Complaint> {
        let query = format!("{} WHERE c.comp_id = $1", SELECT_COMPLAINT);
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Complaint"))
    }

    async fn create(&self, data: &CreateComplaint) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO complaints (
                asset_id, raised_by, issue, comp_status, priority,
                eng_assigned, expected_res_date, spare_req, comp_type,
                creation_time, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
            RETURNING comp_id
            "#,
        )
        .bind(data.asset_id)
        .bind(data.raised_by)
        .bind(data.issue.trim())
        .bind(data.comp_status.unwrap_or(ComplaintStatus::Open))
        .bind(data.priority.unwrap_or(Priority::Medium))
        .bind(data.eng_assigned)
        .bind(data.expected_res_date)
        .bind(&data.spare_req)
        .bind(&data.comp_type)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::reference(BAD_REFERENCE))?;

        Ok(id)
    }

    async fn update(&self, id: i32, data: &UpdateComplaint, rules: TransitionRules) -> AppResult<LifecycleState> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, LifecycleState>(
            r#"
            SELECT comp_status, creation_time, actual_res_date, total_time_taken
            FROM complaints
            WHERE comp_id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Complaint"))?;

        let next = current.apply(data, rules)?;

        let mut sets = vec![
            "updated_at = NOW()".to_string(),
            "comp_status = $1".to_string(),
            "actual_res_date = $2".to_string(),
            "total_time_taken = $3".to_string(),
        ];
        let mut idx = 4;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.asset_id, "asset_id");
        add_field!(data.raised_by, "raised_by");
        add_field!(data.issue, "issue");
        add_field!(data.priority, "priority");
        add_field!(data.eng_assigned, "eng_assigned");
        add_field!(data.expected_res_date, "expected_res_date");
        add_field!(data.spare_req, "spare_req");
        add_field!(data.comp_type, "comp_type");

        let query = format!("UPDATE complaints SET {} WHERE comp_id = ${}", sets.join(", "), idx);
        let mut builder = sqlx::query(&query)
            .bind(next.comp_status)
            .bind(next.actual_res_date)
            .bind(next.total_time_taken.as_deref());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.asset_id);
        bind_field!(data.raised_by);
        if let Some(ref issue) = data.issue {
            builder = builder.bind(issue.trim());
        }
        bind_field!(data.priority);
        bind_field!(data.eng_assigned);
        bind_field!(data.expected_res_date);
        bind_field!(data.spare_req);
        bind_field!(data.comp_type);

        builder
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::reference(BAD_REFERENCE))?;

        tx.commit().await?;
        Ok(next)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM complaints WHERE comp_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Complaint"));
        }
        Ok(())
    }
}
