//! Call logs repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        call_log::{CallLog, CreateCallLog, UpdateCallLog},
        enums::CallStatus,
    },
};

#[derive(Clone)]
pub struct CallLogsRepository {
    pool: Pool<Postgres>,
}

impl CallLogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All call logs, newest first
    pub async fn list(&self) -> AppResult<Vec<CallLog>> {
        let rows = sqlx::query_as::<_, CallLog>("SELECT * FROM call_logs ORDER BY created_at DESC, call_id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<CallLog> {
        sqlx::query_as::<_, CallLog>("SELECT * FROM call_logs WHERE call_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Call log"))
    }

    pub async fn create(&self, data: &CreateCallLog) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO call_logs (call_type, contact_person, contact_number, description, handled_by, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING call_id
            "#,
        )
        .bind(data.call_type)
        .bind(data.contact_person.trim())
        .bind(&data.contact_number)
        .bind(&data.description)
        .bind(&data.handled_by)
        .bind(CallStatus::Open)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn update(&self, id: i32, data: &UpdateCallLog) -> AppResult<()> {
        let mut sets = vec!["updated_at = NOW()".to_string()];
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.call_type, "call_type");
        add_field!(data.contact_person, "contact_person");
        add_field!(data.contact_number, "contact_number");
        add_field!(data.description, "description");
        add_field!(data.handled_by, "handled_by");
        add_field!(data.status, "status");

        let query = format!("UPDATE call_logs SET {} WHERE call_id = ${}", sets.join(", "), idx);
        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.call_type);
        bind_field!(data.contact_person);
        bind_field!(data.contact_number);
        bind_field!(data.description);
        bind_field!(data.handled_by);
        bind_field!(data.status);

        let result = builder.bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Call log"));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM call_logs WHERE call_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Call log"));
        }
        Ok(())
    }
}
