//! Repository layer for database operations

pub mod assets;
pub mod call_logs;
pub mod complaints;
pub mod pm_reports;
pub mod users;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub assets: assets::AssetsRepository,
    pub complaints: complaints::ComplaintsRepository,
    pub call_logs: call_logs::CallLogsRepository,
    pub pm_reports: pm_reports::PmReportsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            assets: assets::AssetsRepository::new(pool.clone()),
            complaints: complaints::ComplaintsRepository::new(pool.clone()),
            call_logs: call_logs::CallLogsRepository::new(pool.clone()),
            pm_reports: pm_reports::PmReportsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database, used by the readiness check
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
