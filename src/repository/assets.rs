//! Assets repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        asset::{Asset, CreateAsset, UpdateAsset},
        department::Department,
    },
};

const SELECT_ASSET: &str = r#"
    SELECT a.asset_id, a.asset_name, a.category, a.serial_number, a.status, a.location,
           a.purchase_date, a.warranty_expiry, a.amc_or_warranty, a.inventory_count,
           a.vendor_name, a.dept_id, d.dept_name, a.created_at, a.updated_at
    FROM assets a
    LEFT JOIN departments d ON d.dept_id = a.dept_id
"#;

#[derive(Clone)]
pub struct AssetsRepository {
    pool: Pool<Postgres>,
}

impl AssetsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List assets, restricted to one department when `dept_id` is given
    pub async fn list(&self, dept_id: Option<i32>) -> AppResult<Vec<Asset>> {
        let query = format!(
            "{} WHERE ($1::INTEGER IS NULL OR a.dept_id = $1) ORDER BY a.asset_id",
            SELECT_ASSET
        );
        let rows = sqlx::query_as::<_, Asset>(&query)
            .bind(dept_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get asset by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Asset> {
        let query = format!("{} WHERE a.asset_id = $1", SELECT_ASSET);
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Asset"))
    }

    /// Create an asset, returning its ID
    pub async fn create(&self, data: &CreateAsset) -> AppResult<i32> {
        let id = insert_asset(&self.pool, data)
            .await
            .map_err(AppError::reference("Department does not exist"))?;
        Ok(id)
    }

    /// Insert a whole batch in a single transaction
    pub async fn bulk_insert(&self, rows: &[CreateAsset]) -> AppResult<usize> {
        let mut tx = self.pool.begin().await?;
        for row in rows {
            insert_asset(&mut *tx, row)
                .await
                .map_err(AppError::reference("Department does not exist"))?;
        }
        tx.commit().await?;
        Ok(rows.len())
    }

    /// Update an asset; only provided fields are written
    pub async fn update(&self, id: i32, data: &UpdateAsset) -> AppResult<()> {
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

        add_field!(data.asset_name, "asset_name");
        add_field!(data.category, "category");
        add_field!(data.serial_number, "serial_number");
        add_field!(data.status, "status");
        add_field!(data.location, "location");
        add_field!(data.purchase_date, "purchase_date");
        add_field!(data.warranty_expiry, "warranty_expiry");
        add_field!(data.amc_or_warranty, "amc_or_warranty");
        add_field!(data.inventory_count, "inventory_count");
        add_field!(data.vendor_name, "vendor_name");
        add_field!(data.dept_id, "dept_id");

        let query = format!("UPDATE assets SET {} WHERE asset_id = ${}", sets.join(", "), idx);
        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.asset_name);
        bind_field!(data.category);
        bind_field!(data.serial_number);
        bind_field!(data.status);
        bind_field!(data.location);
        bind_field!(data.purchase_date);
        bind_field!(data.warranty_expiry);
        bind_field!(data.amc_or_warranty);
        bind_field!(data.inventory_count);
        bind_field!(data.vendor_name);
        bind_field!(data.dept_id);

        let result = builder
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::reference("Department does not exist"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Asset"));
        }
        Ok(())
    }

    /// Delete an asset
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM assets WHERE asset_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::reference("Asset is still referenced by complaints or PM reports"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Asset"));
        }
        Ok(())
    }

    pub async fn list_departments(&self) -> AppResult<Vec<Department>> {
        let rows = sqlx::query_as::<_, Department>("SELECT dept_id, dept_name FROM departments ORDER BY dept_id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

async fn insert_asset<'e, E>(executor: E, data: &CreateAsset) -> Result<i32, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO assets (
            asset_name, category, serial_number, status, location,
            purchase_date, warranty_expiry, amc_or_warranty, inventory_count,
            vendor_name, dept_id
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING asset_id
        "#,
    )
    .bind(data.asset_name.trim())
    .bind(&data.category)
    .bind(data.serial_number.trim())
    .bind(data.status)
    .bind(data.location.trim())
    .bind(data.purchase_date)
    .bind(data.warranty_expiry)
    .bind(data.amc_or_warranty)
    .bind(data.inventory_count)
    .bind(&data.vendor_name)
    .bind(data.dept_id)
    .fetch_one(executor)
    .await
}
