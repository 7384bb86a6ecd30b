//! Asset registry service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        asset::{check_warranty_dates, Asset, CreateAsset, UpdateAsset},
        bulk_import::{validate_batch, BulkAssetRow},
        department::Department,
        user::ScopeQuery,
    },
    repository::Repository,
    services::notifications::{ChangeAction, ChangeNotifier, Entity},
};

#[derive(Clone)]
pub struct AssetsService {
    repository: Repository,
    notifier: ChangeNotifier,
}

impl AssetsService {
    pub fn new(repository: Repository, notifier: ChangeNotifier) -> Self {
        Self { repository, notifier }
    }

    pub async fn list(&self, scope: &ScopeQuery) -> AppResult<Vec<Asset>> {
        self.repository.assets.list(scope.department_filter()).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Asset> {
        self.repository.assets.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateAsset) -> AppResult<i32> {
        data.validate()?;
        let id = self.repository.assets.create(data).await?;
        tracing::info!(asset_id = id, serial = %data.serial_number, "Asset created");
        self.notifier.publish(Entity::Asset, ChangeAction::Created, Some(id));
        Ok(id)
    }

    pub async fn update(&self, id: i32, data: &UpdateAsset) -> AppResult<()> {
        data.validate()?;

        // Check the resulting date pair, not only the provided half
        if data.purchase_date.is_some() || data.warranty_expiry.is_some() {
            let current = self.repository.assets.get_by_id(id).await?;
            check_warranty_dates(
                data.purchase_date.or(current.purchase_date),
                data.warranty_expiry.or(current.warranty_expiry),
            )
            .map_err(|e| {
                AppError::Validation(e.message.map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string()))
            })?;
        }

        self.repository.assets.update(id, data).await?;
        self.notifier.publish(Entity::Asset, ChangeAction::Updated, Some(id));
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.assets.delete(id).await?;
        tracing::info!(asset_id = id, "Asset deleted");
        self.notifier.publish(Entity::Asset, ChangeAction::Deleted, Some(id));
        Ok(())
    }

    pub async fn departments(&self) -> AppResult<Vec<Department>> {
        self.repository.assets.list_departments().await
    }

    /// Import spreadsheet rows. Nothing is inserted unless every row is valid.
    pub async fn bulk_upload(&self, rows: &[BulkAssetRow]) -> AppResult<usize> {
        if rows.is_empty() {
            return Err(AppError::Validation("No rows to import".to_string()));
        }

        let departments = self.repository.assets.list_departments().await?;
        let assets = validate_batch(rows, &departments).map_err(|report| {
            tracing::warn!(invalid_rows = report.len(), total_rows = rows.len(), "Bulk upload rejected");
            AppError::BulkValidation(report)
        })?;

        let inserted = self.repository.assets.bulk_insert(&assets).await?;
        tracing::info!(inserted, "Bulk asset upload completed");
        self.notifier.publish(Entity::Asset, ChangeAction::Created, None);
        Ok(inserted)
    }
}
