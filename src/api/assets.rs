//! Asset registry endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        asset::{Asset, CreateAsset, UpdateAsset},
        bulk_import::{BulkAssetRow, BulkUploadResponse},
        department::Department,
        user::ScopeQuery,
    },
};

use super::ActionResponse;

#[derive(Serialize, ToSchema)]
pub struct CreateAssetResponse {
    pub success: bool,
    pub message: String,
    pub asset_id: i32,
}

/// List assets visible to the caller
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    params(ScopeQuery),
    responses(
        (status = 200, description = "Assets ordered by id", body = Vec<Asset>)
    )
)]
pub async fn list_assets(
    State(state): State<crate::AppState>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<Json<Vec<Asset>>> {
    let assets = state.services.assets.list(&scope).await?;
    Ok(Json(assets))
}

/// Get asset by ID
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset details", body = Asset),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Asset>> {
    let asset = state.services.assets.get(id).await?;
    Ok(Json(asset))
}

/// Register an asset
#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    request_body = CreateAsset,
    responses(
        (status = 201, description = "Asset created", body = CreateAssetResponse),
        (status = 400, description = "Invalid asset", body = crate::error::ErrorResponse),
        (status = 422, description = "Unknown department", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_asset(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAsset>,
) -> AppResult<(StatusCode, Json<CreateAssetResponse>)> {
    let asset_id = state.services.assets.create(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateAssetResponse {
            success: true,
            message: "Asset added successfully".to_string(),
            asset_id,
        }),
    ))
}

/// Update an asset
#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = UpdateAsset,
    responses(
        (status = 200, description = "Asset updated", body = ActionResponse),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAsset>,
) -> AppResult<Json<ActionResponse>> {
    state.services.assets.update(id, &data).await?;
    Ok(ActionResponse::ok("Asset updated successfully"))
}

/// Delete an asset
#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset deleted", body = ActionResponse),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Asset still referenced", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActionResponse>> {
    state.services.assets.delete(id).await?;
    Ok(ActionResponse::ok("Asset deleted successfully"))
}

/// Import spreadsheet rows; the whole batch is rejected if any row is invalid
#[utoipa::path(
    post,
    path = "/assets/bulk-upload",
    tag = "assets",
    request_body = Vec<BulkAssetRow>,
    responses(
        (status = 201, description = "All rows imported", body = BulkUploadResponse),
        (status = 400, description = "Per-row validation report, nothing imported", body = crate::error::ErrorResponse)
    )
)]
pub async fn bulk_upload(
    State(state): State<crate::AppState>,
    Json(rows): Json<Vec<BulkAssetRow>>,
) -> AppResult<(StatusCode, Json<BulkUploadResponse>)> {
    let inserted = state.services.assets.bulk_upload(&rows).await?;
    Ok((
        StatusCode::CREATED,
        Json(BulkUploadResponse {
            success: true,
            message: format!("{} assets uploaded successfully", inserted),
            inserted,
        }),
    ))
}

/// Departments an asset can belong to
#[utoipa::path(
    get,
    path = "/departments",
    tag = "assets",
    responses(
        (status = 200, description = "Departments ordered by id", body = Vec<Department>)
    )
)]
pub async fn list_departments(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Department>>> {
    let departments = state.services.assets.departments().await?;
    Ok(Json(departments))
}
