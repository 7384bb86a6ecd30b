//! Complaint endpoints

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
        complaint::{Complaint, CreateComplaint, UpdateComplaint},
        user::ScopeQuery,
    },
};

use super::ActionResponse;

#[derive(Serialize, ToSchema)]
pub struct CreateComplaintResponse {
    pub success: bool,
    pub message: String,
    pub comp_id: i32,
}

#[derive(Serialize, ToSchema)]
pub struct UpdateComplaintResponse {
    pub success: bool,
    pub message: String,
    /// Derived resolution time (HH:MM:SS), null while unresolved
    pub total_time_taken: Option<String>,
}

/// List complaints; engineers with a department only see that department's complaints
#[utoipa::path(
    get,
    path = "/complaints",
    tag = "complaints",
    params(ScopeQuery),
    responses(
        (status = 200, description = "Complaints, oldest first", body = Vec<Complaint>)
    )
)]
pub async fn list_complaints(
    State(state): State<crate::AppState>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<Json<Vec<Complaint>>> {
    let complaints = state.services.complaints.list(&scope).await?;
    Ok(Json(complaints))
}

/// Get complaint by ID
#[utoipa::path(
    get,
    path = "/complaints/{id}",
    tag = "complaints",
    params(("id" = i32, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint details", body = Complaint),
        (status = 404, description = "Complaint not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_complaint(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Complaint>> {
    let complaint = state.services.complaints.get(id).await?;
    Ok(Json(complaint))
}

/// Raise a complaint against an asset
#[utoipa::path(
    post,
    path = "/complaints",
    tag = "complaints",
    request_body = CreateComplaint,
    responses(
        (status = 201, description = "Complaint created", body = CreateComplaintResponse),
        (status = 400, description = "Invalid complaint", body = crate::error::ErrorResponse),
        (status = 422, description = "Unknown asset or user", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_complaint(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateComplaint>,
) -> AppResult<(StatusCode, Json<CreateComplaintResponse>)> {
    let comp_id = state.services.complaints.create(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateComplaintResponse {
            success: true,
            message: "Complaint created successfully".to_string(),
            comp_id,
        }),
    ))
}

/// Update a complaint; resolution time is derived from `actual_res_date`
#[utoipa::path(
    put,
    path = "/complaints/{id}",
    tag = "complaints",
    params(("id" = i32, Path, description = "Complaint ID")),
    request_body = UpdateComplaint,
    responses(
        (status = 200, description = "Complaint updated", body = UpdateComplaintResponse),
        (status = 400, description = "Invalid field or status transition", body = crate::error::ErrorResponse),
        (status = 404, description = "Complaint not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_complaint(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateComplaint>,
) -> AppResult<Json<UpdateComplaintResponse>> {
    let lifecycle = state.services.complaints.update(id, &data).await?;
    Ok(Json(UpdateComplaintResponse {
        success: true,
        message: "Complaint updated successfully".to_string(),
        total_time_taken: lifecycle.total_time_taken,
    }))
}

/// Delete a complaint
#[utoipa::path(
    delete,
    path = "/complaints/{id}",
    tag = "complaints",
    params(("id" = i32, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint deleted", body = ActionResponse),
        (status = 404, description = "Complaint not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_complaint(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActionResponse>> {
    state.services.complaints.delete(id).await?;
    Ok(ActionResponse::ok("Complaint deleted successfully"))
}
