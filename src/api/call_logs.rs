//! Call log endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::call_log::{CallLog, CreateCallLog, UpdateCallLog},
};

use super::ActionResponse;

#[derive(Serialize, ToSchema)]
pub struct CreateCallLogResponse {
    pub success: bool,
    pub message: String,
    pub call_id: i32,
}

/// List call logs, newest first
#[utoipa::path(
    get,
    path = "/call-logs",
    tag = "call-logs",
    responses(
        (status = 200, description = "Call logs", body = Vec<CallLog>)
    )
)]
pub async fn list_call_logs(State(state): State<crate::AppState>) -> AppResult<Json<Vec<CallLog>>> {
    let logs = state.services.call_logs.list().await?;
    Ok(Json(logs))
}

/// Get call log by ID
#[utoipa::path(
    get,
    path = "/call-logs/{id}",
    tag = "call-logs",
    params(("id" = i32, Path, description = "Call log ID")),
    responses(
        (status = 200, description = "Call log", body = CallLog),
        (status = 404, description = "Call log not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_call_log(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CallLog>> {
    let log = state.services.call_logs.get(id).await?;
    Ok(Json(log))
}

/// Record a call
#[utoipa::path(
    post,
    path = "/call-logs",
    tag = "call-logs",
    request_body = CreateCallLog,
    responses(
        (status = 201, description = "Call log created", body = CreateCallLogResponse),
        (status = 400, description = "Invalid call log", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_call_log(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateCallLog>,
) -> AppResult<(StatusCode, Json<CreateCallLogResponse>)> {
    let call_id = state.services.call_logs.create(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateCallLogResponse {
            success: true,
            message: "Call log created successfully".to_string(),
            call_id,
        }),
    ))
}

/// Update a call log
#[utoipa::path(
    put,
    path = "/call-logs/{id}",
    tag = "call-logs",
    params(("id" = i32, Path, description = "Call log ID")),
    request_body = UpdateCallLog,
    responses(
        (status = 200, description = "Call log updated", body = ActionResponse),
        (status = 404, description = "Call log not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_call_log(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateCallLog>,
) -> AppResult<Json<ActionResponse>> {
    state.services.call_logs.update(id, &data).await?;
    Ok(ActionResponse::ok("Call log updated successfully"))
}

/// Delete a call log
#[utoipa::path(
    delete,
    path = "/call-logs/{id}",
    tag = "call-logs",
    params(("id" = i32, Path, description = "Call log ID")),
    responses(
        (status = 200, description = "Call log deleted", body = ActionResponse),
        (status = 404, description = "Call log not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_call_log(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActionResponse>> {
    state.services.call_logs.delete(id).await?;
    Ok(ActionResponse::ok("Call log deleted successfully"))
}
