//! API handlers for AssetDesk REST endpoints

pub mod assets;
pub mod auth;
pub mod call_logs;
pub mod changes;
pub mod complaints;
pub mod dashboard;
pub mod health;
pub mod openapi;
pub mod pm_reports;
pub mod users;

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of an update or delete
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}
