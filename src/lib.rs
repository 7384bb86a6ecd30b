//! AssetDesk server
//!
//! Tracks IT assets, the complaints raised against them, support call logs
//! and preventive maintenance reports, and serves role-scoped dashboards
//! over a REST JSON API.

use std::sync::Arc;

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
