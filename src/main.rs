//! AssetDesk Server - IT asset lifecycle tracker
//!
//! REST API over assets, complaints, call logs and PM reports.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assetdesk_server::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::Repository,
    services::Services,
    AppState,
};

/// Room left for the other multipart fields on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.logging);

    tracing::info!("Starting AssetDesk Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Database migrations completed");

    tokio::fs::create_dir_all(&config.uploads.dir).await?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, &config).await?;

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("assetdesk_server={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_limit = state.config.uploads.max_file_size + MULTIPART_OVERHEAD;
    let uploads_dir = state.config.uploads.dir.clone();

    let api_routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Login & users
        .route("/login", post(api::auth::login))
        .route("/users", get(api::users::list_users))
        // Assets
        .route("/assets", get(api::assets::list_assets).post(api::assets::create_asset))
        .route("/assets/bulk-upload", post(api::assets::bulk_upload))
        .route(
            "/assets/:id",
            get(api::assets::get_asset)
                .put(api::assets::update_asset)
                .delete(api::assets::delete_asset),
        )
        .route("/departments", get(api::assets::list_departments))
        // Complaints
        .route(
            "/complaints",
            get(api::complaints::list_complaints).post(api::complaints::create_complaint),
        )
        .route(
            "/complaints/:id",
            get(api::complaints::get_complaint)
                .put(api::complaints::update_complaint)
                .delete(api::complaints::delete_complaint),
        )
        // Call logs
        .route(
            "/call-logs",
            get(api::call_logs::list_call_logs).post(api::call_logs::create_call_log),
        )
        .route(
            "/call-logs/:id",
            get(api::call_logs::get_call_log)
                .put(api::call_logs::update_call_log)
                .delete(api::call_logs::delete_call_log),
        )
        // PM reports
        .route(
            "/pm-reports",
            get(api::pm_reports::list_reports)
                .post(api::pm_reports::upload_report)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/pm-reports/:id",
            get(api::pm_reports::get_report)
                .put(api::pm_reports::update_report)
                .delete(api::pm_reports::delete_report),
        )
        .route("/pm-reports/download/:id", get(api::pm_reports::download_report))
        // Dashboard & analytics
        .route("/dashboard", get(api::dashboard::get_dashboard))
        .route("/analytics", get(api::dashboard::get_analytics))
        .route("/analytics/assets/status", get(api::dashboard::get_asset_status))
        // Live updates
        .route("/changes", get(api::changes::stream_changes))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .merge(openapi)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
}
