//! # Fundscope Web Server
//!
//! The HTTP surface over the dataset repository and the analytics engine. The
//! routes mirror the analysis workflow: upload an export, browse the fund
//! table, then pull returns, performance and risk numbers per fund or across
//! a selection of funds.
//!
//! All handlers read from a single snapshot of the current dataset taken at
//! the top of the request, so a concurrent upload can never tear a response.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use configuration::Settings;
use datastore::DatasetRepository;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub repo: DatasetRepository,
    pub settings: Arc<Settings>,
}

/// Builds the application router. Exposed separately from [`run_server`] so
/// tests can drive the router without binding a socket.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    let upload_limit = state.settings.server.upload_limit_mb * 1024 * 1024;

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/upload", post(handlers::upload::upload_source))
        .route("/api/data-status", get(handlers::upload::data_status))
        .route("/api/data", delete(handlers::upload::clear_data))
        .route("/api/funds", get(handlers::funds::list_funds))
        .route("/api/funds/compare", post(handlers::funds::compare_funds))
        .route("/api/funds/:fund_id", get(handlers::funds::fund_detail))
        .route("/api/returns/multiple", post(handlers::returns::multiple_returns))
        .route("/api/returns/:fund_id", get(handlers::returns::fund_returns))
        .route(
            "/api/performance/compare",
            post(handlers::performance::compare_performance),
        )
        .route(
            "/api/performance/rolling-returns",
            post(handlers::performance::rolling_returns),
        )
        .route(
            "/api/performance/:fund_id",
            get(handlers::performance::fund_performance),
        )
        .route(
            "/api/performance/:fund_id/calendar-years",
            get(handlers::performance::calendar_years),
        )
        .route(
            "/api/risk/correlation-matrix",
            post(handlers::risk::correlation_matrix),
        )
        .route("/api/risk/:fund_id", get(handlers::risk::fund_risk))
        .route("/api/risk/:fund_id/drawdown", get(handlers::risk::fund_drawdown))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(upload_limit))
}

/// The main function to configure and run the web server.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let state = Arc::new(AppState {
        repo: DatasetRepository::new(),
        settings: Arc::new(settings),
    });
    let app = router(state);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
