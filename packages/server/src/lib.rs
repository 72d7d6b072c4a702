#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web JSON API for the crime statistics dashboard.
//!
//! The dataset is loaded once at startup and shared read-only between
//! workers. Every request recomputes its view from its own query
//! parameters, so no per-user state lives on the server.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, ResponseError, middleware, web};
use crime_dash_analytics::AnalyticsError;
use crime_dash_config::{DashboardConfig, ServerSettings};
use crime_dash_dataset::Dataset;
use crime_dash_server_models::{ApiError, ParamError};

/// Shared application state.
pub struct AppState {
    /// The cleaned dataset.
    pub dataset: Arc<Dataset>,
    /// Dashboard configuration.
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    /// Wraps a loaded dataset and its configuration.
    #[must_use]
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            config: Arc::new(config),
        }
    }
}

/// Errors returned by request handlers. All of them are the caller's
/// fault and map to `400 Bad Request`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A query parameter could not be interpreted.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// The aggregation rejected its inputs.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        log::warn!("Rejected request: {self}");
        HttpResponse::build(self.status_code()).json(ApiError {
            error: self.to_string(),
        })
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/categories", web::get().to(handlers::categories))
            .route("/options", web::get().to(handlers::options))
            .route("/metrics", web::get().to(handlers::metrics))
            .route(
                "/state-year-totals",
                web::get().to(handlers::state_year_totals),
            )
            .route("/range", web::get().to(handlers::range))
            .route("/yearly-totals", web::get().to(handlers::yearly_totals))
            .route(
                "/union-territories",
                web::get().to(handlers::union_territories),
            )
            .route("/special-acts", web::get().to(handlers::special_acts))
            .route("/violent-trend", web::get().to(handlers::violent_trend))
            .route(
                "/category-distribution",
                web::get().to(handlers::category_distribution),
            )
            .route("/state-extremes", web::get().to(handlers::state_extremes))
            .route(
                "/dominant-categories",
                web::get().to(handlers::dominant_categories),
            )
            .route("/top-districts", web::get().to(handlers::top_districts))
            .route("/heatmap", web::get().to(handlers::heatmap))
            .route("/dashboard", web::get().to(handlers::dashboard)),
    );
}

/// Starts the dashboard API server.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`) and initializes logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(state: AppState, settings: &ServerSettings) -> std::io::Result<()> {
    log::info!(
        "Serving {} records on {}:{}",
        state.dataset.len(),
        settings.bind_addr,
        settings.port
    );

    let state = web::Data::new(state);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((settings.bind_addr.as_str(), settings.port))?
    .run()
    .await
}
