//! HTTP handler functions for the dashboard API.

use actix_web::{HttpResponse, web};
use crime_dash_analytics as analytics;
use crime_dash_analytics_models::{RangeFilterView, TopDistricts};
use crime_dash_crime_models::{CrimeCategory, NumericColumn};
use crime_dash_server_models::{
    ApiCategories, ApiHealth, DashboardQueryParams, ExtremesQueryParams, RangeQueryParams,
    SelectionQueryParams, TopDistrictsQueryParams, YearRangeQueryParams,
};

use crate::{AppState, ServerError};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/categories`
pub async fn categories() -> HttpResponse {
    HttpResponse::Ok().json(ApiCategories {
        categories: CrimeCategory::all().to_vec(),
        numeric_columns: NumericColumn::all(),
    })
}

/// `GET /api/options`
///
/// Distinct values for the selection controls.
pub async fn options(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(analytics::filter_options(&state.dataset))
}

/// `GET /api/metrics`
pub async fn metrics(
    state: web::Data<AppState>,
    params: web::Query<SelectionQueryParams>,
) -> Result<HttpResponse, ServerError> {
    let filtered = state.dataset.filter(&params.to_selection()?);
    Ok(HttpResponse::Ok().json(analytics::dashboard_metrics(&filtered)))
}

/// `GET /api/state-year-totals`
pub async fn state_year_totals(
    state: web::Data<AppState>,
    params: web::Query<SelectionQueryParams>,
) -> Result<HttpResponse, ServerError> {
    let filtered = state.dataset.filter(&params.to_selection()?);
    Ok(HttpResponse::Ok().json(analytics::state_year_totals(&filtered)))
}

/// `GET /api/range`
///
/// Rows whose selected column lies within `[min, max]`. Missing bounds
/// default to the column's observed extremes.
pub async fn range(
    state: web::Data<AppState>,
    params: web::Query<RangeQueryParams>,
) -> Result<HttpResponse, ServerError> {
    let query = params.to_query()?;
    let (observed_min, observed_max) =
        analytics::numeric_column_bounds(&state.dataset, query.column).unwrap_or((0, 0));
    let min = query.min.unwrap_or(observed_min);
    let max = query.max.unwrap_or(observed_max);

    let rows = analytics::filter_by_range(&state.dataset, query.column, min, max)?;

    Ok(HttpResponse::Ok().json(RangeFilterView {
        column: query.column,
        min,
        max,
        row_count: rows.len(),
        rows,
    }))
}

/// `GET /api/yearly-totals`
pub async fn yearly_totals(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(analytics::yearly_totals(&state.dataset))
}

/// `GET /api/union-territories`
pub async fn union_territories(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(analytics::region_totals(
        &state.dataset,
        &state.config.union_territories(),
    ))
}

/// `GET /api/special-acts`
pub async fn special_acts(
    state: web::Data<AppState>,
    params: web::Query<YearRangeQueryParams>,
) -> Result<HttpResponse, ServerError> {
    let points = analytics::yearly_category_series(
        &state.dataset,
        &state.config.dashboard.special_acts,
        params.to_range(),
    )?;
    Ok(HttpResponse::Ok().json(points))
}

/// `GET /api/violent-trend`
pub async fn violent_trend(state: web::Data<AppState>) -> Result<HttpResponse, ServerError> {
    let points = analytics::yearly_category_series(
        &state.dataset,
        &state.config.dashboard.violent_trend,
        None,
    )?;
    Ok(HttpResponse::Ok().json(points))
}

/// `GET /api/category-distribution`
pub async fn category_distribution(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(analytics::category_distribution(&state.dataset))
}

/// `GET /api/state-extremes`
pub async fn state_extremes(
    state: web::Data<AppState>,
    params: web::Query<ExtremesQueryParams>,
) -> HttpResponse {
    let n = params.n.unwrap_or(state.config.dashboard.extremes_count);
    HttpResponse::Ok().json(analytics::state_extremes(&state.dataset, n))
}

/// `GET /api/dominant-categories`
pub async fn dominant_categories(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(analytics::dominant_category_by_state(
        &state.dataset,
        CrimeCategory::all(),
    ))
}

/// `GET /api/top-districts`
pub async fn top_districts(
    state: web::Data<AppState>,
    params: web::Query<TopDistrictsQueryParams>,
) -> Result<HttpResponse, ServerError> {
    let dashboard = &state.config.dashboard;
    let category = params
        .category()?
        .unwrap_or(dashboard.default_district_category);
    let limit = params.limit.unwrap_or(dashboard.top_districts_limit);

    Ok(HttpResponse::Ok().json(TopDistricts {
        category,
        rows: analytics::top_districts(
            &state.dataset,
            category,
            &dashboard.district_sentinel,
            limit,
        ),
    }))
}

/// `GET /api/heatmap`
pub async fn heatmap(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(analytics::state_year_pivot(&state.dataset))
}

/// `GET /api/dashboard`
///
/// The full snapshot for one render. Invalid bounds are reported in the
/// snapshot's `warnings` rather than failing the request.
pub async fn dashboard(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> Result<HttpResponse, ServerError> {
    let request = params.to_request()?;
    Ok(HttpResponse::Ok().json(analytics::build_dashboard(
        &state.dataset,
        &state.config,
        &request,
    )))
}
