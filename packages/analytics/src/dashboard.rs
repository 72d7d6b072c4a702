//! One full dashboard render.

use crime_dash_analytics_models::{
    DashboardRequest, DashboardSnapshot, RangeFilterView, RangeQuery, SeriesPoint, TopDistricts,
};
use crime_dash_config::DashboardConfig;
use crime_dash_crime_models::{CrimeCategory, NumericColumn};
use crime_dash_dataset::{Dataset, YearRange};

use crate::{
    category_distribution, dashboard_metrics, dominant_category_by_state, filter_by_range,
    numeric_column_bounds, region_totals, state_extremes, state_year_pivot, state_year_totals,
    top_districts, yearly_category_series, yearly_totals,
};

/// Computes every view for `request`.
///
/// Metrics and the state/year totals follow the user's selection; every
/// other view is computed over the whole dataset. Invalid range or year
/// bounds never fail the render: the affected view is left empty and a
/// message is added to [`DashboardSnapshot::warnings`].
#[must_use]
pub fn build_dashboard(
    dataset: &Dataset,
    config: &DashboardConfig,
    request: &DashboardRequest,
) -> DashboardSnapshot {
    let filtered = dataset.filter(&request.selection);
    let mut warnings = Vec::new();

    let range_filter = range_view(dataset, request.range, &mut warnings);

    let special_acts_trend = series_or_warn(
        dataset,
        &config.dashboard.special_acts,
        request.special_acts_years,
        &mut warnings,
    );
    let violent_trend =
        series_or_warn(dataset, &config.dashboard.violent_trend, None, &mut warnings);

    let district_category = request
        .district_category
        .unwrap_or(config.dashboard.default_district_category);

    let snapshot = DashboardSnapshot {
        metrics: dashboard_metrics(&filtered),
        state_year_totals: state_year_totals(&filtered),
        range_filter,
        yearly_totals: yearly_totals(dataset),
        union_territories: region_totals(dataset, &config.union_territories()),
        special_acts_trend,
        violent_trend,
        category_distribution: category_distribution(dataset),
        state_extremes: state_extremes(dataset, config.dashboard.extremes_count),
        dominant_categories: dominant_category_by_state(dataset, CrimeCategory::all()),
        top_districts: TopDistricts {
            category: district_category,
            rows: top_districts(
                dataset,
                district_category,
                &config.dashboard.district_sentinel,
                config.dashboard.top_districts_limit,
            ),
        },
        heatmap: state_year_pivot(dataset),
        warnings,
    };

    log::debug!(
        "Built dashboard: {} of {} records selected, {} warnings",
        filtered.len(),
        dataset.len(),
        snapshot.warnings.len(),
    );

    snapshot
}

fn range_view(
    dataset: &Dataset,
    query: Option<RangeQuery>,
    warnings: &mut Vec<String>,
) -> RangeFilterView {
    let column = query.map_or(NumericColumn::TotalCrime, |q| q.column);
    let (observed_min, observed_max) = numeric_column_bounds(dataset, column).unwrap_or((0, 0));
    let min = query.and_then(|q| q.min).unwrap_or(observed_min);
    let max = query.and_then(|q| q.max).unwrap_or(observed_max);

    let rows = filter_by_range(dataset, column, min, max).unwrap_or_else(|e| {
        log::warn!("{e}");
        warnings.push(e.to_string());
        Vec::new()
    });

    RangeFilterView {
        column,
        min,
        max,
        row_count: rows.len(),
        rows,
    }
}

fn series_or_warn(
    dataset: &Dataset,
    categories: &[CrimeCategory],
    years: Option<YearRange>,
    warnings: &mut Vec<String>,
) -> Vec<SeriesPoint> {
    yearly_category_series(dataset, categories, years).unwrap_or_else(|e| {
        log::warn!("{e}");
        warnings.push(e.to_string());
        Vec::new()
    })
}
