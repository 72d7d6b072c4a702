//! Headline metrics and filter control options.

use crime_dash_analytics_models::{DashboardMetrics, FilterOptions};
use crime_dash_crime_models::{CrimeCategory, NumericColumn};
use crime_dash_dataset::Dataset;

/// Distinct state / district / year counts and Σ `Total Crime`.
#[must_use]
pub fn dashboard_metrics(dataset: &Dataset) -> DashboardMetrics {
    DashboardMetrics {
        states: dataset.distinct_states().len(),
        districts: dataset.distinct_districts().len(),
        years: dataset.distinct_years().len(),
        total_crime: dataset.total_crime(),
    }
}

/// Sorted distinct values for the selection controls, plus the columns
/// usable in the range filter and the categories usable in the rankings.
#[must_use]
pub fn filter_options(dataset: &Dataset) -> FilterOptions {
    FilterOptions {
        states: dataset.distinct_states().into_iter().collect(),
        districts: dataset.distinct_districts().into_iter().collect(),
        years: dataset.distinct_years().into_iter().collect(),
        year_bounds: dataset.year_bounds(),
        numeric_columns: NumericColumn::all(),
        categories: CrimeCategory::all().to_vec(),
    }
}
