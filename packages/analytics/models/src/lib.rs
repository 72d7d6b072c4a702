#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation result types for the crime statistics dashboard.
//!
//! Every type here is a by-value snapshot ready to be charted as-is: the
//! presentation layer never has to regroup or reshape them.

use crime_dash_crime_models::{CrimeCategory, NumericColumn};
use crime_dash_dataset_models::{FilterSelection, YearRange};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Σ `Total Crime` for one (state, year) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateYearTotal {
    /// State name.
    pub state: String,
    /// Year.
    pub year: i32,
    /// Summed total.
    pub total: u64,
}

/// One row returned by a numeric range filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeRow {
    /// State name.
    pub state: String,
    /// District name.
    pub district: String,
    /// Year.
    pub year: i32,
    /// Value of the selected column.
    pub value: u64,
}

/// Σ `Total Crime` for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearTotal {
    /// Year.
    pub year: i32,
    /// Summed total.
    pub total: u64,
}

/// Σ `Total Crime` for one named region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionTotal {
    /// Region (state / union territory) name.
    pub region: String,
    /// Summed total.
    pub total: u64,
}

/// One point of a long-form multi-series yearly chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// Year.
    pub year: i32,
    /// Series the point belongs to.
    pub series: CrimeCategory,
    /// Σ of the series' category in that year.
    pub value: u64,
}

/// Σ of one category over a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// Category.
    pub category: CrimeCategory,
    /// Summed count.
    pub total: u64,
}

/// Which end of the state ranking a row belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Extreme {
    /// Among the states with the largest totals.
    Highest,
    /// Among the states with the smallest totals.
    Lowest,
}

/// A state tagged as one of the highest or lowest by total crime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateExtreme {
    /// State name.
    pub state: String,
    /// Σ `Total Crime`.
    pub total: u64,
    /// Highest or lowest group.
    pub group: Extreme,
}

/// The most frequent category of a state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DominantCategory {
    /// State name.
    pub state: String,
    /// Category with the largest sum.
    pub category: CrimeCategory,
    /// That category's sum.
    pub count: u64,
}

/// Σ of one category for a district label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictTotal {
    /// District name.
    pub district: String,
    /// Summed count.
    pub total: u64,
}

/// State × year matrix of Σ `Total Crime`, zero filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotTable {
    /// Column labels, ascending.
    pub years: Vec<i32>,
    /// Row labels, ascending.
    pub states: Vec<String>,
    /// `values[row][col]` for `states[row]` and `years[col]`.
    pub values: Vec<Vec<u64>>,
}

impl PivotTable {
    /// Cell value, `0` for any combination not in the table.
    #[must_use]
    pub fn cell(&self, state: &str, year: i32) -> u64 {
        let Some(row) = self.states.iter().position(|s| s == state) else {
            return 0;
        };
        let Some(col) = self.years.iter().position(|y| *y == year) else {
            return 0;
        };
        self.values[row][col]
    }

    /// Sum over all cells.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.values.iter().flatten().sum()
    }
}

/// Headline metrics over the filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Distinct states.
    pub states: usize,
    /// Distinct districts.
    pub districts: usize,
    /// Distinct years.
    pub years: usize,
    /// Σ `Total Crime`.
    pub total_crime: u64,
}

/// The values a user can choose from in the filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Distinct states.
    pub states: Vec<String>,
    /// Distinct districts.
    pub districts: Vec<String>,
    /// Distinct years.
    pub years: Vec<i32>,
    /// Bounds for the year-range slider.
    pub year_bounds: Option<YearRange>,
    /// Columns for the numeric column picker.
    pub numeric_columns: Vec<NumericColumn>,
    /// Categories for the top districts picker.
    pub categories: Vec<CrimeCategory>,
}

/// Range filter input: a column with optional bounds (defaulting to the
/// column's observed min/max).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    /// Column to filter on.
    pub column: NumericColumn,
    /// Inclusive lower bound.
    pub min: Option<u64>,
    /// Inclusive upper bound.
    pub max: Option<u64>,
}

/// Result of the range filter view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeFilterView {
    /// Column filtered on.
    pub column: NumericColumn,
    /// Effective lower bound.
    pub min: u64,
    /// Effective upper bound.
    pub max: u64,
    /// Number of matching rows.
    pub row_count: usize,
    /// Matching rows (empty when the bounds were rejected).
    pub rows: Vec<RangeRow>,
}

/// Top districts for the selected category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDistricts {
    /// Category ranked by.
    pub category: CrimeCategory,
    /// Districts, descending.
    pub rows: Vec<DistrictTotal>,
}

/// Everything a dashboard render needs from the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRequest {
    /// State / district / year filter.
    #[serde(default)]
    pub selection: FilterSelection,
    /// Numeric range filter; defaults to `Total Crime` over its full range.
    #[serde(default)]
    pub range: Option<RangeQuery>,
    /// Year range for the special-acts trend; defaults to all years.
    #[serde(default)]
    pub special_acts_years: Option<YearRange>,
    /// Category for the top districts ranking; defaults to the configured
    /// category.
    #[serde(default)]
    pub district_category: Option<CrimeCategory>,
}

/// One full render of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Metrics over the filtered view.
    pub metrics: DashboardMetrics,
    /// Σ `Total Crime` by state and year over the filtered view.
    pub state_year_totals: Vec<StateYearTotal>,
    /// Numeric range filter.
    pub range_filter: RangeFilterView,
    /// Σ `Total Crime` by year over the whole dataset.
    pub yearly_totals: Vec<YearTotal>,
    /// Σ `Total Crime` per union territory.
    pub union_territories: Vec<RegionTotal>,
    /// Special-acts trend over the selected years.
    pub special_acts_trend: Vec<SeriesPoint>,
    /// Murder / assault trend over all years.
    pub violent_trend: Vec<SeriesPoint>,
    /// Σ per category.
    pub category_distribution: Vec<CategoryTotal>,
    /// Highest and lowest states.
    pub state_extremes: Vec<StateExtreme>,
    /// Most frequent category per state.
    pub dominant_categories: Vec<DominantCategory>,
    /// Top districts for the selected category.
    pub top_districts: TopDistricts,
    /// State × year heatmap.
    pub heatmap: PivotTable,
    /// Recoverable input problems (e.g. a range with min > max). The
    /// affected views are empty rather than missing.
    pub warnings: Vec<String>,
}
