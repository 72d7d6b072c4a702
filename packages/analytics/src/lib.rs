#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation library for the crime statistics dashboard.
//!
//! Each public function takes a read-only [`Dataset`](crime_dash_dataset::Dataset)
//! and returns a small by-value table from
//! [`crime_dash_analytics_models`]. Nothing here holds state between calls;
//! [`dashboard::build_dashboard`] runs the whole set for one render.

pub mod dashboard;
pub mod metrics;
pub mod range;
pub mod rankings;
pub mod totals;
pub mod trends;

use thiserror::Error;

pub use dashboard::build_dashboard;
pub use metrics::{dashboard_metrics, filter_options};
pub use range::{filter_by_range, numeric_column_bounds};
pub use rankings::{dominant_category_by_state, state_extremes, top_districts};
pub use totals::{
    category_distribution, region_totals, state_totals, state_year_pivot, state_year_totals,
    yearly_totals,
};
pub use trends::yearly_category_series;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    /// A caller-supplied range has its lower bound above its upper bound.
    #[error("Invalid {field} range: min {min} is greater than max {max}")]
    InvalidRange {
        /// What the range bounds (column or `"year"`).
        field: String,
        /// Lower bound supplied.
        min: i128,
        /// Upper bound supplied.
        max: i128,
    },
}
