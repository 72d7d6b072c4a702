//! Multi-series yearly trends for selected categories.

use std::collections::BTreeMap;

use crime_dash_analytics_models::SeriesPoint;
use crime_dash_crime_models::CrimeCategory;
use crime_dash_dataset::{CategoryCounts, Dataset, YearRange};

use crate::AnalyticsError;

/// Long-form `(year, series, value)` rows for `categories`, restricted to
/// `years` (inclusive; `None` means every year).
///
/// Rows are grouped by series in the order given, then by year ascending.
/// Years without any record in range produce no point.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidRange`] if `years.start > years.end`.
pub fn yearly_category_series(
    dataset: &Dataset,
    categories: &[CrimeCategory],
    years: Option<YearRange>,
) -> Result<Vec<SeriesPoint>, AnalyticsError> {
    if let Some(range) = years
        && range.start > range.end
    {
        return Err(AnalyticsError::InvalidRange {
            field: "year".to_string(),
            min: i128::from(range.start),
            max: i128::from(range.end),
        });
    }

    let mut by_year: BTreeMap<i32, CategoryCounts> = BTreeMap::new();
    for record in dataset
        .iter()
        .filter(|r| years.is_none_or(|range| range.contains(r.year)))
    {
        by_year.entry(record.year).or_default().accumulate(&record.counts);
    }

    Ok(categories
        .iter()
        .flat_map(|category| {
            by_year.iter().map(move |(year, counts)| SeriesPoint {
                year: *year,
                series: *category,
                value: counts.get(*category),
            })
        })
        .collect())
}
