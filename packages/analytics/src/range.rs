//! Numeric range filter over a runtime-selected column.

use crime_dash_analytics_models::RangeRow;
use crime_dash_crime_models::NumericColumn;
use crime_dash_dataset::Dataset;

use crate::AnalyticsError;

/// Observed min/max of `column`, or `None` for an empty dataset.
///
/// Used as the default bounds of the range inputs.
#[must_use]
pub fn numeric_column_bounds(dataset: &Dataset, column: NumericColumn) -> Option<(u64, u64)> {
    let min = dataset.iter().map(|r| r.value(column)).min()?;
    let max = dataset.iter().map(|r| r.value(column)).max()?;
    Some((min, max))
}

/// Returns the records whose `column` value lies in `min..=max`, projected
/// onto state, district, year and the selected value.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidRange`] if `min > max`.
pub fn filter_by_range(
    dataset: &Dataset,
    column: NumericColumn,
    min: u64,
    max: u64,
) -> Result<Vec<RangeRow>, AnalyticsError> {
    if min > max {
        return Err(AnalyticsError::InvalidRange {
            field: column.to_string(),
            min: i128::from(min),
            max: i128::from(max),
        });
    }

    let rows: Vec<RangeRow> = dataset
        .iter()
        .filter_map(|r| {
            let value = r.value(column);
            (min..=max).contains(&value).then(|| RangeRow {
                state: r.state.clone(),
                district: r.district.clone(),
                year: r.year,
                value,
            })
        })
        .collect();

    log::debug!("Range filter on {column} [{min}, {max}] matched {} rows", rows.len());

    Ok(rows)
}
