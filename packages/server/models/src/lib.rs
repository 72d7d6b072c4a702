#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the crime dashboard server.
//!
//! Query parameter structs mirror the dashboard controls. Selections are
//! comma-separated lists: an absent parameter selects everything, a present
//! but empty one selects nothing.

use std::str::FromStr as _;

use crime_dash_analytics_models::{DashboardRequest, RangeQuery};
use crime_dash_crime_models::{CrimeCategory, NumericColumn};
use crime_dash_dataset_models::{FilterSelection, Selection, YearRange};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// The categories and numeric columns the API understands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategories {
    /// Declared crime categories, in column order.
    pub categories: Vec<CrimeCategory>,
    /// Columns accepted by the range endpoint.
    pub numeric_columns: Vec<NumericColumn>,
}

/// Error body returned with `4xx`/`5xx` responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

/// A query parameter that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamError {
    /// Name of the offending parameter.
    pub param: &'static str,
    /// What was wrong with it.
    pub message: String,
}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid '{}' parameter: {}", self.param, self.message)
    }
}

impl std::error::Error for ParamError {}

/// State / district / year selection parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionQueryParams {
    /// Comma-separated state names.
    pub states: Option<String>,
    /// Comma-separated district names.
    pub districts: Option<String>,
    /// Comma-separated years.
    pub years: Option<String>,
}

impl SelectionQueryParams {
    /// Converts the parameters into a [`FilterSelection`].
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] if `years` holds a non-integer entry.
    pub fn to_selection(&self) -> Result<FilterSelection, ParamError> {
        parse_selection(
            self.states.as_deref(),
            self.districts.as_deref(),
            self.years.as_deref(),
        )
    }
}

/// Parameters of the range endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQueryParams {
    /// Column header; defaults to `Total Crime`.
    pub column: Option<String>,
    /// Inclusive lower bound; defaults to the observed minimum.
    pub min: Option<u64>,
    /// Inclusive upper bound; defaults to the observed maximum.
    pub max: Option<u64>,
}

impl RangeQueryParams {
    /// Converts the parameters into a [`RangeQuery`].
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] if `column` names no numeric column.
    pub fn to_query(&self) -> Result<RangeQuery, ParamError> {
        Ok(RangeQuery {
            column: parse_column(self.column.as_deref())?,
            min: self.min,
            max: self.max,
        })
    }
}

/// Year bounds for the special-acts trend.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRangeQueryParams {
    /// First included year.
    pub from: Option<i32>,
    /// Last included year.
    pub to: Option<i32>,
}

impl YearRangeQueryParams {
    /// The requested range, or `None` when neither bound is given.
    #[must_use]
    pub fn to_range(&self) -> Option<YearRange> {
        year_range(self.from, self.to)
    }
}

/// Parameters of the state extremes endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtremesQueryParams {
    /// States per group; defaults to the configured count.
    pub n: Option<usize>,
}

/// Parameters of the top districts endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDistrictsQueryParams {
    /// Category header; defaults to the configured category.
    pub category: Option<String>,
    /// Maximum rows; defaults to the configured limit.
    pub limit: Option<usize>,
}

impl TopDistrictsQueryParams {
    /// The requested category, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] if `category` names no declared category.
    pub fn category(&self) -> Result<Option<CrimeCategory>, ParamError> {
        parse_category(self.category.as_deref())
    }
}

/// All controls of a dashboard render, flattened into one query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQueryParams {
    /// Comma-separated state names.
    pub states: Option<String>,
    /// Comma-separated district names.
    pub districts: Option<String>,
    /// Comma-separated years.
    pub years: Option<String>,
    /// Range filter column.
    pub column: Option<String>,
    /// Range filter lower bound.
    pub min: Option<u64>,
    /// Range filter upper bound.
    pub max: Option<u64>,
    /// First year of the special-acts trend.
    pub from: Option<i32>,
    /// Last year of the special-acts trend.
    pub to: Option<i32>,
    /// Top districts category.
    pub category: Option<String>,
}

impl DashboardQueryParams {
    /// Converts the parameters into a [`DashboardRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] if a year, column or category is not
    /// recognized.
    pub fn to_request(&self) -> Result<DashboardRequest, ParamError> {
        let range = if self.column.is_none() && self.min.is_none() && self.max.is_none() {
            None
        } else {
            Some(RangeQuery {
                column: parse_column(self.column.as_deref())?,
                min: self.min,
                max: self.max,
            })
        };

        Ok(DashboardRequest {
            selection: parse_selection(
                self.states.as_deref(),
                self.districts.as_deref(),
                self.years.as_deref(),
            )?,
            range,
            special_acts_years: year_range(self.from, self.to),
            district_category: parse_category(self.category.as_deref())?,
        })
    }
}

fn parse_selection(
    states: Option<&str>,
    districts: Option<&str>,
    years: Option<&str>,
) -> Result<FilterSelection, ParamError> {
    Ok(FilterSelection {
        states: Selection::parse_names(states),
        districts: Selection::parse_names(districts),
        years: Selection::parse_years(years).map_err(|e| ParamError {
            param: "years",
            message: e.to_string(),
        })?,
    })
}

fn parse_column(column: Option<&str>) -> Result<NumericColumn, ParamError> {
    column.map_or(Ok(NumericColumn::TotalCrime), |name| {
        NumericColumn::from_str(name).map_err(|e| ParamError {
            param: "column",
            message: e.to_string(),
        })
    })
}

fn parse_category(category: Option<&str>) -> Result<Option<CrimeCategory>, ParamError> {
    category
        .map(|name| {
            CrimeCategory::from_str(name.trim()).map_err(|_| ParamError {
                param: "category",
                message: format!("unknown crime category '{name}'"),
            })
        })
        .transpose()
}

fn year_range(from: Option<i32>, to: Option<i32>) -> Option<YearRange> {
    if from.is_none() && to.is_none() {
        return None;
    }
    Some(YearRange::new(
        from.unwrap_or(i32::MIN),
        to.unwrap_or(i32::MAX),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_selection_means_all_and_empty_means_none() {
        let all = SelectionQueryParams::default().to_selection().unwrap();
        assert_eq!(all, FilterSelection::all());

        let none = SelectionQueryParams {
            states: Some(String::new()),
            districts: Some(String::new()),
            years: Some(String::new()),
        }
        .to_selection()
        .unwrap();
        assert_eq!(none, FilterSelection::none());
    }

    #[test]
    fn selection_names_are_canonicalized() {
        let selection = SelectionQueryParams {
            states: Some("DELHI, goa".to_string()),
            districts: None,
            years: Some("2001,2003".to_string()),
        }
        .to_selection()
        .unwrap();

        assert_eq!(
            selection.states,
            Selection::Only(["Delhi".to_string(), "Goa".to_string()].into())
        );
        assert_eq!(selection.years, Selection::Only([2001, 2003].into()));
    }

    #[test]
    fn bad_year_is_reported() {
        let err = SelectionQueryParams {
            years: Some("2001,abc".to_string()),
            ..SelectionQueryParams::default()
        }
        .to_selection()
        .unwrap_err();
        assert_eq!(err.param, "years");
    }

    #[test]
    fn range_column_defaults_to_total_crime() {
        let query = RangeQueryParams::default().to_query().unwrap();
        assert_eq!(query.column, NumericColumn::TotalCrime);

        let query = RangeQueryParams {
            column: Some("murder".to_string()),
            min: Some(1),
            max: None,
        }
        .to_query()
        .unwrap();
        assert_eq!(query.column, NumericColumn::Category(CrimeCategory::Murder));

        let err = RangeQueryParams {
            column: Some("Burglary".to_string()),
            ..RangeQueryParams::default()
        }
        .to_query()
        .unwrap_err();
        assert_eq!(err.param, "column");
    }

    #[test]
    fn open_year_bounds() {
        assert_eq!(YearRangeQueryParams::default().to_range(), None);
        assert_eq!(
            YearRangeQueryParams {
                from: Some(2005),
                to: None,
            }
            .to_range(),
            Some(YearRange::new(2005, i32::MAX))
        );
    }

    #[test]
    fn dashboard_params_build_request() {
        let request = DashboardQueryParams {
            states: Some("Goa".to_string()),
            category: Some("Hurt".to_string()),
            min: Some(3),
            ..DashboardQueryParams::default()
        }
        .to_request()
        .unwrap();

        assert_eq!(request.selection.states, Selection::names(["Goa"]));
        assert!(request.selection.years.is_all());
        assert_eq!(
            request.range,
            Some(RangeQuery {
                column: NumericColumn::TotalCrime,
                min: Some(3),
                max: None,
            })
        );
        assert_eq!(request.district_category, Some(CrimeCategory::Hurt));
        assert_eq!(request.special_acts_years, None);

        assert_eq!(
            DashboardQueryParams::default().to_request().unwrap(),
            DashboardRequest::default()
        );
    }
}
