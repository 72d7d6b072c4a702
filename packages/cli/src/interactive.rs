//! Interactive dashboard session.
//!
//! Walks through the same controls as the dashboard (selection
//! checkboxes with "select all", numeric column and bounds, year range,
//! category) and prints the resulting views as tables.

use std::collections::BTreeSet;

use crime_dash_analytics::{build_dashboard, filter_options, numeric_column_bounds};
use crime_dash_analytics_models::{DashboardRequest, FilterOptions, RangeQuery};
use crime_dash_config::DashboardConfig;
use crime_dash_crime_models::CrimeCategory;
use crime_dash_dataset::{Dataset, FilterSelection, Selection, YearRange};
use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::report::{self, ReportKind};

/// Top-level actions available in the interactive menu.
enum DashAction {
    FullDashboard,
    SingleView,
    StartServer,
    Quit,
}

impl DashAction {
    const ALL: &[Self] = &[
        Self::FullDashboard,
        Self::SingleView,
        Self::StartServer,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::FullDashboard => "Show the full dashboard",
            Self::SingleView => "Show a single view",
            Self::StartServer => "Start the API server",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the menu loop until the user quits or starts the server.
///
/// # Errors
///
/// Returns an error if a prompt fails (e.g. the terminal is not
/// interactive) or the server cannot bind.
pub fn run(dataset: &Dataset, config: &DashboardConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Crime Statistics Dashboard");
    println!();

    let options = filter_options(dataset);
    let labels: Vec<&str> = DashAction::ALL.iter().map(DashAction::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match DashAction::ALL[idx] {
            DashAction::FullDashboard => {
                let request = prompt_request(dataset, config, &options)?;
                let snapshot = build_dashboard(dataset, config, &request);
                println!("{}", report::render_all(&snapshot));
            }
            DashAction::SingleView => {
                let kind_labels: Vec<&str> =
                    ReportKind::ALL.iter().map(|k| k.label()).collect();
                let kind = ReportKind::ALL[Select::new()
                    .with_prompt("Which view?")
                    .items(&kind_labels)
                    .default(0)
                    .interact()?];

                let request = prompt_request(dataset, config, &options)?;
                let snapshot = build_dashboard(dataset, config, &request);
                println!("{}", report::render(kind, &snapshot));
            }
            DashAction::StartServer => {
                if Confirm::new()
                    .with_prompt("Start the API server on BIND_ADDR/PORT (default 127.0.0.1:8080)?")
                    .default(true)
                    .interact()?
                {
                    crate::serve(dataset.clone(), config.clone())?;
                    return Ok(());
                }
            }
            DashAction::Quit => return Ok(()),
        }

        println!();
    }
}

/// Prompts for every dashboard control and assembles the request.
fn prompt_request(
    dataset: &Dataset,
    config: &DashboardConfig,
    options: &FilterOptions,
) -> Result<DashboardRequest, Box<dyn std::error::Error>> {
    let selection = FilterSelection {
        states: prompt_selection("States", &options.states)?,
        districts: prompt_selection("Districts", &options.districts)?,
        years: prompt_selection("Years", &options.years)?,
    };

    let column_labels: Vec<&str> = options.numeric_columns.iter().map(|c| c.name()).collect();
    let column = options.numeric_columns[Select::new()
        .with_prompt("Numeric column for the range filter")
        .items(&column_labels)
        .default(column_labels.len() - 1)
        .interact()?];

    let (low, high) = numeric_column_bounds(dataset, column).unwrap_or((0, 0));
    let min: u64 = Input::new()
        .with_prompt(format!("Minimum {column}"))
        .default(low)
        .interact_text()?;
    let max: u64 = Input::new()
        .with_prompt(format!("Maximum {column}"))
        .default(high)
        .interact_text()?;

    let special_acts_years = match options.year_bounds {
        Some(bounds) => {
            let start: i32 = Input::new()
                .with_prompt("Special acts trend: first year")
                .default(bounds.start)
                .interact_text()?;
            let end: i32 = Input::new()
                .with_prompt("Special acts trend: last year")
                .default(bounds.end)
                .interact_text()?;
            Some(YearRange::new(start, end))
        }
        None => None,
    };

    let category_labels: Vec<&str> = CrimeCategory::all().iter().map(AsRef::as_ref).collect();
    let category = CrimeCategory::all()[Select::new()
        .with_prompt("Category for the top districts ranking")
        .items(&category_labels)
        .default(config.dashboard.default_district_category.index())
        .interact()?];

    Ok(DashboardRequest {
        selection,
        range: Some(RangeQuery {
            column,
            min: Some(min),
            max: Some(max),
        }),
        special_acts_years,
        district_category: Some(category),
    })
}

/// Checkbox list with a leading "Select all" entry, checked by default.
///
/// Leaving "Select all" checked yields [`Selection::All`]; otherwise the
/// ticked values are selected exactly (possibly none).
fn prompt_selection<T>(
    name: &str,
    values: &[T],
) -> Result<Selection<T>, Box<dyn std::error::Error>>
where
    T: Ord + Clone + std::fmt::Display,
{
    let mut labels = vec!["Select all".to_string()];
    labels.extend(values.iter().map(ToString::to_string));

    let mut defaults = vec![false; labels.len()];
    defaults[0] = true;

    let picked = MultiSelect::new()
        .with_prompt(format!("{name} (space=toggle, enter=confirm)"))
        .items(&labels)
        .defaults(&defaults)
        .max_length(20)
        .interact()?;

    if picked.first() == Some(&0) {
        return Ok(Selection::All);
    }

    let chosen: BTreeSet<T> = picked.iter().map(|i| values[i - 1].clone()).collect();
    if chosen.is_empty() {
        log::warn!("No {} selected", name.to_lowercase());
    }
    Ok(Selection::Only(chosen))
}

#[cfg(test)]
mod tests {
    use crime_dash_crime_models::NumericColumn;

    use super::*;

    #[test]
    fn actions_have_distinct_labels() {
        let labels: BTreeSet<&str> = DashAction::ALL.iter().map(DashAction::label).collect();
        assert_eq!(labels.len(), DashAction::ALL.len());
    }

    #[test]
    fn every_report_kind_is_listed_once() {
        let labels: BTreeSet<&str> = ReportKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels.len(), ReportKind::ALL.len());
        assert_eq!(
            ReportKind::ALL.len(),
            <ReportKind as clap::ValueEnum>::value_variants().len()
        );
    }

    #[test]
    fn numeric_column_prompt_defaults_to_total() {
        let options = filter_options(&Dataset::default());
        assert_eq!(options.numeric_columns.last(), Some(&NumericColumn::TotalCrime));
    }
}
