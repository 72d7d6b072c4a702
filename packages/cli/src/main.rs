#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the crime statistics dashboard.
//!
//! Every dashboard view is available as a `report` subcommand; running
//! without a subcommand opens an interactive menu that walks through the
//! same controls as the dashboard.

mod interactive;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use crime_dash_analytics::{build_dashboard, dashboard_metrics, filter_options};
use crime_dash_analytics_models::{DashboardRequest, RangeQuery};
use crime_dash_config::{DashboardConfig, ServerSettings, load_config};
use crime_dash_crime_models::{CrimeCategory, NumericColumn};
use crime_dash_dataset::{Dataset, FilterSelection, Selection, YearRange, load_dataset};
use crime_dash_server::{AppState, run_server};

use crate::report::ReportKind;

#[derive(Parser)]
#[command(name = "crime_dash", about = "Crime statistics dashboard")]
struct Cli {
    /// Path to the dataset CSV (overrides the config and `CRIME_DASH_DATASET`)
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    /// Path to a TOML config file (overrides `CRIME_DASH_CONFIG`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the distinct states, districts and years
    Options,
    /// Print the headline metrics for a selection
    Metrics {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print a single dashboard view as a table
    Report {
        /// Which view to print
        #[arg(value_enum)]
        kind: ReportKind,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        view: ViewArgs,
        /// Print the view as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the full dashboard snapshot as JSON
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Start the HTTP API (binds to `BIND_ADDR`/`PORT`)
    Serve,
}

/// Selection flags. Absent means "select all"; an empty value selects
/// nothing.
#[derive(Args)]
struct FilterArgs {
    /// Comma-separated state names
    #[arg(long)]
    states: Option<String>,
    /// Comma-separated district names
    #[arg(long)]
    districts: Option<String>,
    /// Comma-separated years
    #[arg(long)]
    years: Option<String>,
}

impl FilterArgs {
    fn to_selection(&self) -> Result<FilterSelection, Box<dyn std::error::Error>> {
        Ok(FilterSelection {
            states: Selection::parse_names(self.states.as_deref()),
            districts: Selection::parse_names(self.districts.as_deref()),
            years: Selection::parse_years(self.years.as_deref())?,
        })
    }
}

/// Parameters of the individual views.
#[derive(Args)]
struct ViewArgs {
    /// Numeric column for the range filter (e.g. "Murder", "Total Crime")
    #[arg(long)]
    column: Option<NumericColumn>,
    /// Range filter lower bound
    #[arg(long)]
    min: Option<u64>,
    /// Range filter upper bound
    #[arg(long)]
    max: Option<u64>,
    /// First year of the special-acts trend
    #[arg(long)]
    from: Option<i32>,
    /// Last year of the special-acts trend
    #[arg(long)]
    to: Option<i32>,
    /// Category for the top districts ranking
    #[arg(long, value_parser = parse_category)]
    category: Option<CrimeCategory>,
    /// States per group in the highest/lowest ranking
    #[arg(long)]
    n: Option<usize>,
    /// Maximum rows in the top districts ranking
    #[arg(long)]
    limit: Option<usize>,
}

fn parse_category(name: &str) -> Result<CrimeCategory, String> {
    name.trim()
        .parse()
        .map_err(|_| format!("unknown crime category '{name}'"))
}

impl ViewArgs {
    fn apply(&self, config: &mut DashboardConfig) {
        if let Some(n) = self.n {
            config.dashboard.extremes_count = n;
        }
        if let Some(limit) = self.limit {
            config.dashboard.top_districts_limit = limit;
        }
    }

    fn to_request(&self, selection: FilterSelection) -> DashboardRequest {
        let range = (self.column.is_some() || self.min.is_some() || self.max.is_some()).then(|| {
            RangeQuery {
                column: self.column.unwrap_or(NumericColumn::TotalCrime),
                min: self.min,
                max: self.max,
            }
        });
        let special_acts_years = (self.from.is_some() || self.to.is_some()).then(|| {
            YearRange::new(self.from.unwrap_or(i32::MIN), self.to.unwrap_or(i32::MAX))
        });

        DashboardRequest {
            selection,
            range,
            special_acts_years,
            district_category: self.category,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref(), cli.dataset.as_deref())?;
    log::info!("Loading dataset from {}...", config.dataset.path.display());
    let dataset = load_dataset(&config.dataset.path, &config.load_options())?;
    log::info!("Loaded {} records", dataset.len());

    let Some(command) = cli.command else {
        return interactive::run(&dataset, &config);
    };

    match command {
        Commands::Options => print_options(&dataset),
        Commands::Metrics { filter } => {
            let filtered = dataset.filter(&filter.to_selection()?);
            let metrics = dashboard_metrics(&filtered);
            println!("{:<14} {:>12}", "States", metrics.states);
            println!("{:<14} {:>12}", "Districts", metrics.districts);
            println!("{:<14} {:>12}", "Years", metrics.years);
            println!("{:<14} {:>12}", "Total crime", metrics.total_crime);
        }
        Commands::Report {
            kind,
            filter,
            view,
            json,
        } => {
            view.apply(&mut config);
            let request = view.to_request(filter.to_selection()?);
            let snapshot = build_dashboard(&dataset, &config, &request);
            if json {
                println!("{}", report::render_json(kind, &snapshot)?);
            } else {
                println!("{}", report::render(kind, &snapshot));
            }
        }
        Commands::Dashboard { filter, view } => {
            view.apply(&mut config);
            let request = view.to_request(filter.to_selection()?);
            let snapshot = build_dashboard(&dataset, &config, &request);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Serve => serve(dataset, config)?,
    }

    Ok(())
}

fn print_options(dataset: &Dataset) {
    let options = filter_options(dataset);

    println!("States ({}):", options.states.len());
    for state in &options.states {
        println!("  {state}");
    }
    println!("Districts: {}", options.districts.len());
    match options.year_bounds {
        Some(bounds) => println!(
            "Years ({}): {}-{}",
            options.years.len(),
            bounds.start,
            bounds.end
        ),
        None => println!("Years: none"),
    }
}

/// Runs the HTTP API on a fresh actix system until it shuts down.
fn serve(dataset: Dataset, config: DashboardConfig) -> std::io::Result<()> {
    let settings = ServerSettings::from_env();
    actix_web::rt::System::new().block_on(run_server(AppState::new(dataset, config), &settings))
}
