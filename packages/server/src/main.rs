#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone binary for the crime dashboard API.
//!
//! Reads configuration from `CRIME_DASH_CONFIG` / `CRIME_DASH_DATASET`
//! and binds to `BIND_ADDR` / `PORT`.

use crime_dash_config::{ServerSettings, load_config};
use crime_dash_dataset::load_dataset;
use crime_dash_server::{AppState, run_server};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = load_config(None, None)?;

    log::info!("Loading dataset from {}...", config.dataset.path.display());
    let dataset = load_dataset(&config.dataset.path, &config.load_options())?;

    run_server(AppState::new(dataset, config), &ServerSettings::from_env()).await?;

    Ok(())
}
