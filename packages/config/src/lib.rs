#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! TOML configuration for the crime statistics dashboard.
//!
//! A default configuration is baked into the binary via [`include_str!`].
//! A different file can be supplied with `--config` or the
//! `CRIME_DASH_CONFIG` environment variable, and the dataset path alone can
//! be overridden with `--dataset` or `CRIME_DASH_DATASET`.

use std::path::{Path, PathBuf};

use crime_dash_crime_models::CrimeCategory;
use crime_dash_dataset::{ColumnHeaders, LoadOptions, canonical_name};
use serde::Deserialize;

/// Default configuration embedded at compile time.
pub const DEFAULT_CONFIG: &str = include_str!("../default.toml");

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "CRIME_DASH_CONFIG";

/// Environment variable overriding the dataset path.
pub const DATASET_ENV: &str = "CRIME_DASH_DATASET";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Cannot read config file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The TOML could not be parsed.
    #[error("Invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// The config parsed but holds an unusable value.
    #[error("Invalid config: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },
}

/// Complete dashboard configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Where and how to read the dataset.
    pub dataset: DatasetSection,
    /// Parameters of the individual dashboard views.
    pub dashboard: DashboardSection,
}

/// `[dataset]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSection {
    /// Path to the CSV file.
    pub path: PathBuf,
    /// Skip rows that fail to parse instead of aborting.
    #[serde(default)]
    pub skip_malformed_rows: bool,
    /// Header names of the key columns.
    #[serde(default)]
    pub columns: ColumnsSection,
}

/// `[dataset.columns]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnsSection {
    /// State / union territory header.
    pub state: String,
    /// District header.
    pub district: String,
    /// Year header.
    pub year: String,
}

impl Default for ColumnsSection {
    fn default() -> Self {
        let defaults = ColumnHeaders::default();
        Self {
            state: defaults.state,
            district: defaults.district,
            year: defaults.year,
        }
    }
}

/// `[dashboard]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSection {
    /// Regions shown in the union territory chart.
    pub union_territories: Vec<String>,
    /// District label marking per-state subtotal rows.
    pub district_sentinel: String,
    /// How many states to tag as highest and lowest.
    pub extremes_count: usize,
    /// Maximum rows in the top districts ranking.
    pub top_districts_limit: usize,
    /// Category preselected for the top districts ranking.
    pub default_district_category: CrimeCategory,
    /// Categories of the special-acts trend.
    pub special_acts: Vec<CrimeCategory>,
    /// Categories of the murder / assault trend.
    pub violent_trend: Vec<CrimeCategory>,
}

impl DashboardConfig {
    /// Returns the embedded default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the embedded TOML is invalid.
    pub fn embedded() -> Result<Self, ConfigError> {
        parse_config_toml(DEFAULT_CONFIG)
    }

    /// Loader options derived from the `[dataset]` section.
    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            columns: ColumnHeaders {
                state: self.dataset.columns.state.clone(),
                district: self.dataset.columns.district.clone(),
                year: self.dataset.columns.year.clone(),
            },
            skip_malformed_rows: self.dataset.skip_malformed_rows,
        }
    }

    /// Union territory names in canonical form.
    #[must_use]
    pub fn union_territories(&self) -> Vec<String> {
        self.dashboard
            .union_territories
            .iter()
            .map(|name| canonical_name(name))
            .collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| {
            Err(ConfigError::Invalid {
                message: message.to_string(),
            })
        };

        if self.dashboard.district_sentinel.trim().is_empty() {
            return invalid("dashboard.district_sentinel must not be empty");
        }
        if self.dashboard.extremes_count == 0 {
            return invalid("dashboard.extremes_count must be at least 1");
        }
        if self.dashboard.top_districts_limit == 0 {
            return invalid("dashboard.top_districts_limit must be at least 1");
        }
        if self.dashboard.special_acts.is_empty() || self.dashboard.violent_trend.is_empty() {
            return invalid("trend category lists must not be empty");
        }

        Ok(())
    }
}

/// Parses and validates a configuration from TOML text.
///
/// # Errors
///
/// Returns [`ConfigError`] if the TOML is malformed or a value is unusable.
pub fn parse_config_toml(toml_str: &str) -> Result<DashboardConfig, ConfigError> {
    let config: DashboardConfig = toml::de::from_str(toml_str)?;
    config.validate()?;
    Ok(config)
}

/// Loads the configuration, honouring explicit paths first and then the
/// `CRIME_DASH_CONFIG` / `CRIME_DASH_DATASET` environment variables.
///
/// # Errors
///
/// Returns [`ConfigError`] if the selected file cannot be read or parsed.
pub fn load_config(
    config_path: Option<&Path>,
    dataset_path: Option<&Path>,
) -> Result<DashboardConfig, ConfigError> {
    let env_config = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let env_dataset = std::env::var_os(DATASET_ENV).map(PathBuf::from);

    load_config_from(
        config_path.or(env_config.as_deref()),
        dataset_path.or(env_dataset.as_deref()),
    )
}

/// Loads the configuration from an optional file, falling back to the
/// embedded default, then applies the dataset path override.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed.
pub fn load_config_from(
    config_path: Option<&Path>,
    dataset_path: Option<&Path>,
) -> Result<DashboardConfig, ConfigError> {
    let mut config = match config_path {
        Some(path) => {
            log::info!("Reading config from {}", path.display());
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_config_toml(&text)?
        }
        None => DashboardConfig::embedded()?,
    };

    if let Some(path) = dataset_path {
        config.dataset.path = path.to_path_buf();
    }

    log::debug!("Dataset path: {}", config.dataset.path.display());

    Ok(config)
}

/// HTTP bind settings, read from `BIND_ADDR` and `PORT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address to bind.
    pub bind_addr: String,
    /// Port to bind.
    pub port: u16,
}

impl ServerSettings {
    /// Reads settings from the environment, defaulting to `127.0.0.1:8080`.
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Self { bind_addr, port }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn embedded_config_parses() {
        let config = DashboardConfig::embedded().unwrap();
        assert_eq!(config.dashboard.extremes_count, 5);
        assert_eq!(config.dashboard.top_districts_limit, 10);
        assert_eq!(config.dashboard.district_sentinel, "TOTAL");
        assert_eq!(
            config.dashboard.special_acts,
            CrimeCategory::special_acts().to_vec()
        );
        assert_eq!(
            config.dashboard.violent_trend,
            vec![CrimeCategory::Murder, CrimeCategory::AssaultOnWomen]
        );
        assert_eq!(config.load_options(), LoadOptions::default());
    }

    #[test]
    fn union_territories_are_canonical() {
        let mut config = DashboardConfig::embedded().unwrap();
        config.dashboard.union_territories = vec!["  DELHI".to_string()];
        assert_eq!(config.union_territories(), vec!["Delhi".to_string()]);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let toml_str = DEFAULT_CONFIG.replace(
            "default_district_category = \"Murder\"",
            "default_district_category = \"Burglary\"",
        );
        assert!(matches!(
            parse_config_toml(&toml_str),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn zero_limits_are_rejected() {
        let toml_str = DEFAULT_CONFIG.replace("extremes_count = 5", "extremes_count = 0");
        assert!(matches!(
            parse_config_toml(&toml_str),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn columns_section_is_optional() {
        let toml_str = r#"
            [dataset]
            path = "x.csv"

            [dashboard]
            union_territories = []
            district_sentinel = "TOTAL"
            extremes_count = 3
            top_districts_limit = 4
            default_district_category = "Hurt"
            special_acts = ["Hurt"]
            violent_trend = ["Murder"]
        "#;
        let config = parse_config_toml(toml_str).unwrap();
        assert_eq!(config.dataset.columns.state, "STATE/UT");
        assert!(!config.dataset.skip_malformed_rows);
    }

    #[test]
    fn dataset_override_replaces_path() {
        let config = load_config_from(None, Some(Path::new("other.csv"))).unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("other.csv"));
    }

    #[test]
    fn reads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            DEFAULT_CONFIG.replace("top_districts_limit = 10", "top_districts_limit = 3")
        )
        .unwrap();

        let config = load_config_from(Some(file.path()), None).unwrap();
        assert_eq!(config.dashboard.top_districts_limit, 3);
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/crime_dash.toml")), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
