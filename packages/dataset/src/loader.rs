//! CSV dataset loader.
//!
//! Reads the header row, locates the state, district, year and category
//! columns by name, and parses every row into a canonical [`Record`].

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr as _;

use crime_dash_crime_models::{CATEGORY_COUNT, CrimeCategory};
use crime_dash_dataset_models::{CategoryCounts, Record, canonical_name};

use crate::{Dataset, DatasetError};

/// Largest accepted category count. Keeps every aggregate over the dataset
/// far below `u64::MAX`.
pub const MAX_COUNT: u64 = 4_294_967_295;

/// Header names of the non-category columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeaders {
    /// State / union territory column.
    pub state: String,
    /// District column.
    pub district: String,
    /// Year column.
    pub year: String,
}

impl Default for ColumnHeaders {
    fn default() -> Self {
        Self {
            state: "STATE/UT".to_string(),
            district: "DISTRICT".to_string(),
            year: "Year".to_string(),
        }
    }
}

/// Options controlling how the source file is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Header names for the key columns.
    pub columns: ColumnHeaders,
    /// Skip rows that fail to parse (with a warning) instead of failing
    /// the whole load.
    pub skip_malformed_rows: bool,
}

/// Column positions resolved from the header row.
struct ColumnIndex {
    state: usize,
    district: usize,
    year: usize,
    categories: [usize; CATEGORY_COUNT],
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, names: &ColumnHeaders) -> Result<Self, DatasetError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
        };

        let mut missing = Vec::new();

        let state = find(&names.state);
        let district = find(&names.district);
        let year = find(&names.year);
        for (found, name) in [
            (state, &names.state),
            (district, &names.district),
            (year, &names.year),
        ] {
            if found.is_none() {
                missing.push(name.clone());
            }
        }

        let mut categories = [0usize; CATEGORY_COUNT];
        for category in CrimeCategory::all() {
            let position = headers
                .iter()
                .position(|h| CrimeCategory::from_str(h.trim()).is_ok_and(|c| c == *category));
            match position {
                Some(i) => categories[category.index()] = i,
                None => missing.push(category.to_string()),
            }
        }

        match (state, district, year) {
            (Some(state), Some(district), Some(year)) if missing.is_empty() => Ok(Self {
                state,
                district,
                year,
                categories,
            }),
            _ => Err(DatasetError::Load {
                message: format!("missing required column(s): {}", missing.join(", ")),
            }),
        }
    }
}

/// Loads and cleans the dataset from a CSV file.
///
/// # Errors
///
/// Returns [`DatasetError::Load`] if the file cannot be opened or lacks a
/// required column, and [`DatasetError::Parse`] if a row has the wrong
/// number of fields or a year or count is malformed or above
/// [`MAX_COUNT`] (unless [`LoadOptions::skip_malformed_rows`] is set).
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset, DatasetError> {
    log::info!("Loading dataset from {}", path.display());

    let file = File::open(path).map_err(|e| DatasetError::Load {
        message: format!("cannot open {}: {e}", path.display()),
    })?;

    load_from_reader(file, options)
}

/// Loads and cleans the dataset from any CSV byte source.
///
/// # Errors
///
/// See [`load_dataset`].
pub fn load_from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Dataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = reader.headers().map_err(|e| DatasetError::Load {
        message: format!("cannot read header row: {e}"),
    })?;
    if headers.is_empty() {
        return Err(DatasetError::Load {
            message: "CSV file contains no header row".to_string(),
        });
    }
    let index = ColumnIndex::resolve(headers, &options.columns)?;

    let mut records = Vec::new();
    let mut skipped: u64 = 0;

    for result in reader.records() {
        let parsed = result
            .map_err(|e| DatasetError::Parse {
                line: e.position().map_or(0, csv::Position::line),
                column: String::new(),
                message: e.to_string(),
            })
            .and_then(|row| parse_row(&row, &index, &options.columns));

        match parsed {
            Ok(record) => records.push(record),
            Err(e) if options.skip_malformed_rows => {
                log::warn!("Skipping malformed row: {e}");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let raw_count = records.len();
    let dataset = Dataset::new(records);

    log::info!(
        "Loaded {} records ({} duplicates dropped, {skipped} malformed rows skipped)",
        dataset.len(),
        raw_count - dataset.len(),
    );

    Ok(dataset)
}

fn parse_row(
    row: &csv::StringRecord,
    index: &ColumnIndex,
    names: &ColumnHeaders,
) -> Result<Record, DatasetError> {
    let line = row.position().map_or(0, csv::Position::line);
    let field = |i: usize| row.get(i).unwrap_or("");

    let year = parse_year(field(index.year)).map_err(|message| DatasetError::Parse {
        line,
        column: names.year.clone(),
        message,
    })?;

    let mut counts = CategoryCounts::default();
    for category in CrimeCategory::all() {
        let raw = field(index.categories[category.index()]);
        let value = parse_count(raw).map_err(|message| DatasetError::Parse {
            line,
            column: category.to_string(),
            message,
        })?;
        counts.set(*category, value);
    }

    Ok(Record {
        state: canonical_name(field(index.state)),
        district: canonical_name(field(index.district)),
        year,
        counts,
    })
}

/// Parses a strictly four-digit calendar year.
fn parse_year(raw: &str) -> Result<i32, String> {
    let trimmed = raw.trim();
    if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{trimmed}' is not a four-digit year"));
    }

    let year: i32 = trimmed
        .parse()
        .map_err(|e| format!("'{trimmed}' is not a year: {e}"))?;
    if year < 1000 {
        return Err(format!("year {year} is out of range"));
    }

    Ok(year)
}

fn parse_count(raw: &str) -> Result<u64, String> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<u64>()
        .map_err(|_| format!("'{trimmed}' is not a non-negative integer count"))?;
    if value > MAX_COUNT {
        return Err(format!("count {value} exceeds the maximum of {MAX_COUNT}"));
    }

    Ok(value)
}
