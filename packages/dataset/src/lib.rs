#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loading, cleaning and filtering of the crime statistics dataset.
//!
//! The dataset is read once from a CSV file with [`load_dataset`], cleaned
//! (deduplicated, names canonicalized, years parsed) and then treated as
//! immutable. Views for the current user selection are produced with
//! [`Dataset::filter`].

pub mod filter;
pub mod loader;

use std::collections::{BTreeSet, HashSet};

pub use crime_dash_dataset_models::{
    CategoryCounts, FilterSelection, InvalidYearError, Record, Selection, YearRange,
    canonical_name, is_sentinel_district,
};
pub use loader::{ColumnHeaders, LoadOptions, MAX_COUNT, load_dataset, load_from_reader};

/// Errors that can occur while loading the dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The source is missing, unreadable or lacks required columns.
    #[error("Load error: {message}")]
    Load {
        /// Description of what went wrong.
        message: String,
    },

    /// A field failed to parse.
    #[error("Parse error at line {line}, column '{column}': {message}")]
    Parse {
        /// 1-based line number in the source file (header is line 1).
        line: u64,
        /// Column header of the offending field, empty when the whole
        /// row is unreadable.
        column: String,
        /// Description of what went wrong.
        message: String,
    },
}

/// An immutable, deduplicated collection of [`Record`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Builds a dataset, dropping exact duplicate records while keeping the
    /// order of first occurrence.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        let mut seen: HashSet<Record> = HashSet::with_capacity(records.len());
        let mut unique = Vec::with_capacity(records.len());

        for record in records {
            if seen.insert(record.clone()) {
                unique.push(record);
            }
        }

        Self { records: unique }
    }

    /// Returns a copy with duplicates removed. Datasets built with
    /// [`Dataset::new`] are already unique, so this is the identity on them.
    #[must_use]
    pub fn deduplicated(&self) -> Self {
        Self::new(self.records.clone())
    }

    /// Records in load order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterates over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct state names currently present.
    #[must_use]
    pub fn distinct_states(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.state.clone()).collect()
    }

    /// Distinct district names currently present.
    #[must_use]
    pub fn distinct_districts(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.district.clone()).collect()
    }

    /// Distinct years currently present.
    #[must_use]
    pub fn distinct_years(&self) -> BTreeSet<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// Observed min/max year, or `None` for an empty dataset.
    #[must_use]
    pub fn year_bounds(&self) -> Option<YearRange> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some(YearRange::new(min, max))
    }

    /// Derived `Total Crime` per record, in record order.
    #[must_use]
    pub fn total_crime_column(&self) -> Vec<u64> {
        self.records.iter().map(Record::total_crime).collect()
    }

    /// Sum of `Total Crime` over all records.
    #[must_use]
    pub fn total_crime(&self) -> u64 {
        self.records.iter().map(Record::total_crime).sum()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crime_dash_crime_models::CrimeCategory;

    use super::{CategoryCounts, Record};

    pub fn record(state: &str, district: &str, year: i32, counts: &[(CrimeCategory, u64)]) -> Record {
        let mut c = CategoryCounts::default();
        for (category, value) in counts {
            c.set(*category, *value);
        }
        Record {
            state: state.to_string(),
            district: district.to_string(),
            year,
            counts: c,
        }
    }
}

#[cfg(test)]
mod tests {
    use crime_dash_crime_models::CrimeCategory;

    use super::test_support::record;
    use super::*;

    #[test]
    fn new_drops_duplicates_keeping_first_order() {
        let a = record("Goa", "North Goa", 2001, &[(CrimeCategory::Murder, 1)]);
        let b = record("Goa", "South Goa", 2001, &[(CrimeCategory::Murder, 2)]);
        let dataset = Dataset::new(vec![a.clone(), b.clone(), a.clone()]);

        assert_eq!(dataset.records(), &[a, b]);
    }

    #[test]
    fn deduplication_is_idempotent() {
        let a = record("Goa", "North Goa", 2001, &[(CrimeCategory::Murder, 1)]);
        let dataset = Dataset::new(vec![a.clone(), a]);
        assert_eq!(dataset.deduplicated(), dataset);
        assert_eq!(dataset.deduplicated().deduplicated(), dataset);
    }

    #[test]
    fn total_crime_sums_categories() {
        let dataset = Dataset::new(vec![
            record(
                "Goa",
                "North Goa",
                2001,
                &[(CrimeCategory::Murder, 1), (CrimeCategory::Hurt, 4)],
            ),
            record("Goa", "South Goa", 2002, &[(CrimeCategory::Arson, 2)]),
        ]);

        assert_eq!(dataset.total_crime_column(), vec![5, 2]);
        let by_category: u64 = CrimeCategory::all()
            .iter()
            .map(|c| dataset.iter().map(|r| r.counts.get(*c)).sum::<u64>())
            .sum();
        assert_eq!(dataset.total_crime(), by_category);
    }

    #[test]
    fn year_bounds_cover_all_years() {
        let dataset = Dataset::new(vec![
            record("Goa", "North Goa", 2003, &[]),
            record("Goa", "North Goa", 2001, &[]),
        ]);
        assert_eq!(dataset.year_bounds(), Some(YearRange::new(2001, 2003)));
        assert_eq!(Dataset::default().year_bounds(), None);
    }
}
