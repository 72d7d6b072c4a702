#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Record and filter selection types for the crime statistics dataset.
//!
//! A [`Record`] is one row of the source table (state, district, year and
//! the ten category counts). A [`FilterSelection`] is the user's choice of
//! states, districts and years for the current view.

use std::collections::BTreeSet;

use crime_dash_crime_models::{CATEGORY_COUNT, CrimeCategory, NumericColumn};
use serde::{Deserialize, Serialize};

/// Normalizes a state or district label to its canonical form.
///
/// Surrounding whitespace is trimmed, the first letter of every alphabetic
/// run is upper-cased and the remaining letters are lower-cased
/// (`"  ANDAMAN & NICOBAR islands"` becomes `"Andaman & Nicobar Islands"`).
#[must_use]
pub fn canonical_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alpha = false;

    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}

/// Returns `true` if `district` is the pre-aggregated subtotal marker
/// (compared trimmed and ASCII case-insensitively).
#[must_use]
pub fn is_sentinel_district(district: &str, sentinel: &str) -> bool {
    district.trim().eq_ignore_ascii_case(sentinel.trim())
}

/// The ten category counts of one record, indexed by [`CrimeCategory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryCounts([u64; CATEGORY_COUNT]);

impl CategoryCounts {
    /// Creates counts from values in declared category order.
    #[must_use]
    pub const fn new(values: [u64; CATEGORY_COUNT]) -> Self {
        Self(values)
    }

    /// Count for a single category.
    #[must_use]
    pub const fn get(&self, category: CrimeCategory) -> u64 {
        self.0[category.index()]
    }

    /// Sets the count for a single category.
    pub const fn set(&mut self, category: CrimeCategory, value: u64) {
        self.0[category.index()] = value;
    }

    /// Sums the given categories. Categories outside the list never
    /// contribute.
    #[must_use]
    pub fn total_over(&self, categories: &[CrimeCategory]) -> u64 {
        categories.iter().map(|c| self.get(*c)).sum()
    }

    /// Sum of all declared categories.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total_over(CrimeCategory::all())
    }

    /// Adds another record's counts category by category.
    pub fn accumulate(&mut self, other: &Self) {
        for (total, value) in self.0.iter_mut().zip(other.0) {
            *total += value;
        }
    }

    /// Iterates `(category, count)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (CrimeCategory, u64)> + '_ {
        CrimeCategory::all().iter().map(|c| (*c, self.get(*c)))
    }
}

/// One row of the dataset: crime counts for a state, district and year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Canonical state / union territory name.
    pub state: String,
    /// Canonical district name (`"Total"` for subtotal rows).
    pub district: String,
    /// Four-digit calendar year.
    pub year: i32,
    /// Category counts.
    pub counts: CategoryCounts,
}

impl Record {
    /// Derived `Total Crime`: the sum of the ten declared categories.
    #[must_use]
    pub fn total_crime(&self) -> u64 {
        self.counts.total()
    }

    /// Value of a runtime-selected numeric column.
    #[must_use]
    pub fn value(&self, column: NumericColumn) -> u64 {
        match column {
            NumericColumn::Category(category) => self.counts.get(category),
            NumericColumn::TotalCrime => self.total_crime(),
        }
    }
}

/// An inclusion set for one field.
///
/// `All` is the "select all" shortcut and resolves to whatever distinct
/// values the dataset currently holds. `Only` with an empty set excludes
/// every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode", content = "values")]
pub enum Selection<T: Ord> {
    /// Every value present in the dataset.
    All,
    /// Exactly these values.
    Only(BTreeSet<T>),
}

impl<T: Ord> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: Ord + Clone> Selection<T> {
    /// Selection that excludes everything.
    #[must_use]
    pub const fn none() -> Self {
        Self::Only(BTreeSet::new())
    }

    /// Resolves the selection against the field's current domain.
    #[must_use]
    pub fn resolve(&self, domain: &BTreeSet<T>) -> BTreeSet<T> {
        match self {
            Self::All => domain.clone(),
            Self::Only(values) => values.clone(),
        }
    }

    /// Returns `true` if this is the "select all" shortcut.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl Selection<String> {
    /// Builds a name selection, canonicalizing every value.
    pub fn names<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Only(
            values
                .into_iter()
                .map(|v| canonical_name(v.as_ref()))
                .collect(),
        )
    }

    /// Parses a comma-separated name list.
    ///
    /// `None` selects all; `Some("")` selects nothing.
    #[must_use]
    pub fn parse_names(list: Option<&str>) -> Self {
        list.map_or(Self::All, |s| {
            Self::names(s.split(',').map(str::trim).filter(|v| !v.is_empty()))
        })
    }
}

impl Selection<i32> {
    /// Parses a comma-separated year list.
    ///
    /// `None` selects all; `Some("")` selects nothing.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidYearError`] if any entry is not an integer.
    pub fn parse_years(list: Option<&str>) -> Result<Self, InvalidYearError> {
        let Some(list) = list else {
            return Ok(Self::All);
        };

        list.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| {
                v.parse::<i32>().map_err(|_| InvalidYearError {
                    value: v.to_string(),
                })
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self::Only)
    }
}

/// Error returned when a year list entry is not an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidYearError {
    /// The offending entry.
    pub value: String,
}

impl std::fmt::Display for InvalidYearError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid year '{}'", self.value)
    }
}

impl std::error::Error for InvalidYearError {}

/// The user's current filter: one inclusion set per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    /// Included states.
    #[serde(default)]
    pub states: Selection<String>,
    /// Included districts.
    #[serde(default)]
    pub districts: Selection<String>,
    /// Included years.
    #[serde(default)]
    pub years: Selection<i32>,
}

impl FilterSelection {
    /// Selection that includes every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Selection that includes no record.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            states: Selection::none(),
            districts: Selection::none(),
            years: Selection::none(),
        }
    }
}

/// Inclusive year bounds, as chosen on a year-range slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    /// First included year.
    pub start: i32,
    /// Last included year.
    pub end: i32,
}

impl YearRange {
    /// Creates a range. No ordering check is made here; consumers reject
    /// `start > end`.
    #[must_use]
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Returns `true` if `year` lies in the range.
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_title_cases_words() {
        assert_eq!(canonical_name("  DELHI "), "Delhi");
        assert_eq!(
            canonical_name("andaman & nicobar ISLANDS"),
            "Andaman & Nicobar Islands"
        );
        assert_eq!(canonical_name("D&N Haveli"), "D&N Haveli");
        assert_eq!(canonical_name("24 PARGANAS NORTH"), "24 Parganas North");
        assert_eq!(canonical_name(""), "");
    }

    #[test]
    fn canonical_name_is_idempotent() {
        for raw in ["TOTAL", "jammu & kashmir", "  Dadra & Nagar Haveli"] {
            let once = canonical_name(raw);
            assert_eq!(canonical_name(&once), once);
        }
    }

    #[test]
    fn sentinel_comparison_ignores_case_and_whitespace() {
        assert!(is_sentinel_district("Total", "TOTAL"));
        assert!(is_sentinel_district(" total ", "TOTAL"));
        assert!(!is_sentinel_district("Total North", "TOTAL"));
    }

    #[test]
    fn counts_total_only_sums_listed_categories() {
        let mut counts = CategoryCounts::default();
        counts.set(CrimeCategory::Murder, 3);
        counts.set(CrimeCategory::Hurt, 4);
        counts.set(CrimeCategory::OtherCrimesAgainstScs, 5);

        assert_eq!(counts.total(), 12);
        assert_eq!(
            counts.total_over(&[CrimeCategory::Murder, CrimeCategory::Hurt]),
            7
        );
        assert_eq!(counts.total_over(&[]), 0);
    }

    #[test]
    fn accumulate_adds_per_category() {
        let mut sum = CategoryCounts::new([1, 0, 0, 0, 0, 0, 0, 0, 0, 2]);
        sum.accumulate(&CategoryCounts::new([1, 3, 0, 0, 0, 0, 0, 0, 0, 0]));
        assert_eq!(sum, CategoryCounts::new([2, 3, 0, 0, 0, 0, 0, 0, 0, 2]));
    }

    #[test]
    fn record_value_reads_selected_column() {
        let record = Record {
            state: "Delhi".to_string(),
            district: "North".to_string(),
            year: 2001,
            counts: CategoryCounts::new([2, 0, 0, 0, 1, 0, 0, 0, 0, 0]),
        };
        assert_eq!(record.value(NumericColumn::TotalCrime), 3);
        assert_eq!(
            record.value(NumericColumn::Category(CrimeCategory::Robbery)),
            1
        );
    }

    #[test]
    fn parse_names_distinguishes_absent_from_empty() {
        assert!(Selection::parse_names(None).is_all());
        assert_eq!(Selection::parse_names(Some("")), Selection::none());
        assert_eq!(
            Selection::parse_names(Some("delhi, GOA")),
            Selection::Only(["Delhi".to_string(), "Goa".to_string()].into())
        );
    }

    #[test]
    fn parse_years_rejects_non_numeric() {
        assert!(Selection::parse_years(None).unwrap().is_all());
        assert_eq!(
            Selection::parse_years(Some("2001,2003")).unwrap(),
            Selection::Only([2001, 2003].into())
        );
        let err = Selection::parse_years(Some("2001,abc")).unwrap_err();
        assert_eq!(err.value, "abc");
    }

    #[test]
    fn resolve_all_uses_domain() {
        let domain: BTreeSet<i32> = [2001, 2002].into();
        assert_eq!(Selection::All.resolve(&domain), domain);
        assert!(Selection::<i32>::none().resolve(&domain).is_empty());
    }

    #[test]
    fn selection_round_trips_through_json() {
        let selection = FilterSelection {
            states: Selection::names(["Goa"]),
            ..FilterSelection::all()
        };
        let json = serde_json::to_string(&selection).unwrap();
        let parsed: FilterSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, selection);
    }
}
