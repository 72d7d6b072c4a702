//! Grouped sums of `Total Crime` and per-category totals.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crime_dash_analytics_models::{
    CategoryTotal, PivotTable, RegionTotal, StateYearTotal, YearTotal,
};
use crime_dash_dataset::{CategoryCounts, Dataset, canonical_name};

/// Σ `Total Crime` per (state, year), ordered by state then year.
#[must_use]
pub fn state_year_totals(dataset: &Dataset) -> Vec<StateYearTotal> {
    let mut groups: BTreeMap<(&str, i32), u64> = BTreeMap::new();
    for record in dataset {
        *groups.entry((record.state.as_str(), record.year)).or_default() += record.total_crime();
    }

    groups
        .into_iter()
        .map(|((state, year), total)| StateYearTotal {
            state: state.to_string(),
            year,
            total,
        })
        .collect()
}

/// Σ `Total Crime` per year, ascending.
#[must_use]
pub fn yearly_totals(dataset: &Dataset) -> Vec<YearTotal> {
    let mut groups: BTreeMap<i32, u64> = BTreeMap::new();
    for record in dataset {
        *groups.entry(record.year).or_default() += record.total_crime();
    }

    groups
        .into_iter()
        .map(|(year, total)| YearTotal { year, total })
        .collect()
}

/// Σ `Total Crime` per state, keyed and ordered by state name.
#[must_use]
pub fn state_totals(dataset: &Dataset) -> BTreeMap<String, u64> {
    let mut groups: BTreeMap<String, u64> = BTreeMap::new();
    for record in dataset {
        *groups.entry(record.state.clone()).or_default() += record.total_crime();
    }
    groups
}

/// Σ `Total Crime` for each of the named regions that appears in the
/// dataset. Names are canonicalized before matching.
#[must_use]
pub fn region_totals(dataset: &Dataset, regions: &[String]) -> Vec<RegionTotal> {
    let wanted: BTreeSet<String> = regions.iter().map(|r| canonical_name(r)).collect();

    let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
    for record in dataset.iter().filter(|r| wanted.contains(&r.state)) {
        *groups.entry(record.state.as_str()).or_default() += record.total_crime();
    }

    groups
        .into_iter()
        .map(|(region, total)| RegionTotal {
            region: region.to_string(),
            total,
        })
        .collect()
}

/// Σ of each declared category over the dataset, in declared order.
#[must_use]
pub fn category_distribution(dataset: &Dataset) -> Vec<CategoryTotal> {
    let mut sums = CategoryCounts::default();
    for record in dataset {
        sums.accumulate(&record.counts);
    }

    sums.iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect()
}

/// State × year matrix of Σ `Total Crime`; missing combinations are `0`.
#[must_use]
pub fn state_year_pivot(dataset: &Dataset) -> PivotTable {
    let years: Vec<i32> = dataset.distinct_years().into_iter().collect();
    let states: Vec<String> = dataset.distinct_states().into_iter().collect();

    let year_index: HashMap<i32, usize> = years.iter().enumerate().map(|(i, y)| (*y, i)).collect();
    let state_index: HashMap<&str, usize> = states
        .iter()
        .enumerate()
        .map(|(i, s)| (s.as_str(), i))
        .collect();

    let mut values = vec![vec![0u64; years.len()]; states.len()];
    for record in dataset {
        let (Some(row), Some(col)) = (
            state_index.get(record.state.as_str()),
            year_index.get(&record.year),
        ) else {
            continue;
        };
        values[*row][*col] += record.total_crime();
    }

    PivotTable {
        years,
        states,
        values,
    }
}

#[cfg(test)]
mod tests {
    use crime_dash_crime_models::CrimeCategory;

    use super::*;
    use crate::test_support::{delhi, record, twelve_states};

    #[test]
    fn state_year_totals_for_delhi_example() {
        let totals = state_year_totals(&delhi());
        assert_eq!(
            totals,
            vec![
                StateYearTotal {
                    state: "Delhi".to_string(),
                    year: 2001,
                    total: 4,
                },
                StateYearTotal {
                    state: "Delhi".to_string(),
                    year: 2002,
                    total: 5,
                },
            ]
        );
    }

    #[test]
    fn yearly_totals_sum_to_dataset_total() {
        let dataset = twelve_states();
        let totals = yearly_totals(&dataset);

        assert_eq!(totals.len(), 2);
        assert!(totals.windows(2).all(|w| w[0].year < w[1].year));
        assert_eq!(
            totals.iter().map(|t| t.total).sum::<u64>(),
            dataset.total_crime()
        );
    }

    #[test]
    fn region_totals_only_include_listed_regions() {
        let dataset = Dataset::new(vec![
            record("Delhi", "North", 2001, &[(CrimeCategory::Murder, 3)]),
            record("Delhi", "South", 2002, &[(CrimeCategory::Hurt, 1)]),
            record("Chandigarh", "Chandigarh", 2001, &[(CrimeCategory::Arson, 2)]),
            record("Goa", "North Goa", 2001, &[(CrimeCategory::Murder, 9)]),
        ]);
        let regions = vec![
            "DELHI".to_string(),
            "Chandigarh".to_string(),
            "Lakshadweep".to_string(),
        ];

        let totals = region_totals(&dataset, &regions);
        assert_eq!(
            totals,
            vec![
                RegionTotal {
                    region: "Chandigarh".to_string(),
                    total: 2,
                },
                RegionTotal {
                    region: "Delhi".to_string(),
                    total: 4,
                },
            ]
        );
    }

    #[test]
    fn category_distribution_matches_dataset_total() {
        let dataset = twelve_states();
        let distribution = category_distribution(&dataset);

        assert_eq!(distribution.len(), CrimeCategory::all().len());
        assert_eq!(distribution[0].category, CrimeCategory::Murder);
        assert_eq!(
            distribution.iter().map(|c| c.total).sum::<u64>(),
            dataset.total_crime()
        );
        assert_eq!(
            distribution[CrimeCategory::Robbery.index()].total,
            dataset
                .iter()
                .map(|r| r.counts.get(CrimeCategory::Robbery))
                .sum::<u64>()
        );
    }

    #[test]
    fn pivot_sums_and_zero_fills() {
        let dataset = Dataset::new(vec![
            record("Delhi", "North", 2001, &[(CrimeCategory::Murder, 2)]),
            record("Delhi", "South", 2002, &[(CrimeCategory::Murder, 5)]),
            record("Goa", "North Goa", 2002, &[(CrimeCategory::Hurt, 1)]),
        ]);
        let pivot = state_year_pivot(&dataset);

        assert_eq!(pivot.years, vec![2001, 2002]);
        assert_eq!(pivot.states, vec!["Delhi".to_string(), "Goa".to_string()]);
        assert_eq!(pivot.cell("Goa", 2001), 0);
        assert_eq!(pivot.cell("Delhi", 2001), 2);
        assert_eq!(pivot.total(), dataset.total_crime());
    }

    #[test]
    fn empty_dataset_yields_empty_tables() {
        let dataset = Dataset::default();
        assert!(state_year_totals(&dataset).is_empty());
        assert!(yearly_totals(&dataset).is_empty());
        assert!(region_totals(&dataset, &["Delhi".to_string()]).is_empty());
        assert_eq!(state_year_pivot(&dataset), PivotTable::default());
        assert!(category_distribution(&dataset).iter().all(|c| c.total == 0));
    }
}
