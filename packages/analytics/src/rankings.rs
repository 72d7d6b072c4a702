//! Rankings: highest/lowest states, dominant category per state and top
//! districts per category.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crime_dash_analytics_models::{DistrictTotal, DominantCategory, Extreme, StateExtreme};
use crime_dash_crime_models::CrimeCategory;
use crime_dash_dataset::{CategoryCounts, Dataset, is_sentinel_district};

use crate::totals::state_totals;

/// Tags the `n` states with the largest Σ `Total Crime` as
/// [`Extreme::Highest`] and the `n` smallest as [`Extreme::Lowest`].
///
/// States are grouped alphabetically and ranked with a stable sort, so ties
/// keep alphabetical order. A state is never in both groups: with fewer
/// than `2n` states the lowest group only draws from states not already
/// tagged highest.
#[must_use]
pub fn state_extremes(dataset: &Dataset, n: usize) -> Vec<StateExtreme> {
    let totals: Vec<(String, u64)> = state_totals(dataset).into_iter().collect();

    let mut descending: Vec<usize> = (0..totals.len()).collect();
    descending.sort_by_key(|i| Reverse(totals[*i].1));

    let split = n.min(descending.len());
    let (highest, rest) = descending.split_at(split);

    let mut ascending = rest.to_vec();
    ascending.sort_by_key(|i| (totals[*i].1, *i));
    ascending.truncate(n);

    let tag = |indices: &[usize], group: Extreme| {
        indices
            .iter()
            .map(|i| StateExtreme {
                state: totals[*i].0.clone(),
                total: totals[*i].1,
                group,
            })
            .collect::<Vec<_>>()
    };

    let mut result = tag(highest, Extreme::Highest);
    result.extend(tag(&ascending, Extreme::Lowest));
    result
}

/// For each state, the category among `categories` with the largest sum.
///
/// Ties resolve to the category listed first. Returns no rows when
/// `categories` is empty.
#[must_use]
pub fn dominant_category_by_state(
    dataset: &Dataset,
    categories: &[CrimeCategory],
) -> Vec<DominantCategory> {
    let mut by_state: BTreeMap<&str, CategoryCounts> = BTreeMap::new();
    for record in dataset {
        by_state
            .entry(record.state.as_str())
            .or_default()
            .accumulate(&record.counts);
    }

    by_state
        .into_iter()
        .filter_map(|(state, counts)| {
            let mut best: Option<(CrimeCategory, u64)> = None;
            for category in categories {
                let count = counts.get(*category);
                if best.is_none_or(|(_, top)| count > top) {
                    best = Some((*category, count));
                }
            }
            best.map(|(category, count)| DominantCategory {
                state: state.to_string(),
                category,
                count,
            })
        })
        .collect()
}

/// The `limit` districts with the largest Σ `category`, descending.
///
/// Rows whose district equals `sentinel` (trimmed, case-insensitive) are
/// pre-aggregated subtotals and are always excluded. Districts are grouped
/// by label alone; ties keep alphabetical order.
#[must_use]
pub fn top_districts(
    dataset: &Dataset,
    category: CrimeCategory,
    sentinel: &str,
    limit: usize,
) -> Vec<DistrictTotal> {
    let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
    for record in dataset
        .iter()
        .filter(|r| !is_sentinel_district(&r.district, sentinel))
    {
        *groups.entry(record.district.as_str()).or_default() += record.counts.get(category);
    }

    let mut rows: Vec<DistrictTotal> = groups
        .into_iter()
        .map(|(district, total)| DistrictTotal {
            district: district.to_string(),
            total,
        })
        .collect();
    rows.sort_by_key(|row| Reverse(row.total));
    rows.truncate(limit);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{delhi, record, twelve_states};

    #[test]
    fn extremes_are_disjoint_and_ordered() {
        let extremes = state_extremes(&twelve_states(), 5);

        let highest: Vec<_> = extremes
            .iter()
            .filter(|e| e.group == Extreme::Highest)
            .collect();
        let lowest: Vec<_> = extremes
            .iter()
            .filter(|e| e.group == Extreme::Lowest)
            .collect();

        assert_eq!(highest.len(), 5);
        assert_eq!(lowest.len(), 5);
        assert!(highest.iter().all(|h| lowest.iter().all(|l| h.state != l.state)));
        assert!(highest.iter().all(|h| lowest.iter().all(|l| h.total >= l.total)));
        assert_eq!(highest[0].state, "S12");
        assert_eq!(highest[0].total, 120);
        assert_eq!(lowest[0].state, "S01");
        assert_eq!(lowest[0].total, 10);
    }

    #[test]
    fn extremes_ties_keep_grouped_order() {
        let dataset = Dataset::new(
            ["Bihar", "Assam", "Goa", "Delhi"]
                .iter()
                .map(|s| record(s, "X", 2001, &[(CrimeCategory::Murder, 1)]))
                .collect(),
        );
        let extremes = state_extremes(&dataset, 2);
        let names: Vec<_> = extremes.iter().map(|e| e.state.as_str()).collect();

        assert_eq!(names, vec!["Assam", "Bihar", "Delhi", "Goa"]);
        assert_eq!(extremes[2].group, Extreme::Lowest);
    }

    #[test]
    fn extremes_never_overlap_with_few_states() {
        let dataset = Dataset::new(vec![
            record("Goa", "X", 2001, &[(CrimeCategory::Murder, 3)]),
            record("Kerala", "X", 2001, &[(CrimeCategory::Murder, 1)]),
            record("Sikkim", "X", 2001, &[(CrimeCategory::Murder, 2)]),
        ]);
        let extremes = state_extremes(&dataset, 2);

        assert_eq!(extremes.len(), 3);
        assert_eq!(extremes[0].state, "Goa");
        assert_eq!(extremes[1].state, "Sikkim");
        assert_eq!(extremes[2].state, "Kerala");
        assert_eq!(extremes[2].group, Extreme::Lowest);
        assert!(state_extremes(&Dataset::default(), 5).is_empty());
    }

    #[test]
    fn dominant_category_picks_largest_sum() {
        let dataset = Dataset::new(vec![
            record(
                "Goa",
                "North Goa",
                2001,
                &[(CrimeCategory::Murder, 3), (CrimeCategory::Hurt, 2)],
            ),
            record("Goa", "South Goa", 2002, &[(CrimeCategory::Hurt, 2)]),
            record("Kerala", "Kollam", 2001, &[(CrimeCategory::Arson, 1)]),
        ]);
        let dominant = dominant_category_by_state(&dataset, CrimeCategory::all());

        assert_eq!(
            dominant,
            vec![
                DominantCategory {
                    state: "Goa".to_string(),
                    category: CrimeCategory::Hurt,
                    count: 4,
                },
                DominantCategory {
                    state: "Kerala".to_string(),
                    category: CrimeCategory::Arson,
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn dominant_category_ties_prefer_first_declared() {
        let dataset = Dataset::new(vec![record(
            "Goa",
            "North Goa",
            2001,
            &[(CrimeCategory::Robbery, 4), (CrimeCategory::Dacoity, 4)],
        )]);
        let dominant = dominant_category_by_state(&dataset, CrimeCategory::all());
        assert_eq!(dominant[0].category, CrimeCategory::Dacoity);

        let zeros = Dataset::new(vec![record("Goa", "North Goa", 2001, &[])]);
        let dominant = dominant_category_by_state(&zeros, CrimeCategory::all());
        assert_eq!(dominant[0].category, CrimeCategory::Murder);
        assert_eq!(dominant[0].count, 0);

        assert!(dominant_category_by_state(&dataset, &[]).is_empty());
    }

    #[test]
    fn top_districts_for_delhi_example() {
        let rows = top_districts(&delhi(), CrimeCategory::Murder, "TOTAL", 10);
        assert_eq!(
            rows,
            vec![
                DistrictTotal {
                    district: "South".to_string(),
                    total: 5,
                },
                DistrictTotal {
                    district: "North".to_string(),
                    total: 2,
                },
            ]
        );
    }

    #[test]
    fn top_districts_excludes_sentinel_and_limits_rows() {
        let mut records = Vec::new();
        for i in 0..15u64 {
            records.push(record(
                "Goa",
                &format!("D{i:02}"),
                2001,
                &[(CrimeCategory::Arson, i)],
            ));
        }
        records.push(record("Goa", "TOTAL", 2001, &[(CrimeCategory::Arson, 500)]));
        records.push(record("Goa", " total ", 2002, &[(CrimeCategory::Arson, 400)]));
        let rows = top_districts(&Dataset::new(records), CrimeCategory::Arson, "TOTAL", 10);

        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| !r.district.eq_ignore_ascii_case("total")));
        assert!(rows.windows(2).all(|w| w[0].total >= w[1].total));
        assert_eq!(rows[0].district, "D14");
    }
}
