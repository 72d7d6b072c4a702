//! Plain-text tables for the dashboard views.

use clap::ValueEnum;
use crime_dash_analytics_models::{
    CategoryTotal, DashboardMetrics, DashboardSnapshot, DominantCategory, PivotTable,
    RangeFilterView, RegionTotal, SeriesPoint, StateExtreme, StateYearTotal, TopDistricts,
    YearTotal,
};

/// A single dashboard view that can be printed on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    Metrics,
    StateYearTotals,
    Range,
    YearlyTotals,
    UnionTerritories,
    SpecialActs,
    ViolentTrend,
    CategoryDistribution,
    StateExtremes,
    DominantCategories,
    TopDistricts,
    Heatmap,
}

impl ReportKind {
    pub const ALL: &[Self] = &[
        Self::Metrics,
        Self::StateYearTotals,
        Self::Range,
        Self::YearlyTotals,
        Self::UnionTerritories,
        Self::SpecialActs,
        Self::ViolentTrend,
        Self::CategoryDistribution,
        Self::StateExtremes,
        Self::DominantCategories,
        Self::TopDistricts,
        Self::Heatmap,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Metrics => "Metrics",
            Self::StateYearTotals => "Total crime by state and year",
            Self::Range => "Numeric range filter",
            Self::YearlyTotals => "Total crime by year",
            Self::UnionTerritories => "Total crime in union territories",
            Self::SpecialActs => "POA / PCR Act trend",
            Self::ViolentTrend => "Murder / assault on women trend",
            Self::CategoryDistribution => "Crime category distribution",
            Self::StateExtremes => "Highest and lowest states",
            Self::DominantCategories => "Most frequent category per state",
            Self::TopDistricts => "Top districts",
            Self::Heatmap => "State × year heatmap",
        }
    }
}

/// Renders one view of `snapshot`, preceded by any warnings.
#[must_use]
pub fn render(kind: ReportKind, snapshot: &DashboardSnapshot) -> String {
    let mut lines: Vec<String> = snapshot
        .warnings
        .iter()
        .map(|w| format!("warning: {w}"))
        .collect();

    lines.push(format!("== {} ==", kind.label()));
    lines.extend(match kind {
        ReportKind::Metrics => metrics(&snapshot.metrics),
        ReportKind::StateYearTotals => state_year_totals(&snapshot.state_year_totals),
        ReportKind::Range => range(&snapshot.range_filter),
        ReportKind::YearlyTotals => yearly_totals(&snapshot.yearly_totals),
        ReportKind::UnionTerritories => regions(&snapshot.union_territories),
        ReportKind::SpecialActs => series(&snapshot.special_acts_trend),
        ReportKind::ViolentTrend => series(&snapshot.violent_trend),
        ReportKind::CategoryDistribution => categories(&snapshot.category_distribution),
        ReportKind::StateExtremes => extremes(&snapshot.state_extremes),
        ReportKind::DominantCategories => dominant(&snapshot.dominant_categories),
        ReportKind::TopDistricts => top_districts(&snapshot.top_districts),
        ReportKind::Heatmap => heatmap(&snapshot.heatmap),
    });

    lines.join("\n")
}

/// Serializes one view of `snapshot` as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(kind: ReportKind, snapshot: &DashboardSnapshot) -> serde_json::Result<String> {
    let value = match kind {
        ReportKind::Metrics => serde_json::to_value(snapshot.metrics)?,
        ReportKind::StateYearTotals => serde_json::to_value(&snapshot.state_year_totals)?,
        ReportKind::Range => serde_json::to_value(&snapshot.range_filter)?,
        ReportKind::YearlyTotals => serde_json::to_value(&snapshot.yearly_totals)?,
        ReportKind::UnionTerritories => serde_json::to_value(&snapshot.union_territories)?,
        ReportKind::SpecialActs => serde_json::to_value(&snapshot.special_acts_trend)?,
        ReportKind::ViolentTrend => serde_json::to_value(&snapshot.violent_trend)?,
        ReportKind::CategoryDistribution => {
            serde_json::to_value(&snapshot.category_distribution)?
        }
        ReportKind::StateExtremes => serde_json::to_value(&snapshot.state_extremes)?,
        ReportKind::DominantCategories => serde_json::to_value(&snapshot.dominant_categories)?,
        ReportKind::TopDistricts => serde_json::to_value(&snapshot.top_districts)?,
        ReportKind::Heatmap => serde_json::to_value(&snapshot.heatmap)?,
    };
    serde_json::to_string_pretty(&value)
}

/// Renders every view of `snapshot`, warnings first.
#[must_use]
pub fn render_all(snapshot: &DashboardSnapshot) -> String {
    let quiet = DashboardSnapshot {
        warnings: Vec::new(),
        ..snapshot.clone()
    };

    let mut sections: Vec<String> = snapshot
        .warnings
        .iter()
        .map(|w| format!("warning: {w}"))
        .collect();
    sections.extend(ReportKind::ALL.iter().map(|kind| render(*kind, &quiet)));
    sections.join("\n\n")
}

fn rule(width: usize) -> String {
    "-".repeat(width)
}

fn metrics(m: &DashboardMetrics) -> Vec<String> {
    vec![
        format!("{:<14} {:>12}", "States", m.states),
        format!("{:<14} {:>12}", "Districts", m.districts),
        format!("{:<14} {:>12}", "Years", m.years),
        format!("{:<14} {:>12}", "Total crime", m.total_crime),
    ]
}

fn state_year_totals(rows: &[StateYearTotal]) -> Vec<String> {
    let mut lines = vec![format!("{:<28} {:>6} {:>12}", "STATE", "YEAR", "TOTAL"), rule(48)];
    lines.extend(
        rows.iter()
            .map(|r| format!("{:<28} {:>6} {:>12}", r.state, r.year, r.total)),
    );
    lines
}

fn range(view: &RangeFilterView) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} in [{}, {}]: {} rows",
            view.column, view.min, view.max, view.row_count
        ),
        format!("{:<28} {:<28} {:>6} {:>10}", "STATE", "DISTRICT", "YEAR", "VALUE"),
        rule(75),
    ];
    lines.extend(view.rows.iter().map(|r| {
        format!(
            "{:<28} {:<28} {:>6} {:>10}",
            r.state, r.district, r.year, r.value
        )
    }));
    lines
}

fn yearly_totals(rows: &[YearTotal]) -> Vec<String> {
    let mut lines = vec![format!("{:<6} {:>12}", "YEAR", "TOTAL"), rule(19)];
    lines.extend(rows.iter().map(|r| format!("{:<6} {:>12}", r.year, r.total)));
    lines
}

fn regions(rows: &[RegionTotal]) -> Vec<String> {
    let mut lines = vec![format!("{:<28} {:>12}", "REGION", "TOTAL"), rule(41)];
    lines.extend(
        rows.iter()
            .map(|r| format!("{:<28} {:>12}", r.region, r.total)),
    );
    lines
}

fn series(points: &[SeriesPoint]) -> Vec<String> {
    let mut lines = vec![format!("{:<6} {:<38} {:>10}", "YEAR", "SERIES", "VALUE"), rule(56)];
    lines.extend(points.iter().map(|p| {
        format!(
            "{:<6} {:<38} {:>10}",
            p.year,
            p.series.as_ref(),
            p.value
        )
    }));
    lines
}

fn categories(rows: &[CategoryTotal]) -> Vec<String> {
    let mut lines = vec![format!("{:<38} {:>12}", "CATEGORY", "TOTAL"), rule(51)];
    lines.extend(
        rows.iter()
            .map(|r| format!("{:<38} {:>12}", r.category.as_ref(), r.total)),
    );
    lines
}

fn extremes(rows: &[StateExtreme]) -> Vec<String> {
    let mut lines = vec![format!("{:<8} {:<28} {:>12}", "GROUP", "STATE", "TOTAL"), rule(50)];
    lines.extend(rows.iter().map(|r| {
        format!(
            "{:<8} {:<28} {:>12}",
            r.group.as_ref(),
            r.state,
            r.total
        )
    }));
    lines
}

fn dominant(rows: &[DominantCategory]) -> Vec<String> {
    let mut lines = vec![
        format!("{:<28} {:<38} {:>10}", "STATE", "CATEGORY", "COUNT"),
        rule(78),
    ];
    lines.extend(rows.iter().map(|r| {
        format!(
            "{:<28} {:<38} {:>10}",
            r.state,
            r.category.as_ref(),
            r.count
        )
    }));
    lines
}

fn top_districts(top: &TopDistricts) -> Vec<String> {
    let mut lines = vec![
        format!("Category: {}", top.category),
        format!("{:<28} {:>12}", "DISTRICT", "TOTAL"),
        rule(41),
    ];
    lines.extend(
        top.rows
            .iter()
            .map(|r| format!("{:<28} {:>12}", r.district, r.total)),
    );
    lines
}

fn heatmap(pivot: &PivotTable) -> Vec<String> {
    let header: String = pivot.years.iter().map(|y| format!(" {y:>8}")).collect();
    let mut lines = vec![
        format!("{:<28}{header}", "STATE"),
        rule(28 + 9 * pivot.years.len()),
    ];
    lines.extend(pivot.states.iter().zip(&pivot.values).map(|(state, row)| {
        let cells: String = row.iter().map(|v| format!(" {v:>8}")).collect();
        format!("{state:<28}{cells}")
    }));
    lines
}

#[cfg(test)]
mod tests {
    use crime_dash_analytics::build_dashboard;
    use crime_dash_analytics_models::{DashboardRequest, RangeQuery};
    use crime_dash_config::DashboardConfig;
    use crime_dash_crime_models::NumericColumn;
    use crime_dash_dataset::{LoadOptions, load_from_reader};

    use super::*;

    const CSV: &str = "\
STATE/UT,DISTRICT,Year,Murder,Assault on women,Kidnapping and Abduction,Dacoity,Robbery,Arson,Hurt,Prevention of atrocities (POA) Act,Protection of Civil Rights (PCR) Act,Other Crimes Against SCs
Delhi,North,2001,2,0,0,0,0,0,0,0,0,0
Delhi,Total,2001,2,0,0,0,0,0,0,0,0,0
Delhi,South,2002,5,0,0,0,0,0,0,0,0,0
";

    fn snapshot(request: &DashboardRequest) -> DashboardSnapshot {
        let dataset = load_from_reader(CSV.as_bytes(), &LoadOptions::default()).unwrap();
        let config = DashboardConfig::embedded().unwrap();
        build_dashboard(&dataset, &config, request)
    }

    #[test]
    fn metrics_table_lists_all_four_values() {
        let text = render(ReportKind::Metrics, &snapshot(&DashboardRequest::default()));
        assert!(text.starts_with("== Metrics =="));
        assert!(text.contains("Districts"));
        assert!(text.lines().any(|l| l.starts_with("Total crime") && l.ends_with(" 9")));
    }

    #[test]
    fn top_districts_table_omits_subtotals() {
        let text = render(
            ReportKind::TopDistricts,
            &snapshot(&DashboardRequest::default()),
        );
        assert!(text.contains("Category: Murder"));
        assert!(text.contains("South"));
        assert!(!text.contains("Total "));
    }

    #[test]
    fn heatmap_header_lists_years() {
        let text = render(ReportKind::Heatmap, &snapshot(&DashboardRequest::default()));
        let header = text.lines().nth(1).unwrap();
        assert!(header.starts_with("STATE"));
        assert!(header.contains("2001"));
        assert!(header.contains("2002"));
    }

    #[test]
    fn json_view_is_the_selected_section() {
        let json = render_json(ReportKind::YearlyTotals, &snapshot(&DashboardRequest::default()))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["year"], 2001);
        assert_eq!(value[0]["total"], 4);
        assert_eq!(value[1]["total"], 5);
    }

    #[test]
    fn warnings_are_printed_once() {
        let request = DashboardRequest {
            range: Some(RangeQuery {
                column: NumericColumn::TotalCrime,
                min: Some(5),
                max: Some(1),
            }),
            ..DashboardRequest::default()
        };
        let text = render_all(&snapshot(&request));

        assert_eq!(text.matches("warning:").count(), 1);
        assert_eq!(text.matches("== ").count(), ReportKind::ALL.len());
    }
}
