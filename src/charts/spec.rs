//! Chart Specification Module
//! Backend-neutral description of one chart: categories on one axis, one or
//! more value series on the other.

use crate::data::{GroupedTotals, LongTable};
use serde::Serialize;
use std::cmp::Ordering;

/// Every chart shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    TotalFlights,
    OnTimeVsDelayed,
    Cancellations,
    AverageDelays,
    CausesByDestination,
    CausesByOrigin,
    CausesByAirline,
    AirportDelayPct,
    AirlineCancellationPct,
    AirlineAverageDelay,
    RouteDepartureDelayPct,
    RouteArrivalDelayPct,
    DepartureTimeImpact,
}

impl ChartId {
    pub const ALL: [ChartId; 13] = [
        ChartId::TotalFlights,
        ChartId::OnTimeVsDelayed,
        ChartId::Cancellations,
        ChartId::AverageDelays,
        ChartId::CausesByDestination,
        ChartId::CausesByOrigin,
        ChartId::CausesByAirline,
        ChartId::AirportDelayPct,
        ChartId::AirlineCancellationPct,
        ChartId::AirlineAverageDelay,
        ChartId::RouteDepartureDelayPct,
        ChartId::RouteArrivalDelayPct,
        ChartId::DepartureTimeImpact,
    ];

    /// Stable identifier used for file names.
    pub fn slug(self) -> &'static str {
        match self {
            ChartId::TotalFlights => "total_flights",
            ChartId::OnTimeVsDelayed => "on_time_vs_delayed",
            ChartId::Cancellations => "cancellations",
            ChartId::AverageDelays => "average_delays",
            ChartId::CausesByDestination => "causes_by_destination",
            ChartId::CausesByOrigin => "causes_by_origin",
            ChartId::CausesByAirline => "causes_by_airline",
            ChartId::AirportDelayPct => "airport_delay_pct",
            ChartId::AirlineCancellationPct => "airline_cancellation_pct",
            ChartId::AirlineAverageDelay => "airline_average_delay",
            ChartId::RouteDepartureDelayPct => "route_departure_delay_pct",
            ChartId::RouteArrivalDelayPct => "route_arrival_delay_pct",
            ChartId::DepartureTimeImpact => "departure_time_impact",
        }
    }

    /// Numbered heading shown above the chart.
    pub fn heading(self) -> &'static str {
        match self {
            ChartId::TotalFlights => "1.1 Total Flights per Year",
            ChartId::OnTimeVsDelayed => "1.2 On-Time vs. Delayed Flights",
            ChartId::Cancellations => "1.3 Total Cancellations per Year",
            ChartId::AverageDelays => "1.4 Average Delays by Year",
            ChartId::CausesByDestination => "2.1 Delay Causes for Top Destination Airports",
            ChartId::CausesByOrigin => "2.2 Delay Causes for Top Origin Airports",
            ChartId::CausesByAirline => "2.3 Delay Causes for Top Airlines",
            ChartId::AirportDelayPct => "3.1 Top 10 Airports by Delay %",
            ChartId::AirlineCancellationPct => "3.2 Top 10 Airlines by Cancellation %",
            ChartId::AirlineAverageDelay => "3.3 Top 10 Airlines by Average Delay",
            ChartId::RouteDepartureDelayPct => "4.1 Top 10 Routes by Departure Delay %",
            ChartId::RouteArrivalDelayPct => "4.2 Top 10 Routes by Arrival Delay %",
            ChartId::DepartureTimeImpact => "4.3 Impact of Departure Time on Delays",
        }
    }

    /// Name used in "Data for '...' is not available."
    pub fn data_label(self) -> &'static str {
        match self {
            ChartId::TotalFlights => "Total Flights per Year",
            ChartId::OnTimeVsDelayed => "On-Time vs. Delayed Flights",
            ChartId::Cancellations => "Total Cancellations per Year",
            ChartId::AverageDelays => "Average Delays by Year",
            ChartId::CausesByDestination | ChartId::CausesByOrigin | ChartId::CausesByAirline => {
                "Delay Causes"
            }
            ChartId::AirportDelayPct => "Top 10 Airports by Delay %",
            ChartId::AirlineCancellationPct => "Top 10 Airlines by Cancellation %",
            ChartId::AirlineAverageDelay => "Top 10 Airlines by Average Delay",
            ChartId::RouteDepartureDelayPct => "Top 10 Routes by Departure Delay %",
            ChartId::RouteArrivalDelayPct => "Top 10 Routes by Arrival Delay %",
            ChartId::DepartureTimeImpact => "Impact of Departure Time on Delays",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    StackedBar,
    GroupedBar,
    /// Bars grow along x; categories run bottom to top.
    HorizontalBar,
    Line,
}

/// One legend entry: a value per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: ChartId,
    pub kind: ChartKind,
    pub title: String,
    /// Label of the category axis.
    pub category_label: String,
    /// Label of the value axis.
    pub value_label: String,
    pub legend_title: Option<String>,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Build from grouped totals: keys become categories, value columns become series.
    pub fn from_groups(id: ChartId, kind: ChartKind, title: &str, grouped: &GroupedTotals) -> Self {
        let categories = grouped.groups.iter().map(|g| g.key.clone()).collect();
        let series = grouped
            .value_columns
            .iter()
            .enumerate()
            .map(|(i, name)| Series {
                name: name.clone(),
                values: grouped.groups.iter().map(|g| g.sums[i]).collect(),
            })
            .collect();

        Self {
            id,
            kind,
            title: title.to_string(),
            category_label: grouped.key_column.clone(),
            value_label: String::from("value"),
            legend_title: None,
            categories,
            series,
        }
    }

    /// Build from a long table: keys become categories in first-seen order,
    /// variables become series in first-seen order.
    pub fn from_long(id: ChartId, kind: ChartKind, title: &str, long: &LongTable) -> Self {
        let mut categories: Vec<String> = Vec::new();
        let mut series: Vec<Series> = Vec::new();

        for row in &long.rows {
            let cat_idx = match categories.iter().position(|c| c == &row.key) {
                Some(i) => i,
                None => {
                    categories.push(row.key.clone());
                    for s in series.iter_mut() {
                        s.values.push(0.0);
                    }
                    categories.len() - 1
                }
            };
            let series_idx = match series.iter().position(|s| s.name == row.variable) {
                Some(i) => i,
                None => {
                    series.push(Series {
                        name: row.variable.clone(),
                        values: vec![0.0; categories.len()],
                    });
                    series.len() - 1
                }
            };
            series[series_idx].values[cat_idx] = row.value;
        }

        Self {
            id,
            kind,
            title: title.to_string(),
            category_label: long.key_column.clone(),
            value_label: String::from("value"),
            legend_title: None,
            categories,
            series,
        }
    }

    pub fn with_labels(mut self, category_label: &str, value_label: &str) -> Self {
        self.category_label = category_label.to_string();
        self.value_label = value_label.to_string();
        self
    }

    pub fn with_legend_title(mut self, legend_title: &str) -> Self {
        self.legend_title = Some(legend_title.to_string());
        self
    }

    /// Sum of all series at one category.
    pub fn category_total(&self, index: usize) -> f64 {
        self.series.iter().filter_map(|s| s.values.get(index)).sum()
    }

    /// Reorder categories (and every series with them) by ascending total.
    pub fn sort_categories_ascending(mut self) -> Self {
        let mut order: Vec<usize> = (0..self.categories.len()).collect();
        let totals: Vec<f64> = order.iter().map(|&i| self.category_total(i)).collect();
        order.sort_by(|&a, &b| totals[a].partial_cmp(&totals[b]).unwrap_or(Ordering::Equal));

        self.categories = order.iter().map(|&i| self.categories[i].clone()).collect();
        for s in self.series.iter_mut() {
            s.values = order.iter().map(|&i| s.values[i]).collect();
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataProcessor;
    use polars::prelude::*;

    fn grouped() -> GroupedTotals {
        let df = df!(
            "DEST" => &["A", "A", "B"],
            "Carrier" => &[10.0, 2.0, 3.0],
            "Weather" => &[5.0, 1.0, 0.0]
        )
        .unwrap();
        DataProcessor::aggregate_top_n(&df, "DEST", &["Carrier", "Weather"], 10).unwrap()
    }

    #[test]
    fn long_and_grouped_builders_agree() {
        let grouped = grouped();
        let long = DataProcessor::melt(&grouped);
        let id = ChartId::CausesByDestination;
        let a = ChartSpec::from_groups(id, ChartKind::GroupedBar, "t", &grouped);
        let b = ChartSpec::from_long(id, ChartKind::GroupedBar, "t", &long);
        assert_eq!(a, b);
        assert_eq!(b.categories, vec!["A", "B"]);
        assert_eq!(b.series[0].name, "Carrier");
        assert_eq!(b.series[0].values, vec![12.0, 3.0]);
        assert_eq!(b.series[1].values, vec![6.0, 0.0]);
    }

    #[test]
    fn ascending_sort_moves_every_series() {
        let id = ChartId::AirlineAverageDelay;
        let spec = ChartSpec::from_groups(id, ChartKind::HorizontalBar, "t", &grouped())
            .sort_categories_ascending();
        assert_eq!(spec.categories, vec!["B", "A"]);
        assert_eq!(spec.series[0].values, vec![3.0, 12.0]);
        assert_eq!(spec.series[1].values, vec![0.0, 6.0]);
    }

    #[test]
    fn serializes_ids_in_snake_case() {
        let id = ChartId::CausesByOrigin;
        let spec = ChartSpec::from_groups(id, ChartKind::GroupedBar, "t", &grouped());
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["id"], "causes_by_origin");
        assert_eq!(json["kind"], "grouped_bar");
    }

    #[test]
    fn cause_headings_leave_the_group_count_to_the_title() {
        let causes = [
            ChartId::CausesByDestination,
            ChartId::CausesByOrigin,
            ChartId::CausesByAirline,
        ];
        for id in causes {
            let (_, text) = id.heading().split_once(' ').unwrap();
            assert!(!text.chars().any(|c| c.is_ascii_digit()), "{}", id.heading());
        }
    }

    #[test]
    fn slugs_are_unique() {
        let mut slugs: Vec<&str> = ChartId::ALL.iter().map(|c| c.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), ChartId::ALL.len());
    }
}
