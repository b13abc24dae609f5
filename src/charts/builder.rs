//! Chart Builder Module
//! Turns loaded result tables into chart specifications, one outcome per chart.

use super::spec::{ChartId, ChartKind, ChartSpec};
use crate::data::{DataProcessor, LoadedTables, ProcessorError, ResultTable, DELAY_CAUSES};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{debug, warn};

/// What the dashboard shows in a chart's slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartOutcome {
    Ready { spec: ChartSpec },
    /// The source table is empty or failed to load.
    Unavailable { message: String },
    /// The source table lacks a column the chart needs.
    Failed { message: String },
}

impl ChartOutcome {
    pub fn spec(&self) -> Option<&ChartSpec> {
        match self {
            ChartOutcome::Ready { spec } => Some(spec),
            _ => None,
        }
    }
}

/// How one chart is derived from its table.
struct Recipe {
    table: ResultTable,
    key: &'static str,
    values: &'static [&'static str],
    kind: ChartKind,
    title: &'static str,
    category_label: &'static str,
    value_label: &'static str,
    legend_title: Option<&'static str>,
    /// Group by `key` and keep the top groups instead of plotting rows as-is.
    aggregate: bool,
}

impl Recipe {
    fn for_chart(id: ChartId) -> Self {
        fn plain(
            table: ResultTable,
            key: &'static str,
            values: &'static [&'static str],
            kind: ChartKind,
            title: &'static str,
            category_label: &'static str,
            value_label: &'static str,
        ) -> Recipe {
            Recipe {
                table,
                key,
                values,
                kind,
                title,
                category_label,
                value_label,
                legend_title: None,
                aggregate: false,
            }
        }

        fn causes(key: &'static str, title: &'static str, category_label: &'static str) -> Recipe {
            Recipe {
                table: ResultTable::DelayCauses,
                key,
                values: &DELAY_CAUSES,
                kind: ChartKind::GroupedBar,
                title,
                category_label,
                value_label: "Total Delay Minutes",
                legend_title: Some("Delay Cause"),
                aggregate: true,
            }
        }

        match id {
            ChartId::TotalFlights => plain(
                ResultTable::FlightsPerYear,
                "Year",
                &["Total_Flights"],
                ChartKind::Bar,
                "Total Number of Flights per Year",
                "Year",
                "Total Flights",
            ),
            ChartId::OnTimeVsDelayed => Recipe {
                legend_title: Some("Flight Status"),
                ..plain(
                    ResultTable::OnTimeVsDelayed,
                    "Year",
                    &["On_Time_Flights", "Delayed_Flights"],
                    ChartKind::StackedBar,
                    "On-Time vs. Delayed Flights per Year",
                    "Year",
                    "Number of Flights",
                )
            },
            ChartId::Cancellations => plain(
                ResultTable::CancellationsPerYear,
                "Year",
                &["Total_Cancellations"],
                ChartKind::Bar,
                "Total Flight Cancellations per Year",
                "Year",
                "Number of Cancellations",
            ),
            ChartId::AverageDelays => Recipe {
                legend_title: Some("Delay Type"),
                ..plain(
                    ResultTable::AverageDelaysPerYear,
                    "Year",
                    &["Average_Departure_Delay", "Average_Arrival_Delay"],
                    ChartKind::GroupedBar,
                    "Average Departure & Arrival Delay by Year",
                    "Year",
                    "Average Delay (minutes)",
                )
            },
            ChartId::CausesByDestination => causes(
                "DEST",
                "Total Delay Minutes by Cause for Top {n} Destination Airports",
                "Destination Airport",
            ),
            ChartId::CausesByOrigin => causes(
                "ORIGIN",
                "Total Delay Minutes by Cause for Top {n} Origin Airports",
                "Origin Airport",
            ),
            ChartId::CausesByAirline => causes(
                "AIRLINE",
                "Total Delay Minutes by Cause for Top {n} Airlines",
                "Airline",
            ),
            ChartId::AirportDelayPct => plain(
                ResultTable::AirportDelayPct,
                "ORIGIN",
                &["Departure_Delay_Percentage"],
                ChartKind::Bar,
                "Top 10 Airports by Departure Delay %",
                "Airport Code",
                "Departure Delay (%)",
            ),
            ChartId::AirlineCancellationPct => plain(
                ResultTable::AirlineCancellationPct,
                "AIRLINE",
                &["Cancellation_Percentage"],
                ChartKind::HorizontalBar,
                "Top 10 Airlines by Cancellation %",
                "Airline",
                "Cancellation Percentage (%)",
            ),
            ChartId::AirlineAverageDelay => plain(
                ResultTable::AirlineAverageDelay,
                "AIRLINE",
                &["Average_Departure_Delay"],
                ChartKind::HorizontalBar,
                "Top 10 Airlines by Avg. Departure Delay",
                "Airline",
                "Avg. Departure Delay (minutes)",
            ),
            ChartId::RouteDepartureDelayPct => plain(
                ResultTable::RouteDelayPct,
                "Route",
                &["Departure_Delay_Percentage"],
                ChartKind::Bar,
                "Top 10 Routes by Departure Delay %",
                "Flight Route",
                "Departure Delay (%)",
            ),
            ChartId::RouteArrivalDelayPct => plain(
                ResultTable::RouteDelayPct,
                "Route",
                &["Arrival_Delay_Percentage"],
                ChartKind::Bar,
                "Top 10 Routes by Arrival Delay %",
                "Flight Route",
                "Arrival Delay (%)",
            ),
            ChartId::DepartureTimeImpact => Recipe {
                legend_title: Some("Delay Type"),
                ..plain(
                    ResultTable::DepartureTimeDelayPct,
                    "CRS_DEP_TIME",
                    &["Departure_Delay_Percentage", "Arrival_Delay_Percentage"],
                    ChartKind::Line,
                    "Impact of Scheduled Departure Time on Delay Percentages",
                    "Scheduled Departure Time (Hour of Day)",
                    "Delay Percentage (%)",
                )
            },
        }
    }
}

/// Builds chart specifications from loaded tables.
pub struct ChartBuilder {
    top_n: usize,
}

impl ChartBuilder {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Build one chart. Never fails the whole dashboard: problems become
    /// an `Unavailable` or `Failed` outcome for this chart only.
    pub fn build(&self, id: ChartId, tables: &LoadedTables) -> ChartOutcome {
        let recipe = Recipe::for_chart(id);
        let df = tables.get(recipe.table);

        if df.height() == 0 {
            return ChartOutcome::Unavailable {
                message: format!("Data for '{}' is not available.", id.data_label()),
            };
        }

        match self.build_spec(id, &recipe, df) {
            Ok(spec) => {
                debug!(chart = id.slug(), categories = spec.categories.len(), "chart built");
                ChartOutcome::Ready { spec }
            }
            Err(e) => {
                warn!(chart = id.slug(), "{}", e);
                ChartOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    fn build_spec(
        &self,
        id: ChartId,
        recipe: &Recipe,
        df: &DataFrame,
    ) -> Result<ChartSpec, ProcessorError> {
        let title = recipe.title.replace("{n}", &self.top_n.to_string());

        let grouped = if recipe.aggregate {
            DataProcessor::aggregate_top_n(df, recipe.key, recipe.values, self.top_n)?
        } else {
            DataProcessor::select_rows(df, recipe.key, recipe.values)?
        };
        if grouped.is_empty() {
            warn!(chart = id.slug(), key = recipe.key, "no rows with a key to plot");
        }

        let spec = if recipe.aggregate {
            let long = DataProcessor::melt(&grouped);
            debug!(
                chart = id.slug(),
                groups = grouped.len(),
                rows = long.rows.len(),
                "reshaped to long form"
            );
            ChartSpec::from_long(id, recipe.kind, &title, &long)
        } else {
            ChartSpec::from_groups(id, recipe.kind, &title, &grouped)
        };

        let mut spec = spec.with_labels(recipe.category_label, recipe.value_label);
        if let Some(legend) = recipe.legend_title {
            spec = spec.with_legend_title(legend);
        }
        if recipe.kind == ChartKind::HorizontalBar {
            spec = spec.sort_categories_ascending();
        }
        Ok(spec)
    }

    /// Build every dashboard chart, in dashboard order.
    pub fn build_all(&self, tables: &LoadedTables) -> Vec<(ChartId, ChartOutcome)> {
        ChartId::ALL
            .iter()
            .map(|&id| (id, self.build(id, tables)))
            .collect()
    }
}
