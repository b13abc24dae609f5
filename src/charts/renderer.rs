//! Static Chart Renderer
//! Renders chart specifications to PNG with plotters, using the same bar
//! geometry as the interactive view, and exports the whole dashboard.

use super::builder::ChartOutcome;
use super::layout::{bar_slots, category_at, value_range};
use super::plotter::ChartPlotter;
use super::spec::{ChartId, ChartKind, ChartSpec};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Name of the outcome manifest written next to the images.
pub const MANIFEST_FILE: &str = "charts.json";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart '{chart}': {message}")]
    Draw { chart: String, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of a dashboard export.
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub rendered: usize,
    pub skipped: usize,
    pub failures: Vec<String>,
}

#[derive(Serialize)]
struct ManifestEntry<'a> {
    id: ChartId,
    heading: &'static str,
    #[serde(flatten)]
    outcome: &'a ChartOutcome,
}

pub struct StaticChartRenderer {
    width: u32,
    height: u32,
}

impl StaticChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Render one chart to a PNG file.
    pub fn render_png(&self, spec: &ChartSpec, path: &Path) -> Result<(), RenderError> {
        let draw_error = |e: &dyn std::fmt::Display| RenderError::Draw {
            chart: spec.id.slug().to_string(),
            message: e.to_string(),
        };

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        Self::draw(&root, spec).map_err(|e| draw_error(&e))?;
        root.present().map_err(|e| draw_error(&e))?;
        Ok(())
    }

    fn color(series_index: usize) -> RGBColor {
        let c = ChartPlotter::series_color(series_index);
        RGBColor(c.r(), c.g(), c.b())
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        spec: &ChartSpec,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let horizontal = spec.kind == ChartKind::HorizontalBar;
        let (lo, hi) = value_range(spec);
        let n_categories = spec.categories.len().max(1);
        let category_range = -0.5..(n_categories as f64 - 0.5);

        // (category, value) -> backend (x, y)
        let pt = move |category: f64, value: f64| {
            if horizontal {
                (value, category)
            } else {
                (category, value)
            }
        };

        let mut builder = ChartBuilder::on(root);
        builder
            .caption(&spec.title, ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(if horizontal { 45 } else { 60 })
            .y_label_area_size(if horizontal { 120 } else { 70 });
        let mut chart = if horizontal {
            builder.build_cartesian_2d(lo..hi, category_range)?
        } else {
            builder.build_cartesian_2d(category_range, lo..hi)?
        };

        let category_label = |v: &f64| category_at(&spec.categories, *v);
        let mut mesh = chart.configure_mesh();
        if horizontal {
            mesh.x_desc(spec.value_label.as_str())
                .y_desc(spec.category_label.as_str())
                .y_labels(n_categories)
                .y_label_formatter(&category_label)
                .disable_y_mesh();
        } else {
            mesh.x_desc(spec.category_label.as_str())
                .y_desc(spec.value_label.as_str())
                .x_labels(n_categories)
                .x_label_formatter(&category_label)
                .disable_x_mesh();
        }
        mesh.draw()?;

        if spec.kind == ChartKind::Line {
            for (j, series) in spec.series.iter().enumerate() {
                let color = Self::color(j);
                let points: Vec<(f64, f64)> = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| (i as f64, v))
                    .collect();

                chart
                    .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                chart.draw_series(
                    points
                        .into_iter()
                        .map(move |p| Circle::new(p, 3, color.filled())),
                )?;
            }
        } else {
            for (j, (series, slots)) in spec.series.iter().zip(bar_slots(spec)).enumerate() {
                let color = Self::color(j);
                chart
                    .draw_series(slots.into_iter().map(move |s| {
                        let half = s.width / 2.0;
                        Rectangle::new(
                            [pt(s.center - half, s.base), pt(s.center + half, s.top())],
                            color.filled(),
                        )
                    }))?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                    });
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        Ok(())
    }

    /// Write every outcome, ready or not, as JSON.
    pub fn write_manifest(
        outcomes: &[(ChartId, ChartOutcome)],
        dir: &Path,
    ) -> Result<(), RenderError> {
        let entries: Vec<ManifestEntry> = outcomes
            .iter()
            .map(|(id, outcome)| ManifestEntry {
                id: *id,
                heading: id.heading(),
                outcome,
            })
            .collect();
        fs::write(dir.join(MANIFEST_FILE), serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }

    /// Render every ready chart to `<dir>/<slug>.png` and write the manifest.
    /// A chart that fails to draw is reported and the export continues.
    pub fn export_dashboard(
        &self,
        outcomes: &[(ChartId, ChartOutcome)],
        dir: &Path,
    ) -> Result<ExportSummary, RenderError> {
        fs::create_dir_all(dir)?;
        let mut summary = ExportSummary::default();

        for (id, outcome) in outcomes {
            let Some(spec) = outcome.spec() else {
                summary.skipped += 1;
                continue;
            };
            let path = dir.join(format!("{}.png", id.slug()));
            match self.render_png(spec, &path) {
                Ok(()) => summary.rendered += 1,
                Err(e) => {
                    warn!(chart = id.slug(), "{}", e);
                    summary.failures.push(e.to_string());
                }
            }
        }

        Self::write_manifest(outcomes, dir)?;
        info!(
            dir = %dir.display(),
            rendered = summary.rendered,
            skipped = summary.skipped,
            failed = summary.failures.len(),
            "dashboard exported"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::spec::Series;

    fn ready() -> ChartOutcome {
        ChartOutcome::Ready {
            spec: ChartSpec {
                id: ChartId::TotalFlights,
                kind: ChartKind::Bar,
                title: "Total Number of Flights per Year".to_string(),
                category_label: "Year".to_string(),
                value_label: "Total Flights".to_string(),
                legend_title: None,
                categories: vec!["2019".to_string()],
                series: vec![Series {
                    name: "Total_Flights".to_string(),
                    values: vec![758000.0],
                }],
            },
        }
    }

    #[test]
    fn manifest_lists_every_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let outcomes = vec![
            (ChartId::TotalFlights, ready()),
            (
                ChartId::Cancellations,
                ChartOutcome::Unavailable {
                    message: "Data for 'Total Cancellations per Year' is not available."
                        .to_string(),
                },
            ),
        ];

        StaticChartRenderer::write_manifest(&outcomes, dir.path()).unwrap();

        let text = fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["id"], "total_flights");
        assert_eq!(entries[0]["status"], "ready");
        assert_eq!(entries[0]["spec"]["series"][0]["values"][0], 758000.0);
        assert_eq!(entries[1]["status"], "unavailable");
        assert_eq!(entries[1]["heading"], "1.3 Total Cancellations per Year");
    }

    #[test]
    fn export_writes_one_png_per_ready_chart() {
        let dir = tempfile::tempdir().unwrap();
        let line = ChartSpec {
            id: ChartId::DepartureTimeImpact,
            kind: ChartKind::Line,
            title: "Impact of Scheduled Departure Time on Delay Percentages".to_string(),
            category_label: "Scheduled Departure Time (Hour of Day)".to_string(),
            value_label: "Delay Percentage (%)".to_string(),
            legend_title: Some("Delay Type".to_string()),
            categories: vec!["5".to_string(), "6".to_string(), "7".to_string()],
            series: vec![
                Series {
                    name: "Departure_Delay_Percentage".to_string(),
                    values: vec![10.0, 12.5, 15.0],
                },
                Series {
                    name: "Arrival_Delay_Percentage".to_string(),
                    values: vec![11.0, 13.0, 14.5],
                },
            ],
        };
        let outcomes = vec![
            (ChartId::TotalFlights, ready()),
            (ChartId::DepartureTimeImpact, ChartOutcome::Ready { spec: line }),
        ];

        let summary = StaticChartRenderer::new(640, 480)
            .export_dashboard(&outcomes, dir.path())
            .unwrap();

        assert_eq!(summary.rendered, 2);
        assert_eq!(summary.skipped, 0);
        assert!(summary.failures.is_empty(), "{:?}", summary.failures);
        assert!(dir.path().join("total_flights.png").is_file());
        assert!(dir.path().join("departure_time_impact.png").is_file());
    }

    #[test]
    fn export_skips_charts_without_data() {
        let dir = tempfile::tempdir().unwrap();
        let outcomes = vec![(
            ChartId::CausesByAirline,
            ChartOutcome::Failed {
                message: "Column 'AIRLINE' not found (available: none)".to_string(),
            },
        )];
        let summary = StaticChartRenderer::new(640, 480)
            .export_dashboard(&outcomes, dir.path())
            .unwrap();
        assert_eq!(summary.rendered, 0);
        assert_eq!(summary.skipped, 1);
        assert!(dir.path().join(MANIFEST_FILE).is_file());
    }
}
