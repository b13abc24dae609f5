//! Chart Plotter Module
//! Draws chart specifications interactively using egui_plot.

use super::layout::{bar_slots, category_at, value_range};
use super::spec::{ChartKind, ChartSpec};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

/// Series colors, in legend order (plotly's default qualitative palette).
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(99, 110, 250),  // Blue
    Color32::from_rgb(239, 85, 59),   // Red
    Color32::from_rgb(0, 204, 150),   // Green
    Color32::from_rgb(171, 99, 250),  // Purple
    Color32::from_rgb(255, 161, 90),  // Orange
    Color32::from_rgb(25, 211, 243),  // Cyan
    Color32::from_rgb(255, 102, 146), // Pink
    Color32::from_rgb(182, 232, 128), // Light Green
    Color32::from_rgb(255, 151, 255), // Magenta
    Color32::from_rgb(254, 203, 82),  // Yellow
];

/// Creates dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for a series.
    pub fn series_color(series_index: usize) -> Color32 {
        PALETTE[series_index % PALETTE.len()]
    }

    /// Draw a chart. Categories sit on x (on y for horizontal bars).
    pub fn draw_chart(ui: &mut egui::Ui, spec: &ChartSpec, height: f32) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&spec.title).size(14.0).strong());
        });
        if let Some(legend_title) = &spec.legend_title {
            ui.label(
                RichText::new(legend_title)
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }

        let horizontal = spec.kind == ChartKind::HorizontalBar;
        let (lo, hi) = value_range(spec);
        let categories = spec.categories.clone();
        let n_categories = categories.len();

        let category_ticks = move |_input: egui_plot::GridInput| {
            (0..n_categories)
                .map(|i| GridMark {
                    value: i as f64,
                    step_size: 1.0,
                })
                .collect::<Vec<_>>()
        };

        let mut plot = Plot::new(format!("chart_{}", spec.id.slug()))
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .legend(Legend::default());

        plot = if horizontal {
            plot.x_axis_label(spec.value_label.as_str())
                .y_axis_label(spec.category_label.as_str())
                .include_x(lo)
                .include_x(hi)
                .y_grid_spacer(category_ticks)
                .y_axis_formatter(move |mark, _range| category_at(&categories, mark.value))
        } else {
            plot.x_axis_label(spec.category_label.as_str())
                .y_axis_label(spec.value_label.as_str())
                .include_y(lo)
                .include_y(hi)
                .x_grid_spacer(category_ticks)
                .x_axis_formatter(move |mark, _range| category_at(&categories, mark.value))
        };

        plot.show(ui, |plot_ui| {
            if spec.kind == ChartKind::Line {
                for (j, series) in spec.series.iter().enumerate() {
                    let color = Self::series_color(j);
                    let points: Vec<[f64; 2]> = series
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| [i as f64, v])
                        .collect();

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(color)
                            .width(2.0)
                            .name(&series.name),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points.into_iter()))
                            .radius(3.0)
                            .color(color),
                    );
                }
                return;
            }

            for (j, (series, slots)) in spec.series.iter().zip(bar_slots(spec)).enumerate() {
                let color = Self::series_color(j);
                let bars: Vec<Bar> = slots
                    .iter()
                    .zip(spec.categories.iter())
                    .map(|(slot, category)| {
                        Bar::new(slot.center, slot.value)
                            .width(slot.width)
                            .base_offset(slot.base)
                            .name(format!("{} / {}", category, series.name))
                            .fill(color)
                    })
                    .collect();

                let mut chart = BarChart::new(bars).color(color).name(&series.name);
                if horizontal {
                    chart = chart.horizontal();
                }
                plot_ui.bar_chart(chart);
            }
        });
    }
}
