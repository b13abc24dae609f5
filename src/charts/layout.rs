//! Bar geometry shared by the interactive and static renderers, so both draw
//! the same chart from the same spec.

use super::spec::{ChartKind, ChartSpec};

/// Fraction of a category slot covered by its bars.
pub const GROUP_WIDTH: f64 = 0.8;

/// One bar in category-axis units. Category `i` is centered on `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSlot {
    pub center: f64,
    pub width: f64,
    pub base: f64,
    pub value: f64,
}

impl BarSlot {
    pub fn top(&self) -> f64 {
        self.base + self.value
    }
}

/// Bars per series, indexed `[series][category]`.
///
/// Stacked charts pile series on each other; every other bar kind puts
/// series side by side inside the category slot.
pub fn bar_slots(spec: &ChartSpec) -> Vec<Vec<BarSlot>> {
    let n_series = spec.series.len().max(1);
    let n_categories = spec.categories.len();

    match spec.kind {
        ChartKind::StackedBar => {
            let mut bases = vec![0.0; n_categories];
            spec.series
                .iter()
                .map(|series| {
                    (0..n_categories)
                        .map(|i| {
                            let value = series.values.get(i).copied().unwrap_or(0.0);
                            let slot = BarSlot {
                                center: i as f64,
                                width: GROUP_WIDTH,
                                base: bases[i],
                                value,
                            };
                            bases[i] += value;
                            slot
                        })
                        .collect()
                })
                .collect()
        }
        _ => {
            let width = GROUP_WIDTH / n_series as f64;
            spec.series
                .iter()
                .enumerate()
                .map(|(j, series)| {
                    (0..n_categories)
                        .map(|i| BarSlot {
                            center: i as f64 - GROUP_WIDTH / 2.0 + width * (j as f64 + 0.5),
                            width,
                            base: 0.0,
                            value: series.values.get(i).copied().unwrap_or(0.0),
                        })
                        .collect()
                })
                .collect()
        }
    }
}

/// Value axis range covering every bar (or line point) plus headroom.
/// Always includes zero.
pub fn value_range(spec: &ChartSpec) -> (f64, f64) {
    let (mut min, mut max) = (0.0_f64, 0.0_f64);

    if spec.kind == ChartKind::Line {
        for v in spec.series.iter().flat_map(|s| s.values.iter()) {
            min = min.min(*v);
            max = max.max(*v);
        }
    } else {
        for slot in bar_slots(spec).iter().flatten() {
            min = min.min(slot.base.min(slot.top()));
            max = max.max(slot.base.max(slot.top()));
        }
    }

    if max <= min {
        return (0.0, 1.0);
    }
    let pad = (max - min) * 0.1;
    (if min < 0.0 { min - pad } else { 0.0 }, max + pad)
}

/// Category name for a tick at `value`, empty between categories.
pub fn category_at(categories: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::spec::{ChartId, Series};

    fn spec(kind: ChartKind, series: &[&[f64]]) -> ChartSpec {
        ChartSpec {
            id: ChartId::AverageDelays,
            kind,
            title: String::new(),
            category_label: String::new(),
            value_label: String::new(),
            legend_title: None,
            categories: vec!["2019".into(), "2020".into()],
            series: series
                .iter()
                .enumerate()
                .map(|(i, v)| Series {
                    name: format!("s{i}"),
                    values: v.to_vec(),
                })
                .collect(),
        }
    }

    #[test]
    fn grouped_bars_split_the_slot() {
        let slots = bar_slots(&spec(ChartKind::GroupedBar, &[&[1.0, 2.0], &[3.0, 4.0]]));
        assert_eq!(slots.len(), 2);
        assert!((slots[0][0].width - 0.4).abs() < 1e-9);
        assert!((slots[0][0].center + 0.2).abs() < 1e-9);
        assert!((slots[1][0].center - 0.2).abs() < 1e-9);
        assert!((slots[1][1].center - 1.2).abs() < 1e-9);
        assert!(slots.iter().flatten().all(|s| s.base == 0.0));
    }

    #[test]
    fn single_series_bar_is_centered() {
        let slots = bar_slots(&spec(ChartKind::Bar, &[&[1.0, 2.0]]));
        assert!((slots[0][1].center - 1.0).abs() < 1e-9);
        assert_eq!(slots[0][1].width, GROUP_WIDTH);
    }

    #[test]
    fn stacked_bars_rest_on_previous_series() {
        let slots = bar_slots(&spec(ChartKind::StackedBar, &[&[600.0, 500.0], &[158.0, 100.0]]));
        assert_eq!(slots[1][0].base, 600.0);
        assert_eq!(slots[1][0].top(), 758.0);
        assert_eq!(slots[1][1].base, 500.0);
        assert_eq!(slots[0][0].center, slots[1][0].center);
    }

    #[test]
    fn stacked_range_covers_the_tallest_stack() {
        let stacked = spec(ChartKind::StackedBar, &[&[600.0, 500.0], &[158.0, 100.0]]);
        let (lo, hi) = value_range(&stacked);
        assert_eq!(lo, 0.0);
        assert!(hi > 758.0);
    }

    #[test]
    fn all_zero_chart_gets_unit_range() {
        assert_eq!(value_range(&spec(ChartKind::Line, &[&[0.0, 0.0]])), (0.0, 1.0));
    }

    #[test]
    fn ticks_between_categories_are_blank() {
        let cats = vec!["A".to_string(), "B".to_string()];
        assert_eq!(category_at(&cats, 1.0), "B");
        assert_eq!(category_at(&cats, 0.5), "");
        assert_eq!(category_at(&cats, 2.0), "");
        assert_eq!(category_at(&cats, -1.0), "");
    }
}
