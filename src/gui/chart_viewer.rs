//! Chart Viewer Widget
//! Scrollable dashboard page: title, load warnings, collapsible sections of
//! charts with their commentary, and the footer.

use crate::charts::{ChartId, ChartOutcome, ChartPlotter};
use crate::dashboard::{
    Insight, NoteGroup, PanelRow, Section, FOOTER, PAGE_INTRO, PAGE_TITLE, SECTIONS,
};
use egui::{Color32, RichText, ScrollArea};

const CHART_HEIGHT: f32 = 320.0;
const WARNING_COLOR: Color32 = Color32::from_rgb(255, 193, 7);
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Scrollable dashboard page.
#[derive(Default)]
pub struct ChartViewer {
    /// Chart outcomes in dashboard order
    pub outcomes: Vec<(ChartId, ChartOutcome)>,
    /// Files that failed to load
    pub warnings: Vec<String>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.outcomes.clear();
        self.warnings.clear();
    }

    pub fn set_outcomes(&mut self, outcomes: Vec<(ChartId, ChartOutcome)>, warnings: Vec<String>) {
        self.outcomes = outcomes;
        self.warnings = warnings;
    }

    pub fn ready_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.spec().is_some()).count()
    }

    fn outcome(&self, id: ChartId) -> Option<&ChartOutcome> {
        self.outcomes.iter().find(|(c, _)| *c == id).map(|(_, o)| o)
    }

    /// The message shared by every chart of `section` when none of them has data.
    fn section_notice(&self, section: &Section) -> Option<&str> {
        let mut shared: Option<&str> = None;
        for id in section.charts() {
            match self.outcome(id) {
                Some(ChartOutcome::Unavailable { message }) => match shared {
                    Some(seen) if seen != message.as_str() => return None,
                    _ => shared = Some(message.as_str()),
                },
                _ => return None,
            }
        }
        shared
    }

    /// Draw the whole page
    pub fn show(&self, ui: &mut egui::Ui) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(8.0);
                ui.label(RichText::new(PAGE_TITLE).size(26.0).strong());
                ui.label(PAGE_INTRO);

                for warning in &self.warnings {
                    ui.colored_label(ERROR_COLOR, warning);
                }
                ui.add_space(10.0);

                for section in SECTIONS.iter() {
                    self.draw_section(ui, section);
                    ui.add_space(6.0);
                }

                ui.separator();
                ui.label(RichText::new(FOOTER).size(11.0).color(Color32::GRAY));
            });
    }

    fn draw_section(&self, ui: &mut egui::Ui, section: &Section) {
        egui::CollapsingHeader::new(RichText::new(section.title).size(16.0).strong())
            .id_salt(section.title)
            .default_open(true)
            .show(ui, |ui| {
                ui.heading(section.heading);
                ui.add_space(6.0);

                let notice = self.section_notice(section);
                if let Some(message) = notice {
                    ui.colored_label(WARNING_COLOR, format!("⚠ {}", message));
                }

                for row in section.rows.iter().filter(|_| notice.is_none()) {
                    match row {
                        PanelRow::Columns(left, right) => {
                            ui.columns(2, |cols| {
                                for &id in left.iter() {
                                    self.draw_chart_slot(&mut cols[0], id);
                                }
                                for &id in right.iter() {
                                    self.draw_chart_slot(&mut cols[1], id);
                                }
                            });
                        }
                        PanelRow::Full(charts) => {
                            for &id in charts.iter() {
                                self.draw_chart_slot(ui, id);
                            }
                        }
                    }
                }

                if !section.rows.is_empty() {
                    ui.separator();
                }
                for group in section.notes {
                    Self::draw_notes(ui, group);
                }
            });
    }

    /// Draw one chart with its numbered heading, or the reason it is missing
    fn draw_chart_slot(&self, ui: &mut egui::Ui, id: ChartId) {
        ui.label(RichText::new(id.heading()).size(15.0).strong());

        match self.outcome(id) {
            Some(ChartOutcome::Ready { spec }) if spec.is_empty() => {
                ui.colored_label(Color32::GRAY, "No rows to plot.");
            }
            Some(ChartOutcome::Ready { spec }) => {
                egui::Frame::none()
                    .rounding(8.0)
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ChartPlotter::draw_chart(ui, spec, CHART_HEIGHT);
                    });
            }
            Some(ChartOutcome::Unavailable { message }) => {
                ui.colored_label(WARNING_COLOR, format!("⚠ {}", message));
            }
            Some(ChartOutcome::Failed { message }) => {
                ui.colored_label(ERROR_COLOR, format!("✖ {}", message));
            }
            None => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
            }
        }
        ui.add_space(12.0);
    }

    fn draw_notes(ui: &mut egui::Ui, group: &NoteGroup) {
        ui.label(RichText::new(group.title).size(14.0).strong());
        for insight in group.insights {
            Self::draw_insight(ui, insight);
        }
        ui.add_space(6.0);
    }

    fn draw_insight(ui: &mut egui::Ui, insight: &Insight) {
        ui.horizontal_wrapped(|ui| {
            ui.label("•");
            ui.label(RichText::new(format!("{}:", insight.lead)).strong());
            ui.label(insight.text);
        });
        if let Some(detail) = insight.detail {
            ui.indent(insight.lead, |ui| {
                ui.label(RichText::new(detail).italics());
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable(label: &str) -> ChartOutcome {
        ChartOutcome::Unavailable {
            message: format!("Data for '{label}' is not available."),
        }
    }

    fn viewer(outcomes: Vec<(ChartId, ChartOutcome)>) -> ChartViewer {
        let mut viewer = ChartViewer::new();
        viewer.set_outcomes(outcomes, Vec::new());
        viewer
    }

    #[test]
    fn missing_delay_causes_warn_once_for_the_section() {
        let viewer = viewer(vec![
            (ChartId::CausesByDestination, unavailable("Delay Causes")),
            (ChartId::CausesByOrigin, unavailable("Delay Causes")),
            (ChartId::CausesByAirline, unavailable("Delay Causes")),
        ]);
        assert_eq!(
            viewer.section_notice(&SECTIONS[1]),
            Some("Data for 'Delay Causes' is not available.")
        );
    }

    #[test]
    fn distinct_messages_stay_with_their_charts() {
        let viewer = viewer(vec![
            (ChartId::TotalFlights, unavailable("Total Flights per Year")),
            (ChartId::Cancellations, unavailable("Total Cancellations per Year")),
            (ChartId::OnTimeVsDelayed, unavailable("On-Time vs. Delayed Flights")),
            (ChartId::AverageDelays, unavailable("Average Delays by Year")),
        ]);
        assert_eq!(viewer.section_notice(&SECTIONS[0]), None);
    }

    #[test]
    fn partly_loaded_section_has_no_notice() {
        let viewer = viewer(vec![
            (ChartId::CausesByDestination, unavailable("Delay Causes")),
            (
                ChartId::CausesByOrigin,
                ChartOutcome::Failed {
                    message: "Column 'ORIGIN' not found".to_string(),
                },
            ),
            (ChartId::CausesByAirline, unavailable("Delay Causes")),
        ]);
        assert_eq!(viewer.section_notice(&SECTIONS[1]), None);
    }
}
