//! Control Panel Widget
//! Top bar with the results directory, reload/export buttons and load status.

use egui::{Color32, RichText};
use std::path::PathBuf;

/// Top control bar with data source and export controls.
pub struct ControlPanel {
    pub results_dir: PathBuf,
    pub status: String,
    pub is_loading: bool,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(results_dir: PathBuf) -> Self {
        Self {
            results_dir,
            status: "Ready".to_string(),
            is_loading: false,
            export_enabled: false,
        }
    }

    /// Draw the control bar
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("✈ Flight Delays")
                    .size(18.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.separator();

            ui.label(RichText::new("📁 Results:").strong());
            ui.label(
                RichText::new(self.results_dir.display().to_string())
                    .size(12.0)
                    .color(Color32::GRAY),
            );

            ui.add_enabled_ui(!self.is_loading, |ui| {
                if ui.button("📂 Browse").clicked() {
                    action = ControlPanelAction::BrowseResults;
                }
                if ui.button("⟳ Reload").clicked() {
                    action = ControlPanelAction::Reload;
                }
            });

            ui.add_enabled_ui(self.export_enabled && !self.is_loading, |ui| {
                if ui.button("🖼 Export PNG").clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });

            ui.separator();
            if self.is_loading {
                ui.spinner();
            }

            let status_color = if self.status.contains("Error") {
                Color32::from_rgb(220, 53, 69)
            } else if self.status.contains("missing") {
                Color32::from_rgb(255, 193, 7)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });
        ui.add_space(4.0);

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseResults,
    Reload,
    ExportPng,
}
