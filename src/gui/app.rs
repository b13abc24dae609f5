//! Dashboard Main Application
//! Control bar on top, dashboard page below. Tables load on a background thread.

use crate::charts::{ChartBuilder, ChartId, ChartOutcome, StaticChartRenderer};
use crate::config::DashboardConfig;
use crate::data::DataLoader;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::{error, info};

/// Loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        outcomes: Vec<(ChartId, ChartOutcome)>,
        warnings: Vec<String>,
        available: usize,
    },
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async loading
    load_rx: Option<Receiver<LoadResult>>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::new(config.results_dir.clone()),
            chart_viewer: ChartViewer::new(),
            config,
            load_rx: None,
        };
        app.start_loading();
        app
    }

    /// Load tables and build charts in a background thread
    fn start_loading(&mut self) {
        if self.load_rx.is_some() {
            return; // Already loading
        }

        self.chart_viewer.clear();
        self.control_panel.is_loading = true;
        self.control_panel.export_enabled = false;
        self.control_panel.set_status("Loading result tables...");

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        let results_dir = self.config.results_dir.clone();
        let top_n = self.config.top_n;
        thread::spawn(move || Self::run_loading(tx, results_dir, top_n));
    }

    /// Run loading (called from background thread)
    fn run_loading(tx: Sender<LoadResult>, results_dir: PathBuf, top_n: usize) {
        let _ = tx.send(LoadResult::Progress("Reading CSV files...".to_string()));
        let tables = DataLoader::new(results_dir).load_all();

        let _ = tx.send(LoadResult::Progress("Building charts...".to_string()));
        let outcomes = ChartBuilder::new(top_n).build_all(&tables);

        let warnings = tables
            .warnings
            .iter()
            .map(|w| {
                format!(
                    "{}. Please ensure {} is in the results directory.",
                    w.error,
                    w.table.file_name()
                )
            })
            .collect();

        let _ = tx.send(LoadResult::Complete {
            outcomes,
            warnings,
            available: tables.available_count(),
        });
    }

    /// Check for loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            loop {
                let result = match rx.try_recv() {
                    Ok(result) => result,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        if should_keep_receiver {
                            error!("loading thread stopped before finishing");
                            self.control_panel.set_status("Error: loading stopped unexpectedly");
                            self.control_panel.is_loading = false;
                            should_keep_receiver = false;
                        }
                        break;
                    }
                };

                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete {
                        outcomes,
                        warnings,
                        available,
                    } => {
                        let missing = warnings.len();
                        self.chart_viewer.set_outcomes(outcomes, warnings);
                        let ready = self.chart_viewer.ready_count();
                        let status = if missing == 0 {
                            format!("Loaded {} tables, {} charts ready", available, ready)
                        } else {
                            format!(
                                "Loaded {} tables ({} missing), {} charts ready",
                                available, missing, ready
                            )
                        };
                        self.control_panel.set_status(&status);
                        self.control_panel.is_loading = false;
                        self.control_panel.export_enabled = ready > 0;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Handle results directory selection
    fn handle_browse_results(&mut self) {
        if let Some(dir) = rfd::FileDialog::new()
            .set_directory(&self.config.results_dir)
            .pick_folder()
        {
            info!(dir = %dir.display(), "results directory changed");
            self.config.results_dir = dir.clone();
            self.control_panel.results_dir = dir;
            self.start_loading();
        }
    }

    /// Handle PNG export - render every ready chart into the chosen folder
    fn handle_export_png(&mut self) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        self.control_panel.set_status("Rendering charts...");
        let renderer =
            StaticChartRenderer::new(self.config.export_width, self.config.export_height);
        match renderer.export_dashboard(&self.chart_viewer.outcomes, &dir) {
            Ok(summary) if summary.failures.is_empty() => {
                self.control_panel.set_status(&format!(
                    "Exported {} charts to {}",
                    summary.rendered,
                    dir.display()
                ));
            }
            Ok(summary) => {
                self.control_panel.set_status(&format!(
                    "Error: {} of {} charts failed to render ({})",
                    summary.failures.len(),
                    summary.rendered + summary.failures.len(),
                    summary.failures[0]
                ));
            }
            Err(e) => {
                error!("export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.load_rx.is_some() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("control_panel").show(ctx, |ui| {
            match self.control_panel.show(ui) {
                ControlPanelAction::BrowseResults => self.handle_browse_results(),
                ControlPanelAction::Reload => self.start_loading(),
                ControlPanelAction::ExportPng => self.handle_export_png(),
                ControlPanelAction::None => {}
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
