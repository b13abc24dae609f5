//! US Flight Delay Analysis Dashboard
//!
//! Loads the precomputed flight delay result tables and shows them as an
//! interactive dashboard, or exports every chart as PNG with `--export`.

mod charts;
mod config;
mod dashboard;
mod data;
mod gui;

use anyhow::{anyhow, Context, Result};
use charts::{ChartBuilder, StaticChartRenderer};
use clap::Parser;
use config::DashboardConfig;
use data::DataLoader;
use eframe::egui;
use gui::DashboardApp;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flight-delay-dashboard")]
#[command(about = "US Flight Delay Analysis Dashboard")]
struct Args {
    /// Directory holding result1.csv … result10.csv (default: ./result)
    #[arg(short, long)]
    results_dir: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Groups kept in the delay cause charts (default: 10)
    #[arg(long)]
    top_n: Option<usize>,

    /// Render every chart to PNG in this directory instead of opening the window
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    }
    .with_overrides(args.results_dir, args.top_n)?;

    info!(
        results_dir = %config.results_dir.display(),
        top_n = config.top_n,
        "dashboard starting"
    );

    match args.export {
        Some(dir) => run_export(&config, &dir),
        None => run_gui(config),
    }
}

/// Headless mode: load, build and render every chart to `dir`.
fn run_export(config: &DashboardConfig, dir: &Path) -> Result<()> {
    let tables = DataLoader::new(&config.results_dir).load_all();
    let outcomes = ChartBuilder::new(config.top_n).build_all(&tables);

    let summary = StaticChartRenderer::new(config.export_width, config.export_height)
        .export_dashboard(&outcomes, dir)
        .with_context(|| format!("exporting charts to {}", dir.display()))?;

    for failure in &summary.failures {
        warn!("{}", failure);
    }
    println!(
        "Exported {} charts to {} ({} without data, {} failed)",
        summary.rendered,
        dir.display(),
        summary.skipped,
        summary.failures.len()
    );
    Ok(())
}

fn run_gui(config: DashboardConfig) -> Result<()> {
    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title(dashboard::PAGE_TITLE),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        dashboard::PAGE_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("GUI error: {e}"))
}
