mod app;
mod chart;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use anyhow::{Context, anyhow};
use app::DashboardApp;
use clap::Parser;
use config::Config;
use eframe::egui;
use state::Session;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    log::info!("Indicator table: {}", config.data.display());

    if let Some(out) = &config.export {
        let session = Session::open(&config.data, config.specialty_offset).map_err(|e| {
            state::log_load_error(&e);
            anyhow!("{}: {e}", e.path().display())
        })?;
        return export::export_selection(
            session,
            config.months.clone(),
            config.specialties.clone(),
            out,
        )
        .context("exporting charts");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Dashboard")
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the png/jpg logos.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(DashboardApp::new(config)))
        }),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
