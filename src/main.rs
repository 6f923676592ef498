//! Destination Explorer - Tourist Destination Browser
//!
//! Loads a destinations CSV, normalizes its columns and shows a searchable,
//! map-annotated list of places.

mod config;
mod data;
mod gui;
mod view;

use clap::Parser;
use config::{Settings, MIN_WINDOW_SIZE, WINDOW_SIZE};
use eframe::egui;
use gui::ExplorerApp;
use tracing::info;
use tracing_subscriber::EnvFilter;

const APP_TITLE: &str = "Explore India - Tourist Destinations";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::parse();
    info!(source = %settings.source.display(), "starting destination explorer");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE)
            .with_title(APP_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(ExplorerApp::new(cc, settings)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to start the viewer: {err}"))
}
