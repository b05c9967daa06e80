use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use txt_convert_gui::app::ConverterApp;
use txt_convert_gui::config::{AppConfig, Args};
use txt_convert_gui::HttpTransport;

fn init_logging() {
    // `log` records are forwarded into the subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let config = AppConfig::from_args(Args::parse())?;
    let transport = HttpTransport::new(&config.server).context("cannot create HTTP client")?;

    log::info!(
        "converting via {}, saving to {}",
        transport.endpoint(),
        config.download_dir.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 520.0])
            .with_min_inner_size([420.0, 440.0])
            .with_title("TXT Converter"),
        ..Default::default()
    };

    let app = ConverterApp::new(&config, Arc::new(transport));

    eframe::run_native(
        "TXT Converter",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Box::new(app)
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to open window: {e}"))
}
