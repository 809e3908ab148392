use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::ShortenerApp;

/// Shorten long URLs through a link-shortening service.
///
/// The API key is read from `SHORTENER_API_KEY` or the settings file, never from flags.
#[derive(Parser, Debug)]
#[command(name = "insta-short", version)]
struct Args {
    /// Settings file (defaults to ./shortener.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the service endpoint from settings.
    #[arg(long)]
    endpoint: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    tracing::info!(?settings, "loaded shortening service settings");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let _worker = backend_bridge::runtime::launch(cmd_rx, ui_tx, &settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Insta Short")
            .with_inner_size([720.0, 520.0])
            .with_min_inner_size([420.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Insta Short",
        options,
        Box::new(move |_cc| Ok(Box::new(ShortenerApp::new(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}
