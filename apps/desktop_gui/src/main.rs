use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::anyhow;
use browser_core::settings::load_settings;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::PaperBrowserApp;

#[derive(Parser, Debug)]
#[command(name = "paper-browser-gui", version, about = "Desktop paper browser")]
struct Args {
    /// Site root: an http(s) URL or a directory.
    #[arg(long)]
    site: Option<String>,
    /// Settings file (defaults to ./paper_browser.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(site) = args.site {
        settings.site = site;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let title = format!("Paper Browser - {}", settings.site);
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Paper Browser",
        options,
        Box::new(|_cc| Ok(Box::new(PaperBrowserApp::new(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}
