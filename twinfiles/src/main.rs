//! TwinFiles: a dual-pane file browser.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod badge;
mod config;
mod entry;
mod fastscroll;
mod history;
mod pane;
mod pathutil;
mod permission;
mod pullrefresh;
mod selection;
mod swipe;

use app::TwinFilesApp;
use config::AppConfig;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = AppConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TwinFiles")
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TwinFiles",
        options,
        Box::new(move |cc| {
            twincore::PaneTheme::default().apply(&cc.egui_ctx);
            Box::new(TwinFilesApp::new(cc, config))
        }),
    )
}
