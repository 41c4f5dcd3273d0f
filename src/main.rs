// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Checkline - Main Entry Point
//!
//! Opens a note and renders its inline checkbox groups as live toggles.
//! Usage: `checkline [FILE]`

use checkline::app::CheckLineApp;
use checkline::config::load_config;
use eframe::egui;
use log::info;
use std::path::PathBuf;

/// Application name constant.
const APP_NAME: &str = "Checkline";

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    let settings = load_config();
    info!(
        "Separator: {:?}, cross out completed groups: {}",
        settings.separator, settings.cross_out_when_all_checked
    );

    let path = std::env::args_os().nth(1).map(PathBuf::from);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(CheckLineApp::new(cc, settings, path)))),
    )
}
