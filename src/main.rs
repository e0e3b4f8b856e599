// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! labelscope - YOLO dataset viewer
//!
//! A desktop application for browsing a directory of images alongside a
//! mirrored directory of YOLO label files, drawing the boxes and polygon
//! masks of each label over its image.

mod app;
mod browser;
mod config;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::LabelscopeApp;
use clap::Parser;
use config::{Cli, ViewerConfig};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ViewerConfig::resolve(&cli);
    log::info!(
        "Images: {}, labels: {}",
        config.image_base_path.display(),
        config.label_base_path.display()
    );

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("labelscope"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "labelscope",
        options,
        Box::new(move |_cc| Ok(Box::new(LabelscopeApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
