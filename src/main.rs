// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! boxlabel - bounding box labeling tool
//!
//! A desktop application for drawing class-tagged bounding boxes over an
//! image and saving them as normalized YOLO labels.

mod app;
mod config;
mod editor;
mod error;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::LabelerApp;
use clap::Parser;
use config::{Args, Config};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();
    let config = Config::from_args(&args)?;
    let initial_image = args.image.clone();

    // Leave room around the canvas for the panels
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                config.canvas_width as f32 + 260.0,
                config.canvas_height as f32 + 110.0,
            ])
            .with_min_inner_size([640.0, 480.0])
            .with_title("boxlabel"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "boxlabel",
        options,
        Box::new(move |_cc| Ok(Box::new(LabelerApp::new(config, initial_image)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
