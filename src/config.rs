// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Settings come from built-in defaults, then an optional YAML file, then
//! command line flags, each layer overriding the previous one.

use crate::io::serialization::LabelFormat;
use crate::models::class::ClassRegistry;
use crate::util::color::Color;
use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Command line arguments.
#[derive(Debug, Default, Parser)]
#[command(name = "boxlabel", version, about = "Draw bounding boxes and export YOLO labels")]
pub struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory label files are written to
    #[arg(long)]
    pub labels_dir: Option<PathBuf>,

    /// Directory opened images are copied to when storing is enabled
    #[arg(long)]
    pub uploads_dir: Option<PathBuf>,

    #[arg(long)]
    pub canvas_width: Option<f64>,

    #[arg(long)]
    pub canvas_height: Option<f64>,

    /// Label file format
    #[arg(long, value_enum)]
    pub format: Option<LabelFormat>,

    /// Copy every opened image into the uploads directory
    #[arg(long)]
    pub store_images: bool,

    /// Image to open at startup
    pub image: Option<PathBuf>,
}

/// A class registered at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSpec {
    pub name: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub labels_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub store_images: bool,
    pub label_format: LabelFormat,
    pub classes: Vec<ClassSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            labels_dir: PathBuf::from("labels"),
            uploads_dir: PathBuf::from("uploads"),
            store_images: false,
            label_format: LabelFormat::Yolo,
            classes: vec![
                ClassSpec {
                    name: "persona".to_string(),
                    color: Color::rgb(0xFF, 0x00, 0x00),
                },
                ClassSpec {
                    name: "vehiculo".to_string(),
                    color: Color::rgb(0x00, 0xFF, 0x00),
                },
            ],
        }
    }
}

impl Config {
    /// Resolve the configuration for the given arguments.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config = serde_yaml::from_str(&yaml)
            .with_context(|| format!("invalid config {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn apply_args(&mut self, args: &Args) {
        if let Some(dir) = &args.labels_dir {
            self.labels_dir = dir.clone();
        }
        if let Some(dir) = &args.uploads_dir {
            self.uploads_dir = dir.clone();
        }
        if let Some(width) = args.canvas_width {
            self.canvas_width = width;
        }
        if let Some(height) = args.canvas_height {
            self.canvas_height = height;
        }
        if let Some(format) = args.format {
            self.label_format = format;
        }
        if args.store_images {
            self.store_images = true;
        }
    }

    fn validate(&self) -> Result<()> {
        let usable = |side: f64| side.is_finite() && side > 0.0;
        if !(usable(self.canvas_width) && usable(self.canvas_height)) {
            bail!(
                "canvas size must be positive and finite, got {}x{}",
                self.canvas_width,
                self.canvas_height
            );
        }
        Ok(())
    }

    /// Registry pre-filled with the configured classes.
    pub fn class_registry(&self) -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        for class in &self.classes {
            registry.register(class.name.clone(), class.color);
        }
        registry
    }
}
