// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Placement of the loaded image on the canvas.
//!
//! The image is stretched over the whole canvas (aspect ratio is not
//! preserved), so the display scale on each axis is `canvas / natural`.

use crate::error::AnnotatorError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFrame {
    pub natural_width: u32,
    pub natural_height: u32,
    pub display_scale_x: f64,
    pub display_scale_y: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl ImageFrame {
    /// Fit an image of the given natural size to the canvas.
    pub fn fit(
        natural_width: u32,
        natural_height: u32,
        canvas_width: f64,
        canvas_height: f64,
    ) -> Result<Self, AnnotatorError> {
        if natural_width == 0 || natural_height == 0 {
            return Err(AnnotatorError::InvalidImage {
                width: natural_width,
                height: natural_height,
            });
        }

        Ok(Self {
            natural_width,
            natural_height,
            display_scale_x: canvas_width / natural_width as f64,
            display_scale_y: canvas_height / natural_height as f64,
            canvas_width,
            canvas_height,
        })
    }

    /// Size the image occupies on the canvas.
    pub fn footprint(&self) -> (f64, f64) {
        (
            self.natural_width as f64 * self.display_scale_x,
            self.natural_height as f64 * self.display_scale_y,
        )
    }

    /// Whether the image covers the canvas exactly, which normalization relies on.
    pub fn fills_canvas(&self) -> bool {
        let (w, h) = self.footprint();
        (w - self.canvas_width).abs() < 1e-6 && (h - self.canvas_height).abs() < 1e-6
    }
}
