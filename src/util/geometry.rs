// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the canvas-space point type and the helpers that
//! turn canvas pixels into normalized coordinates and drag gestures into
//! axis-aligned rectangles.

use serde::{Deserialize, Serialize};

/// A 2D point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp the point into `[0, width] x [0, height]`.
    pub fn clamped(self, width: f64, height: f64) -> Self {
        Self {
            x: self.x.clamp(0.0, width),
            y: self.y.clamp(0.0, height),
        }
    }
}

/// Convert pixel coordinates to normalized coordinates (0.0 to 1.0).
pub fn normalize_coordinates(pixel_x: f64, pixel_y: f64, width: f64, height: f64) -> Point {
    Point {
        x: pixel_x / width,
        y: pixel_y / height,
    }
}

/// Rectangle `(left, top, width, height)` spanned by two opposite corners.
///
/// Independent of which corner is the anchor, so the result never has a
/// negative size.
pub fn span(anchor: Point, pointer: Point) -> (f64, f64, f64, f64) {
    (
        anchor.x.min(pointer.x),
        anchor.y.min(pointer.y),
        (anchor.x - pointer.x).abs(),
        (anchor.y - pointer.y).abs(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_corners() {
        let width = 800.0;
        let height = 600.0;

        // Top-left corner
        let tl = normalize_coordinates(0.0, 0.0, width, height);
        assert_eq!(tl.x, 0.0);
        assert_eq!(tl.y, 0.0);

        // Bottom-right corner
        let br = normalize_coordinates(800.0, 600.0, width, height);
        assert_eq!(br.x, 1.0);
        assert_eq!(br.y, 1.0);
    }

    #[test]
    fn test_span_is_direction_independent() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(40.0, 5.0);
        assert_eq!(span(a, b), (10.0, 5.0, 30.0, 15.0));
        assert_eq!(span(b, a), (10.0, 5.0, 30.0, 15.0));
    }

    #[test]
    fn test_clamped() {
        let p = Point::new(-3.0, 900.0).clamped(800.0, 600.0);
        assert_eq!(p, Point::new(0.0, 600.0));
    }
}
