// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Bounding box entities drawn on the canvas.
//!
//! Geometry is kept in canvas pixels. A box that was resized by hand keeps
//! its drawn `width`/`height` and carries the resize as a scale transform,
//! so the effective size is always `width * scale_x` by `height * scale_y`.

use super::class::{ClassDescriptor, ClassId};
use crate::util::{color::Color, geometry::Point};
use serde::{Deserialize, Serialize};

/// Scale multiplier applied on top of the drawn size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxTransform {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for BoxTransform {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

/// Cached corners of a finalized box, used for hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCoords {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl BoxCoords {
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.top_left.x
            && point.x <= self.bottom_right.x
            && point.y >= self.top_left.y
            && point.y <= self.bottom_right.y
    }
}

/// An axis-aligned box tagged with the class it was drawn for.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxEntity {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub class_id: ClassId,
    /// Stroke colour, copied from the class when the box was created.
    pub stroke: Color,
    pub transform: BoxTransform,
    coords: Option<BoxCoords>,
}

impl BoxEntity {
    /// Zero-sized box at `anchor` for the given class.
    pub fn at_anchor(anchor: Point, class: &ClassDescriptor) -> Self {
        Self {
            left: anchor.x,
            top: anchor.y,
            width: 0.0,
            height: 0.0,
            class_id: class.id,
            stroke: class.color,
            transform: BoxTransform::default(),
            coords: None,
        }
    }

    /// Effective size with the transform applied.
    pub fn scaled_size(&self) -> (f64, f64) {
        (
            self.width * self.transform.scale_x,
            self.height * self.transform.scale_y,
        )
    }

    /// Recompute the cached corners from the current geometry.
    pub fn set_coords(&mut self) {
        let (w, h) = self.scaled_size();
        self.coords = Some(BoxCoords {
            top_left: Point::new(self.left, self.top),
            bottom_right: Point::new(self.left + w, self.top + h),
        });
    }

    /// Corners as of the last `set_coords` call.
    pub fn coords(&self) -> Option<BoxCoords> {
        self.coords
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.left += dx;
        self.top += dy;
        self.set_coords();
    }

    /// Stretch the box so its bottom-right corner lands on `corner`.
    ///
    /// The drawn size stays put and the stretch goes into the transform.
    /// A zero-length side has nothing to scale, so it is grown directly.
    pub fn resize_to(&mut self, corner: Point) {
        let target_w = (corner.x - self.left).max(0.0);
        let target_h = (corner.y - self.top).max(0.0);

        if self.width > 0.0 {
            self.transform.scale_x = target_w / self.width;
        } else {
            self.width = target_w;
            self.transform.scale_x = 1.0;
        }
        if self.height > 0.0 {
            self.transform.scale_y = target_h / self.height;
        } else {
            self.height = target_h;
            self.transform.scale_y = 1.0;
        }
        self.set_coords();
    }
}
