// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the labeling application.

pub mod canvas;
pub mod classes;
pub mod toolbar;

use crate::util::color::Color;

pub(crate) fn color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}
