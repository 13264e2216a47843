// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Direct manipulation of committed boxes.
//!
//! Grabbing a box body moves it; grabbing the grip at its bottom-right
//! corner resizes it through the box's scale transform.

use super::surface::{BoxHandle, DrawingSurface};
use crate::util::geometry::Point;

/// Half-size of the resize grip around the bottom-right corner, in pixels.
pub const RESIZE_GRIP: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Manipulation {
    Idle,
    Moving { handle: BoxHandle, last: Point },
    Resizing { handle: BoxHandle },
}

#[derive(Debug)]
pub struct SelectionTool {
    state: Manipulation,
    selected: Option<BoxHandle>,
}

impl Default for SelectionTool {
    fn default() -> Self {
        Self {
            state: Manipulation::Idle,
            selected: None,
        }
    }
}

impl SelectionTool {
    pub fn selected(&self) -> Option<BoxHandle> {
        self.selected
    }

    /// Pick the topmost box under `at` and start moving or resizing it.
    pub fn grab<S: DrawingSurface>(&mut self, surface: &S, at: Point) -> Option<BoxHandle> {
        let hit = surface
            .rectangles()
            .iter()
            .enumerate()
            .rev()
            .find_map(|(handle, b)| {
                let coords = b.coords()?;
                let corner = coords.bottom_right;
                if (at.x - corner.x).abs() <= RESIZE_GRIP && (at.y - corner.y).abs() <= RESIZE_GRIP {
                    Some((handle, Manipulation::Resizing { handle }))
                } else if coords.contains(at) {
                    Some((handle, Manipulation::Moving { handle, last: at }))
                } else {
                    None
                }
            });

        match hit {
            Some((handle, state)) => {
                self.state = state;
                self.selected = Some(handle);
                log::debug!("Grabbed box {}", handle);
                Some(handle)
            }
            None => {
                self.state = Manipulation::Idle;
                self.selected = None;
                None
            }
        }
    }

    /// Continue the gesture. A moved box stays inside the canvas.
    pub fn drag<S: DrawingSurface>(&mut self, surface: &mut S, at: Point) {
        let (canvas_w, canvas_h) = surface.size();
        match &mut self.state {
            Manipulation::Moving { handle, last } => {
                if let Some(b) = surface.rectangle_mut(*handle) {
                    let (w, h) = b.scaled_size();
                    let left = (b.left + at.x - last.x).clamp(0.0, (canvas_w - w).max(0.0));
                    let top = (b.top + at.y - last.y).clamp(0.0, (canvas_h - h).max(0.0));
                    b.translate(left - b.left, top - b.top);
                }
                *last = at;
            }
            Manipulation::Resizing { handle } => {
                if let Some(b) = surface.rectangle_mut(*handle) {
                    b.resize_to(at);
                }
            }
            Manipulation::Idle => {}
        }
    }

    /// End the gesture; the box stays selected.
    pub fn release(&mut self) {
        if let Manipulation::Moving { handle, .. } | Manipulation::Resizing { handle } = self.state {
            log::info!("Finished editing box {}", handle);
        }
        self.state = Manipulation::Idle;
    }

    /// Forget the selection, e.g. after the boxes were cleared.
    pub fn reset(&mut self) {
        self.state = Manipulation::Idle;
        self.selected = None;
    }
}
