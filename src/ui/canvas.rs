// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and box annotation.
//!
//! This module paints the background image stretched over the fixed-size
//! canvas together with every box, and turns pointer input into canvas-space
//! gestures for the application to dispatch.

use super::color32;
use crate::editor::{select::RESIZE_GRIP, session::AnnotationSession, surface::DrawingSurface};
use crate::models::bbox::BoxEntity;
use crate::util::geometry::Point;

/// Pointer gesture on the canvas, in canvas pixels.
pub enum CanvasAction {
    None,
    Press(Point),
    Drag(Point),
    Release,
    /// Press and release without movement.
    Click(Point),
}

/// Map a screen position into canvas pixels, clamped to the canvas.
fn to_canvas(pos: egui::Pos2, canvas_rect: egui::Rect, size: (f64, f64)) -> Point {
    Point::new(
        (pos.x - canvas_rect.min.x) as f64,
        (pos.y - canvas_rect.min.y) as f64,
    )
    .clamped(size.0, size.1)
}

fn to_screen(entity: &BoxEntity, canvas_rect: egui::Rect) -> egui::Rect {
    let (w, h) = entity.scaled_size();
    egui::Rect::from_min_size(
        canvas_rect.min + egui::vec2(entity.left as f32, entity.top as f32),
        egui::vec2(w as f32, h as f32),
    )
}

/// Display the canvas and report the pointer gesture of this frame.
pub fn show(
    ui: &mut egui::Ui,
    session: &AnnotationSession,
    image_texture: &Option<egui::TextureHandle>,
) -> CanvasAction {
    let size = session.canvas().size();
    let mut action = CanvasAction::None;

    egui::ScrollArea::both().show(ui, |ui| {
        let (canvas_rect, response) = ui.allocate_exact_size(
            egui::vec2(size.0 as f32, size.1 as f32),
            egui::Sense::click_and_drag(),
        );
        let painter = ui.painter_at(canvas_rect);

        painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(40));

        match image_texture {
            Some(texture) if session.frame().is_some() => {
                // Stretched over the whole canvas, labels are normalized against it
                painter.image(
                    texture.id(),
                    canvas_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            _ => {
                painter.text(
                    canvas_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "File → Open Image... to begin labeling",
                    egui::FontId::proportional(16.0),
                    egui::Color32::from_gray(180),
                );
            }
        }

        for (handle, entity) in session.boxes().iter().enumerate() {
            let rect = to_screen(entity, canvas_rect);
            let color = color32(entity.stroke);
            if session.selected() == Some(handle) {
                painter.rect_stroke(rect, 0.0, egui::Stroke::new(3.0, color));
                let grip = egui::Rect::from_center_size(
                    rect.max,
                    egui::vec2(RESIZE_GRIP as f32, RESIZE_GRIP as f32) * 2.0,
                );
                painter.rect_filled(grip, 0.0, color);
            } else {
                painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, color));
            }
        }

        if let Some(draft) = session.draft() {
            painter.rect_stroke(
                to_screen(draft, canvas_rect),
                0.0,
                egui::Stroke::new(2.0, color32(draft.stroke)),
            );
        }

        if response.drag_started() {
            let origin = ui
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(pos) = origin {
                action = CanvasAction::Press(to_canvas(pos, canvas_rect, size));
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                action = CanvasAction::Drag(to_canvas(pos, canvas_rect, size));
            }
        } else if response.drag_stopped() {
            action = CanvasAction::Release;
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                action = CanvasAction::Click(to_canvas(pos, canvas_rect, size));
            }
        }
    });

    action
}
