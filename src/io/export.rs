// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label export.
//!
//! Turns the committed boxes into records normalized against the canvas
//! and hands them to a persistence collaborator. Normalization divides by
//! the canvas size, which equals the image footprint because the image is
//! always stretched over the whole canvas.

use super::persist::LabelSink;
use crate::error::AnnotatorError;
use crate::models::{
    bbox::BoxEntity,
    frame::ImageFrame,
    label::{ExportPayload, LabelRecord, SaveReceipt, DEFAULT_IMAGE_FILENAME},
};
use crate::util::geometry::normalize_coordinates;

/// Normalize one box against the frame's canvas.
pub fn normalize_box(frame: &ImageFrame, entity: &BoxEntity) -> LabelRecord {
    let (w, h) = entity.scaled_size();
    let center = normalize_coordinates(
        entity.left + w / 2.0,
        entity.top + h / 2.0,
        frame.canvas_width,
        frame.canvas_height,
    );
    let size = normalize_coordinates(w, h, frame.canvas_width, frame.canvas_height);

    LabelRecord {
        class_id: entity.class_id,
        x_center: center.x,
        y_center: center.y,
        width: size.x,
        height: size.y,
    }
}

/// Build the payload for the current boxes, in drawing order.
pub fn build_payload(
    frame: Option<&ImageFrame>,
    boxes: &[BoxEntity],
    filename: Option<&str>,
) -> Result<ExportPayload, AnnotatorError> {
    let frame = frame.ok_or(AnnotatorError::NoImageLoaded)?;

    if !frame.fills_canvas() {
        let (w, h) = frame.footprint();
        log::warn!(
            "Image footprint {:.1}x{:.1} does not cover the {:.1}x{:.1} canvas, labels will be skewed",
            w,
            h,
            frame.canvas_width,
            frame.canvas_height
        );
    }

    Ok(ExportPayload {
        filename: filename.unwrap_or(DEFAULT_IMAGE_FILENAME).to_string(),
        labels: boxes.iter().map(|b| normalize_box(frame, b)).collect(),
    })
}

/// Build the payload and hand it to `sink` once.
///
/// The sink is not called when there is nothing to export.
pub fn export(
    frame: Option<&ImageFrame>,
    boxes: &[BoxEntity],
    filename: Option<&str>,
    sink: &dyn LabelSink,
) -> Result<SaveReceipt, AnnotatorError> {
    let payload = build_payload(frame, boxes, filename)?;
    deliver(&payload, sink)
}

/// Hand a built payload to `sink` once. Its error is returned as is.
pub fn deliver(payload: &ExportPayload, sink: &dyn LabelSink) -> Result<SaveReceipt, AnnotatorError> {
    if let Ok(json) = payload.to_json() {
        log::debug!("Delivering {}", json);
    }
    let receipt = sink.save(payload)?;
    log::info!("Saved {} labels to {}", payload.labels.len(), receipt.label_file);
    Ok(receipt)
}
