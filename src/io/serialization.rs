// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label file encodings.
//!
//! This module handles encoding an export payload as YOLO text or as the
//! JSON wire shape, and deriving the label file name from the image name.

use crate::models::label::{ExportPayload, LabelRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk format written by the file sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LabelFormat {
    /// One `class x_center y_center width height` line per box.
    #[default]
    Yolo,
    /// The export payload as pretty-printed JSON.
    Json,
}

impl LabelFormat {
    pub fn extension(self) -> &'static str {
        match self {
            LabelFormat::Yolo => "txt",
            LabelFormat::Json => "json",
        }
    }
}

/// Format a single record as a YOLO line.
pub fn yolo_line(label: &LabelRecord) -> String {
    format!(
        "{} {:.6} {:.6} {:.6} {:.6}",
        label.class_id, label.x_center, label.y_center, label.width, label.height
    )
}

/// YOLO text for all labels, newline separated without a trailing newline.
pub fn to_yolo_text(labels: &[LabelRecord]) -> String {
    labels.iter().map(yolo_line).collect::<Vec<_>>().join("\n")
}

/// Encode the payload in the given format.
pub fn encode(payload: &ExportPayload, format: LabelFormat) -> serde_json::Result<String> {
    match format {
        LabelFormat::Yolo => Ok(to_yolo_text(&payload.labels)),
        LabelFormat::Json => serde_json::to_string_pretty(payload),
    }
}

/// Label file name for an image: its stem with the format's extension.
///
/// Only the last path component is kept so a crafted name cannot escape the
/// labels directory.
pub fn label_file_name(image_filename: &str, format: LabelFormat) -> String {
    let stem = Path::new(image_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("labels");
    format!("{}.{}", stem, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(class_id: u32, x: f64) -> LabelRecord {
        LabelRecord {
            class_id,
            x_center: x,
            y_center: 0.2083333333,
            width: 0.25,
            height: 1.0,
        }
    }

    #[test]
    fn test_yolo_text() {
        let text = to_yolo_text(&[label(1, 0.25), label(0, 0.5)]);
        assert_eq!(
            text,
            "1 0.250000 0.208333 0.250000 1.000000\n0 0.500000 0.208333 0.250000 1.000000"
        );
        assert_eq!(to_yolo_text(&[]), "");
    }

    #[test]
    fn test_label_file_name() {
        assert_eq!(label_file_name("foto.jpg", LabelFormat::Yolo), "foto.txt");
        assert_eq!(label_file_name("a.b.png", LabelFormat::Json), "a.b.json");
        assert_eq!(label_file_name("../../etc/passwd", LabelFormat::Yolo), "passwd.txt");
        assert_eq!(label_file_name("", LabelFormat::Yolo), "labels.txt");
    }

    #[test]
    fn test_encode_json_round_trips() {
        let payload = ExportPayload {
            filename: "foto.jpg".to_string(),
            labels: vec![label(1, 0.25)],
        };
        let json = encode(&payload, LabelFormat::Json).unwrap();
        let back: ExportPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}
