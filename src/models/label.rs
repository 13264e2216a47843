// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Exported label records and the payload handed to persistence.

use super::class::ClassId;
use serde::{Deserialize, Serialize};

/// Filename used when the loaded image did not come with one.
pub const DEFAULT_IMAGE_FILENAME: &str = "imagen.jpg";

/// One box, normalized to the canvas (all fields in `[0, 1]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub class_id: ClassId,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

/// Everything saved for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub filename: String,
    pub labels: Vec<LabelRecord>,
}

impl ExportPayload {
    /// Wire form of the payload.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Acknowledgment returned by a persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReceipt {
    pub message: String,
    pub label_file: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let payload = ExportPayload {
            filename: "a.jpg".to_string(),
            labels: vec![LabelRecord {
                class_id: 1,
                x_center: 0.5,
                y_center: 0.25,
                width: 0.125,
                height: 1.0,
            }],
        };

        assert_eq!(
            payload.to_json().unwrap(),
            r#"{"filename":"a.jpg","labels":[{"class_id":1,"x_center":0.5,"y_center":0.25,"width":0.125,"height":1.0}]}"#
        );
    }

    #[test]
    fn test_empty_labels() {
        let payload = ExportPayload {
            filename: DEFAULT_IMAGE_FILENAME.to_string(),
            labels: Vec::new(),
        };
        assert_eq!(payload.to_json().unwrap(), r#"{"filename":"imagen.jpg","labels":[]}"#);
    }
}
