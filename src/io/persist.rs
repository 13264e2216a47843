// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persistence collaborators for exported labels and opened images.

use super::serialization::{encode, label_file_name, LabelFormat};
use crate::error::SinkError;
use crate::models::label::{ExportPayload, SaveReceipt};
use std::path::{Path, PathBuf};

/// Something that stores an export payload and acknowledges it.
pub trait LabelSink {
    fn save(&self, payload: &ExportPayload) -> Result<SaveReceipt, SinkError>;
}

/// Writes one label file per image into a directory.
#[derive(Debug, Clone)]
pub struct FileLabelSink {
    labels_dir: PathBuf,
    format: LabelFormat,
}

impl FileLabelSink {
    pub fn new(labels_dir: impl Into<PathBuf>, format: LabelFormat) -> Self {
        Self {
            labels_dir: labels_dir.into(),
            format,
        }
    }
}

impl LabelSink for FileLabelSink {
    fn save(&self, payload: &ExportPayload) -> Result<SaveReceipt, SinkError> {
        let label_file = label_file_name(&payload.filename, self.format);
        let path = self.labels_dir.join(&label_file);
        let contents = encode(payload, self.format)?;

        std::fs::create_dir_all(&self.labels_dir).map_err(|source| SinkError::Io {
            path: self.labels_dir.clone(),
            source,
        })?;
        std::fs::write(&path, contents).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        log::info!("Wrote {} labels to {}", payload.labels.len(), path.display());
        Ok(SaveReceipt {
            message: "Labels saved".to_string(),
            label_file,
        })
    }
}

/// Keeps a copy of every opened image next to its labels.
#[derive(Debug, Clone)]
pub struct ImageStore {
    uploads_dir: PathBuf,
}

impl ImageStore {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
        }
    }

    /// Copy `source` into the uploads directory and return the stored name.
    pub fn store(&self, source: &Path) -> Result<String, SinkError> {
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SinkError::Io {
                path: source.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "no file name"),
            })?
            .to_string();

        std::fs::create_dir_all(&self.uploads_dir).map_err(|e| SinkError::Io {
            path: self.uploads_dir.clone(),
            source: e,
        })?;
        let target = self.uploads_dir.join(&name);
        std::fs::copy(source, &target).map_err(|e| SinkError::Io {
            path: target.clone(),
            source: e,
        })?;

        log::info!("Stored image {} in {}", name, self.uploads_dir.display());
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::label::LabelRecord;

    fn payload() -> ExportPayload {
        ExportPayload {
            filename: "calle.jpg".to_string(),
            labels: vec![
                LabelRecord {
                    class_id: 1,
                    x_center: 0.25,
                    y_center: 0.2083333,
                    width: 0.25,
                    height: 0.25,
                },
                LabelRecord {
                    class_id: 0,
                    x_center: 0.5,
                    y_center: 0.5,
                    width: 0.1,
                    height: 0.2,
                },
            ],
        }
    }

    #[test]
    fn test_writes_yolo_file() {
        let dir = tempfile::tempdir().unwrap();
        let labels_dir = dir.path().join("labels");
        let sink = FileLabelSink::new(&labels_dir, LabelFormat::Yolo);

        let receipt = sink.save(&payload()).unwrap();
        assert_eq!(receipt.label_file, "calle.txt");
        assert_eq!(receipt.message, "Labels saved");

        let text = std::fs::read_to_string(labels_dir.join("calle.txt")).unwrap();
        assert_eq!(
            text,
            "1 0.250000 0.208333 0.250000 0.250000\n0 0.500000 0.500000 0.100000 0.200000"
        );
    }

    #[test]
    fn test_writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileLabelSink::new(dir.path(), LabelFormat::Json);

        let receipt = sink.save(&payload()).unwrap();
        assert_eq!(receipt.label_file, "calle.json");

        let json = std::fs::read_to_string(dir.path().join("calle.json")).unwrap();
        let back: ExportPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload());
    }

    #[test]
    fn test_overwrites_previous_save() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileLabelSink::new(dir.path(), LabelFormat::Yolo);

        sink.save(&payload()).unwrap();
        let mut empty = payload();
        empty.labels.clear();
        sink.save(&empty).unwrap();

        let text = std::fs::read_to_string(dir.path().join("calle.txt")).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_unwritable_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("labels");
        std::fs::write(&blocker, "not a directory").unwrap();

        let sink = FileLabelSink::new(&blocker, LabelFormat::Yolo);
        assert!(matches!(sink.save(&payload()), Err(SinkError::Io { .. })));
    }

    #[test]
    fn test_image_store_copies_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("foto.jpg");
        std::fs::write(&source, b"jpeg bytes").unwrap();

        let store = ImageStore::new(dir.path().join("uploads"));
        let name = store.store(&source).unwrap();

        assert_eq!(name, "foto.jpg");
        let copied = std::fs::read(dir.path().join("uploads").join("foto.jpg")).unwrap();
        assert_eq!(copied, b"jpeg bytes");
    }
}
