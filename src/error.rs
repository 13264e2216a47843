// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error kinds raised by the labeling core.
//!
//! None of these are fatal: the application shows them to the user and the
//! session carries on with its boxes intact.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a label persistence collaborator.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not encode labels: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors surfaced by the annotation session.
#[derive(Debug, Error)]
pub enum AnnotatorError {
    /// Pointer-down with no class to tag the box with.
    #[error("Select a class first")]
    NoActiveClass,

    /// Export requested before any image was loaded.
    #[error("Load an image first")]
    NoImageLoaded,

    /// Decoded image has a zero dimension and cannot be fitted to the canvas.
    #[error("image has an invalid size {width}x{height}")]
    InvalidImage { width: u32, height: u32 },

    /// The persistence collaborator rejected the payload.
    #[error("failed to save labels: {0}")]
    Persistence(#[from] SinkError),
}
