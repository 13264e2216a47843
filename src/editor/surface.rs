// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing surface abstraction and the in-memory canvas behind it.
//!
//! The labeling logic only needs to add rectangles, enumerate them, and
//! swap the background frame. Painting and pointer mapping live in the egui
//! canvas widget, which reads this state every frame.

use crate::models::{bbox::BoxEntity, frame::ImageFrame};

/// Index of a committed box in the store.
pub type BoxHandle = usize;

/// Capabilities the labeling core needs from a drawing surface.
pub trait DrawingSurface {
    /// Add a committed box and return its handle.
    fn create_rectangle(&mut self, entity: BoxEntity) -> BoxHandle;

    /// Committed boxes in insertion order.
    fn rectangles(&self) -> &[BoxEntity];

    fn rectangle_mut(&mut self, handle: BoxHandle) -> Option<&mut BoxEntity>;

    /// Remove every box and the background.
    fn clear(&mut self);

    fn set_background(&mut self, frame: ImageFrame);

    fn background(&self) -> Option<&ImageFrame>;

    /// Canvas size in pixels.
    fn size(&self) -> (f64, f64);
}

/// Committed boxes, kept in the order they were drawn.
#[derive(Debug, Default)]
pub struct BoxStore {
    boxes: Vec<BoxEntity>,
}

impl BoxStore {
    pub fn push(&mut self, entity: BoxEntity) -> BoxHandle {
        self.boxes.push(entity);
        self.boxes.len() - 1
    }

    pub fn as_slice(&self) -> &[BoxEntity] {
        &self.boxes
    }

    pub fn get_mut(&mut self, handle: BoxHandle) -> Option<&mut BoxEntity> {
        self.boxes.get_mut(handle)
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }
}

/// Fixed-size canvas holding the background frame and the box store.
#[derive(Debug)]
pub struct Canvas {
    width: f64,
    height: f64,
    background: Option<ImageFrame>,
    store: BoxStore,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: None,
            store: BoxStore::default(),
        }
    }
}

impl DrawingSurface for Canvas {
    fn create_rectangle(&mut self, entity: BoxEntity) -> BoxHandle {
        self.store.push(entity)
    }

    fn rectangles(&self) -> &[BoxEntity] {
        self.store.as_slice()
    }

    fn rectangle_mut(&mut self, handle: BoxHandle) -> Option<&mut BoxEntity> {
        self.store.get_mut(handle)
    }

    fn clear(&mut self) {
        self.store.clear();
        self.background = None;
    }

    fn set_background(&mut self, frame: ImageFrame) {
        self.background = Some(frame);
    }

    fn background(&self) -> Option<&ImageFrame> {
        self.background.as_ref()
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}
