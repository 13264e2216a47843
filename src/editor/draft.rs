// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drag-to-rectangle state machine.
//!
//! A pointer-down anchors a new box for the active class, moves stretch it
//! between the anchor and the pointer, and the pointer-up commits it to the
//! drawing surface. The draft belongs to the engine until it is committed.

use super::surface::{BoxHandle, DrawingSurface};
use crate::error::AnnotatorError;
use crate::models::{bbox::BoxEntity, class::ClassRegistry};
use crate::util::geometry::{span, Point};

#[derive(Debug, Default)]
enum DraftState {
    #[default]
    Idle,
    Dragging {
        anchor: Point,
        draft: BoxEntity,
    },
}

#[derive(Debug, Default)]
pub struct BoxDraftEngine {
    state: DraftState,
}

impl BoxDraftEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DraftState::Dragging { .. })
    }

    /// Box being dragged out, if any.
    pub fn draft(&self) -> Option<&BoxEntity> {
        match &self.state {
            DraftState::Dragging { draft, .. } => Some(draft),
            DraftState::Idle => None,
        }
    }

    /// Start a box at `at` for the currently active class.
    pub fn pointer_down<S: DrawingSurface>(
        &mut self,
        surface: &mut S,
        classes: &ClassRegistry,
        at: Point,
    ) -> Result<(), AnnotatorError> {
        let class = classes.active().ok_or(AnnotatorError::NoActiveClass)?;

        if self.is_dragging() {
            log::warn!("Pointer-down during a drag, committing the pending box");
            self.pointer_up(surface);
        }

        self.state = DraftState::Dragging {
            anchor: at,
            draft: BoxEntity::at_anchor(at, class),
        };
        log::debug!("Drag started at ({:.1}, {:.1}) for class {}", at.x, at.y, class.id);
        Ok(())
    }

    /// Stretch the draft between the anchor and the pointer.
    pub fn pointer_move(&mut self, at: Point) {
        if let DraftState::Dragging { anchor, draft } = &mut self.state {
            let (left, top, width, height) = span(*anchor, at);
            draft.left = left;
            draft.top = top;
            draft.width = width;
            draft.height = height;
        }
    }

    /// Finalize the draft and commit it, zero-sized or not.
    pub fn pointer_up<S: DrawingSurface>(&mut self, surface: &mut S) -> Option<BoxHandle> {
        match std::mem::take(&mut self.state) {
            DraftState::Dragging { mut draft, .. } => {
                draft.set_coords();
                let (w, h) = draft.scaled_size();
                let handle = surface.create_rectangle(draft);
                log::info!(
                    "Committed box {} ({:.1}x{:.1}), total: {}",
                    handle,
                    w,
                    h,
                    surface.rectangles().len()
                );
                Some(handle)
            }
            DraftState::Idle => None,
        }
    }

    /// Drop any in-flight draft without committing it.
    pub fn reset(&mut self) {
        self.state = DraftState::Idle;
    }
}
