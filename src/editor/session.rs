// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation session: the single owner of all labeling state.
//!
//! The window forwards every pointer and menu event here, so the class
//! registry, the draft engine and the canvas are only ever touched from one
//! place, one event at a time.

use super::{
    draft::BoxDraftEngine,
    select::SelectionTool,
    surface::{BoxHandle, Canvas, DrawingSurface},
};
use crate::error::AnnotatorError;
use crate::io::{export, persist::LabelSink};
use crate::models::{
    bbox::BoxEntity,
    class::ClassRegistry,
    frame::ImageFrame,
    label::{ExportPayload, SaveReceipt},
};
use crate::util::geometry::Point;

pub struct AnnotationSession {
    classes: ClassRegistry,
    draft: BoxDraftEngine,
    selection: SelectionTool,
    canvas: Canvas,
    filename: Option<String>,
}

impl AnnotationSession {
    pub fn new(classes: ClassRegistry, canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            classes,
            draft: BoxDraftEngine::new(),
            selection: SelectionTool::default(),
            canvas: Canvas::new(canvas_width, canvas_height),
            filename: None,
        }
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    pub fn classes_mut(&mut self) -> &mut ClassRegistry {
        &mut self.classes
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn frame(&self) -> Option<&ImageFrame> {
        self.canvas.background()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Committed boxes in drawing order.
    pub fn boxes(&self) -> &[BoxEntity] {
        self.canvas.rectangles()
    }

    /// Box currently being dragged out.
    pub fn draft(&self) -> Option<&BoxEntity> {
        self.draft.draft()
    }

    pub fn selected(&self) -> Option<BoxHandle> {
        self.selection.selected()
    }

    /// Replace the image. Boxes drawn on the previous image are discarded.
    pub fn load_image(
        &mut self,
        filename: Option<String>,
        natural_width: u32,
        natural_height: u32,
    ) -> Result<ImageFrame, AnnotatorError> {
        let (canvas_width, canvas_height) = self.canvas.size();
        let frame = ImageFrame::fit(natural_width, natural_height, canvas_width, canvas_height)?;

        let dropped = self.canvas.rectangles().len();
        self.canvas.clear();
        self.draft.reset();
        self.selection.reset();
        self.canvas.set_background(frame);
        self.filename = filename;

        log::info!(
            "Loaded {} ({}x{}), discarded {} boxes",
            self.filename.as_deref().unwrap_or("image"),
            natural_width,
            natural_height,
            dropped
        );
        Ok(frame)
    }

    pub fn pointer_down(&mut self, at: Point) -> Result<(), AnnotatorError> {
        self.draft.pointer_down(&mut self.canvas, &self.classes, at)
    }

    pub fn pointer_move(&mut self, at: Point) {
        self.draft.pointer_move(at);
    }

    pub fn pointer_up(&mut self) -> Option<BoxHandle> {
        self.draft.pointer_up(&mut self.canvas)
    }

    pub fn grab(&mut self, at: Point) -> Option<BoxHandle> {
        self.selection.grab(&self.canvas, at)
    }

    pub fn drag(&mut self, at: Point) {
        self.selection.drag(&mut self.canvas, at);
    }

    pub fn release(&mut self) {
        self.selection.release();
    }

    /// Normalized labels for the current image and boxes.
    pub fn payload(&self) -> Result<ExportPayload, AnnotatorError> {
        export::build_payload(self.frame(), self.boxes(), self.filename())
    }

    /// Save the labels through `sink`. Boxes stay on the canvas either way.
    pub fn export(&self, sink: &dyn LabelSink) -> Result<SaveReceipt, AnnotatorError> {
        export::export(self.frame(), self.boxes(), self.filename(), sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{persist::FileLabelSink, serialization::LabelFormat};
    use crate::util::color::Color;

    fn session() -> AnnotationSession {
        let mut classes = ClassRegistry::new();
        classes.register("persona", Color::rgb(255, 0, 0));
        classes.register("vehiculo", Color::rgb(0, 255, 0));
        AnnotationSession::new(classes, 800.0, 600.0)
    }

    fn draw(session: &mut AnnotationSession, from: (f64, f64), to: (f64, f64)) {
        session.pointer_down(Point::new(from.0, from.1)).unwrap();
        session.pointer_move(Point::new(to.0, to.1));
        session.pointer_up();
    }

    #[test]
    fn test_reference_export() {
        let mut session = session();
        session.load_image(Some("calle.jpg".to_string()), 1024, 768).unwrap();
        session.classes_mut().set_active(1);
        // Drawn up-left to make sure direction does not matter
        draw(&mut session, (300.0, 200.0), (100.0, 50.0));

        let payload = session.payload().unwrap();
        assert_eq!(payload.filename, "calle.jpg");
        let label = payload.labels[0];
        assert_eq!(label.class_id, 1);
        assert!((label.x_center - 0.25).abs() < 1e-6);
        assert!((label.y_center - 0.2083333).abs() < 1e-6);
        assert!((label.width - 0.25).abs() < 1e-6);
        assert!((label.height - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_export_without_image() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileLabelSink::new(dir.path().join("labels"), LabelFormat::Yolo);

        let session = session();
        assert!(matches!(session.payload(), Err(AnnotatorError::NoImageLoaded)));
        assert!(matches!(session.export(&sink), Err(AnnotatorError::NoImageLoaded)));
        assert!(!dir.path().join("labels").exists());
    }

    #[test]
    fn test_loading_new_image_clears_boxes() {
        let mut session = session();
        session.load_image(None, 640, 480).unwrap();
        draw(&mut session, (10.0, 10.0), (50.0, 50.0));
        draw(&mut session, (60.0, 60.0), (90.0, 90.0));
        assert_eq!(session.boxes().len(), 2);

        session.pointer_down(Point::new(5.0, 5.0)).unwrap();
        session.load_image(Some("otra.png".to_string()), 300, 300).unwrap();

        assert!(session.boxes().is_empty());
        assert!(session.draft().is_none());
        assert!(session.pointer_up().is_none());
        assert_eq!(session.frame().map(|f| f.natural_width), Some(300));
        assert!(session.payload().unwrap().labels.is_empty());
    }

    #[test]
    fn test_invalid_image_keeps_previous_state() {
        let mut session = session();
        session.load_image(Some("a.jpg".to_string()), 640, 480).unwrap();
        draw(&mut session, (10.0, 10.0), (50.0, 50.0));

        assert!(session.load_image(Some("b.jpg".to_string()), 0, 480).is_err());
        assert_eq!(session.boxes().len(), 1);
        assert_eq!(session.filename(), Some("a.jpg"));
    }

    #[test]
    fn test_default_filename() {
        let mut session = session();
        session.load_image(None, 640, 480).unwrap();
        assert_eq!(session.payload().unwrap().filename, "imagen.jpg");
    }

    #[test]
    fn test_resized_box_exports_scaled_size() {
        let mut session = session();
        session.load_image(None, 800, 600).unwrap();
        draw(&mut session, (100.0, 100.0), (200.0, 200.0));

        assert_eq!(session.grab(Point::new(200.0, 200.0)), Some(0));
        session.drag(Point::new(300.0, 150.0));
        session.release();

        let label = session.payload().unwrap().labels[0];
        assert!((label.width - 200.0 / 800.0).abs() < 1e-9);
        assert!((label.height - 50.0 / 600.0).abs() < 1e-9);
        assert!((label.x_center - 200.0 / 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_moved_box_exports_new_center() {
        let mut session = session();
        session.load_image(None, 800, 600).unwrap();
        draw(&mut session, (100.0, 100.0), (200.0, 200.0));

        session.grab(Point::new(150.0, 150.0));
        session.drag(Point::new(250.0, 350.0));
        session.release();

        let label = session.payload().unwrap().labels[0];
        assert!((label.x_center - 250.0 / 800.0).abs() < 1e-9);
        assert!((label.y_center - 350.0 / 600.0).abs() < 1e-9);
        assert_eq!(session.selected(), Some(0));
    }

    #[test]
    fn test_export_to_files_keeps_boxes() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileLabelSink::new(dir.path(), LabelFormat::Yolo);

        let mut session = session();
        session.load_image(Some("calle.jpg".to_string()), 800, 600).unwrap();
        draw(&mut session, (100.0, 50.0), (300.0, 200.0));

        let first = session.export(&sink).unwrap();
        let text_first = std::fs::read_to_string(dir.path().join(&first.label_file)).unwrap();
        let second = session.export(&sink).unwrap();
        let text_second = std::fs::read_to_string(dir.path().join(&second.label_file)).unwrap();

        assert_eq!(first.label_file, "calle.txt");
        assert_eq!(text_first, "0 0.250000 0.208333 0.250000 0.250000");
        assert_eq!(text_first, text_second);
        assert_eq!(session.boxes().len(), 1);
    }
}
