// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the window-level state: it forwards pointer and
//! panel events to the annotation session, decodes images and saves labels
//! on background threads, and shows notices to the user.

use crate::config::Config;
use crate::editor::session::AnnotationSession;
use crate::error::AnnotatorError;
use crate::io::{
    export,
    media::{self, LoadedImage, IMAGE_EXTENSIONS},
    persist::{FileLabelSink, ImageStore, LabelSink},
};
use crate::models::label::SaveReceipt;
use crate::ui::{
    canvas::{self, CanvasAction},
    classes::{self, ClassAction, NewClassForm},
    toolbar::{self, ToolbarAction},
};
use std::path::{Path, PathBuf};
use std::sync::{
    mpsc::{channel, Receiver},
    Arc,
};

/// Current pointer tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Draw,
    Select,
}

/// Result of background image loading operation.
struct LoadedImageData {
    filename: String,
    image: LoadedImage,
    /// Set when the copy into the uploads directory failed.
    store_error: Option<String>,
}

/// Message shown in a modal window until dismissed.
struct Notice {
    title: &'static str,
    text: String,
}

/// Main application state.
pub struct LabelerApp {
    session: AnnotationSession,

    current_tool: Tool,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImageData, String>>>,

    /// Receiver for the pending label save
    save_result: Option<Receiver<Result<SaveReceipt, AnnotatorError>>>,

    /// Loading state message
    loading_message: Option<String>,

    notice: Option<Notice>,

    new_class: NewClassForm,

    sink: Arc<dyn LabelSink + Send + Sync>,

    image_store: Option<ImageStore>,
}

impl LabelerApp {
    /// Create the application, optionally opening an image right away.
    pub fn new(config: Config, initial_image: Option<PathBuf>) -> Self {
        let classes = config.class_registry();
        let new_class = NewClassForm {
            name: String::new(),
            color: classes.suggest_color().to_array(),
        };

        let mut app = Self {
            session: AnnotationSession::new(classes, config.canvas_width, config.canvas_height),
            current_tool: Tool::Draw,
            image_texture: None,
            image_loader: None,
            save_result: None,
            loading_message: None,
            notice: None,
            new_class,
            sink: Arc::new(FileLabelSink::new(&config.labels_dir, config.label_format)),
            image_store: config
                .store_images
                .then(|| ImageStore::new(&config.uploads_dir)),
        };

        if let Some(path) = initial_image {
            app.load_image_file(path);
        }
        app
    }

    fn notify(&mut self, title: &'static str, text: impl Into<String>) {
        let text = text.into();
        log::warn!("{}: {}", title, text);
        self.notice = Some(Notice { title, text });
    }

    /// Decode an image file on a background thread.
    pub fn load_image_file(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Loading image...".to_string());

        let image_store = self.image_store.clone();

        std::thread::spawn(move || {
            let result = (|| -> Result<LoadedImageData, String> {
                let image = media::load_image(&path).map_err(|e| format!("{:#}", e))?;

                log::info!("Decoded image: {} ({}x{})", path.display(), image.width, image.height);

                let store_error = keep_copy(image_store.as_ref(), &path);

                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();

                Ok(LoadedImageData {
                    filename,
                    image,
                    store_error,
                })
            })();

            let _ = sender.send(result);
        });
    }

    /// Build the labels now and write them on a background thread.
    fn save_labels(&mut self) {
        if self.save_result.is_some() {
            log::debug!("Save requested while another is pending");
            self.notify("Save in progress", "The previous save has not finished yet");
            return;
        }

        let payload = match self.session.payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.notify("Cannot save", e.to_string());
                return;
            }
        };

        let (sender, receiver) = channel();
        self.save_result = Some(receiver);
        let sink = Arc::clone(&self.sink);

        std::thread::spawn(move || {
            let result = export::deliver(&payload, sink.as_ref());
            let _ = sender.send(result);
        });
    }

    fn install_image(&mut self, ctx: &egui::Context, loaded: LoadedImageData) {
        let filename = (!loaded.filename.is_empty()).then_some(loaded.filename);
        let image = loaded.image;

        if let Err(e) = self.session.load_image(filename, image.width, image.height) {
            self.notify("Cannot open image", e.to_string());
            return;
        }

        let size = [image.width as usize, image.height as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
        self.image_texture = Some(ctx.load_texture(
            "loaded_image",
            color_image,
            egui::TextureOptions::LINEAR,
        ));

        if let Some(e) = loaded.store_error {
            self.notify("Cannot store image", e);
        }
    }

    fn poll_background(&mut self, ctx: &egui::Context) {
        // Check for completed image loading
        if let Some(ref receiver) = self.image_loader {
            if let Ok(result) = receiver.try_recv() {
                self.image_loader = None;
                self.loading_message = None;

                match result {
                    Ok(loaded) => self.install_image(ctx, loaded),
                    Err(e) => self.notify("Cannot open image", e),
                }
            }
        }

        // Check for completed save
        if let Some(ref receiver) = self.save_result {
            if let Ok(result) = receiver.try_recv() {
                self.save_result = None;

                match result {
                    Ok(receipt) => {
                        log::info!("{}: {}", receipt.message, receipt.label_file);
                        self.notice = Some(Notice {
                            title: "Saved",
                            text: format!("Labels saved in: {}", receipt.label_file),
                        });
                    }
                    Err(e) => self.notify("Save failed", e.to_string()),
                }
            }
        }

        if self.loading_message.is_some() || self.save_result.is_some() {
            ctx.request_repaint();
        }
    }

    fn handle_canvas(&mut self, action: CanvasAction) {
        match (self.current_tool, action) {
            (_, CanvasAction::None) => {}
            (Tool::Draw, CanvasAction::Press(point)) => {
                if let Err(e) = self.session.pointer_down(point) {
                    self.notify("Cannot draw", e.to_string());
                }
            }
            (Tool::Draw, CanvasAction::Drag(point)) => self.session.pointer_move(point),
            (Tool::Draw, CanvasAction::Release) => {
                self.session.pointer_up();
            }
            (Tool::Draw, CanvasAction::Click(point)) => match self.session.pointer_down(point) {
                Ok(()) => {
                    self.session.pointer_up();
                }
                Err(e) => self.notify("Cannot draw", e.to_string()),
            },
            (Tool::Select, CanvasAction::Press(point)) => {
                self.session.grab(point);
            }
            (Tool::Select, CanvasAction::Drag(point)) => self.session.drag(point),
            (Tool::Select, CanvasAction::Release) => self.session.release(),
            (Tool::Select, CanvasAction::Click(point)) => {
                self.session.grab(point);
                self.session.release();
            }
        }
    }

    fn handle_classes(&mut self, action: ClassAction) {
        match action {
            ClassAction::None => {}
            ClassAction::Activate(id) => self.session.classes_mut().set_active(id),
            ClassAction::Register { name, color } => {
                self.session.classes_mut().register(name, color);
                self.new_class.name.clear();
                self.new_class.color = self.session.classes().suggest_color().to_array();
            }
        }
    }

    fn open_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.load_image_file(path);
        }
    }
}

/// Copy the opened image into the store, if one is configured.
///
/// A failed copy does not stop the image from opening; the error is handed
/// back so the user can be told.
fn keep_copy(store: Option<&ImageStore>, path: &Path) -> Option<String> {
    let store = store?;
    match store.store(path) {
        Ok(_) => None,
        Err(e) => {
            log::error!("Failed to store image: {}", e);
            Some(e.to_string())
        }
    }
}

impl eframe::App for LabelerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        self.open_dialog();
                        ui.close_menu();
                    }
                    if ui.button("Save Labels (Ctrl+S)").clicked() {
                        self.save_labels();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(
                    ui,
                    &mut self.current_tool,
                    self.session.classes().active(),
                    self.save_result.is_some(),
                )
            })
            .inner;
        if let ToolbarAction::Save = toolbar_action {
            self.save_labels();
        }

        // Class panel (right side)
        let class_action = egui::SidePanel::right("classes")
            .default_width(220.0)
            .show(ctx, |ui| {
                classes::show(
                    ui,
                    self.session.classes(),
                    self.session.boxes(),
                    &mut self.new_class,
                )
            })
            .inner;
        self.handle_classes(class_action);

        if !ctx.wants_keyboard_input()
            && ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::S))
        {
            self.save_labels();
        }

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Tool: {:?}", self.current_tool));
                ui.separator();
                match self.session.frame() {
                    Some(frame) => {
                        ui.label(format!(
                            "{} ({}x{})",
                            self.session.filename().unwrap_or("image"),
                            frame.natural_width,
                            frame.natural_height
                        ));
                        ui.separator();
                        ui.label(format!("{} boxes", self.session.boxes().len()));
                    }
                    None => {
                        ui.label("No image loaded");
                    }
                }
            });
        });

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(egui::RichText::new(message).size(16.0));
                        });
                    });
                    CanvasAction::None
                } else {
                    canvas::show(ui, &self.session, &self.image_texture)
                }
            })
            .inner;
        self.handle_canvas(canvas_action);

        let mut dismissed = false;
        if let Some(ref notice) = self.notice {
            egui::Window::new(notice.title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(notice.text.as_str());
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            if ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Enter)) {
                dismissed = true;
            }
        }
        if dismissed {
            self.notice = None;
        }
    }
}
