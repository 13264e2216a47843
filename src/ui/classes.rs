// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Class list panel.
//!
//! Lists the registered classes with their box counts, lets the user pick
//! the active class and register new ones.

use super::color32;
use crate::models::{
    bbox::BoxEntity,
    class::{ClassId, ClassRegistry},
};
use crate::util::color::Color;

/// Result of class panel interaction.
pub enum ClassAction {
    None,
    Activate(ClassId),
    Register { name: String, color: Color },
}

/// Draft of the class the user is about to add.
pub struct NewClassForm {
    pub name: String,
    pub color: [u8; 3],
}

/// Display the class panel.
pub fn show(
    ui: &mut egui::Ui,
    classes: &ClassRegistry,
    boxes: &[BoxEntity],
    form: &mut NewClassForm,
) -> ClassAction {
    let mut action = ClassAction::None;
    let active = classes.active().map(|c| c.id);

    ui.heading("Classes");
    ui.separator();

    egui::ScrollArea::vertical()
        .max_height((ui.available_height() - 120.0).max(60.0))
        .show(ui, |ui| {
            if classes.is_empty() {
                ui.weak("No classes yet");
            }
            for class in classes.iter() {
                let count = boxes.iter().filter(|b| b.class_id == class.id).count();
                let text = egui::RichText::new(format!("{}  {} ({})", class.id, class.name, count))
                    .color(color32(class.color));
                let text = if active == Some(class.id) { text.strong() } else { text };

                if ui.selectable_label(active == Some(class.id), text).clicked() {
                    action = ClassAction::Activate(class.id);
                }
            }
        });

    ui.separator();
    ui.label("New class");
    ui.horizontal(|ui| {
        ui.color_edit_button_srgb(&mut form.color);
        ui.text_edit_singleline(&mut form.name);
    });

    let name = form.name.trim();
    if ui.add_enabled(!name.is_empty(), egui::Button::new("Add class")).clicked() {
        action = ClassAction::Register {
            name: name.to_string(),
            color: Color::from(form.color),
        };
    }

    action
}
