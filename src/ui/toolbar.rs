// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tool selection UI.
//!
//! This module provides the toolbar for switching between drawing and
//! selecting boxes, and for saving the labels.

use super::color32;
use crate::app::Tool;
use crate::models::class::ClassDescriptor;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    Save,
}

/// Display the toolbar with tool selection buttons.
pub fn show(
    ui: &mut egui::Ui,
    current_tool: &mut Tool,
    active_class: Option<&ClassDescriptor>,
    saving: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");

        ui.separator();

        if ui.selectable_label(*current_tool == Tool::Draw, "▭ Draw").clicked() {
            *current_tool = Tool::Draw;
        }

        if ui.selectable_label(*current_tool == Tool::Select, "⬆ Select").clicked() {
            *current_tool = Tool::Select;
        }

        ui.separator();

        match active_class {
            Some(class) => {
                ui.label(egui::RichText::new(&class.name).strong().color(color32(class.color)));
            }
            None => {
                ui.label(egui::RichText::new("no class").weak());
            }
        }

        ui.separator();

        if ui.add_enabled(!saving, egui::Button::new("💾 Save labels")).clicked() {
            action = ToolbarAction::Save;
        }
        if saving {
            ui.spinner();
        }

        ui.separator();

        let tool_text = match current_tool {
            Tool::Draw => "Drag to draw a box for the active class",
            Tool::Select => "Drag a box to move it, drag its corner grip to resize",
        };

        ui.label(egui::RichText::new(tool_text).italics().weak());
    });

    action
}
