// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the overlay switch and the class legend.

use crate::browser::Legend;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    ToggleOverlay(bool),
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, show_overlay: bool, legend: &Legend) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label(egui::RichText::new("Controls:").strong());

        let mut visible = show_overlay;
        if ui.checkbox(&mut visible, "Show Overlay").changed() {
            action = ToolbarAction::ToggleOverlay(visible);
        }

        ui.separator();

        match legend {
            Legend::NoClasses => {
                ui.label(egui::RichText::new("No classes loaded").small().weak());
            }
            Legend::Entries(entries) => {
                for entry in entries {
                    let color = egui::Color32::from_rgb(entry.color.r, entry.color.g, entry.color.b);
                    let (swatch, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, color);
                    ui.label(egui::RichText::new(&entry.name).small().color(color))
                        .on_hover_text(format!("class {}", entry.class_id));
                }
            }
        }
    });

    action
}
