// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires the egui panels to the browser controller: UI
//! interactions become `BrowserEvent`s, and newly displayed images are
//! uploaded as textures.

use crate::browser::{Browser, BrowserEvent};
use crate::config::ViewerConfig;
use crate::io::media::LoadedImage;
use crate::io::serialization;
use crate::models::session::ViewState;
use crate::ui::{canvas, toolbar, tree};
use std::path::PathBuf;

/// Main application state.
pub struct LabelscopeApp {
    /// Dataset, tree and session state
    browser: Browser,

    /// Texture of the displayed image
    image_texture: Option<egui::TextureHandle>,
}

impl LabelscopeApp {
    /// Create the application, scanning the configured dataset.
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            browser: Browser::new(config),
            image_texture: None,
        }
    }

    /// Forward an event to the browser and upload any new image.
    fn dispatch(&mut self, ctx: &egui::Context, event: BrowserEvent) {
        if let Some(image) = self.browser.handle(event) {
            self.upload_texture(ctx, &image);
        }
        if self.browser.session().state() == ViewState::Idle {
            self.image_texture = None;
        }
    }

    fn upload_texture(&mut self, ctx: &egui::Context, image: &LoadedImage) {
        let size = [image.width as usize, image.height as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
        self.image_texture = Some(ctx.load_texture(
            "selected_image",
            color_image,
            egui::TextureOptions::LINEAR,
        ));
    }

    /// Export the displayed overlay to a file.
    fn export_overlay(&self, path: PathBuf) {
        let Some(overlay) = self.browser.overlay_export() else {
            return;
        };
        match serialization::export_overlay(&overlay, &path) {
            Ok(()) => log::info!("Exported overlay to {}", path.display()),
            Err(e) => log::error!("Failed to export overlay: {:#}", e),
        }
    }

    fn overlay_file_name(&self, extension: &str) -> String {
        self.browser
            .session()
            .selected()
            .and_then(|p| p.file_stem())
            .map(|stem| format!("{}.{}", stem.to_string_lossy(), extension))
            .unwrap_or_else(|| format!("overlay.{}", extension))
    }
}

impl eframe::App for LabelscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();
        let has_image = self.browser.overlay_export().is_some();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    ui.menu_button("Export Overlay", |ui| {
                        if ui.add_enabled(has_image, egui::Button::new("Export as SVG...")).clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("SVG", &["svg"])
                                .set_file_name(self.overlay_file_name("svg"))
                                .save_file()
                            {
                                self.export_overlay(path);
                            }
                            ui.close_menu();
                        }
                        if ui.add_enabled(has_image, egui::Button::new("Export as JSON...")).clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name(self.overlay_file_name("json"))
                                .save_file()
                            {
                                self.export_overlay(path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Previous Image (↑)").clicked() {
                        events.push(BrowserEvent::Step(-1));
                        ui.close_menu();
                    }
                    if ui.button("Next Image (↓)").clicked() {
                        events.push(BrowserEvent::Step(1));
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        let legend = self.browser.legend();
        let show_overlay = self.browser.session().overlay_visible();
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            if let toolbar::ToolbarAction::ToggleOverlay(visible) = toolbar::show(ui, show_overlay, &legend) {
                events.push(BrowserEvent::ToggleOverlay(visible));
            }
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let session = self.browser.session();
            ui.horizontal(|ui| match (session.selected(), session.image_size()) {
                (Some(path), Some((w, h))) => {
                    ui.label(path.display().to_string());
                    ui.separator();
                    ui.label(format!("{}x{}", w, h));
                    ui.separator();
                    match session.label_path() {
                        Some(label) if label.is_file() => {
                            ui.label(format!("{} ({} shapes)", label.display(), session.shapes().len()));
                        }
                        Some(label) => {
                            ui.label(egui::RichText::new(format!("no labels at {}", label.display())).weak());
                        }
                        None => {
                            ui.label(egui::RichText::new("no labels").weak());
                        }
                    }
                }
                _ => {
                    ui.label(format!(
                        "{} images, {} label files",
                        self.browser.dataset().image_paths().len(),
                        self.browser.dataset().label_paths().len()
                    ));
                }
            });
        });

        // Folder tree (left side)
        let tree_action = egui::SidePanel::left("tree")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                tree::show(ui, self.browser.tree(), self.browser.session().selected())
            })
            .inner;
        if let tree::TreeAction::Select(path) = tree_action {
            events.push(BrowserEvent::Select(path));
        }

        // Handle keyboard navigation
        if !ctx.wants_keyboard_input() {
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowDown) || i.key_pressed(egui::Key::CloseBracket)) {
                events.push(BrowserEvent::Step(1));
            }
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowUp) || i.key_pressed(egui::Key::OpenBracket)) {
                events.push(BrowserEvent::Step(-1));
            }
        }

        for event in events {
            self.dispatch(ctx, event);
        }

        // Main canvas (center)
        egui::CentralPanel::default().show(ctx, |ui| {
            canvas::show(ui, self.browser.session(), &self.image_texture);
        });
    }
}
