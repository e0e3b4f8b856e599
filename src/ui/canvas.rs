// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image canvas.
//!
//! This module draws the selected image fitted to the available space and
//! paints the visible overlay shapes on top of it.

use crate::models::annotation::Point;
use crate::models::overlay::{OverlayShape, Shape};
use crate::models::session::{BrowserSession, ViewState};
use crate::util::color::Rgb;
use crate::util::geometry::triangulate;

/// Display the canvas for the current session.
pub fn show(ui: &mut egui::Ui, session: &BrowserSession, image_texture: &Option<egui::TextureHandle>) {
    // Set background color
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        match (session.state(), image_texture, session.image_size()) {
            (ViewState::Displayed | ViewState::OverlayHidden, Some(texture), Some((img_width, img_height))) => {
                let image_rect = fit_rect(ui.min_rect(), ui.available_size(), img_width, img_height);

                ui.painter().image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );

                let scale = image_rect.width() / img_width as f32;
                let painter = ui.painter_at(image_rect);
                for shape in session.visible_shapes() {
                    draw_shape(&painter, shape, image_rect.min, scale);
                }
            }
            (ViewState::Loading, _, _) => {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            }
            _ => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Select an image from the tree")
                            .color(egui::Color32::from_gray(160)),
                    );
                });
            }
        }
    });
}

/// Largest rect with the image's aspect ratio that fits, centred.
fn fit_rect(frame: egui::Rect, available: egui::Vec2, img_width: u32, img_height: u32) -> egui::Rect {
    let img_aspect = img_width as f32 / img_height.max(1) as f32;
    let available_aspect = available.x / available.y.max(1.0);

    let (display_width, display_height) = if img_aspect > available_aspect {
        // Image is wider - fit to width
        (available.x, available.x / img_aspect)
    } else {
        // Image is taller - fit to height
        (available.y * img_aspect, available.y)
    };

    let x_offset = (available.x - display_width) / 2.0;
    let y_offset = (available.y - display_height) / 2.0;

    egui::Rect::from_min_size(
        frame.min + egui::vec2(x_offset, y_offset),
        egui::vec2(display_width, display_height),
    )
}

fn color32(color: Rgb, opacity: f32) -> egui::Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}

/// Paint one overlay shape; pixel coordinates are mapped by `origin + p * scale`.
fn draw_shape(painter: &egui::Painter, shape: &OverlayShape, origin: egui::Pos2, scale: f32) {
    let style = &shape.style;
    let to_screen = |p: &Point| origin + egui::vec2(p.x as f32 * scale, p.y as f32 * scale);
    let fill = color32(style.fill, style.fill_opacity);
    let stroke = egui::Stroke::new(style.stroke_width, color32(style.stroke, 1.0));

    match &shape.shape {
        Shape::Rect { x, y, width, height } => {
            let min = to_screen(&Point::new(*x, *y));
            let size = egui::vec2(*width as f32 * scale, *height as f32 * scale);
            painter.rect(egui::Rect::from_min_size(min, size), 0.0, fill, stroke);
        }
        Shape::Polygon { points } => {
            let screen: Vec<egui::Pos2> = points.iter().map(to_screen).collect();

            // egui only fills convex paths, so masks go through a mesh.
            let mut mesh = egui::Mesh::default();
            for pos in &screen {
                mesh.colored_vertex(*pos, fill);
            }
            for [a, b, c] in triangulate(points) {
                mesh.add_triangle(a as u32, b as u32, c as u32);
            }
            if !mesh.indices.is_empty() {
                painter.add(egui::Shape::mesh(mesh));
            }
            painter.add(egui::Shape::closed_line(screen, stroke));
        }
    }
}
