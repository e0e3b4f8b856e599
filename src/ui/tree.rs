// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Folder tree panel.

use crate::models::tree::{FileTreeNode, NodeIcon};
use std::path::{Path, PathBuf};

/// Result of tree interaction.
pub enum TreeAction {
    None,
    Select(PathBuf),
}

/// Display the image tree. Folders on the path to `selected` start open.
pub fn show(ui: &mut egui::Ui, nodes: &[FileTreeNode], selected: Option<&Path>) -> TreeAction {
    ui.label(egui::RichText::new("Images").strong().size(16.0));
    ui.separator();

    if nodes.is_empty() {
        ui.label(egui::RichText::new("No images found").weak());
        return TreeAction::None;
    }

    let mut action = TreeAction::None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            show_nodes(ui, nodes, selected, &mut action);
        });
    action
}

fn show_nodes(ui: &mut egui::Ui, nodes: &[FileTreeNode], selected: Option<&Path>, action: &mut TreeAction) {
    for node in nodes {
        match node.icon {
            NodeIcon::Folder => {
                let open = selected.is_some_and(|sel| node.contains(sel));
                egui::CollapsingHeader::new(format!("📁 {}", node.label))
                    .id_source(&node.id)
                    .default_open(open)
                    .show(ui, |ui| {
                        show_nodes(ui, &node.children, selected, action);
                    });
            }
            NodeIcon::Image => {
                let is_selected = selected == Some(node.id.as_path());
                if ui
                    .selectable_label(is_selected, format!("🖼 {}", node.label))
                    .clicked()
                {
                    *action = TreeAction::Select(node.id.clone());
                }
            }
        }
    }
}
