// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Browsable folder tree.

use std::path::{Path, PathBuf};

/// Icon category of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeIcon {
    Folder,
    Image,
}

/// One filesystem entry in the image tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FileTreeNode {
    /// Absolute path of the entry.
    pub id: PathBuf,
    /// File or directory name.
    pub label: String,
    pub icon: NodeIcon,
    /// Ordered children; always empty for images.
    pub children: Vec<FileTreeNode>,
}

impl FileTreeNode {
    pub fn folder(id: PathBuf, label: String, children: Vec<FileTreeNode>) -> Self {
        Self {
            id,
            label,
            icon: NodeIcon::Folder,
            children,
        }
    }

    pub fn image(id: PathBuf, label: String) -> Self {
        Self {
            id,
            label,
            icon: NodeIcon::Image,
            children: Vec::new(),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.icon == NodeIcon::Folder
    }

    /// Whether `path` is this node or lies beneath it.
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.id)
    }
}

/// Image paths of a forest in display order (depth-first, as listed).
pub fn image_paths(nodes: &[FileTreeNode]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    collect_images(nodes, &mut paths);
    paths
}

fn collect_images(nodes: &[FileTreeNode], out: &mut Vec<PathBuf>) {
    for node in nodes {
        match node.icon {
            NodeIcon::Image => out.push(node.id.clone()),
            NodeIcon::Folder => collect_images(&node.children, out),
        }
    }
}
