// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Directory scanning.
//!
//! Flat recursive file listings for the dataset index, and the ordered
//! image tree shown in the browser panel.

use crate::models::tree::FileTreeNode;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions (lowercase, without dot) shown in the image tree.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "webp"];

/// Whether a path has one of the image extensions, ignoring case.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Every regular file below `root`, at any depth.
///
/// Symlinks are followed; loops are reported by the walker and skipped.
/// A missing root yields an empty list.
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        log::warn!("Directory does not exist: {}", root.display());
        return Vec::new();
    }

    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}

/// Build the browsable tree below `root`.
///
/// Each level lists directories first, then image files, both ordered by
/// lowercase name. Hidden entries and non-image files are left out; empty
/// directories are kept. Returns an empty tree if `root` is not a directory.
pub fn build_file_tree(root: &Path) -> Vec<FileTreeNode> {
    if !root.is_dir() {
        return Vec::new();
    }
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let mut ancestors = HashSet::new();
    build_level(&root, &mut ancestors)
}

fn build_level(dir: &Path, ancestors: &mut HashSet<PathBuf>) -> Vec<FileTreeNode> {
    // Symlinked directories can point back up the tree.
    let real = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    if !ancestors.insert(real.clone()) {
        log::warn!("Skipping directory cycle at {}", dir.display());
        return Vec::new();
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Cannot read directory {}: {}", dir.display(), e);
            ancestors.remove(&real);
            return Vec::new();
        }
    };

    let mut items: Vec<(bool, String, PathBuf)> = entries
        .filter_map(Result::ok)
        .map(|entry| {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            (path.is_dir(), name, path)
        })
        .filter(|(_, name, _)| !name.starts_with('.'))
        .collect();

    items.sort_by_cached_key(|(is_dir, name, _)| (!*is_dir, name.to_lowercase()));

    let nodes: Vec<FileTreeNode> = items
        .into_iter()
        .filter_map(|(is_dir, name, path)| {
            if is_dir {
                let children = build_level(&path, ancestors);
                Some(FileTreeNode::folder(path, name, children))
            } else if is_image_file(&path) {
                Some(FileTreeNode::image(path, name))
            } else {
                None
            }
        })
        .collect();

    ancestors.remove(&real);
    nodes
}
