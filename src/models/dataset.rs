// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dataset index.
//!
//! Associates an image root with its mirrored label root, lists the files
//! under both, and holds the class-name mapping. Images are matched to
//! labels lazily by swapping the root prefix and the extension.

use super::annotation::ClassId;
use crate::io::{class_info, scan};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Extension of YOLO label files.
pub const LABEL_EXTENSION: &str = "txt";

/// Class ID to display name.
pub type ClassNames = BTreeMap<ClassId, String>;

#[derive(Debug, Clone)]
pub struct DatasetIndex {
    image_root: PathBuf,
    label_root: PathBuf,
    image_paths: Vec<PathBuf>,
    label_paths: Vec<PathBuf>,
    class_names: ClassNames,
}

impl DatasetIndex {
    /// Scan both roots and read the optional class-definitions file.
    pub fn load(image_root: &Path, label_root: &Path, class_info_path: Option<&Path>) -> Self {
        let image_paths = scan::list_files(image_root);
        let label_paths = scan::list_files(label_root);
        log::info!("Loaded {} images from {}", image_paths.len(), image_root.display());
        log::info!("Loaded {} label files from {}", label_paths.len(), label_root.display());

        let class_names = class_info_path
            .map(class_info::load_class_names)
            .unwrap_or_default();

        Self {
            image_root: image_root.to_path_buf(),
            label_root: label_root.to_path_buf(),
            image_paths,
            label_paths,
            class_names,
        }
    }

    pub fn image_root(&self) -> &Path {
        &self.image_root
    }

    pub fn label_root(&self) -> &Path {
        &self.label_root
    }

    pub fn image_paths(&self) -> &[PathBuf] {
        &self.image_paths
    }

    pub fn label_paths(&self) -> &[PathBuf] {
        &self.label_paths
    }

    pub fn class_names(&self) -> &ClassNames {
        &self.class_names
    }

    /// Label file for an image: same relative path under the label root,
    /// with a `.txt` extension. `None` if the image is outside the image root.
    pub fn label_path_for(&self, image: &Path) -> Option<PathBuf> {
        let relative = image.strip_prefix(&self.image_root).ok()?;
        Some(self.label_root.join(relative).with_extension(LABEL_EXTENSION))
    }

    /// Inverse of [`Self::label_path_for`] for a known image extension.
    pub fn image_path_for_label(&self, label: &Path, extension: &str) -> Option<PathBuf> {
        let relative = label.strip_prefix(&self.label_root).ok()?;
        Some(self.image_root.join(relative).with_extension(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn index(image_root: &str, label_root: &str) -> DatasetIndex {
        DatasetIndex {
            image_root: PathBuf::from(image_root),
            label_root: PathBuf::from(label_root),
            image_paths: Vec::new(),
            label_paths: Vec::new(),
            class_names: ClassNames::new(),
        }
    }

    #[test]
    fn test_label_path_substitution() {
        let index = index("/data/images", "/data/labels");
        assert_eq!(
            index.label_path_for(Path::new("/data/images/train/cat.jpg")),
            Some(PathBuf::from("/data/labels/train/cat.txt"))
        );
        assert_eq!(
            index.label_path_for(Path::new("/data/images/a.b.png")),
            Some(PathBuf::from("/data/labels/a.b.txt"))
        );
        assert_eq!(index.label_path_for(Path::new("/elsewhere/cat.jpg")), None);
    }

    #[test]
    fn test_label_path_round_trip() {
        let index = index("/data/images", "/data/labels");
        for image in [
            "/data/images/cat.jpg",
            "/data/images/val/deep/dog.PNG",
            "/data/images/x.y.webp",
        ] {
            let image = Path::new(image);
            let ext = image.extension().and_then(|e| e.to_str()).unwrap();
            let label = index.label_path_for(image).unwrap();
            assert_eq!(index.image_path_for_label(&label, ext).as_deref(), Some(image));
        }
        assert_eq!(index.image_path_for_label(Path::new("/tmp/a.txt"), "jpg"), None);
    }

    #[test]
    fn test_load_lists_files_and_class_names() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        let labels = dir.path().join("labels");
        fs::create_dir_all(images.join("train")).unwrap();
        fs::create_dir_all(labels.join("train")).unwrap();
        fs::write(images.join("train/a.jpg"), b"").unwrap();
        fs::write(images.join("notes.md"), b"").unwrap();
        fs::write(labels.join("train/a.txt"), b"0 0.5 0.5 0.1 0.1\n").unwrap();
        let yaml = dir.path().join("classes.yaml");
        fs::write(&yaml, "names:\n  0: car\n  1: wheel\n").unwrap();

        let index = DatasetIndex::load(&images, &labels, Some(&yaml));
        assert_eq!(index.image_paths().len(), 2);
        assert_eq!(index.label_paths().len(), 1);
        assert_eq!(index.class_names().get(&1).map(String::as_str), Some("wheel"));
    }

    #[test]
    fn test_load_missing_roots_and_class_file() {
        let dir = tempfile::tempdir().unwrap();
        let index = DatasetIndex::load(
            &dir.path().join("nope"),
            &dir.path().join("nada"),
            Some(&dir.path().join("missing.yaml")),
        );
        assert!(index.image_paths().is_empty());
        assert!(index.label_paths().is_empty());
        assert!(index.class_names().is_empty());
    }
}
