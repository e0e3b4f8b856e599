// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Browser controller.
//!
//! Owns the dataset index, the image tree, the colors and the session
//! state, and turns selection and toggle events into session updates.
//! Everything here is synchronous; the GUI calls in from its event loop.

use crate::config::ViewerConfig;
use crate::io::labels::parse_label_file;
use crate::io::media::{load_image, LoadedImage};
use crate::io::scan::build_file_tree;
use crate::io::serialization::OverlayExport;
use crate::models::annotation::ClassId;
use crate::models::dataset::DatasetIndex;
use crate::models::session::BrowserSession;
use crate::models::tree::{image_paths, FileTreeNode};
use crate::util::color::{ColorMap, Palette, Rgb};
use std::path::{Path, PathBuf};

/// Input events from the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserEvent {
    /// A tree entry was selected.
    Select(PathBuf),
    /// The overlay switch changed.
    ToggleOverlay(bool),
    /// Move to the image `offset` positions away in tree order.
    Step(isize),
}

/// One class in the legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub class_id: ClassId,
    pub name: String,
    pub color: Rgb,
}

/// Class legend for the loaded class names.
#[derive(Debug, Clone, PartialEq)]
pub enum Legend {
    NoClasses,
    Entries(Vec<LegendEntry>),
}

pub struct Browser {
    dataset: DatasetIndex,
    tree: Vec<FileTreeNode>,
    /// Images in tree order, for stepping.
    ordered_images: Vec<PathBuf>,
    colors: ColorMap,
    session: BrowserSession,
}

impl Browser {
    pub fn new(config: ViewerConfig) -> Self {
        let dataset = DatasetIndex::load(
            &config.image_base_path,
            &config.label_base_path,
            config.class_info.as_deref(),
        );
        let tree = build_file_tree(dataset.image_root());
        let ordered_images = image_paths(&tree);
        let colors = config.color_map(&Palette::default());

        Self {
            dataset,
            tree,
            ordered_images,
            colors,
            session: BrowserSession::new(),
        }
    }

    pub fn tree(&self) -> &[FileTreeNode] {
        &self.tree
    }

    pub fn dataset(&self) -> &DatasetIndex {
        &self.dataset
    }

    pub fn session(&self) -> &BrowserSession {
        &self.session
    }

    /// Handle one event. Returns the decoded image when a new one was displayed.
    pub fn handle(&mut self, event: BrowserEvent) -> Option<LoadedImage> {
        match event {
            BrowserEvent::Select(path) => self.select(&path),
            BrowserEvent::ToggleOverlay(visible) => {
                self.session.set_overlay_visible(visible);
                None
            }
            BrowserEvent::Step(offset) => {
                let next = self.neighbour(offset)?;
                self.select(&next)
            }
        }
    }

    /// Display `path` with its overlay.
    ///
    /// Anything that is not a regular file is ignored. If the image cannot
    /// be decoded the session returns to idle; if the labels cannot be
    /// parsed the image is shown without an overlay.
    pub fn select(&mut self, path: &Path) -> Option<LoadedImage> {
        if !path.is_file() {
            log::debug!("Ignoring selection of non-file {}", path.display());
            return None;
        }

        self.session.begin_loading(path.to_path_buf());
        let label_path = self.dataset.label_path_for(path);
        log::info!("Displaying image: {}", path.display());
        match &label_path {
            Some(label) => log::info!("Corresponding label file: {}", label.display()),
            None => log::warn!(
                "{} is outside {}, no labels",
                path.display(),
                self.dataset.image_root().display()
            ),
        }

        let image = match load_image(path) {
            Ok(image) => image,
            Err(e) => {
                log::error!("{:#}", e);
                self.session.abort_loading();
                return None;
            }
        };

        let shapes = label_path
            .as_deref()
            .map(|label| parse_label_file(label, image.width, image.height, &self.colors))
            .unwrap_or_default();
        self.session.finish_loading(image.size(), label_path, shapes);
        Some(image)
    }

    /// Image `offset` steps from the current selection in tree order.
    ///
    /// With nothing selected, stepping forward starts at the first image.
    /// Stops at either end.
    pub fn neighbour(&self, offset: isize) -> Option<PathBuf> {
        let current = self
            .session
            .selected()
            .and_then(|sel| self.ordered_images.iter().position(|p| p == sel));

        let target = match current {
            Some(index) => index.checked_add_signed(offset)?,
            None if offset > 0 => 0,
            None => return None,
        };
        self.ordered_images.get(target).cloned()
    }

    /// Legend entries use the same colors as the drawn shapes.
    pub fn legend(&self) -> Legend {
        let names = self.dataset.class_names();
        if names.is_empty() {
            return Legend::NoClasses;
        }
        Legend::Entries(
            names
                .iter()
                .map(|(id, name)| LegendEntry {
                    class_id: *id,
                    name: name.clone(),
                    color: self.colors.class_color(*id),
                })
                .collect(),
        )
    }

    /// The displayed overlay, for export. `None` until an image is shown.
    pub fn overlay_export(&self) -> Option<OverlayExport<'_>> {
        let image = self.session.selected()?;
        let (width, height) = self.session.image_size()?;
        Some(OverlayExport {
            image,
            width,
            height,
            shapes: self.session.shapes(),
        })
    }
}
