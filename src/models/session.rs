// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-session display state.
//!
//! Tracks the selected image, its pixel size, the overlay computed for it
//! and whether the overlay is shown. Toggling visibility never recomputes
//! the overlay; a new selection replaces everything.

use super::overlay::{render_markup, OverlayShape};
use std::path::{Path, PathBuf};

/// Observable state of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing selected yet.
    Idle,
    /// Image and labels being read.
    Loading,
    /// Image shown with its overlay.
    Displayed,
    /// Image shown, overlay suppressed but retained.
    OverlayHidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading,
    Ready,
}

#[derive(Debug, Clone)]
pub struct BrowserSession {
    phase: Phase,
    selected: Option<PathBuf>,
    label_path: Option<PathBuf>,
    image_size: Option<(u32, u32)>,
    shapes: Vec<OverlayShape>,
    markup: String,
    show_overlay: bool,
}

impl Default for BrowserSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            selected: None,
            label_path: None,
            image_size: None,
            shapes: Vec::new(),
            markup: String::new(),
            show_overlay: true,
        }
    }

    pub fn state(&self) -> ViewState {
        match self.phase {
            Phase::Idle => ViewState::Idle,
            Phase::Loading => ViewState::Loading,
            Phase::Ready if self.show_overlay => ViewState::Displayed,
            Phase::Ready => ViewState::OverlayHidden,
        }
    }

    /// Start a new selection, discarding everything from the previous one.
    pub fn begin_loading(&mut self, image: PathBuf) {
        self.phase = Phase::Loading;
        self.selected = Some(image);
        self.label_path = None;
        self.image_size = None;
        self.shapes.clear();
        self.markup.clear();
    }

    /// Finish the current selection with the decoded size and overlay.
    pub fn finish_loading(
        &mut self,
        image_size: (u32, u32),
        label_path: Option<PathBuf>,
        shapes: Vec<OverlayShape>,
    ) {
        self.markup = render_markup(&shapes);
        self.shapes = shapes;
        self.image_size = Some(image_size);
        self.label_path = label_path;
        self.phase = Phase::Ready;
    }

    /// Give up on the current selection; the overlay preference is kept.
    pub fn abort_loading(&mut self) {
        let show_overlay = self.show_overlay;
        *self = Self::new();
        self.show_overlay = show_overlay;
    }

    pub fn set_overlay_visible(&mut self, visible: bool) {
        self.show_overlay = visible;
    }

    pub fn overlay_visible(&self) -> bool {
        self.show_overlay
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    pub fn label_path(&self) -> Option<&Path> {
        self.label_path.as_deref()
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    /// All shapes computed for the current image, shown or not.
    pub fn shapes(&self) -> &[OverlayShape] {
        &self.shapes
    }

    /// Full overlay markup for the current image, shown or not.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Shapes to draw right now.
    pub fn visible_shapes(&self) -> &[OverlayShape] {
        match self.state() {
            ViewState::Displayed => self.shapes.as_slice(),
            _ => &[],
        }
    }

    /// Markup to draw right now; empty while hidden.
    pub fn visible_markup(&self) -> &str {
        match self.state() {
            ViewState::Displayed => self.markup.as_str(),
            _ => "",
        }
    }
}
