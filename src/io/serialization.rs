// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Overlay export.
//!
//! This module writes the overlay of the selected image either as a
//! standalone SVG document or as a JSON list of shapes.

use crate::models::overlay::{render_markup, svg_document, OverlayShape};
use anyhow::{bail, Result};
use serde::Serialize;
use std::path::Path;

/// Overlay of one image, ready to export.
#[derive(Debug, Serialize)]
pub struct OverlayExport<'a> {
    pub image: &'a Path,
    pub width: u32,
    pub height: u32,
    pub shapes: &'a [OverlayShape],
}

/// Export as an SVG document sized to the image.
pub fn export_svg(overlay: &OverlayExport<'_>, path: &Path) -> Result<()> {
    let svg = svg_document(&render_markup(overlay.shapes), overlay.width, overlay.height);
    std::fs::write(path, svg)?;
    Ok(())
}

/// Export as JSON.
pub fn export_json(overlay: &OverlayExport<'_>, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(overlay)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Export in the format implied by the extension of `path`.
pub fn export_overlay(overlay: &OverlayExport<'_>, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("svg") => export_svg(overlay, path),
        Some("json") => export_json(overlay, path),
        other => bail!("Unsupported export extension: {:?}", other),
    }
}
