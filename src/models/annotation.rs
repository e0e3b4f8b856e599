// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the records read from YOLO label files: a class ID
//! plus either a centre-based bounding box or a polygon outline, all in
//! normalized image coordinates.

use crate::util::geometry::pair_coordinates;
use serde::Serialize;

/// Integer category identifier for an annotation.
/// Negative IDs are accepted and wrap onto the palette like large ones.
pub type ClassId = i64;

/// A 2D point. Normalized (0.0 to 1.0) in label records, pixels in overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry of one label record, in normalized coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Centre x, centre y, width, height.
    BoundingBox { cx: f64, cy: f64, w: f64, h: f64 },
    /// Polygon vertices in order; always at least three.
    Polygon(Vec<Point>),
}

/// One parsed line of a label file.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRecord {
    pub class_id: ClassId,
    pub geometry: Geometry,
}

impl AnnotationRecord {
    /// Classify a coordinate list.
    ///
    /// Exactly four values is always a bounding box, even though it could
    /// also be read as a two-point polygon. Otherwise the values are paired
    /// into vertices and need at least three of them; anything less yields
    /// `None`.
    pub fn from_coords(class_id: ClassId, coords: &[f64]) -> Option<Self> {
        let geometry = if let &[cx, cy, w, h] = coords {
            Geometry::BoundingBox { cx, cy, w, h }
        } else {
            let points = pair_coordinates(coords);
            if points.len() < 3 {
                return None;
            }
            Geometry::Polygon(points)
        };
        Some(Self { class_id, geometry })
    }

    pub fn is_bounding_box(&self) -> bool {
        matches!(self.geometry, Geometry::BoundingBox { .. })
    }
}
