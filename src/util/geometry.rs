// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides utilities for converting normalized label
//! coordinates into pixel space and for triangulating polygon masks.

use crate::models::annotation::Point;

/// Convert normalized coordinates to pixel coordinates.
pub fn denormalize_coordinates(point: &Point, width: u32, height: u32) -> Point {
    Point {
        x: point.x * width as f64,
        y: point.y * height as f64,
    }
}

/// Pair up a flat coordinate list into points. A trailing unpaired value is dropped.
pub fn pair_coordinates(coords: &[f64]) -> Vec<Point> {
    coords
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

/// Pixel-space rectangle as (top-left x, top-left y, width, height).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Convert a normalized centre-based box into a pixel rectangle.
pub fn center_box_to_pixels(
    cx: f64,
    cy: f64,
    w: f64,
    h: f64,
    width: u32,
    height: u32,
) -> PixelRect {
    let pixel_w = w * width as f64;
    let pixel_h = h * height as f64;
    PixelRect {
        x: cx * width as f64 - pixel_w / 2.0,
        y: cy * height as f64 - pixel_h / 2.0,
        width: pixel_w,
        height: pixel_h,
    }
}

/// Triangulate a simple polygon with ear clipping.
///
/// Returns index triples into `points`; empty when the polygon is degenerate.
pub fn triangulate(points: &[Point]) -> Vec<[usize; 3]> {
    if points.len() < 3 {
        return Vec::new();
    }
    let coords: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    match earcutr::earcut(&coords, &[], 2) {
        Ok(indices) => indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect(),
        Err(e) => {
            log::debug!("Polygon triangulation failed: {:?}", e);
            Vec::new()
        }
    }
}
