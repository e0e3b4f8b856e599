// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Overlay shapes.
//!
//! An overlay shape is a label record converted to pixel space and given
//! its class color. Shapes can be drawn directly by the canvas or emitted
//! as SVG markup, one element per shape.

use super::annotation::{AnnotationRecord, ClassId, Geometry, Point};
use crate::util::color::{ColorMap, Rgb};
use crate::util::geometry::{center_box_to_pixels, denormalize_coordinates};
use serde::Serialize;
use std::fmt::Write;

pub const BOX_FILL_OPACITY: f32 = 0.2;
pub const POLYGON_FILL_OPACITY: f32 = 0.4;
pub const STROKE_WIDTH: f32 = 2.0;

/// Pixel-space primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Top-left corner plus size.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Polygon { points: Vec<Point> },
}

/// Fill and stroke styling of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeStyle {
    pub fill: Rgb,
    pub stroke: Rgb,
    pub fill_opacity: f32,
    pub stroke_width: f32,
}

/// A drawable overlay element for one annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayShape {
    pub class_id: ClassId,
    #[serde(flatten)]
    pub shape: Shape,
    pub style: ShapeStyle,
}

impl OverlayShape {
    /// Convert a record to pixel space for an image of `width` x `height`.
    pub fn from_record(record: &AnnotationRecord, width: u32, height: u32, colors: &ColorMap) -> Self {
        let color = colors.class_color(record.class_id);
        let (shape, fill_opacity) = match &record.geometry {
            Geometry::BoundingBox { cx, cy, w, h } => {
                let rect = center_box_to_pixels(*cx, *cy, *w, *h, width, height);
                (
                    Shape::Rect {
                        x: rect.x,
                        y: rect.y,
                        width: rect.width,
                        height: rect.height,
                    },
                    BOX_FILL_OPACITY,
                )
            }
            Geometry::Polygon(points) => (
                Shape::Polygon {
                    points: points
                        .iter()
                        .map(|p| denormalize_coordinates(p, width, height))
                        .collect(),
                },
                POLYGON_FILL_OPACITY,
            ),
        };

        Self {
            class_id: record.class_id,
            shape,
            style: ShapeStyle {
                fill: color,
                stroke: color,
                fill_opacity,
                stroke_width: STROKE_WIDTH,
            },
        }
    }

    /// SVG element for this shape.
    pub fn to_svg(&self) -> String {
        let style = &self.style;
        match &self.shape {
            Shape::Rect { x, y, width, height } => format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}" stroke="{}" fill-opacity="{}" stroke-width="{}" />"#,
                style.fill, style.stroke, style.fill_opacity, style.stroke_width
            ),
            Shape::Polygon { points } => {
                let mut points_attr = String::new();
                for (i, p) in points.iter().enumerate() {
                    if i > 0 {
                        points_attr.push(' ');
                    }
                    let _ = write!(points_attr, "{},{}", p.x, p.y);
                }
                format!(
                    r#"<polygon points="{points_attr}" fill="{}" stroke="{}" fill-opacity="{}" stroke-width="{}" />"#,
                    style.fill, style.stroke, style.fill_opacity, style.stroke_width
                )
            }
        }
    }
}

/// Concatenate the SVG elements of all shapes into one markup fragment.
pub fn render_markup(shapes: &[OverlayShape]) -> String {
    shapes.iter().map(OverlayShape::to_svg).collect()
}

/// Wrap a markup fragment into a standalone SVG document sized to the image.
pub fn svg_document(markup: &str, width: u32, height: u32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">{markup}</svg>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::color::Palette;
    use std::collections::BTreeMap;

    fn record(class_id: ClassId, coords: &[f64]) -> AnnotationRecord {
        AnnotationRecord::from_coords(class_id, coords).unwrap()
    }

    #[test]
    fn test_box_to_rect() {
        let palette = Palette::default();
        let shape = OverlayShape::from_record(
            &record(2, &[0.5, 0.5, 0.2, 0.4]),
            100,
            200,
            &ColorMap::default(),
        );

        match shape.shape {
            Shape::Rect { x, y, width, height } => {
                assert!((x - 40.0).abs() < 1e-9);
                assert!((y - 60.0).abs() < 1e-9);
                assert!((width - 20.0).abs() < 1e-9);
                assert!((height - 80.0).abs() < 1e-9);
            }
            other => panic!("expected rect, got {:?}", other),
        }
        assert_eq!(shape.style.fill, palette.wrapped(2));
        assert_eq!(shape.style.stroke, palette.wrapped(2));
        assert_eq!(shape.style.fill_opacity, BOX_FILL_OPACITY);
        assert_eq!(shape.style.stroke_width, STROKE_WIDTH);
    }

    #[test]
    fn test_polygon_points_scaled() {
        let shape = OverlayShape::from_record(
            &record(0, &[0.1, 0.1, 0.2, 0.1, 0.2, 0.2]),
            100,
            100,
            &ColorMap::default(),
        );
        match &shape.shape {
            Shape::Polygon { points } => {
                let expected = [(10.0, 10.0), (20.0, 10.0), (20.0, 20.0)];
                assert_eq!(points.len(), expected.len());
                for (p, (ex, ey)) in points.iter().zip(expected) {
                    assert!((p.x - ex).abs() < 1e-9);
                    assert!((p.y - ey).abs() < 1e-9);
                }
            }
            other => panic!("expected polygon, got {:?}", other),
        }
        assert_eq!(shape.style.fill_opacity, POLYGON_FILL_OPACITY);
    }

    #[test]
    fn test_svg_markup() {
        let colors = ColorMap::default();
        let rect = OverlayShape::from_record(&record(0, &[0.5, 0.5, 0.5, 0.5]), 100, 100, &colors);
        assert_eq!(
            rect.to_svg(),
            r#"<rect x="25" y="25" width="50" height="50" fill="rgb(255,0,0)" stroke="rgb(255,0,0)" fill-opacity="0.2" stroke-width="2" />"#
        );

        let poly = OverlayShape::from_record(
            &record(0, &[0.25, 0.5, 0.5, 0.5, 0.5, 0.75]),
            100,
            100,
            &colors,
        );
        assert_eq!(
            poly.to_svg(),
            r#"<polygon points="25,50 50,50 50,75" fill="rgb(255,0,0)" stroke="rgb(255,0,0)" fill-opacity="0.4" stroke-width="2" />"#
        );

        let markup = render_markup(&[rect.clone(), poly.clone()]);
        assert_eq!(markup, rect.to_svg() + &poly.to_svg());
        assert_eq!(render_markup(&[]), "");
    }

    #[test]
    fn test_override_color_applies_to_shape() {
        let mut overrides = BTreeMap::new();
        overrides.insert(3, Rgb::new(0, 0, 255));
        let colors = ColorMap::from_overrides(&Palette::default(), overrides);

        let shape = OverlayShape::from_record(&record(3, &[0.5, 0.5, 0.5, 0.5]), 10, 10, &colors);
        assert_eq!(shape.style.fill, Rgb::new(0, 0, 255));
        assert_eq!(shape.style.stroke, Rgb::new(0, 0, 255));

        let unmapped = OverlayShape::from_record(&record(4, &[0.5, 0.5, 0.5, 0.5]), 10, 10, &colors);
        assert_eq!(unmapped.style.fill, Palette::default().wrapped(4));
    }

    #[test]
    fn test_svg_document_wraps_fragment() {
        let doc = svg_document("<rect />", 640, 480);
        assert!(doc.starts_with("<svg "));
        assert!(doc.contains(r#"viewBox="0 0 640 480""#));
        assert!(doc.ends_with("<rect /></svg>"));
    }

    #[test]
    fn test_shape_json_layout() {
        let shape =
            OverlayShape::from_record(&record(1, &[0.5, 0.5, 0.5, 0.5]), 10, 10, &ColorMap::default());
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "rect");
        assert_eq!(json["class_id"], 1);
        assert_eq!(json["style"]["fill"], "rgb(0,255,74)");
    }
}
