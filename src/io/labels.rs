// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! YOLO label file parsing.
//!
//! Each non-blank line is `<class_id> <coord> <coord> ...` with normalized
//! coordinates. Four coordinates are a centre-based box; six or more are
//! polygon vertex pairs. Lines with too few points are skipped, but any
//! unreadable token discards the whole file.

use crate::models::annotation::{AnnotationRecord, ClassId};
use crate::models::overlay::OverlayShape;
use crate::util::color::ColorMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("failed to read label file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: invalid class id {token:?}")]
    InvalidClassId { line: usize, token: String },
    #[error("line {line}: invalid coordinate {token:?}")]
    InvalidCoordinate { line: usize, token: String },
}

impl AnnotationRecord {
    /// Parse one label line (`line_no` is 1-based, used in errors).
    ///
    /// Blank lines and lines that are neither a box nor a polygon give `Ok(None)`.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Self>, LabelError> {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return Ok(None);
        };

        let class_id: ClassId = first.parse().map_err(|_| LabelError::InvalidClassId {
            line: line_no,
            token: first.to_string(),
        })?;

        let coords = tokens
            .map(|token| {
                token.parse::<f64>().map_err(|_| LabelError::InvalidCoordinate {
                    line: line_no,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_coords(class_id, &coords))
    }
}

/// Lines of label text, ended by `\n`, `\r\n` or a lone `\r`.
fn label_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().flat_map(|line| line.split('\r'))
}

/// Parse label text into overlay shapes for an image of `width` x `height`.
///
/// The first bad token aborts the whole parse.
pub fn parse_labels(
    text: &str,
    width: u32,
    height: u32,
    colors: &ColorMap,
) -> Result<Vec<OverlayShape>, LabelError> {
    let mut shapes = Vec::new();
    for (i, line) in label_lines(text).enumerate() {
        if let Some(record) = AnnotationRecord::parse_line(line, i + 1)? {
            shapes.push(OverlayShape::from_record(&record, width, height, colors));
        }
    }
    Ok(shapes)
}

/// Read and parse a label file, propagating any error.
pub fn try_parse_label_file(
    path: &Path,
    width: u32,
    height: u32,
    colors: &ColorMap,
) -> Result<Vec<OverlayShape>, LabelError> {
    let text = std::fs::read_to_string(path)?;
    parse_labels(&text, width, height, colors)
}

/// Read and parse a label file, failing closed.
///
/// A missing file gives no shapes. A file that cannot be read or contains
/// a malformed token is logged and also gives no shapes, even if earlier
/// lines were valid.
pub fn parse_label_file(path: &Path, width: u32, height: u32, colors: &ColorMap) -> Vec<OverlayShape> {
    if !path.exists() {
        log::debug!("No label file at {}", path.display());
        return Vec::new();
    }

    match try_parse_label_file(path, width, height, colors) {
        Ok(shapes) => shapes,
        Err(e) => {
            log::error!("Error parsing label file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::Geometry;
    use crate::models::overlay::Shape;
    use crate::util::color::Palette;
    use std::fs;

    #[test]
    fn test_parse_line_variants() {
        assert_eq!(AnnotationRecord::parse_line("", 1).unwrap(), None);
        assert_eq!(AnnotationRecord::parse_line("   \t ", 1).unwrap(), None);
        assert_eq!(AnnotationRecord::parse_line("3", 1).unwrap(), None);
        assert_eq!(AnnotationRecord::parse_line("3 0.5 0.5", 1).unwrap(), None);

        let record = AnnotationRecord::parse_line("  7\t0.5 0.5  0.25 0.25 ", 1)
            .unwrap()
            .unwrap();
        assert_eq!(record.class_id, 7);
        assert_eq!(
            record.geometry,
            Geometry::BoundingBox { cx: 0.5, cy: 0.5, w: 0.25, h: 0.25 }
        );
    }

    #[test]
    fn test_parse_line_errors() {
        match AnnotationRecord::parse_line("car 0.5 0.5 0.1 0.1", 4) {
            Err(LabelError::InvalidClassId { line, token }) => {
                assert_eq!(line, 4);
                assert_eq!(token, "car");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            AnnotationRecord::parse_line("1.5 0.5 0.5 0.1 0.1", 1),
            Err(LabelError::InvalidClassId { .. })
        ));
        assert!(matches!(
            AnnotationRecord::parse_line("1 0.5 abc 0.1 0.1", 2),
            Err(LabelError::InvalidCoordinate { line: 2, .. })
        ));
    }

    #[test]
    fn test_box_line_scaled_to_pixels() {
        let palette = Palette::default();
        let shapes = parse_labels("2 0.5 0.5 0.2 0.4", 100, 200, &ColorMap::default()).unwrap();
        assert_eq!(shapes.len(), 1);
        match shapes[0].shape {
            Shape::Rect { x, y, width, height } => {
                assert!((width - 20.0).abs() < 1e-9);
                assert!((height - 80.0).abs() < 1e-9);
                assert!((x - 40.0).abs() < 1e-9);
                assert!((y - 60.0).abs() < 1e-9);
            }
            ref other => panic!("expected rect, got {:?}", other),
        }
        assert_eq!(shapes[0].style.fill, palette.wrapped(2));
    }

    #[test]
    fn test_polygon_line() {
        let colors = ColorMap::default();
        let shapes = parse_labels("0 0.1 0.1 0.2 0.1 0.2 0.2", 100, 100, &colors).unwrap();
        assert_eq!(shapes.len(), 1);
        let markup = shapes[0].to_svg();
        assert!(markup.starts_with(r#"<polygon points="10,10 20,10 20,20""#));
    }

    #[test]
    fn test_short_line_skipped_without_abort() {
        let text = "1 0.5 0.5\n\n0 0.5 0.5 0.1 0.1\n";
        let shapes = parse_labels(text, 10, 10, &ColorMap::default()).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].class_id, 0);
    }

    #[test]
    fn test_class_ids_wrap_around_palette() {
        let palette = Palette::default();
        let shapes = parse_labels("105 0.5 0.5 0.1 0.1", 10, 10, &ColorMap::default()).unwrap();
        assert_eq!(shapes[0].style.fill, palette.wrapped(5));
    }

    #[test]
    fn test_negative_class_id_wraps() {
        let palette = Palette::default();
        let text = "-1 0.5 0.5 0.1 0.1\n0 0.5 0.5 0.1 0.1\n";
        let shapes = parse_labels(text, 10, 10, &ColorMap::default()).unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].class_id, -1);
        assert_eq!(shapes[0].style.fill, palette.wrapped(99));
    }

    #[test]
    fn test_line_endings() {
        let colors = ColorMap::default();
        for text in [
            "0 0.5 0.5 0.1 0.1\n1 0.5 0.5 0.2 0.2\n",
            "0 0.5 0.5 0.1 0.1\r\n1 0.5 0.5 0.2 0.2\r\n",
            "0 0.5 0.5 0.1 0.1\r1 0.5 0.5 0.2 0.2\r",
        ] {
            let shapes = parse_labels(text, 10, 10, &colors).unwrap();
            assert_eq!(shapes.len(), 2, "{:?}", text);
            assert!(shapes.iter().all(|s| matches!(s.shape, Shape::Rect { .. })));
        }

        match parse_labels("0 0.5 0.5 0.1 0.1\rx 1 1 1 1\r", 10, 10, &colors) {
            Err(LabelError::InvalidClassId { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bad_line_discards_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "0 0.5 0.5 0.2 0.2\nperson 0.5 0.5 0.2 0.2\n").unwrap();

        let colors = ColorMap::default();
        assert!(try_parse_label_file(&path, 100, 100, &colors).is_err());
        assert!(parse_label_file(&path, 100, 100, &colors).is_empty());
    }

    #[test]
    fn test_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let colors = ColorMap::default();
        assert!(parse_label_file(&dir.path().join("none.txt"), 10, 10, &colors).is_empty());

        let empty = dir.path().join("empty.txt");
        fs::write(&empty, "").unwrap();
        assert!(parse_label_file(&empty, 10, 10, &colors).is_empty());
    }

    #[test]
    fn test_non_utf8_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x31]).unwrap();
        assert!(parse_label_file(&path, 10, 10, &ColorMap::default()).is_empty());
    }

    #[test]
    fn test_mixed_file_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.txt");
        fs::write(
            &path,
            "1 0.1 0.1 0.2 0.1 0.2 0.2\n0 0.5 0.5 0.1 0.1\n3 0.9 0.9\n",
        )
        .unwrap();

        let shapes = parse_label_file(&path, 50, 50, &ColorMap::default());
        assert_eq!(shapes.len(), 2);
        assert!(matches!(shapes[0].shape, Shape::Polygon { .. }));
        assert!(matches!(shapes[1].shape, Shape::Rect { .. }));
    }
}
