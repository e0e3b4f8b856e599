// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Class colors.
//!
//! This module provides the deterministic class palette, the `Rgb` value
//! type with its `rgb(r,g,b)` text form, and the `ColorMap` that layers a
//! YAML override on top of the palette for shapes and the legend.

use crate::models::annotation::ClassId;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of colors generated for the default palette.
pub const PALETTE_SIZE: usize = 100;

/// Hue rotation between consecutive class IDs, in degrees.
pub const HUE_STEP_DEGREES: f64 = 137.5;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error returned when a string is not of the form `rgb(r,g,b)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected a color of the form rgb(r,g,b), got {0:?}")]
pub struct ParseRgbError(String);

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbError(s.to_string());
        let inner = s
            .trim()
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;

        let channels = inner
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| err())?;

        match channels.as_slice() {
            [r, g, b] => Ok(Rgb::new(*r, *g, *b)),
            _ => Err(err()),
        }
    }
}

/// Convert HSV (all components in 0.0..=1.0) to RGB components in 0.0..=1.0.
///
/// Sector-based conversion: the hue circle is split into six sectors and
/// the fractional position inside a sector drives the rising/falling channel.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Color for a single palette index.
///
/// Channels are truncated, not rounded, when scaled to 0..=255.
pub fn palette_color(index: usize) -> Rgb {
    let hue = (index as f64 * HUE_STEP_DEGREES) % 360.0 / 360.0;
    let (r, g, b) = hsv_to_rgb(hue, 1.0, 1.0);
    Rgb::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

/// Deterministic list of visually distinct class colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::generate(PALETTE_SIZE)
    }
}

impl Palette {
    /// Generate `count` colors by rotating the hue a fixed step per index.
    pub fn generate(count: usize) -> Self {
        Self {
            colors: (0..count).map(palette_color).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Color for a class ID; IDs past either end wrap around.
    pub fn wrapped(&self, class_id: ClassId) -> Rgb {
        if self.colors.is_empty() {
            return Rgb::WHITE;
        }
        let index = class_id.rem_euclid(self.colors.len() as ClassId);
        self.colors[index as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rgb> {
        self.colors.iter()
    }
}

/// Class colors, optionally overridden from a YAML color map.
///
/// Drawing (shapes and legend) uses [`ColorMap::class_color`]: the override
/// entry for a class if there is one, else the wrapped palette. String
/// lookups via [`ColorMap::color_string`] read the override map when one is
/// loaded, otherwise the palette table, and default to white.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    palette: Palette,
    overrides: Option<BTreeMap<ClassId, Rgb>>,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::from_palette(&Palette::default())
    }
}

impl ColorMap {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            palette: palette.clone(),
            overrides: None,
        }
    }

    pub fn from_overrides(palette: &Palette, overrides: BTreeMap<ClassId, Rgb>) -> Self {
        Self {
            palette: palette.clone(),
            overrides: Some(overrides),
        }
    }

    pub fn is_override(&self) -> bool {
        self.overrides.is_some()
    }

    /// Color a class is drawn with.
    pub fn class_color(&self, class_id: ClassId) -> Rgb {
        self.overrides
            .as_ref()
            .and_then(|colors| colors.get(&class_id).copied())
            .unwrap_or_else(|| self.palette.wrapped(class_id))
    }

    /// Table lookup without wrap-around; unmapped IDs are white.
    pub fn color(&self, class_id: ClassId) -> Rgb {
        let mapped = match &self.overrides {
            Some(colors) => colors.get(&class_id).copied(),
            None => usize::try_from(class_id)
                .ok()
                .and_then(|index| self.palette.get(index)),
        };
        mapped.unwrap_or(Rgb::WHITE)
    }

    pub fn color_string(&self, class_id: ClassId) -> String {
        self.color(class_id).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_to_rgb_primaries() {
        let (r, g, b) = hsv_to_rgb(0.0, 1.0, 1.0);
        assert_eq!((r, g, b), (1.0, 0.0, 0.0));

        let (r, g, b) = hsv_to_rgb(1.0 / 3.0, 1.0, 1.0);
        assert!(r.abs() < 1e-9);
        assert!((g - 1.0).abs() < 1e-9);
        assert!(b.abs() < 1e-9);

        let (r, g, b) = hsv_to_rgb(2.0 / 3.0, 1.0, 1.0);
        assert!(r.abs() < 1e-9);
        assert!(g.abs() < 1e-9);
        assert!((b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_palette_known_values() {
        let palette = Palette::default();
        assert_eq!(palette.len(), PALETTE_SIZE);
        assert_eq!(palette.get(0), Some(Rgb::new(255, 0, 0)));
        // 137.5° lands in the green/cyan sector, 275° in blue/magenta.
        assert_eq!(palette.get(1), Some(Rgb::new(0, 255, 74)));
        assert_eq!(palette.get(2), Some(Rgb::new(148, 0, 255)));
    }

    #[test]
    fn test_palette_neighbours_differ() {
        let palette = Palette::default();
        let colors: Vec<Rgb> = palette.iter().copied().collect();
        for pair in colors.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_palette_wraps_large_ids() {
        let palette = Palette::default();
        assert_eq!(palette.wrapped(102), palette.wrapped(2));
        assert_eq!(palette.wrapped(100), palette.wrapped(0));
        assert_eq!(palette.wrapped(-1), palette.wrapped(99));
        assert_eq!(Palette::generate(0).wrapped(5), Rgb::WHITE);
    }

    #[test]
    fn test_rgb_display_and_parse() {
        let color = Rgb::new(12, 0, 255);
        assert_eq!(color.to_string(), "rgb(12,0,255)");
        assert_eq!("rgb(12,0,255)".parse::<Rgb>(), Ok(color));
        assert_eq!(" rgb( 12 , 0 , 255 ) ".parse::<Rgb>(), Ok(color));
        assert!("rgb(256,0,0)".parse::<Rgb>().is_err());
        assert!("rgb(1,2)".parse::<Rgb>().is_err());
        assert!("#ff0000".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_color_map_override_defaults_to_white() {
        let mut overrides = BTreeMap::new();
        overrides.insert(3, Rgb::new(1, 2, 3));
        let map = ColorMap::from_overrides(&Palette::default(), overrides);

        assert!(map.is_override());
        assert_eq!(map.color_string(3), "rgb(1,2,3)");
        assert_eq!(map.color_string(0), "rgb(255,255,255)");
        assert_eq!(map.color_string(4), "rgb(255,255,255)");
    }

    #[test]
    fn test_class_color_prefers_override_then_palette() {
        let palette = Palette::default();
        let mut overrides = BTreeMap::new();
        overrides.insert(0, Rgb::new(0, 0, 255));
        let map = ColorMap::from_overrides(&palette, overrides);

        assert_eq!(map.class_color(0), Rgb::new(0, 0, 255));
        assert_eq!(map.class_color(1), palette.wrapped(1));
        assert_eq!(map.class_color(101), palette.wrapped(1));

        let plain = ColorMap::default();
        assert_eq!(plain.class_color(150), palette.wrapped(50));
        assert_eq!(plain.class_color(-1), palette.wrapped(99));
    }

    #[test]
    fn test_color_map_from_palette() {
        let palette = Palette::default();
        let map = ColorMap::from_palette(&palette);
        assert!(!map.is_override());
        assert_eq!(map.color(2), palette.wrapped(2));
        // No wrap-around for string lookups.
        assert_eq!(map.color(150), Rgb::WHITE);
        assert_eq!(map.color(-1), Rgb::WHITE);
    }
}
