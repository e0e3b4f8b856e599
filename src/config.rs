// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Startup configuration.
//!
//! Options come from command-line flags, then `LABELSCOPE_*` environment
//! variables, then built-in defaults. They are resolved once into a
//! `ViewerConfig` which is handed to the browser; optional files are
//! checked for existence here and never again.

use crate::io::class_info;
use crate::models::annotation::ClassId;
use crate::util::color::{ColorMap, Palette, Rgb};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// No host/port options: the viewer draws into a native window.
/// Browse YOLO-labelled image datasets with box and mask overlays.
#[derive(Debug, Clone, Parser)]
#[command(name = "labelscope", version, about)]
pub struct Cli {
    /// Base directory for input images; may contain subdirectories.
    #[arg(long, env = "LABELSCOPE_IMAGE_BASE_PATH", default_value = "example_data/images")]
    pub image_base_path: PathBuf,

    /// Base directory for YOLO label files, mirroring the image directory.
    #[arg(long, env = "LABELSCOPE_LABEL_BASE_PATH", default_value = "example_data/labels")]
    pub label_base_path: PathBuf,

    /// YAML file whose `names` key maps class IDs to names. Ignored if missing.
    #[arg(long, env = "LABELSCOPE_CLASS_INFO", default_value = "example_data/carparts-seg.yaml")]
    pub class_info: PathBuf,

    /// YAML file mapping class IDs to `rgb(r,g,b)` colors. Ignored if missing.
    #[arg(long, env = "LABELSCOPE_COLOR_MAP", default_value = "example_data/color_map.yaml")]
    pub color_map: PathBuf,
}

/// Resolved configuration, read-only after startup.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub image_base_path: PathBuf,
    pub label_base_path: PathBuf,
    /// Present only if the file existed at startup.
    pub class_info: Option<PathBuf>,
    /// Loaded color overrides, if a valid color map was found.
    pub color_overrides: Option<BTreeMap<ClassId, Rgb>>,
}

impl ViewerConfig {
    /// Configuration with no class info and no color overrides.
    pub fn new(image_base_path: &Path, label_base_path: &Path) -> Self {
        Self {
            image_base_path: absolute(image_base_path),
            label_base_path: absolute(label_base_path),
            class_info: None,
            color_overrides: None,
        }
    }

    /// Resolve parsed options, loading the optional color map.
    pub fn resolve(cli: &Cli) -> Self {
        let class_info = cli.class_info.exists().then(|| absolute(&cli.class_info));
        let color_overrides = class_info::load_color_overrides(&cli.color_map);

        Self {
            class_info,
            color_overrides,
            ..Self::new(&cli.image_base_path, &cli.label_base_path)
        }
    }

    /// Class colors: `palette`, with the loaded overrides on top.
    pub fn color_map(&self, palette: &Palette) -> ColorMap {
        match &self.color_overrides {
            Some(colors) => ColorMap::from_overrides(palette, colors.clone()),
            None => ColorMap::from_palette(palette),
        }
    }
}

/// Absolute, symlink-free form of `path` when it exists; otherwise joined
/// onto the working directory.
fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    })
}
