// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Class-definition and color-map YAML files.
//!
//! Both files are optional. The `load_*` functions never fail: a missing or
//! malformed file is logged and treated as absent.

use crate::models::annotation::ClassId;
use crate::models::dataset::ClassNames;
use crate::util::color::Rgb;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ClassInfoFile {
    #[serde(default)]
    names: Option<NamesField>,
}

/// `names` is either `{0: car, 1: wheel}` or `[car, wheel]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NamesField {
    Map(BTreeMap<ClassId, Value>),
    List(Vec<Value>),
}

impl NamesField {
    fn into_names(self) -> ClassNames {
        let entries: Vec<(ClassId, Value)> = match self {
            NamesField::Map(map) => map.into_iter().collect(),
            NamesField::List(list) => (0..).zip(list).collect(),
        };
        entries
            .into_iter()
            .filter_map(|(class_id, value)| match scalar_name(&value) {
                Some(name) => Some((class_id, name)),
                None => {
                    log::warn!("Skipping class {}: name is not a scalar", class_id);
                    None
                }
            })
            .collect()
    }
}

/// Text of a scalar YAML value; names like `2020` or `true` are kept as written.
fn scalar_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read the `names` key of a class-definitions file.
pub fn read_class_names(path: &Path) -> Result<ClassNames> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file: ClassInfoFile = serde_yaml::from_str(&yaml)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(file.names.map(NamesField::into_names).unwrap_or_default())
}

/// Class names from `path`, or an empty map if it is missing or malformed.
pub fn load_class_names(path: &Path) -> ClassNames {
    if !path.exists() {
        log::info!("No class info at {}", path.display());
        return ClassNames::new();
    }
    match read_class_names(path) {
        Ok(names) => {
            log::info!("Loaded {} class names from {}", names.len(), path.display());
            names
        }
        Err(e) => {
            log::warn!("Ignoring class info: {:#}", e);
            ClassNames::new()
        }
    }
}

/// Read a `{class_id: "rgb(r,g,b)"}` color map. Entries that are not a
/// parseable color string are skipped.
pub fn read_color_overrides(path: &Path) -> Result<BTreeMap<ClassId, Rgb>> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let raw: BTreeMap<ClassId, Value> = serde_yaml::from_str(&yaml)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let mut colors = BTreeMap::new();
    for (class_id, value) in raw {
        let Some(text) = value.as_str() else {
            log::warn!("Class {} in {}: color is not a string", class_id, path.display());
            continue;
        };
        match text.parse::<Rgb>() {
            Ok(color) => {
                colors.insert(class_id, color);
            }
            Err(e) => log::warn!("Class {} in {}: {}", class_id, path.display(), e),
        }
    }
    Ok(colors)
}

/// Color overrides from `path`, or `None` if it is missing or malformed.
pub fn load_color_overrides(path: &Path) -> Option<BTreeMap<ClassId, Rgb>> {
    if !path.exists() {
        log::info!("No color map at {}, using generated palette", path.display());
        return None;
    }
    match read_color_overrides(path) {
        Ok(colors) => {
            log::info!("Loaded {} class colors from {}", colors.len(), path.display());
            Some(colors)
        }
        Err(e) => {
            log::warn!("Ignoring color map: {:#}", e);
            None
        }
    }
}
