// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: directory scans, label and class files, images and exports.

pub mod class_info;
pub mod labels;
pub mod media;
pub mod scan;
pub mod serialization;
