// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: label records, overlay shapes, the folder tree, the dataset
//! index and per-session display state.

pub mod annotation;
pub mod dataset;
pub mod overlay;
pub mod session;
pub mod tree;
