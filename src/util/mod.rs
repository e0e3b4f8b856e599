// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shared helpers: class colors and coordinate geometry.

pub mod color;
pub mod geometry;
