// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for images and label files.

pub mod export;
pub mod media;
pub mod persist;
pub mod serialization;
