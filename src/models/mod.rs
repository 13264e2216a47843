// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for classes, boxes, the image frame and exported labels.

pub mod bbox;
pub mod class;
pub mod frame;
pub mod label;
