// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interactive labeling core: drawing surface, drag and selection tools,
//! and the session that ties them to the class registry.

pub mod draft;
pub mod select;
pub mod session;
pub mod surface;
