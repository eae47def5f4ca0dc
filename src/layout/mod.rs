// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout algorithms for process graphs.
//!
//! Nodes are layered top-to-bottom by breadth-first distance from the root states,
//! then spread horizontally around a shared axis.

pub mod layered;

pub use layered::{
    layout_graph, LayoutConfig, NodePlacement, Point, PositionedGraph, PositionedNode,
};
