// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! procviz: process documents to positioned state graphs.
//!
//! The pipeline is a chain of pure stages:
//! text -> tokens -> value ([`format::edn`]) -> process model ([`extract`])
//! -> abstract graph ([`graph`]) -> positioned graph ([`layout`]).
//! [`pipeline::visualize`] runs all of them.

pub mod extract;
pub mod format;
pub mod graph;
pub mod layout;
pub mod model;
pub mod pipeline;

pub use layout::{LayoutConfig, PositionedGraph};
pub use pipeline::{visualize, Error, ErrorKind};
