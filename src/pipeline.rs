// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end pipeline: notation text -> value -> process model -> graph -> layout.

use std::fmt;

use serde::Serialize;

use crate::extract::{extract, SchemaError};
use crate::format::edn::{parse, tokenize, SyntaxError};
use crate::graph::build_graph;
use crate::layout::{layout_graph, LayoutConfig, PositionedGraph};
use crate::model::ProcessModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    SyntaxError,
    SchemaError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SyntaxError => f.write_str("syntax"),
            Self::SchemaError => f.write_str("schema"),
        }
    }
}

/// A failed pipeline run. Either stage error is terminal; no partial graph exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax(_) => ErrorKind::SyntaxError,
            Self::Schema(_) => ErrorKind::SchemaError,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport { kind: self.kind(), message: self.to_string() }
    }
}

/// Serializable error for the rendering side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

/// Parses and extracts the process model from notation text.
pub fn read_process(text: &str) -> Result<ProcessModel, Error> {
    let tokens = tokenize(text);
    tracing::debug!(bytes = text.len(), tokens = tokens.len(), "tokenized document");
    let value = parse(tokens)?;
    Ok(extract(&value)?)
}

/// Runs the whole pipeline on one document.
pub fn visualize(text: &str, config: &LayoutConfig) -> Result<PositionedGraph, Error> {
    let model = read_process(text)?;
    Ok(layout_graph(&build_graph(&model), config))
}
