// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Process model types.
//!
//! A process is a set of states plus the transitions between them, with the
//! actor performing each transition and the actions it triggers.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod process;

pub use ids::{Id, IdError, StateId, TransitionId};
pub use process::{actor, FromStates, ProcessModel, ProcessModelBuilder, Transition};
