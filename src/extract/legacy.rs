// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::format::edn::Value;
use crate::model::{ProcessModel, ProcessModelBuilder};

use super::keys::{name_of, names_of, require, seq_of};
use super::{push_transition, read_transition, state_id, SchemaError};

const PROCESS: &str = "process";

pub(super) fn extract(entries: &[(Value, Value)]) -> Result<ProcessModel, SchemaError> {
    let mut builder = ProcessModelBuilder::new();
    builder.set_process_id(Some(name_of(require(entries, PROCESS, "id")?, PROCESS, "id")?));

    // Declared states come first; transitions may still add states missing here.
    for name in names_of(require(entries, PROCESS, "states")?, PROCESS, "states")? {
        builder.declare_state(state_id(name, PROCESS, "states")?);
    }

    let transitions = seq_of(require(entries, PROCESS, "transitions")?, PROCESS, "transitions")?;
    for (index, value) in transitions.iter().enumerate() {
        push_transition(&mut builder, read_transition(value, index, &["id", "name"])?)?;
    }

    Ok(builder.build())
}
