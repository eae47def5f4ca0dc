// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::format::edn::Value;
use crate::model::{ProcessModel, ProcessModelBuilder};

use super::keys::{invalid, lookup, name_of, require, seq_of};
use super::{push_transition, read_transition, SchemaError};

const PROCESS: &str = "process";

pub(super) fn extract(entries: &[(Value, Value)]) -> Result<ProcessModel, SchemaError> {
    let mut builder = ProcessModelBuilder::new();
    if let Some(id) = lookup(entries, "id") {
        builder.set_process_id(Some(name_of(id, PROCESS, "id")?));
    }

    let transitions = seq_of(require(entries, PROCESS, "transitions")?, PROCESS, "transitions")?;
    for (index, value) in transitions.iter().enumerate() {
        push_transition(&mut builder, read_transition(value, index, &["name", "id"])?)?;
    }

    if let Some(notifications) = lookup(entries, "notifications") {
        for notification in seq_of(notifications, PROCESS, "notifications")? {
            attach_notification(&mut builder, notification)?;
        }
    }

    Ok(builder.build())
}

/// Top-level notifications name the transition they fire on via `:on`.
fn attach_notification(
    builder: &mut ProcessModelBuilder,
    value: &Value,
) -> Result<(), SchemaError> {
    let entries = value
        .as_map()
        .ok_or_else(|| invalid(PROCESS, "notifications", "a vector of maps", value))?;
    let name = name_of(require(entries, "notification", "name")?, "notification", "name")?;
    let context = format!("notification `{name}`");
    let on = name_of(require(entries, &context, "on")?, &context, "on")?;

    match builder.transition_mut(on) {
        Some(transition) => transition.push_notification(name),
        None => tracing::debug!(
            notification = name,
            transition = on,
            "notification fires on an unknown transition; ignored"
        ),
    }
    Ok(())
}
