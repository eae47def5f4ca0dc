// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Process extraction: turns a parsed document into a [`ProcessModel`].
//!
//! Two document shapes describe the same process concept:
//!
//! - modern (`:format :v3`): a flat `:transitions` vector; each transition
//!   carries its own `:name`, `:actor`, `:actions`, `:from` and `:to`, and entry
//!   transitions omit `:from`. Top-level `:notifications` attach to transitions
//!   through their `:on` key.
//! - legacy: `:process/id`, an explicit `:process/states` set and a
//!   `:process/transitions` vector whose `:from` may name several states.

mod keys;
mod legacy;
mod modern;

use crate::format::edn::Value;
use crate::model::{ProcessModel, ProcessModelBuilder, StateId, Transition, TransitionId};

use keys::{lookup, name_of, names_of, require, seq_of};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("document root must be a map, found {found}")]
    RootNotMap { found: &'static str },
    #[error(
        "unrecognized process document (expected `:format :v3`, or `:process/id`, `:process/states` and `:process/transitions`)"
    )]
    UnknownShape,
    #[error("unsupported process format {format:?} (expected v3)")]
    UnsupportedFormat { format: String },
    #[error("{context}: missing required key `{key}`")]
    MissingKey { context: String, key: &'static str },
    #[error("{context}: `{key}` must be {expected}, found {found}")]
    InvalidValue {
        context: String,
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("duplicate transition id `{id}`")]
    DuplicateTransition { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaShape {
    Modern,
    Legacy,
}

const MODERN_FORMAT: &str = "v3";
const LEGACY_KEYS: [&str; 3] = ["id", "states", "transitions"];

/// Determines which document shape `root` uses.
pub fn detect_shape(root: &Value) -> Result<SchemaShape, SchemaError> {
    let entries = root.as_map().ok_or(SchemaError::RootNotMap { found: root.type_name() })?;

    if let Some(format) = lookup(entries, "format") {
        return match keys::local_name(format) {
            Some(MODERN_FORMAT) => Ok(SchemaShape::Modern),
            _ => Err(SchemaError::UnsupportedFormat { format: format.to_string() }),
        };
    }

    if LEGACY_KEYS.iter().any(|key| lookup(entries, key).is_some()) {
        if let Some(key) = LEGACY_KEYS.into_iter().find(|key| lookup(entries, key).is_none()) {
            return Err(SchemaError::MissingKey { context: "process".to_owned(), key });
        }
        return Ok(SchemaShape::Legacy);
    }

    Err(SchemaError::UnknownShape)
}

/// Extracts the canonical process model from a parsed document.
///
/// Fails on the first problem found; there is no partial model.
pub fn extract(root: &Value) -> Result<ProcessModel, SchemaError> {
    let shape = detect_shape(root)?;
    let entries = root.as_map().ok_or(SchemaError::RootNotMap { found: root.type_name() })?;

    let model = match shape {
        SchemaShape::Modern => modern::extract(entries)?,
        SchemaShape::Legacy => legacy::extract(entries)?,
    };

    tracing::debug!(
        ?shape,
        states = model.states().len(),
        transitions = model.transitions().len(),
        "extracted process model"
    );
    Ok(model)
}

fn transition_context(index: usize, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("transition `{name}`"),
        None => format!("transition #{}", index + 1),
    }
}

/// Reads one transition map. Keys are matched by bare name, so `:to` and
/// `:transition/to` are equivalent.
fn read_transition(
    value: &Value,
    index: usize,
    id_keys: &[&'static str],
) -> Result<Transition, SchemaError> {
    let context = transition_context(index, None);
    let entries = value
        .as_map()
        .ok_or_else(|| keys::invalid(&context, "transitions", "a vector of maps", value))?;

    let mut id = None;
    for &key in id_keys {
        if let Some(raw) = lookup(entries, key) {
            id = Some(name_of(raw, &context, key)?);
            break;
        }
    }
    let context = transition_context(index, id);
    let id = match id {
        Some(id) => transition_id(id, &context)?,
        None => transition_id(&format!("transition-{}", index + 1), &context)?,
    };

    let to = name_of(require(entries, &context, "to")?, &context, "to")?;
    let mut transition = Transition::new(id, state_id(to, &context, "to")?);

    if let Some(from) = lookup(entries, "from") {
        for name in names_of(from, &context, "from")? {
            transition.add_from(state_id(name, &context, "from")?);
        }
    }

    if let Some(actor) = lookup(entries, "actor") {
        transition.set_actor(name_of(actor, &context, "actor")?);
    }

    if let Some(actions) = lookup(entries, "actions") {
        let actions = seq_of(actions, &context, "actions")?
            .iter()
            .map(|action| action_name(action, &context).map(str::to_owned))
            .collect::<Result<Vec<_>, _>>()?;
        transition.set_actions(actions);
    }

    if let Some(notifications) = lookup(entries, "notifications") {
        let notifications = seq_of(notifications, &context, "notifications")?
            .iter()
            .map(|n| name_of(n, &context, "notifications").map(str::to_owned))
            .collect::<Result<Vec<_>, _>>()?;
        transition.set_notifications(notifications);
    }

    Ok(transition)
}

/// An action is a bare name or a map carrying `:name` (plus configuration we ignore).
fn action_name<'a>(action: &'a Value, context: &str) -> Result<&'a str, SchemaError> {
    match action.as_map() {
        Some(entries) => name_of(require(entries, context, "name")?, context, "name"),
        None => name_of(action, context, "actions"),
    }
}

fn state_id(name: &str, context: &str, key: &'static str) -> Result<StateId, SchemaError> {
    StateId::new(name)
        .map_err(|_| keys::invalid(context, key, "a non-empty name", &Value::string(name)))
}

fn transition_id(name: &str, context: &str) -> Result<TransitionId, SchemaError> {
    TransitionId::new(name)
        .map_err(|_| keys::invalid(context, "name", "a non-empty name", &Value::string(name)))
}

fn push_transition(
    builder: &mut ProcessModelBuilder,
    transition: Transition,
) -> Result<(), SchemaError> {
    builder
        .push_transition(transition)
        .map_err(|rejected| SchemaError::DuplicateTransition { id: rejected.id().to_string() })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{detect_shape, extract, SchemaError, SchemaShape};
    use crate::format::edn::read_value;

    fn shape_of(text: &str) -> Result<SchemaShape, SchemaError> {
        detect_shape(&read_value(text).expect("parse"))
    }

    #[rstest]
    #[case("{:format :v3 :transitions []}", Ok(SchemaShape::Modern))]
    #[case("{:format \"v3\" :transitions []}", Ok(SchemaShape::Modern))]
    #[case(
        "{:process/id :p :process/states #{} :process/transitions []}",
        Ok(SchemaShape::Legacy)
    )]
    #[case("{:format :v2}", Err(SchemaError::UnsupportedFormat { format: ":v2".to_owned() }))]
    #[case(
        "{:process/id :p :process/transitions []}",
        Err(SchemaError::MissingKey { context: "process".to_owned(), key: "states" })
    )]
    #[case("{:name \"nothing\"}", Err(SchemaError::UnknownShape))]
    #[case("[:format :v3]", Err(SchemaError::RootNotMap { found: "vector" }))]
    fn detects_document_shape(
        #[case] text: &str,
        #[case] expected: Result<SchemaShape, SchemaError>,
    ) {
        assert_eq!(shape_of(text), expected);
    }

    #[test]
    fn transition_without_destination_fails_fast() {
        let root = read_value(
            "{:format :v3 :transitions [{:name :transition/a :to :state/x}
                                        {:name :transition/b :from :state/x}]}",
        )
        .expect("parse");
        assert_eq!(
            extract(&root),
            Err(SchemaError::MissingKey { context: "transition `b`".to_owned(), key: "to" })
        );
    }

    #[test]
    fn malformed_fields_name_the_key() {
        let root = read_value("{:format :v3 :transitions [{:name :t :to :s :actions :oops}]}")
            .expect("parse");
        let err = extract(&root).expect_err("schema error");
        assert_eq!(
            err.to_string(),
            "transition `t`: `actions` must be a vector, list or set, found keyword"
        );
    }

    #[test]
    fn duplicate_transition_ids_are_rejected() {
        let root = read_value(
            "{:format :v3 :transitions [{:name :transition/a :to :state/x}
                                        {:name :transition/a :to :state/y}]}",
        )
        .expect("parse");
        assert_eq!(extract(&root), Err(SchemaError::DuplicateTransition { id: "a".to_owned() }));
    }
}
