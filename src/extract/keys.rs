// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Key lookup and name normalization shared by both schema shapes.
//!
//! Namespaces such as `state/`, `action/` or `actor.role/` only tag the schema
//! role of a name; lookups and extracted names use the bare name.

use crate::format::edn::Value;

use super::SchemaError;

/// Bare name of a keyword or symbol, or a string verbatim.
pub(super) fn local_name(value: &Value) -> Option<&str> {
    match value {
        Value::Keyword(name) | Value::Symbol(name) => Some(name.name()),
        Value::Str(value) => Some(value),
        _ => None,
    }
}

/// Finds the entry whose key has the bare name `name`, whatever its namespace.
/// A `nil` value counts as absent.
pub(super) fn lookup<'a>(entries: &'a [(Value, Value)], name: &str) -> Option<&'a Value> {
    entries
        .iter()
        .find(|(key, _)| local_name(key) == Some(name))
        .map(|(_, value)| value)
        .filter(|value| !value.is_nil())
}

pub(super) fn require<'a>(
    entries: &'a [(Value, Value)],
    context: &str,
    key: &'static str,
) -> Result<&'a Value, SchemaError> {
    lookup(entries, key)
        .ok_or_else(|| SchemaError::MissingKey { context: context.to_owned(), key })
}

pub(super) fn name_of<'a>(
    value: &'a Value,
    context: &str,
    key: &'static str,
) -> Result<&'a str, SchemaError> {
    match local_name(value) {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(invalid(context, key, "a keyword, symbol or non-empty string", value)),
    }
}

/// Reads a single name or a list/vector/set of names.
pub(super) fn names_of<'a>(
    value: &'a Value,
    context: &str,
    key: &'static str,
) -> Result<Vec<&'a str>, SchemaError> {
    match value.as_seq() {
        Some(items) => items.iter().map(|item| name_of(item, context, key)).collect(),
        None => Ok(vec![name_of(value, context, key)?]),
    }
}

pub(super) fn seq_of<'a>(
    value: &'a Value,
    context: &str,
    key: &'static str,
) -> Result<&'a [Value], SchemaError> {
    value.as_seq().ok_or_else(|| invalid(context, key, "a vector, list or set", value))
}

pub(super) fn invalid(
    context: &str,
    key: &'static str,
    expected: &'static str,
    found: &Value,
) -> SchemaError {
    SchemaError::InvalidValue {
        context: context.to_owned(),
        key,
        expected,
        found: found.type_name(),
    }
}
