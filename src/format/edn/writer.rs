// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Write as _;

use super::lexer::{classify_standalone, TokenKind};
use super::value::{Number, QualifiedName, Value};

/// A value the notation has no text for.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WriteError {
    #[error("float {value} has no literal form")]
    NonFiniteFloat { value: f64 },
    #[error("keyword name {name:?} would not read back as the same keyword")]
    UnwritableKeyword { name: String },
    #[error("symbol name {name:?} would not read back as the same symbol")]
    UnwritableSymbol { name: String },
}

/// Renders `value` as canonical notation text that [`super::read_value`] reads
/// back to a structurally-equal value.
///
/// Fails for values that have no such text: non-finite floats, and keywords
/// or symbols whose name would lex differently (`nil` as a symbol, a `/`
/// inside a name, whitespace, ...).
pub fn write_value(value: &Value) -> Result<String, WriteError> {
    let mut out = String::new();
    render(&mut out, value, true)?;
    Ok(out)
}

/// Same layout as [`write_value`], but unrepresentable names and floats are
/// written as-is instead of failing.
pub(super) fn write_lossy(value: &Value) -> String {
    let mut out = String::new();
    let _ = render(&mut out, value, false);
    out
}

enum Step<'a> {
    Value(&'a Value),
    Text(&'static str),
}

fn render(out: &mut String, value: &Value, strict: bool) -> Result<(), WriteError> {
    let mut steps = vec![Step::Value(value)];
    while let Some(step) = steps.pop() {
        let value = match step {
            Step::Text(text) => {
                out.push_str(text);
                continue;
            }
            Step::Value(value) => value,
        };
        match value {
            Value::Nil => out.push_str("nil"),
            Value::Bool(true) => out.push_str("true"),
            Value::Bool(false) => out.push_str("false"),
            Value::Number(Number::Int(value)) => {
                let mut buf = itoa::Buffer::new();
                out.push_str(buf.format(*value));
            }
            Value::Number(Number::Float(value)) => {
                if strict && !value.is_finite() {
                    return Err(WriteError::NonFiniteFloat { value: *value });
                }
                // `Debug` keeps a `.0` or an exponent, so the literal reads back as a float.
                let _ = write!(out, "{value:?}");
            }
            Value::Str(value) => write_string(out, value),
            Value::Keyword(name) => {
                let text = format!(":{name}");
                if strict && !reads_back(&text, name, true) {
                    return Err(WriteError::UnwritableKeyword { name: name.to_string() });
                }
                out.push_str(&text);
            }
            Value::Symbol(name) => {
                let text = name.to_string();
                if strict && !reads_back(&text, name, false) {
                    return Err(WriteError::UnwritableSymbol { name: text });
                }
                out.push_str(&text);
            }
            Value::List(items) => push_seq(out, &mut steps, "(", ")", items),
            Value::Vector(items) => push_seq(out, &mut steps, "[", "]", items),
            Value::Set(items) => push_seq(out, &mut steps, "#{", "}", items),
            Value::Map(entries) => {
                out.push('{');
                steps.push(Step::Text("}"));
                for (idx, (key, value)) in entries.iter().enumerate().rev() {
                    steps.push(Step::Value(value));
                    steps.push(Step::Text(" "));
                    steps.push(Step::Value(key));
                    if idx > 0 {
                        steps.push(Step::Text(", "));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Opens the collection now and schedules its items and closing delimiter.
fn push_seq<'a>(
    out: &mut String,
    steps: &mut Vec<Step<'a>>,
    open: &str,
    close: &'static str,
    items: &'a [Value],
) {
    out.push_str(open);
    steps.push(Step::Text(close));
    for (idx, item) in items.iter().enumerate().rev() {
        steps.push(Step::Value(item));
        if idx > 0 {
            steps.push(Step::Text(" "));
        }
    }
}

fn reads_back(text: &str, name: &QualifiedName, keyword: bool) -> bool {
    match classify_standalone(text) {
        Some(TokenKind::Keyword(read)) => keyword && read == *name,
        Some(TokenKind::Symbol(read)) => !keyword && read == *name,
        _ => false,
    }
}

fn write_string(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
