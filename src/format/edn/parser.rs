// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::lexer::{Position, Token, TokenKind, UnexpectedReason};
use super::value::{Number, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Brace,
    Bracket,
    Paren,
    Set,
}

impl Delimiter {
    pub fn opening(self) -> &'static str {
        match self {
            Self::Brace => "{",
            Self::Bracket => "[",
            Self::Paren => "(",
            Self::Set => "#{",
        }
    }

    pub fn closing(self) -> char {
        match self {
            Self::Brace | Self::Set => '}',
            Self::Bracket => ']',
            Self::Paren => ')',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opening())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("document is empty")]
    EmptyDocument,
    #[error("unexpected character {text:?}")]
    UnexpectedChar { text: String },
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid escape sequence in string {text}")]
    InvalidEscape { text: String },
    #[error("invalid number literal {text:?}")]
    InvalidNumber { text: String },
    #[error("invalid keyword or symbol {text:?}")]
    InvalidSymbol { text: String },
    #[error("missing '{}' to close '{open}'", .open.closing())]
    UnclosedDelimiter { open: Delimiter },
    #[error("expected '{}' to close '{open}', found '{found}'", .open.closing())]
    MismatchedDelimiter { open: Delimiter, found: char },
    #[error("unexpected '{found}' without a matching opening delimiter")]
    UnexpectedClose { found: char },
    #[error("map literal has an odd number of forms")]
    OddMapEntries,
    #[error("unexpected input after the top-level form")]
    TrailingInput,
}

/// Malformed notation, with the position of the offending token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", .position.line, .position.column)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub position: Position,
}

impl SyntaxError {
    fn new(kind: SyntaxErrorKind, position: Position) -> Self {
        Self { kind, position }
    }
}

struct Frame {
    delimiter: Delimiter,
    position: Position,
    items: Vec<Value>,
}

impl Frame {
    fn new(delimiter: Delimiter, position: Position) -> Self {
        Self { delimiter, position, items: Vec::new() }
    }

    fn finish(self) -> Result<Value, SyntaxError> {
        match self.delimiter {
            Delimiter::Paren => Ok(Value::List(self.items)),
            Delimiter::Bracket => Ok(Value::Vector(self.items)),
            Delimiter::Set => Ok(Value::Set(dedup_set(self.items))),
            Delimiter::Brace => {
                if self.items.len() % 2 != 0 {
                    return Err(SyntaxError::new(SyntaxErrorKind::OddMapEntries, self.position));
                }
                Ok(Value::Map(build_map(self.items)))
            }
        }
    }
}

/// Later structurally-equal members are dropped; first-seen order is kept.
fn dedup_set(items: Vec<Value>) -> Vec<Value> {
    let mut members = Vec::<Value>::with_capacity(items.len());
    for item in items {
        if !members.contains(&item) {
            members.push(item);
        }
    }
    members
}

/// Pairs consecutive forms; a repeated key keeps its first slot but takes the last value.
fn build_map(items: Vec<Value>) -> Vec<(Value, Value)> {
    let mut entries = Vec::<(Value, Value)>::with_capacity(items.len() / 2);
    let mut forms = items.into_iter();
    while let (Some(key), Some(value)) = (forms.next(), forms.next()) {
        match entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }
    entries
}

fn unexpected(text: String, reason: UnexpectedReason) -> SyntaxErrorKind {
    match reason {
        UnexpectedReason::Char => SyntaxErrorKind::UnexpectedChar { text },
        UnexpectedReason::UnterminatedString => SyntaxErrorKind::UnterminatedString,
        UnexpectedReason::InvalidEscape => SyntaxErrorKind::InvalidEscape { text },
        UnexpectedReason::InvalidNumber => SyntaxErrorKind::InvalidNumber { text },
        UnexpectedReason::InvalidSymbol => SyntaxErrorKind::InvalidSymbol { text },
    }
}

fn close(stack: &mut Vec<Frame>, found: char, position: Position) -> Result<Value, SyntaxError> {
    let Some(frame) = stack.pop() else {
        return Err(SyntaxError::new(SyntaxErrorKind::UnexpectedClose { found }, position));
    };
    if frame.delimiter.closing() != found {
        return Err(SyntaxError::new(
            SyntaxErrorKind::MismatchedDelimiter { open: frame.delimiter, found },
            position,
        ));
    }
    frame.finish()
}

/// Parses exactly one top-level form from `tokens`.
///
/// Collections are built on an explicit frame stack, so nesting depth is
/// bounded by memory rather than by the native call stack.
pub fn parse(tokens: Vec<Token>) -> Result<Value, SyntaxError> {
    let mut stack = Vec::<Frame>::new();
    let mut root: Option<Value> = None;

    for Token { kind, position } in tokens {
        if stack.is_empty() && root.is_some() {
            return Err(SyntaxError::new(SyntaxErrorKind::TrailingInput, position));
        }

        let value = match kind {
            TokenKind::OpenBrace => {
                stack.push(Frame::new(Delimiter::Brace, position));
                continue;
            }
            TokenKind::OpenBracket => {
                stack.push(Frame::new(Delimiter::Bracket, position));
                continue;
            }
            TokenKind::OpenParen => {
                stack.push(Frame::new(Delimiter::Paren, position));
                continue;
            }
            TokenKind::OpenSet => {
                stack.push(Frame::new(Delimiter::Set, position));
                continue;
            }
            TokenKind::CloseBrace => close(&mut stack, '}', position)?,
            TokenKind::CloseBracket => close(&mut stack, ']', position)?,
            TokenKind::CloseParen => close(&mut stack, ')', position)?,
            TokenKind::Nil => Value::Nil,
            TokenKind::Bool(value) => Value::Bool(value),
            TokenKind::Int(value) => Value::Number(Number::Int(value)),
            TokenKind::Float(value) => Value::Number(Number::Float(value)),
            TokenKind::Str(value) => Value::Str(value),
            TokenKind::Keyword(name) => Value::Keyword(name),
            TokenKind::Symbol(name) => Value::Symbol(name),
            TokenKind::Unexpected { text, reason } => {
                return Err(SyntaxError::new(unexpected(text, reason), position));
            }
        };

        match stack.last_mut() {
            Some(frame) => frame.items.push(value),
            None => root = Some(value),
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(SyntaxError::new(
            SyntaxErrorKind::UnclosedDelimiter { open: frame.delimiter },
            frame.position,
        ));
    }

    root.ok_or_else(|| SyntaxError::new(SyntaxErrorKind::EmptyDocument, Position::start()))
}
