// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! EDN-style data notation: lexing, parsing and writing of generic values.

mod lexer;
mod parser;
mod value;
mod writer;

pub use lexer::{tokenize, Position, Token, TokenKind, UnexpectedReason};
pub use parser::{parse, Delimiter, SyntaxError, SyntaxErrorKind};
pub use value::{Number, QualifiedName, Value};
pub use writer::{write_value, WriteError};

/// Tokenizes and parses `text` into a single value.
pub fn read_value(text: &str) -> Result<Value, SyntaxError> {
    parse(tokenize(text))
}
