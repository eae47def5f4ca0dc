// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use memchr::memchr;

use super::value::QualifiedName;

/// Location of a token in the source text. `line` and `column` are 1-based;
/// `offset` is a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Self { offset: 0, line: 1, column: 1 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnexpectedReason {
    Char,
    UnterminatedString,
    InvalidEscape,
    InvalidNumber,
    InvalidSymbol,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    /// `#{`
    OpenSet,
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Keyword(QualifiedName),
    Symbol(QualifiedName),
    /// Malformed input; reported by the parser when it reaches this token.
    Unexpected { text: String, reason: UnexpectedReason },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

/// Splits `text` into tokens, dropping whitespace, commas and `;` comments.
///
/// Never fails: malformed sequences become [`TokenKind::Unexpected`].
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut lexer = Lexer { src: text, offset: 0, line: 1, column: 1 };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        tokens.push(token);
    }
    tokens
}

struct Lexer<'a> {
    src: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn position(&self) -> Position {
        Position { offset: self.offset, line: self.line, column: self.column }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.offset..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.offset..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_comment(&mut self) {
        let rest = &self.src.as_bytes()[self.offset..];
        match memchr(b'\n', rest) {
            // The newline itself is consumed as whitespace.
            Some(idx) => {
                self.column += self.src[self.offset..self.offset + idx].chars().count();
                self.offset += idx;
            }
            None => {
                self.column += self.src[self.offset..].chars().count();
                self.offset = self.src.len();
            }
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        loop {
            let ch = self.peek()?;
            if ch.is_whitespace() || ch == ',' {
                self.bump();
            } else if ch == ';' {
                self.skip_comment();
            } else {
                break;
            }
        }

        let position = self.position();
        let ch = self.peek()?;
        let kind = match ch {
            '{' => self.single(TokenKind::OpenBrace),
            '}' => self.single(TokenKind::CloseBrace),
            '[' => self.single(TokenKind::OpenBracket),
            ']' => self.single(TokenKind::CloseBracket),
            '(' => self.single(TokenKind::OpenParen),
            ')' => self.single(TokenKind::CloseParen),
            '#' if self.peek_second() == Some('{') => {
                self.bump();
                self.bump();
                TokenKind::OpenSet
            }
            '"' => self.string(),
            _ if is_bare_start(ch) => self.bare(),
            _ => {
                self.bump();
                TokenKind::Unexpected { text: ch.to_string(), reason: UnexpectedReason::Char }
            }
        };
        Some(Token { kind, position })
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    fn string(&mut self) -> TokenKind {
        let start = self.offset;
        self.bump();
        let mut value = String::new();
        let mut invalid_escape = false;
        loop {
            let Some(ch) = self.bump() else {
                return TokenKind::Unexpected {
                    text: self.src[start..].to_owned(),
                    reason: UnexpectedReason::UnterminatedString,
                };
            };
            match ch {
                '"' => break,
                '\\' => match self.escape() {
                    Some(decoded) => value.push(decoded),
                    None => invalid_escape = true,
                },
                _ => value.push(ch),
            }
        }
        if invalid_escape {
            return TokenKind::Unexpected {
                text: self.src[start..self.offset].to_owned(),
                reason: UnexpectedReason::InvalidEscape,
            };
        }
        TokenKind::Str(value)
    }

    fn escape(&mut self) -> Option<char> {
        let decoded = match self.peek()? {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'u' => {
                self.bump();
                let mut code = 0u32;
                for _ in 0..4 {
                    let digit = self.peek()?.to_digit(16)?;
                    self.bump();
                    code = code * 16 + digit;
                }
                return char::from_u32(code);
            }
            _ => return None,
        };
        self.bump();
        Some(decoded)
    }

    fn bare(&mut self) -> TokenKind {
        let start = self.offset;
        while let Some(ch) = self.peek() {
            if !is_bare_char(ch) {
                break;
            }
            self.bump();
        }
        classify_bare(&self.src[start..self.offset])
    }
}

fn is_bare_start(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '.' | '*' | '+' | '!' | '-' | '_' | '?' | '$' | '%' | '&' | '=' | '<' | '>' | '/' | ':' | '\'')
}

fn is_bare_char(ch: char) -> bool {
    is_bare_start(ch) || ch == '#'
}

/// How `text` lexes when written out as one bare token, or `None` when it
/// would not stay a single bare token.
pub(super) fn classify_standalone(text: &str) -> Option<TokenKind> {
    let mut chars = text.chars();
    let first = chars.next()?;
    if !is_bare_start(first) || !chars.all(is_bare_char) {
        return None;
    }
    Some(classify_bare(text))
}

fn classify_bare(text: &str) -> TokenKind {
    if let Some(rest) = text.strip_prefix(':') {
        return match qualified_name(rest) {
            Some(name) if !rest.starts_with(':') => TokenKind::Keyword(name),
            _ => invalid(text, UnexpectedReason::InvalidSymbol),
        };
    }

    match text {
        "nil" => return TokenKind::Nil,
        "true" => return TokenKind::Bool(true),
        "false" => return TokenKind::Bool(false),
        _ => {}
    }

    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned.starts_with(|c: char| c.is_ascii_digit()) {
        return number(text, unsigned);
    }

    if text.contains(':') {
        // `:` is only valid as the keyword marker.
        return invalid(text, UnexpectedReason::InvalidSymbol);
    }
    match qualified_name(text) {
        Some(name) => TokenKind::Symbol(name),
        None => invalid(text, UnexpectedReason::InvalidSymbol),
    }
}

fn qualified_name(text: &str) -> Option<QualifiedName> {
    if text.is_empty() {
        return None;
    }
    if text == "/" {
        return Some(QualifiedName::new("/"));
    }
    let mut parts = text.split('/');
    let first = parts.next()?;
    match (parts.next(), parts.next()) {
        (None, _) => Some(QualifiedName::new(first)),
        (Some(name), None) if !first.is_empty() && !name.is_empty() => {
            Some(QualifiedName::with_namespace(first, name))
        }
        _ => None,
    }
}

fn number(text: &str, unsigned: &str) -> TokenKind {
    let bytes = unsigned.as_bytes();
    let mut idx = 0;
    let digits = |idx: &mut usize| {
        let start = *idx;
        while *idx < bytes.len() && bytes[*idx].is_ascii_digit() {
            *idx += 1;
        }
        *idx - start
    };

    digits(&mut idx);
    let mut is_float = false;
    if idx < bytes.len() && bytes[idx] == b'.' {
        idx += 1;
        if digits(&mut idx) == 0 {
            return invalid(text, UnexpectedReason::InvalidNumber);
        }
        is_float = true;
    }
    if idx < bytes.len() && matches!(bytes[idx], b'e' | b'E') {
        idx += 1;
        if idx < bytes.len() && matches!(bytes[idx], b'+' | b'-') {
            idx += 1;
        }
        if digits(&mut idx) == 0 {
            return invalid(text, UnexpectedReason::InvalidNumber);
        }
        is_float = true;
    }
    if idx != bytes.len() {
        return invalid(text, UnexpectedReason::InvalidNumber);
    }

    let literal = text.strip_prefix('+').unwrap_or(text);
    if !is_float {
        if let Ok(value) = literal.parse::<i64>() {
            return TokenKind::Int(value);
        }
    }
    match literal.parse::<f64>() {
        Ok(value) if value.is_finite() => TokenKind::Float(value),
        _ => invalid(text, UnexpectedReason::InvalidNumber),
    }
}

fn invalid(text: &str, reason: UnexpectedReason) -> TokenKind {
    TokenKind::Unexpected { text: text.to_owned(), reason }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{tokenize, Position, TokenKind, UnexpectedReason};
    use crate::format::edn::QualifiedName;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).into_iter().map(|token| token.kind).collect()
    }

    #[test]
    fn tokenizes_delimiters_and_set_open_as_single_token() {
        assert_eq!(
            kinds("{ [ ( #{ } ] ) }"),
            vec![
                TokenKind::OpenBrace,
                TokenKind::OpenBracket,
                TokenKind::OpenParen,
                TokenKind::OpenSet,
                TokenKind::CloseBrace,
                TokenKind::CloseBracket,
                TokenKind::CloseParen,
                TokenKind::CloseBrace,
            ]
        );
    }

    #[test]
    fn strips_comments_whitespace_and_commas() {
        let text = "; header comment\n:a, :b ; trailing\n\n,,:c";
        assert_eq!(
            kinds(text),
            vec![
                TokenKind::Keyword(QualifiedName::new("a")),
                TokenKind::Keyword(QualifiedName::new("b")),
                TokenKind::Keyword(QualifiedName::new("c")),
            ]
        );
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = tokenize("{:a 1\n ;; note\n  :b \"x\"}");
        let positions = tokens.iter().map(|t| (t.position.line, t.position.column)).collect::<Vec<_>>();
        assert_eq!(positions, vec![(1, 1), (1, 2), (1, 5), (3, 3), (3, 6), (3, 9)]);
        assert_eq!(tokens[0].position, Position::start());
    }

    #[rstest]
    #[case("42", TokenKind::Int(42))]
    #[case("-7", TokenKind::Int(-7))]
    #[case("+3", TokenKind::Int(3))]
    #[case("1.5", TokenKind::Float(1.5))]
    #[case("-2e3", TokenKind::Float(-2000.0))]
    #[case("nil", TokenKind::Nil)]
    #[case("true", TokenKind::Bool(true))]
    #[case("false", TokenKind::Bool(false))]
    #[case("-", TokenKind::Symbol(QualifiedName::new("-")))]
    #[case("/", TokenKind::Symbol(QualifiedName::new("/")))]
    #[case("foo.bar/baz?", TokenKind::Symbol(QualifiedName::with_namespace("foo.bar", "baz?")))]
    #[case(":actor.role/customer", TokenKind::Keyword(QualifiedName::with_namespace("actor.role", "customer")))]
    #[case(":v3", TokenKind::Keyword(QualifiedName::new("v3")))]
    fn classifies_literals(#[case] text: &str, #[case] expected: TokenKind) {
        assert_eq!(kinds(text), vec![expected]);
    }

    #[test]
    fn integers_beyond_i64_become_floats() {
        assert_eq!(kinds("99999999999999999999"), vec![TokenKind::Float(1e20)]);
    }

    #[test]
    fn decodes_string_escapes() {
        assert_eq!(
            kinds(r#""a\"b\\c\n\u0041""#),
            vec![TokenKind::Str("a\"b\\c\nA".to_owned())]
        );
        assert_eq!(kinds("\"multi\nline\""), vec![TokenKind::Str("multi\nline".to_owned())]);
    }

    #[rstest]
    #[case("\"open", UnexpectedReason::UnterminatedString)]
    #[case(r#""bad \q escape""#, UnexpectedReason::InvalidEscape)]
    #[case("12abc", UnexpectedReason::InvalidNumber)]
    #[case("1.", UnexpectedReason::InvalidNumber)]
    #[case("1e", UnexpectedReason::InvalidNumber)]
    #[case(":", UnexpectedReason::InvalidSymbol)]
    #[case("::auto", UnexpectedReason::InvalidSymbol)]
    #[case(":a/b/c", UnexpectedReason::InvalidSymbol)]
    #[case("ns/", UnexpectedReason::InvalidSymbol)]
    #[case("@", UnexpectedReason::Char)]
    #[case("#x", UnexpectedReason::Char)]
    fn malformed_input_becomes_unexpected_token(
        #[case] text: &str,
        #[case] expected: UnexpectedReason,
    ) {
        let tokens = kinds(text);
        match &tokens[0] {
            TokenKind::Unexpected { reason, .. } => assert_eq!(*reason, expected),
            other => panic!("expected unexpected token for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn unexpected_tokens_do_not_stop_the_scan() {
        let tokens = kinds("@ :a");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1], TokenKind::Keyword(QualifiedName::new("a")));
    }
}
