// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for lexing and parsing.
//!
//! Errors carry source locations ([`Span`] plus a 1-based line/column) and
//! integrate with [`miette`] for rendering.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use ecow::EcoString;
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use super::{Position, Span};

/// A fatal lexical error.
///
/// This is the only failure that aborts tokenization; every caller of the
/// lexer has to turn it into a single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind} at line {line}")]
#[diagnostic(code(ahk::lex))]
pub struct LexError {
    /// The kind of lexical error.
    pub kind: LexErrorKind,
    /// The offending source range.
    #[label("here")]
    pub span: Span,
    /// The line the lexer had reached when it gave up.
    pub line: u32,
    /// The column the lexer had reached when it gave up.
    pub column: u32,
}

impl LexError {
    /// Creates a new lexical error reported at `at`.
    #[must_use]
    pub fn new(kind: LexErrorKind, span: Span, at: Position) -> Self {
        Self {
            kind,
            span,
            line: at.line,
            column: at.column,
        }
    }

    /// Creates an "unterminated string" error.
    ///
    /// `span` runs from the opening quote to the end of input and `at` is
    /// the position where input ran out.
    #[must_use]
    pub fn unterminated_string(span: Span, at: Position) -> Self {
        Self::new(LexErrorKind::UnterminatedString, span, at)
    }

    /// Returns the position the error is reported at.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A string literal had no closing `"` before end of input.
    #[error("Unterminated string")]
    UnterminatedString,
}

/// A recoverable syntax error found while parsing one statement.
///
/// The parser records the error, resynchronizes and carries on with the
/// next statement.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic, Serialize)]
#[error("{message}")]
#[diagnostic(code(ahk::parse))]
pub struct ParseError {
    /// Human-readable description.
    pub message: EcoString,
    /// 1-based line of the offending token.
    pub line: u32,
    /// 1-based column of the offending token.
    pub column: u32,
    /// Byte range of the offending token.
    #[label("here")]
    #[serde(rename = "offset", serialize_with = "serialize_span_start")]
    pub span: Span,
}

fn serialize_span_start<S: serde::Serializer>(span: &Span, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u32(span.start())
}

impl ParseError {
    /// Creates a parse error at the given location.
    #[must_use]
    pub fn new(message: impl Into<EcoString>, at: Position, span: Span) -> Self {
        Self {
            message: message.into(),
            line: at.line,
            column: at.column,
            span,
        }
    }

    /// Returns the position of the offending token.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns the byte offset of the offending token.
    #[must_use]
    pub fn offset(&self) -> u32 {
        self.span.start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display_names_line() {
        let err = LexError::unterminated_string(Span::new(5, 12), Position::new(3, 8));
        assert_eq!(err.to_string(), "Unterminated string at line 3");
        assert_eq!(err.position(), Position::new(3, 8));
        assert_eq!(err.span, Span::new(5, 12));
    }

    #[test]
    fn parse_error_accessors() {
        let err = ParseError::new("Unexpected token: )", Position::new(2, 4), Span::new(9, 10));
        assert_eq!(err.to_string(), "Unexpected token: )");
        assert_eq!(err.position(), Position::new(2, 4));
        assert_eq!(err.offset(), 9);
    }

    #[test]
    fn parse_error_serializes_location() {
        let err = ParseError::new("oops", Position::new(1, 2), Span::new(1, 2));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["message"], "oops");
        assert_eq!(json["line"], 1);
        assert_eq!(json["column"], 2);
        assert_eq!(json["offset"], 1);
    }
}
