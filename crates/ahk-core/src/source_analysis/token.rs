// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for AutoHotkey v2 lexical analysis.
//!
//! # Token Structure
//!
//! Each token consists of:
//! - A [`TokenKind`] from a closed set of keywords, operators, delimiters,
//!   literals and structural kinds
//! - The exact source text it was scanned from
//! - A byte [`Span`] and the 1-based [`Position`] of its first character
//!
//! Whitespace runs are tokens too, so the texts of a token stream always
//! concatenate back to the script. Downstream stages work on
//! [`significant_tokens`](super::significant_tokens) instead.

use ecow::EcoString;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::{Position, Span};

/// The kind of a token.
///
/// Keyword kinds are matched case-insensitively by the lexer; the original
/// spelling stays available through [`Token::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Keywords ===
    If,
    Else,
    ElseIf,
    While,
    For,
    Loop,
    Break,
    Continue,
    Return,
    Class,
    Static,
    Global,
    Local,
    Try,
    Catch,
    Finally,
    Throw,
    And,
    Or,
    Not,
    In,
    Is,
    True,
    False,
    Null,

    // === Operators ===
    /// `:=`
    Assign,
    /// `=` (comparison in v2)
    Equals,
    /// `!=`
    NotEquals,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `mod`, any case
    Modulo,
    /// `**`
    Power,
    /// `.`
    Dot,
    /// `~=`
    Match,
    /// `!~`
    NotMatch,

    // === Delimiters ===
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Colon,
    Question,
    Ampersand,
    Pipe,

    // === Literals ===
    Number,
    String,
    Identifier,
    /// An `A_`-prefixed built-in variable such as `A_ScriptDir`.
    BuiltinVar,

    // === Structural ===
    /// A hotkey or hotstring trigger including its trailing `::`.
    Hotkey,
    /// `#` followed by an alphanumeric run, e.g. `#Requires`.
    Directive,
    /// `;` to end of line.
    Comment,
    /// A run of spaces, tabs and carriage returns.
    Whitespace,
    Newline,
    Eof,
}

impl TokenKind {
    /// Looks up the keyword kind for an identifier, ignoring case.
    #[must_use]
    pub fn keyword(text: &str) -> Option<Self> {
        let kind = match text.to_ascii_lowercase().as_str() {
            "if" => Self::If,
            "else" => Self::Else,
            "elseif" => Self::ElseIf,
            "while" => Self::While,
            "for" => Self::For,
            "loop" => Self::Loop,
            "break" => Self::Break,
            "continue" => Self::Continue,
            "return" => Self::Return,
            "class" => Self::Class,
            "static" => Self::Static,
            "global" => Self::Global,
            "local" => Self::Local,
            "try" => Self::Try,
            "catch" => Self::Catch,
            "finally" => Self::Finally,
            "throw" => Self::Throw,
            "and" => Self::And,
            "or" => Self::Or,
            "not" => Self::Not,
            "in" => Self::In,
            "is" => Self::Is,
            "true" => Self::True,
            "false" => Self::False,
            "null" => Self::Null,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns true for the keyword kinds (including `true`/`false`/`null`).
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::If
                | Self::Else
                | Self::ElseIf
                | Self::While
                | Self::For
                | Self::Loop
                | Self::Break
                | Self::Continue
                | Self::Return
                | Self::Class
                | Self::Static
                | Self::Global
                | Self::Local
                | Self::Try
                | Self::Catch
                | Self::Finally
                | Self::Throw
                | Self::And
                | Self::Or
                | Self::Not
                | Self::In
                | Self::Is
                | Self::True
                | Self::False
                | Self::Null
        )
    }

    /// Returns true for the operator kinds.
    #[must_use]
    pub const fn is_operator(self) -> bool {
        matches!(
            self,
            Self::Assign
                | Self::Equals
                | Self::NotEquals
                | Self::Less
                | Self::Greater
                | Self::LessEqual
                | Self::GreaterEqual
                | Self::Plus
                | Self::Minus
                | Self::Multiply
                | Self::Divide
                | Self::Modulo
                | Self::Power
                | Self::Dot
                | Self::Match
                | Self::NotMatch
        )
    }

    /// Returns true for brackets, braces, parentheses and punctuation.
    #[must_use]
    pub const fn is_delimiter(self) -> bool {
        matches!(
            self,
            Self::LeftParen
                | Self::RightParen
                | Self::LeftBrace
                | Self::RightBrace
                | Self::LeftBracket
                | Self::RightBracket
                | Self::Comma
                | Self::Colon
                | Self::Question
                | Self::Ampersand
                | Self::Pipe
        )
    }

    /// Returns true for number and string literals.
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(self, Self::Number | Self::String)
    }

    /// Returns true for tokens the parser never sees.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }

    /// Returns true for the end-of-file marker.
    #[must_use]
    pub const fn is_eof(self) -> bool {
        matches!(self, Self::Eof)
    }

    /// Returns the upper-case kind name used in serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::ElseIf => "ELSEIF",
            Self::While => "WHILE",
            Self::For => "FOR",
            Self::Loop => "LOOP",
            Self::Break => "BREAK",
            Self::Continue => "CONTINUE",
            Self::Return => "RETURN",
            Self::Class => "CLASS",
            Self::Static => "STATIC",
            Self::Global => "GLOBAL",
            Self::Local => "LOCAL",
            Self::Try => "TRY",
            Self::Catch => "CATCH",
            Self::Finally => "FINALLY",
            Self::Throw => "THROW",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Is => "IS",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Null => "NULL",
            Self::Assign => "ASSIGN",
            Self::Equals => "EQUALS",
            Self::NotEquals => "NOT_EQUALS",
            Self::Less => "LESS_THAN",
            Self::Greater => "GREATER_THAN",
            Self::LessEqual => "LESS_EQUAL",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Multiply => "MULTIPLY",
            Self::Divide => "DIVIDE",
            Self::Modulo => "MODULO",
            Self::Power => "POWER",
            Self::Dot => "DOT",
            Self::Match => "MATCH",
            Self::NotMatch => "NOT_MATCH",
            Self::LeftParen => "LPAREN",
            Self::RightParen => "RPAREN",
            Self::LeftBrace => "LBRACE",
            Self::RightBrace => "RBRACE",
            Self::LeftBracket => "LBRACKET",
            Self::RightBracket => "RBRACKET",
            Self::Comma => "COMMA",
            Self::Colon => "COLON",
            Self::Question => "QUESTION",
            Self::Ampersand => "AMPERSAND",
            Self::Pipe => "PIPE",
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Identifier => "IDENTIFIER",
            Self::BuiltinVar => "BUILTIN_VAR",
            Self::Hotkey => "HOTKEY",
            Self::Directive => "DIRECTIVE",
            Self::Comment => "COMMENT",
            Self::Whitespace => "WHITESPACE",
            Self::Newline => "NEWLINE",
            Self::Eof => "EOF",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A positioned lexical unit.
///
/// Tokens are immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    text: EcoString,
    span: Span,
    position: Position,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(
        kind: TokenKind,
        text: impl Into<EcoString>,
        span: Span,
        position: Position,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            position,
        }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the exact source text of this token.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the byte span of this token.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the position of the token's first character.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the 1-based line of the token's first character.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.position.line
    }

    /// Returns the 1-based column of the token's first character.
    #[must_use]
    pub fn column(&self) -> u32 {
        self.position.column
    }

    /// Returns the length of the token text in characters.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    pub fn char_len(&self) -> u32 {
        self.text.chars().count() as u32
    }

    /// Returns the trigger of a hotkey token: the text before `::`, trimmed.
    ///
    /// Returns `None` for any other kind.
    #[must_use]
    pub fn hotkey_trigger(&self) -> Option<&str> {
        if self.kind != TokenKind::Hotkey {
            return None;
        }
        let trigger = self.text.strip_suffix("::").unwrap_or(&self.text);
        Some(trigger.trim())
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Token", 6)?;
        state.serialize_field("type", &self.kind)?;
        state.serialize_field("value", self.text.as_str())?;
        state.serialize_field("line", &self.position.line)?;
        state.serialize_field("column", &self.position.column)?;
        state.serialize_field("start", &self.span.start())?;
        state.serialize_field("end", &self.span.end())?;
        state.end()
    }
}
