// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexing and parsing of AutoHotkey v2 source code.
//!
//! **DDD Context:** Source Analysis
//!
//! # Lexical Analysis
//!
//! [`tokenize`] converts source text into a lossless stream of [`Token`]s.
//! Each token carries its byte [`Span`] and the 1-based [`Position`] of its
//! first character.
//!
//! ```
//! use ahk_core::source_analysis::{TokenKind, tokenize};
//!
//! let tokens = tokenize("x := 1").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind()).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Identifier,
//!         TokenKind::Whitespace,
//!         TokenKind::Assign,
//!         TokenKind::Whitespace,
//!         TokenKind::Number,
//!         TokenKind::Eof,
//!     ]
//! );
//! ```
//!
//! # Parsing
//!
//! [`parse`] turns source into a [`Program`](crate::ast::Program). Parsing is
//! recursive descent with precedence climbing for binary operators (see the
//! [`parser`] module). Syntax errors never abort the parse: each one is
//! recorded as a [`ParseError`] and the parser resynchronizes at the next
//! statement boundary.
//!
//! # Error Handling
//!
//! The only fatal error is a [`LexError`] for an unterminated string.

mod error;
mod lexer;
pub mod parser;
mod position;
mod span;
mod token;


pub use error::{LexError, LexErrorKind, ParseError};
pub use lexer::{Lexer, significant_tokens, tokenize};
pub use parser::{ParseOutput, parse, parse_tokens};
pub use position::Position;
pub use span::Span;
pub use token::{Token, TokenKind};
